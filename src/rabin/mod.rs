// Rabin cipher engine
// Number-theoretic primitives, parameter validation and block operations

pub mod cipher;
pub mod modular;
pub mod params;
pub mod primality;
pub mod roots;

pub use cipher::{decrypt, decrypt_block, encrypt, encrypt_block};
pub use params::{validate_parameters, RabinParams};
pub use primality::{is_blum_prime, is_prime};
pub use roots::quadratic_roots;
