//! Rabin public-key byte-block cipher.
//!
//! Encrypts and decrypts files one byte-block at a time under parameters
//! (p, q, b) with p and q prime and congruent to 3 mod 4. The engine is
//! purely number-theoretic: Miller-Rabin primality testing, modular
//! exponentiation, the extended Euclidean algorithm, and CRT combination of
//! the four square roots that make Rabin decryption ambiguous. Constraining
//! each plaintext block to a single byte is what lets decryption pick the
//! unique in-range root deterministically.
//!
//! ```no_run
//! use num_bigint::BigInt;
//! use rabin_cipher::rabin::RabinParams;
//!
//! # fn main() -> rabin_cipher::error::Result<()> {
//! let params = RabinParams::new(BigInt::from(7), BigInt::from(11), BigInt::from(3))?;
//! let c = params.encrypt_block(&BigInt::from(65))?;
//! assert_eq!(c, BigInt::from(31));
//! assert_eq!(params.decrypt_block(&c)?, Some(BigInt::from(65)));
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod error;
pub mod rabin;
pub mod util;

pub use error::{Error, Result};
pub use rabin::RabinParams;
