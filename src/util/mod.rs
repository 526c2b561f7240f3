// External-boundary helpers: byte codec and file plumbing

pub mod block_codec;
pub mod file_ops;

pub use block_codec::block_width;
pub use file_ops::{decrypt_file, encrypt_file, FileSummary};
