// File-level plumbing for the cipher
// Whole-file read/write and the encrypt/decrypt orchestration between the
// byte codec and the block engine

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use super::block_codec;
use crate::error::Result;
use crate::rabin::RabinParams;

/// Outcome of a whole-file operation, for presentation by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub blocks: usize,
    pub block_width: usize,
}

/// Read entire file into memory.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    Ok(data)
}

/// Write data to file, replacing any existing content.
pub fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    Ok(())
}

/// Encrypts a plaintext file: each input byte becomes one fixed-width
/// ciphertext group in the output file. An empty input yields an empty
/// output.
pub fn encrypt_file(input: &Path, output: &Path, params: &RabinParams) -> Result<FileSummary> {
    let plaintext = read_file(input)?;
    let width = block_codec::block_width(&params.modulus());
    debug!(
        input = %input.display(),
        bytes = plaintext.len(),
        block_width = width,
        "encrypting file"
    );

    let blocks = block_codec::bytes_to_plain_blocks(&plaintext);
    let ciphertext = params.encrypt(&blocks)?;
    debug!(blocks = %preview_blocks(&ciphertext), "ciphertext blocks");
    let packed = block_codec::cipher_blocks_to_bytes(&ciphertext, width)?;
    write_file(output, &packed)?;

    Ok(FileSummary {
        input_bytes: plaintext.len() as u64,
        output_bytes: packed.len() as u64,
        blocks: blocks.len(),
        block_width: width,
    })
}

/// Decrypts a ciphertext file written by [`encrypt_file`] under the same
/// parameters. The input length must divide evenly into fixed-width groups;
/// anything else is rejected before any block is touched.
pub fn decrypt_file(input: &Path, output: &Path, params: &RabinParams) -> Result<FileSummary> {
    let ciphertext = read_file(input)?;
    let width = block_codec::block_width(&params.modulus());
    debug!(
        input = %input.display(),
        bytes = ciphertext.len(),
        block_width = width,
        "decrypting file"
    );

    let blocks = block_codec::bytes_to_cipher_blocks(&ciphertext, width)?;
    debug!(blocks = %preview_blocks(&blocks), "ciphertext blocks");
    let plaintext = params.decrypt(&blocks)?;
    let bytes = block_codec::plain_blocks_to_bytes(&plaintext)?;
    write_file(output, &bytes)?;

    Ok(FileSummary {
        input_bytes: ciphertext.len() as u64,
        output_bytes: bytes.len() as u64,
        blocks: blocks.len(),
        block_width: width,
    })
}

/// Space-joined view of the first blocks of a sequence, for debug logging.
fn preview_blocks(blocks: &[num_bigint::BigInt]) -> String {
    const PREVIEW: usize = 8;
    let mut joined = blocks
        .iter()
        .take(PREVIEW)
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    if blocks.len() > PREVIEW {
        joined.push_str(" ...");
    }
    joined
}

/// Format file size for display.
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
