// Fixed-width conversion between big integers and byte blocks
// Reproduces the storage format of the cipher file boundary: plaintext as
// single bytes, ciphertext as little-endian groups sized from the modulus

use num_bigint::{BigInt, Sign};
use num_traits::{One, ToPrimitive, Zero};

use crate::error::{Error, Result};

/// Derives the ciphertext block width in bytes from the modulus n.
///
/// The width is the length of the minimal little-endian two's-complement
/// style encoding of n - 1: the magnitude bytes, plus one zero sign byte
/// when the top magnitude byte has its high bit set. Never less than 1.
/// Every ciphertext block lies in [0, n), so each fits in this many bytes.
pub fn block_width(n: &BigInt) -> usize {
    let max_value: BigInt = n - 1;
    let bytes = max_value.magnitude().to_bytes_le();
    let mut width = bytes.len();
    if bytes[width - 1] & 0x80 != 0 {
        width += 1;
    }
    width.max(1)
}

/// Widens file bytes into plaintext blocks, one block per byte.
pub fn bytes_to_plain_blocks(bytes: &[u8]) -> Vec<BigInt> {
    bytes.iter().map(|&b| BigInt::from(b)).collect()
}

/// Narrows decrypted blocks back into file bytes.
///
/// # Errors
/// Returns [`Error::PlaintextOutOfRange`] for any block outside [0, 256);
/// a decrypted sequence containing such a block must not be silently
/// truncated into a shorter file.
pub fn plain_blocks_to_bytes(blocks: &[BigInt]) -> Result<Vec<u8>> {
    blocks
        .iter()
        .map(|m| {
            m.to_u8().ok_or_else(|| Error::PlaintextOutOfRange {
                value: m.clone(),
                limit: BigInt::from(256),
            })
        })
        .collect()
}

/// Packs ciphertext blocks into fixed-width little-endian byte groups.
///
/// Each block contributes exactly `width` bytes: its magnitude little-endian,
/// zero-padded at the top.
///
/// # Errors
/// Returns [`Error::CiphertextOutOfRange`] for a negative block or one whose
/// magnitude does not fit in `width` bytes; the limit reported is
/// 2^(8 * width).
pub fn cipher_blocks_to_bytes(blocks: &[BigInt], width: usize) -> Result<Vec<u8>> {
    let group_limit = || BigInt::one() << (8 * width);
    let mut out = Vec::with_capacity(blocks.len() * width);
    for c in blocks {
        if c < &BigInt::zero() {
            return Err(Error::CiphertextOutOfRange {
                value: c.clone(),
                limit: group_limit(),
            });
        }
        let bytes = c.magnitude().to_bytes_le();
        // to_bytes_le emits a single zero byte for zero
        let significant = if c.is_zero() { 0 } else { bytes.len() };
        if significant > width {
            return Err(Error::CiphertextOutOfRange {
                value: c.clone(),
                limit: group_limit(),
            });
        }
        out.extend_from_slice(&bytes[..significant]);
        out.resize(out.len() + width - significant, 0);
    }
    Ok(out)
}

/// Unpacks fixed-width little-endian byte groups into ciphertext blocks.
///
/// Every group is read as an unsigned value: a final byte with its high bit
/// set is a sign artifact of the storage format and zero-extends to the same
/// non-negative number.
///
/// # Errors
/// Returns [`Error::CiphertextSizeMismatch`] unless the byte length is an
/// exact multiple of `width`; a remainder means the data is corrupt or was
/// produced under different parameters.
pub fn bytes_to_cipher_blocks(bytes: &[u8], width: usize) -> Result<Vec<BigInt>> {
    if bytes.len() % width != 0 {
        return Err(Error::CiphertextSizeMismatch {
            length: bytes.len(),
            width,
        });
    }
    Ok(bytes
        .chunks_exact(width)
        .map(|group| BigInt::from_bytes_le(Sign::Plus, group))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_width_from_modulus() {
        // n - 1 = 76: one byte, high bit clear
        assert_eq!(block_width(&BigInt::from(77)), 1);
        // n - 1 = 128: the high bit forces a sign byte
        assert_eq!(block_width(&BigInt::from(129)), 2);
        assert_eq!(block_width(&BigInt::from(201)), 2);
        // n - 1 = 1050588 = 0x1007DC
        assert_eq!(block_width(&BigInt::from(1019 * 1031)), 3);
        // degenerate modulus still yields one byte
        assert_eq!(block_width(&BigInt::from(1)), 1);
    }

    #[test]
    fn test_plain_block_conversions() {
        let bytes = [0u8, 1, 127, 128, 255];
        let blocks = bytes_to_plain_blocks(&bytes);
        assert_eq!(blocks[3], BigInt::from(128));
        assert_eq!(plain_blocks_to_bytes(&blocks).unwrap(), bytes);
    }

    #[test]
    fn test_plain_blocks_reject_non_byte_values() {
        for bad in [BigInt::from(-1), BigInt::from(256)] {
            let err = plain_blocks_to_bytes(&[bad]).unwrap_err();
            assert!(matches!(err, Error::PlaintextOutOfRange { .. }));
        }
    }

    #[test]
    fn test_cipher_group_packing() {
        let blocks = [BigInt::from(0x1007DC), BigInt::from(5), BigInt::from(0)];
        let packed = cipher_blocks_to_bytes(&blocks, 3).unwrap();
        assert_eq!(packed, hex::decode("dc0710050000000000").unwrap());
        assert_eq!(bytes_to_cipher_blocks(&packed, 3).unwrap(), blocks);
    }

    #[test]
    fn test_sign_artifact_group_reads_as_unsigned() {
        // 0x81 with width 1 would be negative in a signed reading; the codec
        // zero-extends it to 129
        let blocks = bytes_to_cipher_blocks(&[0x81], 1).unwrap();
        assert_eq!(blocks, vec![BigInt::from(129)]);
        // and packing 129 into two bytes restores the artifact byte plus the
        // zero extension
        assert_eq!(
            cipher_blocks_to_bytes(&blocks, 2).unwrap(),
            hex::decode("8100").unwrap()
        );
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let err = bytes_to_cipher_blocks(&[1, 2, 3, 4, 5], 2).unwrap_err();
        match err {
            Error::CiphertextSizeMismatch { length, width } => {
                assert_eq!(length, 5);
                assert_eq!(width, 2);
            }
            other => panic!("expected CiphertextSizeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_oversize_and_negative_blocks_rejected() {
        // 256 needs two bytes
        let err = cipher_blocks_to_bytes(&[BigInt::from(256)], 1).unwrap_err();
        match err {
            Error::CiphertextOutOfRange { limit, .. } => assert_eq!(limit, BigInt::from(256)),
            other => panic!("expected CiphertextOutOfRange, got {:?}", other),
        }
        assert!(matches!(
            cipher_blocks_to_bytes(&[BigInt::from(-1)], 4),
            Err(Error::CiphertextOutOfRange { .. })
        ));
    }

    #[test]
    fn test_empty_sequences() {
        assert!(bytes_to_plain_blocks(&[]).is_empty());
        assert!(cipher_blocks_to_bytes(&[], 3).unwrap().is_empty());
        assert!(bytes_to_cipher_blocks(&[], 3).unwrap().is_empty());
    }
}
