// Rabin block encryption and decryption
// Evaluates the public polynomial f(m) = m^2 + b*m (mod n) and inverts it
// through the four-root disambiguation procedure

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;
use tracing::warn;

use super::params::RabinParams;
use super::roots::quadratic_roots;
use crate::error::{Error, Result};

/// Upper bound (exclusive) of the plaintext block domain: one byte per block.
const BLOCK_DOMAIN: u32 = 256;

/// Encrypts a single plaintext block: c = m * (m + b) mod n.
///
/// The plaintext domain is [0, min(n, 256)): one byte per block, further
/// clamped by the modulus when n itself is small. Keeping the bound explicit
/// here is what makes the four-way disambiguation in [`decrypt_block`]
/// deterministic.
///
/// # Errors
/// Returns [`Error::PlaintextOutOfRange`] when m falls outside the domain.
pub fn encrypt_block(m: &BigInt, params: &RabinParams) -> Result<BigInt> {
    let n = params.modulus();
    let limit = n.clone().min(BigInt::from(BLOCK_DOMAIN));
    if m < &BigInt::zero() || m >= &limit {
        return Err(Error::PlaintextOutOfRange {
            value: m.clone(),
            limit,
        });
    }

    Ok((m * (m + &params.b)).mod_floor(&n))
}

/// Decrypts a single ciphertext block.
///
/// Obtains the four candidate roots d of the discriminant and maps each one
/// back through m = (d - b) / 2 mod n:
///
/// - the difference d - b gets n added when odd, which restores evenness
///   because n is odd for valid parameters;
/// - a difference that stays odd afterwards can only mean an even modulus,
///   i.e. malformed parameters that bypassed validation; the candidate is
///   logged and skipped rather than propagated;
/// - the first candidate (in solver order) whose m lands in [0, 256) is the
///   answer.
///
/// `Ok(None)` means no candidate mapped to a byte value; sequence decryption
/// turns that into a fatal [`Error::DecryptionFailed`]. When a later
/// candidate maps to a different in-range byte the selection is ambiguous
/// (possible only for small moduli or b within 511 of n); the deterministic
/// first-match rule still applies and the collision is logged.
///
/// # Errors
/// Returns [`Error::CiphertextOutOfRange`] when c is outside [0, n).
pub fn decrypt_block(c: &BigInt, params: &RabinParams) -> Result<Option<BigInt>> {
    let n = params.modulus();
    if c < &BigInt::zero() || c >= &n {
        return Err(Error::CiphertextOutOfRange {
            value: c.clone(),
            limit: n,
        });
    }

    let limit = BigInt::from(BLOCK_DOMAIN);
    let mut message: Option<BigInt> = None;

    for d in quadratic_roots(c, &params.b, &params.p, &params.q)? {
        let mut term = &d - &params.b;
        if term.is_odd() {
            term += &n;
        }
        if term.is_odd() {
            warn!(%term, root = %d, b = %params.b, "candidate stayed odd after parity correction; skipping");
            continue;
        }

        let m: BigInt = (term / 2i32).mod_floor(&n);
        if m >= BigInt::zero() && m < limit {
            match &message {
                None => message = Some(m),
                Some(first) if *first != m => {
                    warn!(chosen = %first, also = %m, "ambiguous decryption; keeping the first candidate");
                }
                Some(_) => {}
            }
        }
    }

    Ok(message)
}

/// Encrypts an ordered block sequence, preserving order.
pub fn encrypt(blocks: &[BigInt], params: &RabinParams) -> Result<Vec<BigInt>> {
    blocks.iter().map(|m| encrypt_block(m, params)).collect()
}

/// Decrypts an ordered block sequence, preserving order.
///
/// # Errors
/// A block with no byte-range candidate fails the whole batch with
/// [`Error::DecryptionFailed`] naming the 1-based index of the offending
/// block.
pub fn decrypt(blocks: &[BigInt], params: &RabinParams) -> Result<Vec<BigInt>> {
    blocks
        .iter()
        .enumerate()
        .map(|(i, c)| {
            decrypt_block(c, params)?.ok_or_else(|| Error::DecryptionFailed {
                index: i + 1,
                ciphertext: c.clone(),
            })
        })
        .collect()
}

impl RabinParams {
    /// Encrypts one block under these parameters. See [`encrypt_block`].
    pub fn encrypt_block(&self, m: &BigInt) -> Result<BigInt> {
        encrypt_block(m, self)
    }

    /// Decrypts one block under these parameters. See [`decrypt_block`].
    pub fn decrypt_block(&self, c: &BigInt) -> Result<Option<BigInt>> {
        decrypt_block(c, self)
    }

    /// Encrypts a block sequence under these parameters. See [`encrypt`].
    pub fn encrypt(&self, blocks: &[BigInt]) -> Result<Vec<BigInt>> {
        encrypt(blocks, self)
    }

    /// Decrypts a block sequence under these parameters. See [`decrypt`].
    pub fn decrypt(&self, blocks: &[BigInt]) -> Result<Vec<BigInt>> {
        decrypt(blocks, self)
    }
}
