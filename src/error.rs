// Error types for the Rabin cipher library
// One taxonomy shared by the engine, the codec and the file layer

use std::fmt;

use num_bigint::BigInt;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the Rabin cipher library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// One or more parameter rules were violated; the report lists all of them.
    #[error("invalid cipher parameters: {0}")]
    InvalidParameters(ParameterReport),

    /// A plaintext block falls outside the representable byte range.
    #[error("plaintext block {value} is outside the valid range [0, {limit})")]
    PlaintextOutOfRange { value: BigInt, limit: BigInt },

    /// A ciphertext block falls outside its valid domain.
    #[error("ciphertext block {value} is outside the valid range [0, {limit})")]
    CiphertextOutOfRange { value: BigInt, limit: BigInt },

    /// No candidate square root mapped to a byte value; fatal for the batch.
    #[error(
        "decryption failed for block {index} (ciphertext {ciphertext}): \
         no square root maps to a byte value; check parameters or file integrity"
    )]
    DecryptionFailed { index: usize, ciphertext: BigInt },

    /// The extended Euclidean algorithm received a zero argument.
    #[error("extended Euclidean algorithm requires non-zero arguments")]
    ZeroArgument,

    /// The closed-form modular square root needs a modulus congruent to 3 mod 4.
    #[error("modular square root requires a modulus congruent to 3 mod 4, got {modulus}")]
    NonBlumModulus { modulus: BigInt },

    /// A ciphertext byte stream does not divide evenly into blocks.
    #[error(
        "ciphertext length {length} is not a multiple of the block width {width}; \
         the data is corrupt or was produced with different parameters"
    )]
    CiphertextSizeMismatch { length: usize, width: usize },

    /// Underlying file I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single violated parameter rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParameterViolation {
    #[error("p must be an integer greater than 1")]
    PTooSmall,
    #[error("p is composite")]
    PComposite,
    #[error("p must leave remainder 3 when divided by 4")]
    PWrongResidue,
    #[error("q must be an integer greater than 1")]
    QTooSmall,
    #[error("q is composite")]
    QComposite,
    #[error("q must leave remainder 3 when divided by 4")]
    QWrongResidue,
    #[error("p and q must be distinct")]
    EqualPrimes,
    #[error("b must be non-negative")]
    BNegative,
    #[error("b must be less than p * q")]
    BExceedsModulus,
}

/// Every rule violated by a parameter set, in checking order.
///
/// Validation never stops at the first failure, so a single report shows the
/// caller everything that is wrong with p, q and b at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterReport {
    violations: Vec<ParameterViolation>,
}

impl ParameterReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: ParameterViolation) {
        self.violations.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[ParameterViolation] {
        &self.violations
    }

    /// Converts an empty report into `Ok(())` and a non-empty one into
    /// [`Error::InvalidParameters`].
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidParameters(self))
        }
    }
}

impl fmt::Display for ParameterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.violations.is_empty() {
            return write!(f, "no violations");
        }
        let joined = self
            .violations
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", joined)
    }
}
