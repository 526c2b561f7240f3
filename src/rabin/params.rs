// Cipher parameter set and aggregated validation

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::One;

use super::primality::is_prime;
use crate::error::{ParameterReport, ParameterViolation, Result};

/// A Rabin parameter set (p, q, b).
///
/// The modulus n = p * q is always derived from the primes via
/// [`modulus`](Self::modulus) and never stored, so it cannot drift out of
/// sync with them. [`RabinParams::new`] is the sanctioned constructor and
/// rejects any set that violates a rule; the fields stay public so tests can
/// assemble deliberately malformed sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RabinParams {
    pub p: BigInt,
    pub q: BigInt,
    pub b: BigInt,
}

impl RabinParams {
    /// Validates (p, q, b) and builds the parameter set.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameters`](crate::error::Error::InvalidParameters)
    /// carrying every violated rule at once.
    pub fn new(p: BigInt, q: BigInt, b: BigInt) -> Result<Self> {
        validate_parameters(&p, &q, &b).into_result()?;
        Ok(Self { p, q, b })
    }

    /// The public modulus n = p * q.
    pub fn modulus(&self) -> BigInt {
        &self.p * &self.q
    }
}

/// Checks every parameter rule and reports all violations together.
///
/// Validation never stops at the first broken rule: a caller fixing their
/// inputs sees the whole picture in one pass. Rules, in checking order:
///
/// - p > 1, prime, and p = 3 (mod 4);
/// - q > 1, distinct from p, prime, and q = 3 (mod 4);
/// - 0 <= b < p * q (the upper bound is only checked once p and q are both
///   greater than 1, since p * q is meaningless otherwise).
pub fn validate_parameters(p: &BigInt, q: &BigInt, b: &BigInt) -> ParameterReport {
    let one = BigInt::one();
    let four = BigInt::from(4);
    let three = BigInt::from(3);
    let mut report = ParameterReport::new();

    if p <= &one {
        report.push(ParameterViolation::PTooSmall);
    } else {
        if !is_prime(p) {
            report.push(ParameterViolation::PComposite);
        }
        if p.mod_floor(&four) != three {
            report.push(ParameterViolation::PWrongResidue);
        }
    }

    if q <= &one {
        report.push(ParameterViolation::QTooSmall);
    } else {
        if p == q {
            report.push(ParameterViolation::EqualPrimes);
        }
        if !is_prime(q) {
            report.push(ParameterViolation::QComposite);
        }
        if q.mod_floor(&four) != three {
            report.push(ParameterViolation::QWrongResidue);
        }
    }

    if b.sign() == num_bigint::Sign::Minus {
        report.push(ParameterViolation::BNegative);
    } else if p > &one && q > &one && b >= &(p * q) {
        report.push(ParameterViolation::BExceedsModulus);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violations(p: i64, q: i64, b: i64) -> Vec<ParameterViolation> {
        validate_parameters(&BigInt::from(p), &BigInt::from(q), &BigInt::from(b))
            .violations()
            .to_vec()
    }

    #[test]
    fn test_accepts_valid_parameters() {
        assert!(violations(7, 11, 3).is_empty());
        assert!(violations(1019, 1031, 5).is_empty());
        // b = 0 is a legitimate pure-squaring cipher
        assert!(violations(7, 11, 0).is_empty());
    }

    #[test]
    fn test_composite_p_reports_only_p_rules() {
        // p = 8 is composite and 8 = 0 (mod 4); q and b are fine and must
        // not be mentioned
        assert_eq!(
            violations(8, 11, 3),
            vec![
                ParameterViolation::PComposite,
                ParameterViolation::PWrongResidue
            ]
        );
    }

    #[test]
    fn test_wrong_residue_class() {
        // 13 is prime but 13 = 1 (mod 4)
        assert_eq!(violations(13, 11, 3), vec![ParameterViolation::PWrongResidue]);
        assert_eq!(violations(7, 13, 3), vec![ParameterViolation::QWrongResidue]);
    }

    #[test]
    fn test_equal_primes() {
        assert_eq!(violations(7, 7, 3), vec![ParameterViolation::EqualPrimes]);
    }

    #[test]
    fn test_b_range() {
        assert_eq!(violations(7, 11, -1), vec![ParameterViolation::BNegative]);
        // n = 77
        assert_eq!(violations(7, 11, 77), vec![ParameterViolation::BExceedsModulus]);
        assert!(violations(7, 11, 76).is_empty());
    }

    #[test]
    fn test_all_bad_inputs_accumulate_every_rule() {
        assert_eq!(
            violations(1, 4, -2),
            vec![
                ParameterViolation::PTooSmall,
                ParameterViolation::QComposite,
                ParameterViolation::QWrongResidue,
                ParameterViolation::BNegative
            ]
        );
    }

    #[test]
    fn test_b_bound_skipped_when_modulus_undefined() {
        // p = 1 invalidates the modulus, so b = 100 cannot be range-checked
        assert_eq!(violations(1, 11, 100), vec![ParameterViolation::PTooSmall]);
    }

    #[test]
    fn test_constructor_round_trip() {
        let params =
            RabinParams::new(BigInt::from(7), BigInt::from(11), BigInt::from(3)).unwrap();
        assert_eq!(params.modulus(), BigInt::from(77));

        let err = RabinParams::new(BigInt::from(8), BigInt::from(11), BigInt::from(3))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::InvalidParameters(_)
        ));
    }
}
