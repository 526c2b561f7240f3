// Four square roots of the decryption discriminant modulo n = p * q
// CRT combination of the per-prime roots

use num_bigint::BigInt;
use num_integer::Integer;

use super::modular::{extended_euclidean, modular_sqrt};
use crate::error::Result;

/// Returns the four integers d in [0, n) with d^2 = b^2 + 4c (mod n),
/// where n = p * q.
///
/// The discriminant D = (b^2 + 4c) mod n has one square root modulo each
/// prime (up to sign), so the 2 x 2 sign combinations lift to four roots
/// modulo n via the Chinese Remainder Theorem. The Bezout weights come from
/// `extended_euclidean(p, q)`, which satisfies y_p * p + y_q * q = 1 for
/// distinct primes.
///
/// The four roots are distinct whenever D is coprime to n; a discriminant
/// divisible by p or q collapses pairs of them. If D is not a quadratic
/// residue the returned values do not square back to D (see
/// [`modular_sqrt`](super::modular::modular_sqrt)).
///
/// # Errors
/// Propagates [`Error::NonBlumModulus`](crate::error::Error::NonBlumModulus)
/// when p or q is not congruent to 3 mod 4, and
/// [`Error::ZeroArgument`](crate::error::Error::ZeroArgument) for a zero
/// modulus.
pub fn quadratic_roots(c: &BigInt, b: &BigInt, p: &BigInt, q: &BigInt) -> Result<[BigInt; 4]> {
    let n = p * q;
    let discriminant: BigInt = (b * b + 4i32 * c).mod_floor(&n);

    let r_p = modular_sqrt(&discriminant, p)?;
    let r_q = modular_sqrt(&discriminant, q)?;

    let (y_p, y_q) = extended_euclidean(p, q)?;

    let term1 = &y_p * p * &r_q;
    let term2 = &y_q * q * &r_p;

    let d1 = (&term1 + &term2).mod_floor(&n);
    let d2 = (&n - &d1).mod_floor(&n);
    let d3 = (&term1 - &term2).mod_floor(&n);
    let d4 = (&n - &d3).mod_floor(&n);

    Ok([d1, d2, d3, d4])
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    fn check_roots(c: u64, b: u64, p: u64, q: u64) -> [BigInt; 4] {
        let (c, b, p, q) = (
            BigInt::from(c),
            BigInt::from(b),
            BigInt::from(p),
            BigInt::from(q),
        );
        let n = &p * &q;
        let discriminant = (&b * &b + 4i32 * &c).mod_floor(&n);
        let roots = quadratic_roots(&c, &b, &p, &q).unwrap();
        for d in &roots {
            assert!(*d >= BigInt::zero() && *d < n, "root {} outside [0, n)", d);
            assert_eq!(
                (d * d).mod_floor(&n),
                discriminant,
                "root {} does not square to the discriminant",
                d
            );
        }
        roots
    }

    #[test]
    fn test_four_roots_square_to_discriminant() {
        check_roots(31, 3, 7, 11);
        check_roots(581, 580, 19, 31);
        check_roots(1_005_000, 5, 1019, 1031);
    }

    #[test]
    fn test_roots_distinct_for_coprime_discriminant() {
        // p = 1019, q = 1031, c = encrypt(17, b = 5): D = 25 + 4 * 374 is
        // coprime to n, so all four roots are distinct
        let roots = check_roots(374, 5, 1019, 1031);
        for i in 0..4 {
            for j in (i + 1)..4 {
                assert_ne!(roots[i], roots[j], "roots {} and {} coincide", i, j);
            }
        }
    }

    #[test]
    fn test_roots_come_in_negated_pairs() {
        let n = BigInt::from(1019 * 1031);
        let roots = check_roots(374, 5, 1019, 1031);
        assert_eq!((&roots[0] + &roots[1]).mod_floor(&n), BigInt::zero());
        assert_eq!((&roots[2] + &roots[3]).mod_floor(&n), BigInt::zero());
    }

    #[test]
    fn test_zero_discriminant_collapses_to_zero_roots() {
        // c = 0, b = 0: D = 0, every root is 0 and stays inside [0, n)
        let roots = check_roots(0, 0, 7, 11);
        for d in &roots {
            assert!(d.is_zero());
        }
    }

    #[test]
    fn test_rejects_non_blum_prime() {
        // 13 = 1 (mod 4)
        let err = quadratic_roots(
            &BigInt::from(5),
            &BigInt::from(1),
            &BigInt::from(13),
            &BigInt::from(7),
        )
        .unwrap_err();
        assert!(matches!(err, crate::error::Error::NonBlumModulus { .. }));
    }
}
