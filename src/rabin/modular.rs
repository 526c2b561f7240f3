// Modular arithmetic primitives
// Fast exponentiation, extended Euclidean algorithm and modular square roots

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{Error, Result};

/// Computes a^z mod n by iterative square-and-multiply.
///
/// The base is reduced into [0, n) before the loop, so the result is always
/// non-negative for a positive modulus. The exponent is assumed non-negative;
/// a zero or negative exponent yields 1.
pub fn fast_pow(a: &BigInt, z: &BigInt, n: &BigInt) -> BigInt {
    let mut result = BigInt::one();
    let mut base = a.mod_floor(n);
    let mut exp = z.clone();
    let zero = BigInt::zero();

    while exp > zero {
        if exp.is_odd() {
            result = (&result * &base) % n;
        }
        exp >>= 1;
        base = (&base * &base) % n;
    }

    result
}

/// Iterative extended Euclidean algorithm.
///
/// Returns the Bezout pair (x, y) with x*a + y*b = gcd(a, b), tracking the
/// coefficient pairs alongside the remainder sequence.
///
/// # Errors
/// Returns [`Error::ZeroArgument`] if either input is zero.
pub fn extended_euclidean(a: &BigInt, b: &BigInt) -> Result<(BigInt, BigInt)> {
    if a.is_zero() || b.is_zero() {
        return Err(Error::ZeroArgument);
    }

    let mut d0 = a.clone();
    let mut d1 = b.clone();
    let mut x0 = BigInt::one();
    let mut x1 = BigInt::zero();
    let mut y0 = BigInt::zero();
    let mut y1 = BigInt::one();

    while !d1.is_zero() {
        let quot = &d0 / &d1;
        let d2 = &d0 % &d1;
        let x2 = &x0 - &quot * &x1;
        let y2 = &y0 - &quot * &y1;

        d0 = d1;
        d1 = d2;
        x0 = x1;
        x1 = x2;
        y0 = y1;
        y1 = y2;
    }

    Ok((x0, y0))
}

/// Modular square root for a modulus p with p = 3 (mod 4).
///
/// Computes D^((p+1)/4) mod p, which squares back to D exactly when D is a
/// quadratic residue mod p. No residue check is performed: for a non-residue
/// the returned value is simply not a root, and verifying the square is the
/// caller's responsibility.
///
/// # Errors
/// Returns [`Error::NonBlumModulus`] if p is not congruent to 3 mod 4.
pub fn modular_sqrt(d: &BigInt, p: &BigInt) -> Result<BigInt> {
    let four = BigInt::from(4);
    if p.mod_floor(&four) != BigInt::from(3) {
        return Err(Error::NonBlumModulus { modulus: p.clone() });
    }

    let exponent = (p + 1) / four;
    Ok(fast_pow(d, &exponent, p))
}
