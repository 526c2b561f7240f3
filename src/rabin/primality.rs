// Probabilistic primality testing
// Miller-Rabin witness test used to validate cipher parameters

use num_bigint::{BigInt, RandBigInt};
use num_integer::Integer;
use num_traits::One;
use rand::thread_rng;

use super::modular::fast_pow;

/// Number of Miller-Rabin rounds. Each round has a false-positive chance of
/// at most 1/4, so 20 rounds bound the error probability by 4^-20.
const MILLER_RABIN_ROUNDS: u32 = 20;

/// Miller-Rabin primality test with a fixed round count.
///
/// Exact for n <= 3; even n > 2 is rejected immediately. Witness bases are
/// drawn uniformly from [2, n-2] using the thread-local CSPRNG, one fresh
/// source per call. A composite verdict is certain; a prime verdict is
/// probabilistic with error at most 4^-20.
pub fn is_prime(n: &BigInt) -> bool {
    let one = BigInt::one();
    let two = BigInt::from(2);
    let three = BigInt::from(3);

    if n <= &one {
        return false;
    }
    if n == &two || n == &three {
        return true;
    }
    if n.is_even() {
        return false;
    }

    // Write n-1 as 2^s * t with t odd
    let n_minus_1: BigInt = n - 1;
    let mut t = n_minus_1.clone();
    let mut s = 0u64;
    while t.is_even() {
        t >>= 1;
        s += 1;
    }

    let mut rng = thread_rng();

    'witness: for _ in 0..MILLER_RABIN_ROUNDS {
        // Random base a in [2, n-2]
        let a = rng.gen_bigint_range(&two, &n_minus_1);

        let mut x = fast_pow(&a, &t, n);
        if x == one || x == n_minus_1 {
            continue;
        }

        for _ in 1..s {
            x = fast_pow(&x, &two, n);
            if x == one {
                // Non-trivial square root of 1 mod n: n is composite
                return false;
            }
            if x == n_minus_1 {
                continue 'witness;
            }
        }

        return false;
    }

    true
}

/// Returns true when p is usable as a Rabin prime: prime and p = 3 (mod 4).
pub fn is_blum_prime(p: &BigInt) -> bool {
    if !is_prime(p) {
        return false;
    }
    p.mod_floor(&BigInt::from(4)) == BigInt::from(3)
}
