//! Prime fields with a runtime modulus.
//!
//! Elements are plain `u32` residues in `[0, p)`. All operations go through
//! the [`PrimeField`] value, in the style of a ring object: `field.mul(a, b)`.

use rand::Rng;
use std::fmt;
use thiserror::Error;

/// Exclusive upper bound on supported primes.
///
/// Every accepted prime satisfies `p² < 2^61`.
pub const MAX_PRIME: u32 = 1_518_500_213;

/// Number of products accumulated in a `u64` before reducing.
///
/// `8 * (p - 1)² + p < 2^64` for every `p < MAX_PRIME`.
const DOT_CHUNK: usize = 8;

/// Errors raised when building a prime field.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The modulus does not fit the single-word arithmetic.
    #[error("prime {prime} is too large, primes must be below {MAX_PRIME}")]
    PrimeTooLarge {
        /// The rejected modulus.
        prime: u64,
    },

    /// The modulus is not a prime number.
    #[error("modulus {0} is not prime")]
    InvalidModulus(u64),
}

/// The prime field `Z/pZ` for a word-size prime `p`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimeField {
    p: u32,
}

impl PrimeField {
    /// Creates the field of integers modulo `p`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::PrimeTooLarge`] when `p >= MAX_PRIME` and
    /// [`FieldError::InvalidModulus`] when `p` is not prime.
    pub fn new(p: u64) -> Result<Self, FieldError> {
        if p >= u64::from(MAX_PRIME) {
            return Err(FieldError::PrimeTooLarge { prime: p });
        }
        if !is_prime(p) {
            return Err(FieldError::InvalidModulus(p));
        }
        let p = u32::try_from(p).map_err(|_| FieldError::PrimeTooLarge { prime: p })?;
        Ok(Self { p })
    }

    /// Returns the modulus.
    #[must_use]
    pub const fn modulus(self) -> u32 {
        self.p
    }

    /// Reduces an arbitrary `u64` into the field.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn reduce(self, value: u64) -> u32 {
        (value % u64::from(self.p)) as u32
    }

    /// Maps a signed integer into the field.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_signed(self, value: i64) -> u32 {
        value.rem_euclid(i64::from(self.p)) as u32
    }

    /// Returns `a + b`.
    #[must_use]
    pub fn add(self, a: u32, b: u32) -> u32 {
        let s = a + b;
        if s >= self.p {
            s - self.p
        } else {
            s
        }
    }

    /// Returns `a - b`.
    #[must_use]
    pub fn sub(self, a: u32, b: u32) -> u32 {
        if a >= b {
            a - b
        } else {
            a + (self.p - b)
        }
    }

    /// Returns `-a`.
    #[must_use]
    pub fn neg(self, a: u32) -> u32 {
        if a == 0 {
            0
        } else {
            self.p - a
        }
    }

    /// Returns `a * b`.
    #[must_use]
    pub fn mul(self, a: u32, b: u32) -> u32 {
        self.reduce(u64::from(a) * u64::from(b))
    }

    /// Returns `acc + a * b`.
    #[must_use]
    pub fn mul_add(self, acc: u32, a: u32, b: u32) -> u32 {
        self.reduce(u64::from(acc) + u64::from(a) * u64::from(b))
    }

    /// Computes the inverse using the extended Euclidean algorithm.
    ///
    /// Returns `None` for zero.
    #[must_use]
    pub fn inv(self, a: u32) -> Option<u32> {
        if a == 0 {
            return None;
        }

        let mut t = 0i64;
        let mut new_t = 1i64;
        let mut r = i64::from(self.p);
        let mut new_r = i64::from(a);

        while new_r != 0 {
            let quotient = r / new_r;
            (t, new_t) = (new_t, t - quotient * new_t);
            (r, new_r) = (new_r, r - quotient * new_r);
        }

        if r > 1 {
            return None;
        }

        Some(self.from_signed(t))
    }

    /// Returns `a / b`, or `None` when `b` is zero.
    #[must_use]
    pub fn div(self, a: u32, b: u32) -> Option<u32> {
        self.inv(b).map(|b_inv| self.mul(a, b_inv))
    }

    /// Computes `a^exp` by binary exponentiation.
    #[must_use]
    pub fn pow(self, a: u32, mut exp: u64) -> u32 {
        let mut base = a;
        let mut result = 1 % self.p;

        while exp > 0 {
            if exp & 1 == 1 {
                result = self.mul(result, base);
            }
            base = self.mul(base, base);
            exp >>= 1;
        }

        result
    }

    /// Draws a uniformly random residue.
    pub fn random<R: Rng + ?Sized>(self, rng: &mut R) -> u32 {
        rng.gen_range(0..self.p)
    }

    /// Draws a uniformly random non-zero residue.
    pub fn random_nonzero<R: Rng + ?Sized>(self, rng: &mut R) -> u32 {
        rng.gen_range(1..self.p)
    }

    /// Computes `sum a[i] * b[i]` over the common prefix of both slices.
    ///
    /// Products are accumulated unreduced in blocks of [`DOT_CHUNK`].
    #[must_use]
    pub fn dot(self, a: &[u32], b: &[u32]) -> u32 {
        let p = u64::from(self.p);
        let mut acc = 0u64;

        for (ca, cb) in a.chunks(DOT_CHUNK).zip(b.chunks(DOT_CHUNK)) {
            for (&x, &y) in ca.iter().zip(cb) {
                acc += u64::from(x) * u64::from(y);
            }
            acc %= p;
        }

        self.reduce(acc)
    }
}

impl fmt::Debug for PrimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GF({})", self.p)
    }
}

impl fmt::Display for PrimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.p)
    }
}

/// Deterministic primality test by trial division.
fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }

    let mut d = 3u64;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_rejects_large_primes() {
        assert_eq!(
            PrimeField::new(u64::from(MAX_PRIME)),
            Err(FieldError::PrimeTooLarge {
                prime: u64::from(MAX_PRIME)
            })
        );
        assert!(matches!(
            PrimeField::new(2_147_483_647),
            Err(FieldError::PrimeTooLarge { .. })
        ));
        assert!(PrimeField::new(1_518_500_183).is_ok());
    }

    #[test]
    fn test_rejects_composites() {
        assert_eq!(PrimeField::new(1), Err(FieldError::InvalidModulus(1)));
        assert_eq!(PrimeField::new(91), Err(FieldError::InvalidModulus(91)));
        assert!(PrimeField::new(2).is_ok());
        assert!(PrimeField::new(65521).is_ok());
    }

    #[test]
    fn test_basic_arithmetic() {
        let f = PrimeField::new(7).unwrap();
        assert_eq!(f.add(5, 4), 2);
        assert_eq!(f.sub(2, 5), 4);
        assert_eq!(f.neg(3), 4);
        assert_eq!(f.neg(0), 0);
        assert_eq!(f.mul(3, 5), 1);
        assert_eq!(f.from_signed(-2), 5);
        assert_eq!(f.pow(3, 6), 1);
    }

    #[test]
    fn test_inverse() {
        let f = PrimeField::new(7).unwrap();
        assert_eq!(f.inv(0), None);
        for a in 1..7 {
            let inv = f.inv(a).unwrap();
            assert_eq!(f.mul(a, inv), 1);
        }
        assert_eq!(f.div(6, 3), Some(2));
    }

    #[test]
    fn test_dot_near_bound() {
        let f = PrimeField::new(1_518_500_183).unwrap();
        let big = f.modulus() - 1;
        let a = vec![big; 37];
        let b = vec![big; 37];
        // (p-1)^2 = 1, so the sum is 37
        assert_eq!(f.dot(&a, &b), 37);
    }

    #[test]
    fn test_random_ranges() {
        let f = PrimeField::new(3).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..100 {
            assert!(f.random(&mut rng) < 3);
            assert!((1..3).contains(&f.random_nonzero(&mut rng)));
        }
    }
}
