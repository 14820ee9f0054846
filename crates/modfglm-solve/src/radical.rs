//! Parametrizations outside shape position.
//!
//! When the power sums have a minimal polynomial `P` of degree `L < D`, or
//! one with repeated roots, the Hankel system no longer determines the
//! coordinates. They are recovered from rational reconstruction instead.
//! For a stream `u` let
//!
//!   T_u = (sum_{i<L} u_{L-1-i} x^i * P) div x^L.
//!
//! Then `x = T_c / T_s mod elim` where `s` is the power sum stream and `c`
//! the stream of the coordinate.
//!
//! For a non-radical ideal this only describes the radical if the random
//! functional behaves. [`RadicalVerifier`] checks the claim with a second
//! functional: shifting by `x + lambda` must reproduce the same coordinate.

use log::{info, warn};
use rand::Rng;

use modfglm_field::PrimeField;
use modfglm_poly::algorithms::gcd::{poly_inverse_mod, poly_rem};
use modfglm_poly::ModPoly;

use crate::error::FglmError;
use crate::layout::TrackedCoordinate;
use crate::param::Parametrization;
use crate::sequence::SequenceBuffers;

/// Outcome of the radical check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RadicalCheck {
    /// `t` separates the roots and the ideal is radical: nothing to check.
    ShapePosition,
    /// The check was not requested.
    Unchecked,
    /// Every coordinate passed.
    Verified,
    /// A coordinate failed. Coordinates are scanned from `x_{n-2}` down to
    /// `x_0`; `verified` of the `total` passed before the failure.
    Partial {
        /// Coordinates checked before the first failure.
        verified: usize,
        /// Number of coordinates.
        total: usize,
    },
}

impl RadicalCheck {
    /// True unless the check found a bad coordinate.
    #[must_use]
    pub fn is_trusted(self) -> bool {
        !matches!(self, Self::Partial { .. })
    }
}

/// The reconstruction table of `stream` against `minpoly`.
#[must_use]
pub fn table_polynomial(field: PrimeField, stream: &[u32], minpoly: &ModPoly) -> ModPoly {
    let l = minpoly.degree().unwrap_or(0);
    let reversed = ModPoly::new(field, stream[..l].iter().rev().copied().collect());
    reversed.mul(minpoly).shift_right(l)
}

/// Inverts the table of `stream` modulo `elim`.
///
/// Returns `None` when the table and `elim` share a factor.
#[must_use]
pub fn invert_table_polynomial(
    stream: &[u32],
    minpoly: &ModPoly,
    elim: &ModPoly,
) -> Option<ModPoly> {
    let table = table_polynomial(elim.field(), stream, minpoly);
    poly_inverse_mod(&table, elim)
}

/// Multiplies the table of `stream` by a precomputed inverse table.
#[must_use]
pub fn divide_table_polynomials(
    stream: &[u32],
    inverse: &ModPoly,
    minpoly: &ModPoly,
    elim: &ModPoly,
) -> ModPoly {
    let table = poly_rem(&table_polynomial(elim.field(), stream, minpoly), elim);
    poly_rem(&table.mul(inverse), elim)
}

/// Checks coordinates against a shifted functional.
///
/// For `lambda != 0` the streams `c_i + lambda s_i` and `q_i + lambda c_i`,
/// where `q` is the stream of the square, are the power sums and the
/// coordinate stream of the functional `u -> l((x + lambda) u)`. Both
/// functionals must give the same coordinate.
pub struct RadicalVerifier<'a, R: ?Sized> {
    minpoly: &'a ModPoly,
    elim: &'a ModPoly,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> RadicalVerifier<'a, R> {
    /// Creates a verifier for the minimal polynomial and elimination
    /// polynomial of one run.
    pub fn new(minpoly: &'a ModPoly, elim: &'a ModPoly, rng: &'a mut R) -> Self {
        Self { minpoly, elim, rng }
    }

    /// Returns true if the shifted functional reproduces `expected`.
    pub fn verify(
        &mut self,
        sequence: &[u32],
        coordinate: &[u32],
        square: &[u32],
        expected: &ModPoly,
    ) -> bool {
        let field = self.elim.field();
        let lambda = field.random_nonzero(self.rng);
        let l = self.minpoly.degree().unwrap_or(0);

        let shifted = |a: &[u32], b: &[u32]| -> Vec<u32> {
            a[..l]
                .iter()
                .zip(&b[..l])
                .map(|(&x, &y)| field.mul_add(x, lambda, y))
                .collect()
        };
        let sigma = shifted(coordinate, sequence);
        let tau = shifted(square, coordinate);

        match invert_table_polynomial(&sigma, self.minpoly, self.elim) {
            Some(inverse) => {
                divide_table_polynomials(&tau, &inverse, self.minpoly, self.elim) == *expected
            }
            None => false,
        }
    }
}

/// Fills the non-linear coordinates of `param` by rational reconstruction
/// and, if `rng` is given, checks them.
pub(crate) fn reconstruct_coordinates<R: Rng + ?Sized>(
    param: &mut Parametrization,
    buffers: &SequenceBuffers,
    tracked: &[TrackedCoordinate],
    minpoly: &ModPoly,
    rng: Option<&mut R>,
) -> Result<RadicalCheck, FglmError> {
    let l = minpoly.degree().unwrap_or(0);
    if l == 0 {
        return Err(FglmError::NonInvertibleTable);
    }
    let elim = param.elim().clone();
    let terms = buffers.terms();
    let sequence = terms.column(0, l);

    let inverse =
        invert_table_polynomial(&sequence, minpoly, &elim).ok_or(FglmError::NonInvertibleTable)?;
    let streams: Vec<Vec<u32>> = tracked.iter().map(|tc| terms.column(tc.column, l)).collect();
    for (tc, stream) in tracked.iter().zip(&streams) {
        param.set_coord(
            tc.coord,
            divide_table_polynomials(stream, &inverse, minpoly, &elim),
        );
    }

    let Some(rng) = rng else {
        return Ok(RadicalCheck::Unchecked);
    };

    let total = param.nvars() - 1;
    let mut verifier = RadicalVerifier::new(minpoly, &elim, rng);
    for (tc, stream) in tracked.iter().zip(&streams) {
        if tc.square_index.is_none() {
            continue;
        }
        let square = buffers.squares().column(tc.column, l);
        if !verifier.verify(&sequence, stream, &square, param.coord(tc.coord)) {
            let verified = total - 1 - tc.coord;
            warn!("radical check failed on x_{}, {verified} of {total} verified", tc.coord);
            return Ok(RadicalCheck::Partial { verified, total });
        }
    }
    info!("radical check passed on {total} coordinates");
    Ok(RadicalCheck::Verified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn gf(p: u64) -> PrimeField {
        PrimeField::new(p).unwrap()
    }

    /// Power sums of the functional `u -> sum_k w_k u(t_k, x_k)`.
    fn streams(f: PrimeField, pts: &[(u32, u32, u32)], n: usize) -> [Vec<u32>; 3] {
        let stream = |e: u64| -> Vec<u32> {
            (0..n as u64)
                .map(|i| {
                    pts.iter().fold(0, |acc, &(w, t, x)| {
                        f.mul_add(acc, w, f.mul(f.pow(t, i), f.pow(x, e)))
                    })
                })
                .collect()
        };
        [stream(0), stream(1), stream(2)]
    }

    #[test]
    fn test_reconstruct_coordinate() {
        // x = 3, 5, 10 at t = 1, 2, 4, weights 1, 7, 2
        let f = gf(101);
        let [s, c, _] = streams(f, &[(1, 1, 3), (7, 2, 5), (2, 4, 10)], 6);
        let minpoly = ModPoly::from_signed(f, &[-8, 14, -7, 1]);
        let inverse = invert_table_polynomial(&s, &minpoly, &minpoly).unwrap();
        let x = divide_table_polynomials(&c, &inverse, &minpoly, &minpoly);
        assert_eq!(x.eval(1), 3);
        assert_eq!(x.eval(2), 5);
        assert_eq!(x.eval(4), 10);
    }

    #[test]
    fn test_verifier_accepts_consistent_streams() {
        let f = gf(1_000_003);
        let [s, c, q] = streams(f, &[(1, 1, 3), (7, 2, 5), (2, 4, 10)], 6);
        let minpoly = ModPoly::from_signed(f, &[-8, 14, -7, 1]);
        let inverse = invert_table_polynomial(&s, &minpoly, &minpoly).unwrap();
        let x = divide_table_polynomials(&c, &inverse, &minpoly, &minpoly);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut verifier = RadicalVerifier::new(&minpoly, &minpoly, &mut rng);
        assert!(verifier.verify(&s, &c, &q, &x));
    }

    #[test]
    fn test_verifier_rejects_colliding_roots() {
        // Two points share t = 2, so x is not a function of t
        let f = gf(1_000_003);
        let [s, c, q] = streams(f, &[(1, 2, 1), (1, 2, 3), (1, 5, 4)], 6);
        let minpoly = ModPoly::from_signed(f, &[10, -7, 1]);
        let inverse = invert_table_polynomial(&s, &minpoly, &minpoly).unwrap();
        let x = divide_table_polynomials(&c, &inverse, &minpoly, &minpoly);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut verifier = RadicalVerifier::new(&minpoly, &minpoly, &mut rng);
        assert!(!verifier.verify(&s, &c, &q, &x));
    }

    #[test]
    fn test_trust() {
        assert!(RadicalCheck::Verified.is_trusted());
        assert!(RadicalCheck::ShapePosition.is_trusted());
        assert!(!RadicalCheck::Partial {
            verified: 0,
            total: 1
        }
        .is_trusted());
    }
}
