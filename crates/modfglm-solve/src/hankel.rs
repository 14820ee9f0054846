//! Structured inversion of the Hankel matrix of the power sums.
//!
//! In shape position every coordinate is `x = sum_k a_k t^k` with
//! `deg < D`, and the coefficients solve `H a = c` where `H[i][j] = s_{i+j}`
//! and `c_i` is the coordinate stream. Instead of factoring `H`, two runs
//! of the Euclidean recursion on the window `s_0..s_{2D-2}` give vectors
//! `Z1`, `Z2` with
//!
//!   H Z1 = e_{D-1},    H J Z2 = e_0
//!
//! (`J` reverses a vector). These determine `H^{-1}` through a
//! Gohberg-Semencul formula, so every right-hand side costs a handful of
//! truncated products.
//!
//! The formula needs `Z1[0] != 0`. When it vanishes, or when the leading
//! window is singular after a first failure, the window is moved: first
//! shifted by one step, then replaced by successive differences. See
//! [`Escalation`].

use log::{debug, warn};

use modfglm_field::PrimeField;
use modfglm_poly::{BmsState, ModPoly};

use crate::error::FglmError;

/// Window of the power sums fed to the Hankel inversion.
///
/// Every level keeps the size `2 * dim - 1` and changes the functional
/// instead, in place of retrying with a longer window of `2 * dim + 1`
/// terms and a negated leading term.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Escalation {
    /// `w_i = s_i`.
    Direct,
    /// `w_i = s_{i+1}`: the system of `t * x`.
    Shifted,
    /// `w_i = s_i - s_{i+1}`: the system of `(1 - t) * x`.
    Deflated,
}

impl Escalation {
    /// The level tried after this one.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Direct => Some(Self::Shifted),
            Self::Shifted => Some(Self::Deflated),
            Self::Deflated => None,
        }
    }

    /// Applies the window transform to the first `len` terms of `stream`.
    ///
    /// # Panics
    ///
    /// Panics if `stream` has fewer than `len + 1` terms (`len` for
    /// [`Escalation::Direct`]).
    #[must_use]
    pub fn window(self, field: PrimeField, stream: &[u32], len: usize) -> Vec<u32> {
        match self {
            Self::Direct => stream[..len].to_vec(),
            Self::Shifted => stream[1..=len].to_vec(),
            Self::Deflated => stream[..=len]
                .windows(2)
                .map(|w| field.sub(w[0], w[1]))
                .collect(),
        }
    }
}

/// Generators of the inverse of a `dim × dim` Hankel matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HankelInverse {
    dim: usize,
    level: Escalation,
    z1: ModPoly,
    z2: ModPoly,
    /// `Z1[0]^{-1}`.
    pivot_inv: u32,
}

enum Attempt {
    Inverted(HankelInverse),
    ZeroPivot,
    Singular,
}

/// Inverts the Hankel matrix of `sequence`, escalating when needed.
///
/// `sequence` must hold at least `2 * dim` terms.
///
/// # Errors
///
/// Returns [`FglmError::SingularHankelMatrix`] when the direct window is
/// singular or when every level fails.
pub fn invert_hankel(
    bms: &mut BmsState,
    sequence: &[u32],
    dim: usize,
) -> Result<HankelInverse, FglmError> {
    let field = bms.field();
    let mut level = Escalation::Direct;
    loop {
        let window = level.window(field, sequence, 2 * dim - 1);
        let failure = match attempt(bms, &window, dim, level) {
            Attempt::Inverted(inverse) => {
                debug!("Hankel matrix of dimension {dim} inverted at level {level:?}");
                return Ok(inverse);
            }
            Attempt::Singular if level == Escalation::Direct => {
                return Err(FglmError::SingularHankelMatrix { dim });
            }
            Attempt::Singular => "singular",
            Attempt::ZeroPivot => "zero pivot",
        };
        match level.next() {
            Some(next) => {
                warn!("Hankel inversion at level {level:?} failed ({failure}), trying {next:?}");
                level = next;
            }
            None => return Err(FglmError::SingularHankelMatrix { dim }),
        }
    }
}

fn attempt(bms: &mut BmsState, window: &[u32], dim: usize, level: Escalation) -> Attempt {
    let field = bms.field();
    let high = window.len();

    let mirrored = ModPoly::new(field, window.iter().rev().copied().collect());
    let Some(z1) = generator(bms, high, mirrored, dim) else {
        return Attempt::Singular;
    };
    let Some(pivot_inv) = field.inv(z1.coeff(0)) else {
        return Attempt::ZeroPivot;
    };

    let Some(z2) = generator(bms, high, ModPoly::new(field, window.to_vec()), dim) else {
        return Attempt::Singular;
    };

    Attempt::Inverted(HankelInverse {
        dim,
        level,
        z1,
        z2,
        pivot_inv,
    })
}

/// Runs the recursion on `(x^high, f)` down to degree `dim - 1` and
/// normalizes the cofactor by the remainder's leading coefficient.
fn generator(bms: &mut BmsState, high: usize, f: ModPoly, dim: usize) -> Option<ModPoly> {
    let field = bms.field();
    bms.load(high, f);
    bms.reduce_below(dim);
    if bms.r1().length() != dim {
        return None;
    }
    let lc_inv = bms.r1().leading_coeff().and_then(|c| field.inv(c))?;
    Some(bms.v1().scale(lc_inv))
}

impl HankelInverse {
    /// Dimension of the inverted matrix.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Window the inverse belongs to.
    #[must_use]
    pub fn level(&self) -> Escalation {
        self.level
    }

    /// `Z1`, with `H Z1 = e_{D-1}`.
    #[must_use]
    pub fn z1(&self) -> &ModPoly {
        &self.z1
    }

    /// `Z2`, with `H J Z2 = e_0`.
    #[must_use]
    pub fn z2(&self) -> &ModPoly {
        &self.z2
    }

    /// Solves `H a = rhs` and returns `a` as a polynomial.
    ///
    /// Only the first `dim` entries of `rhs` are read.
    #[must_use]
    pub fn solve(&self, rhs: &[u32]) -> ModPoly {
        let d = self.dim;
        let field = self.z1.field();
        let c = ModPoly::new(field, rhs[..d].to_vec());

        let rz1 = self.z1.reverse(d + 1);
        let rz2 = self.z2.reverse(d + 1);
        let a = rz1.mullow(&c, d).reverse(d);
        let b = self.z2.mullow(&c, d).reverse(d);

        let p1 = self.z1.mullow(&b, d);
        let p2 = rz2.mullow(&a, d);
        p1.sub(&p2).scale(self.pivot_inv)
    }

    /// Solves the system of a raw coordinate stream, applying the window
    /// transform of this inverse's level first.
    ///
    /// `stream` needs `dim + 1` terms.
    #[must_use]
    pub fn solve_stream(&self, stream: &[u32]) -> ModPoly {
        let rhs = self.level.window(self.z1.field(), stream, self.dim);
        self.solve(&rhs)
    }

    /// Checks `H Z1 = e_{D-1}` and `H J Z2 = e_0` against the raw sequence.
    #[must_use]
    pub fn check(&self, sequence: &[u32]) -> bool {
        let d = self.dim;
        let field = self.z1.field();
        let w = self.level.window(field, sequence, 2 * d - 1);
        (0..d).all(|i| {
            let h_z1 = (0..d).fold(0, |acc, j| field.mul_add(acc, w[i + j], self.z1.coeff(j)));
            let h_jz2 = (0..d).fold(0, |acc, j| {
                field.mul_add(acc, w[i + j], self.z2.coeff(d - 1 - j))
            });
            h_z1 == u32::from(i == d - 1) && h_jz2 == u32::from(i == 0)
        })
    }
}
