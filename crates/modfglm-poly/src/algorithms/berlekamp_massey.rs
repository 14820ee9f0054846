//! Berlekamp-Massey through the extended Euclidean algorithm.
//!
//! Given points s_0, ..., s_{n-1}, let
//!
//!   F(x) = s_0 x^{n-1} + s_1 x^{n-2} + ... + s_{n-1}.
//!
//! Running the Euclidean recursion on (x^n, F) and stopping as soon as the
//! remainder R1 has degree below n/2 leaves a cofactor V1 with
//! V1 * F = R1 (mod x^n). When the sequence has a linear recurrence of
//! order L <= n/2, the monic V1 is its minimal polynomial:
//!
//!   sum_j V1_j * s_{i+j} = 0   for all i.
//!
//! The same recursion, stopped at a different degree, is what inverts a
//! Hankel matrix, so [`BmsState`] exposes the raw steps as well.

use modfglm_field::PrimeField;

use crate::algorithms::gcd::poly_div_rem;
use crate::dense::ModPoly;

/// Bézout recursion state: `V0 * F = R0`, `V1 * F = R1` modulo `x^high`.
#[derive(Clone, Debug)]
pub struct BmsState {
    field: PrimeField,
    points: Vec<u32>,
    /// Points consumed by the last [`BmsState::reduce`].
    npoints: usize,
    r0: ModPoly,
    r1: ModPoly,
    v0: ModPoly,
    v1: ModPoly,
}

impl BmsState {
    /// Creates an empty state over the given field.
    #[must_use]
    pub fn new(field: PrimeField) -> Self {
        Self {
            field,
            points: Vec::new(),
            npoints: 0,
            r0: ModPoly::zero(field),
            r1: ModPoly::zero(field),
            v0: ModPoly::zero(field),
            v1: ModPoly::one(field),
        }
    }

    /// Returns the coefficient field.
    #[must_use]
    pub fn field(&self) -> PrimeField {
        self.field
    }

    /// Forgets all points and resets the recursion, keeping allocations.
    pub fn reset(&mut self) {
        self.points.clear();
        self.npoints = 0;
        self.r0.reset();
        self.r1.reset();
        self.v0.reset();
        self.v1 = ModPoly::one(self.field);
    }

    /// Resets the state and moves it to another prime field.
    pub fn set_field(&mut self, field: PrimeField) {
        self.field = field;
        self.r0.set_field(field);
        self.r1.set_field(field);
        self.v0.set_field(field);
        self.reset();
    }

    /// Appends points to the sequence.
    pub fn add_points(&mut self, points: &[u32]) {
        self.points
            .extend(points.iter().map(|&s| self.field.reduce(u64::from(s))));
    }

    /// Returns the number of points added since the last reset.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Returns the number of points used by the last reduction.
    #[must_use]
    pub fn reduced_count(&self) -> usize {
        self.npoints
    }

    /// Computes the minimal polynomial of all points added so far.
    ///
    /// The result is only meaningful when the linear complexity of the
    /// sequence is at most half the number of points.
    pub fn reduce(&mut self) {
        let n = self.points.len();
        let f = ModPoly::new(self.field, self.points.iter().rev().copied().collect());
        self.load(n, f);
        self.reduce_below(n.div_ceil(2));
        self.npoints = n;
    }

    /// Starts a Euclidean recursion on `(x^high, f)`.
    ///
    /// `f` must have degree below `high`.
    pub fn load(&mut self, high: usize, f: ModPoly) {
        self.r0 = ModPoly::monomial(self.field, 1, high);
        self.r1 = f;
        self.v0 = ModPoly::zero(self.field);
        self.v1 = ModPoly::one(self.field);
    }

    /// Runs Euclidean steps until `deg R1 < bound`.
    pub fn reduce_below(&mut self, bound: usize) {
        while self.r1.length() > bound {
            let (q, r) = poly_div_rem(&self.r0, &self.r1);
            let v = self.v0.sub(&q.mul(&self.v1));
            self.r0 = std::mem::replace(&mut self.r1, r);
            self.v0 = std::mem::replace(&mut self.v1, v);
        }
    }

    /// Current remainder `R1`.
    #[must_use]
    pub fn r1(&self) -> &ModPoly {
        &self.r1
    }

    /// Current cofactor `V1`.
    #[must_use]
    pub fn v1(&self) -> &ModPoly {
        &self.v1
    }

    /// Monic minimal polynomial found by the last [`BmsState::reduce`].
    #[must_use]
    pub fn minimal_polynomial(&self) -> ModPoly {
        self.v1.make_monic()
    }
}
