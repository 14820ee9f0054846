//! Krylov sequence generation.
//!
//! Starting from a probe vector `v`, the generator computes `M^i v` for
//! `i < 2D` and records, for every step, the coordinates the rest of the
//! pipeline needs:
//!
//! - column 0: `(M^i v)[0]`, the power sums of `t` (all `2D` steps)
//! - column `j >= 1`: the coordinate of a non-linear variable, for `i <= D`
//! - the squares table: the coordinate of `x^2`, for `i < D`, only when the
//!   radical check is requested

use log::debug;

use modfglm_field::PrimeField;
use modfglm_linalg::LinearOperator;

use crate::layout::TrackedCoordinate;

/// Two vectors that trade places after every matrix-vector product, plus
/// the operator's scratch space.
#[derive(Clone, Debug, Default)]
pub struct DoubleBuffer {
    current: Vec<u32>,
    next: Vec<u32>,
    scratch: Vec<u32>,
}

impl DoubleBuffer {
    /// Creates zeroed buffers of length `len`.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            current: vec![0; len],
            next: vec![0; len],
            scratch: Vec::new(),
        }
    }

    /// Resizes and zeroes both buffers, keeping their allocations.
    pub fn resize(&mut self, len: usize) {
        for buf in [&mut self.current, &mut self.next] {
            buf.clear();
            buf.resize(len, 0);
        }
    }

    /// The live vector.
    #[must_use]
    pub fn current(&self) -> &[u32] {
        &self.current
    }

    /// The live vector, mutably.
    pub fn current_mut(&mut self) -> &mut [u32] {
        &mut self.current
    }

    /// Exchanges the live vector with the scratch one.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    /// Replaces the live vector by its image under `op`.
    pub fn step<O: LinearOperator + ?Sized>(&mut self, op: &O, field: PrimeField) {
        op.apply_with_scratch(field, &self.current, &mut self.next, &mut self.scratch);
        self.swap();
    }
}

/// Row-major table with one row per Krylov step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequenceTable {
    rows: usize,
    width: usize,
    data: Vec<u32>,
}

impl SequenceTable {
    /// Resizes to `rows × width` and zeroes every entry.
    pub fn reset(&mut self, rows: usize, width: usize) {
        self.rows = rows;
        self.width = width;
        self.data.clear();
        self.data.resize(rows * width, 0);
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Entry at step `i`, column `j`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> u32 {
        self.data[i * self.width + j]
    }

    /// Sets the entry at step `i`, column `j`.
    pub fn set(&mut self, i: usize, j: usize, value: u32) {
        self.data[i * self.width + j] = value;
    }

    /// The first `len` entries of column `j`.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds the number of rows.
    #[must_use]
    pub fn column(&self, j: usize, len: usize) -> Vec<u32> {
        assert!(len <= self.rows, "column of length {len} in {} rows", self.rows);
        (0..len).map(|i| self.get(i, j)).collect()
    }
}

/// Scratch storage of one FGLM computation.
///
/// Buffers are sized by [`SequenceBuffers::prepare`] and reused across
/// calls, notably across primes in a trace run.
#[derive(Clone, Debug, Default)]
pub struct SequenceBuffers {
    vectors: DoubleBuffer,
    terms: SequenceTable,
    squares: SequenceTable,
    dim: usize,
}

impl SequenceBuffers {
    /// Creates empty buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sizes the buffers for a quotient of dimension `dim` and `block`
    /// sequence columns.
    pub fn prepare(&mut self, dim: usize, block: usize, with_squares: bool) {
        self.dim = dim;
        self.vectors.resize(dim);
        self.terms.reset(2 * dim, block);
        if with_squares {
            self.squares.reset(dim, block);
        } else {
            self.squares.reset(0, block);
        }
    }

    /// Dimension the buffers were last prepared for.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// The coordinate streams, one row per step.
    #[must_use]
    pub fn terms(&self) -> &SequenceTable {
        &self.terms
    }

    /// The streams of the squares, one row per step.
    #[must_use]
    pub fn squares(&self) -> &SequenceTable {
        &self.squares
    }

    /// The `2D` power sums `s_i = (M^i v)[0]`.
    #[must_use]
    pub fn sequence(&self) -> Vec<u32> {
        self.terms.column(0, self.terms.rows())
    }

    fn record(&mut self, i: usize, tracked: &[TrackedCoordinate]) {
        let v = self.vectors.current();
        self.terms.set(i, 0, v[0]);
        if i <= self.dim {
            for tc in tracked {
                self.terms.set(i, tc.column, v[tc.basis_index]);
            }
        }
        if i < self.squares.rows() {
            for tc in tracked {
                if let Some(sq) = tc.square_index {
                    self.squares.set(i, tc.column, v[sq]);
                }
            }
        }
    }
}

/// Drives an operator to fill [`SequenceBuffers`].
pub struct SequenceGenerator<'a, O: ?Sized> {
    op: &'a O,
    field: PrimeField,
    tracked: &'a [TrackedCoordinate],
}

impl<'a, O: LinearOperator + ?Sized> SequenceGenerator<'a, O> {
    /// Creates a generator for `op` over `field`.
    #[must_use]
    pub fn new(op: &'a O, field: PrimeField, tracked: &'a [TrackedCoordinate]) -> Self {
        Self { op, field, tracked }
    }

    /// Computes `2D - 1` products starting from `probe`.
    ///
    /// # Panics
    ///
    /// Panics if `probe` does not have the operator's dimension.
    pub fn generate(&self, probe: &[u32], buffers: &mut SequenceBuffers, with_squares: bool) {
        let dim = self.op.dimension();
        assert_eq!(probe.len(), dim, "probe vector has the wrong length");

        buffers.prepare(dim, 1 + self.tracked.len(), with_squares);
        for (slot, &c) in buffers.vectors.current_mut().iter_mut().zip(probe) {
            *slot = self.field.reduce(u64::from(c));
        }

        for i in 0..2 * dim {
            if i > 0 {
                buffers.vectors.step(self.op, self.field);
            }
            buffers.record(i, self.tracked);
        }
        debug!(
            "{} matrix-vector products in dimension {dim}",
            (2 * dim).saturating_sub(1)
        );
    }
}
