//! Parallel dense matrix-vector products.
//!
//! Rows of the dense block are independent dot products, so they are
//! distributed with rayon's work-stealing iterators once the block is
//! large enough to amortise the scheduling.

use rayon::prelude::*;

use modfglm_field::PrimeField;

/// Configuration for parallel matrix-vector products.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Minimum number of dense rows to enable parallelism.
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 64,
        }
    }
}

impl ParallelConfig {
    /// A configuration that never goes parallel.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
        }
    }

    /// Returns true if a block of `rows` rows should run in parallel.
    #[must_use]
    pub fn use_parallel(&self, rows: usize) -> bool {
        rows >= self.parallel_threshold
    }
}

/// Parallel product of a row-major `out.len() × ncols` block with `x`.
pub fn par_dense_matvec(
    field: PrimeField,
    dense: &[u32],
    ncols: usize,
    x: &[u32],
    out: &mut [u32],
) {
    out.par_iter_mut()
        .zip(dense.par_chunks_exact(ncols))
        .for_each(|(slot, row)| *slot = field.dot(row, x));
}
