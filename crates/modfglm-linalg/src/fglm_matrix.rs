//! Multiplication matrices of zero-dimensional quotient rings.
//!
//! Row `r` of the matrix holds the normal form of `t * b_r` in the monomial
//! basis `b_0, ..., b_{n-1}`. Most products `t * b_r` are again basis
//! monomials, so their rows are unit vectors: those rows are stored as a
//! pair of indices (the "trivial" part). The remaining `nrows` rows form a
//! dense row-major block.
//!
//! # Memory Layout
//!
//! For an `ncols`-dimensional quotient with `nrows` dense rows:
//! - `dense`: `nrows * ncols` residues, row-major
//! - `dense_idx[i]`: output coordinate written by dense row `i`
//! - `trivial_idx[i]`: output coordinate written by trivial row `i`
//! - `trivial_pos[i]`: input coordinate it copies

use log::debug;
use thiserror::Error;

use modfglm_field::PrimeField;

use crate::operator::LinearOperator;
use crate::parallel::{par_dense_matvec, ParallelConfig};

/// Errors raised when assembling a multiplication matrix.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// The quotient ring has dimension zero.
    #[error("matrix dimension must be positive")]
    EmptyMatrix,

    /// An array does not have the length implied by `ncols` and `nrows`.
    #[error("{what} has length {found}, expected {expected}")]
    LengthMismatch {
        /// Which array is malformed.
        what: &'static str,
        /// Length implied by the dimensions.
        expected: usize,
        /// Actual length.
        found: usize,
    },

    /// An index points outside `[0, ncols)`.
    #[error("{what} contains index {index} outside of [0, {ncols})")]
    IndexOutOfRange {
        /// Which array holds the bad index.
        what: &'static str,
        /// The offending index.
        index: usize,
        /// The dimension.
        ncols: usize,
    },

    /// Some output coordinate is written twice or never.
    #[error("output coordinate {0} is not written exactly once")]
    NotAPartition(usize),

    /// A dense entry is not reduced modulo the prime.
    #[error("dense entry {value} at row {row} is not reduced modulo {prime}")]
    UnreducedEntry {
        /// Dense row of the entry.
        row: usize,
        /// The entry.
        value: u32,
        /// The prime it was checked against.
        prime: u32,
    },
}

/// Multiplication matrix split into trivial rows and a dense block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FglmMatrix {
    ncols: usize,
    nrows: usize,
    dense: Vec<u32>,
    trivial_idx: Vec<usize>,
    trivial_pos: Vec<usize>,
    dense_idx: Vec<usize>,
    parallel: ParallelConfig,
}

impl FglmMatrix {
    /// Creates a matrix from its raw parts.
    ///
    /// # Errors
    ///
    /// Fails if the array lengths disagree with `ncols` and `nrows`, if an
    /// index is out of range, or if the trivial and dense outputs do not
    /// cover every coordinate exactly once.
    pub fn new(
        ncols: usize,
        dense: Vec<u32>,
        trivial_idx: Vec<usize>,
        trivial_pos: Vec<usize>,
        dense_idx: Vec<usize>,
    ) -> Result<Self, MatrixError> {
        if ncols == 0 {
            return Err(MatrixError::EmptyMatrix);
        }
        let nrows = dense_idx.len();
        if nrows > ncols {
            return Err(MatrixError::LengthMismatch {
                what: "dense_idx",
                expected: ncols,
                found: nrows,
            });
        }
        check_len("dense", nrows * ncols, dense.len())?;
        check_len("trivial_idx", ncols - nrows, trivial_idx.len())?;
        check_len("trivial_pos", ncols - nrows, trivial_pos.len())?;

        check_range("trivial_pos", &trivial_pos, ncols)?;
        check_range("trivial_idx", &trivial_idx, ncols)?;
        check_range("dense_idx", &dense_idx, ncols)?;

        let mut written = vec![false; ncols];
        for &i in trivial_idx.iter().chain(&dense_idx) {
            if std::mem::replace(&mut written[i], true) {
                return Err(MatrixError::NotAPartition(i));
            }
        }

        Ok(Self {
            ncols,
            nrows,
            dense,
            trivial_idx,
            trivial_pos,
            dense_idx,
            parallel: ParallelConfig::default(),
        })
    }

    /// Builds a matrix from full rows, detecting unit rows as trivial.
    ///
    /// `rows[r]` is the coordinate vector of `t * b_r`.
    ///
    /// # Errors
    ///
    /// Fails if the rows are not all of length `rows.len()`.
    pub fn from_rows(rows: &[Vec<u32>]) -> Result<Self, MatrixError> {
        let ncols = rows.len();
        let mut dense = Vec::new();
        let mut trivial_idx = Vec::new();
        let mut trivial_pos = Vec::new();
        let mut dense_idx = Vec::new();

        for (r, row) in rows.iter().enumerate() {
            check_len("row", ncols, row.len())?;
            match unit_position(row) {
                Some(pos) => {
                    trivial_idx.push(r);
                    trivial_pos.push(pos);
                }
                None => {
                    dense_idx.push(r);
                    dense.extend_from_slice(row);
                }
            }
        }

        Self::new(ncols, dense, trivial_idx, trivial_pos, dense_idx)
    }

    /// Sets the parallelism policy for the dense block.
    #[must_use]
    pub fn with_parallel_config(mut self, config: ParallelConfig) -> Self {
        self.parallel = config;
        self
    }

    /// Dimension of the quotient ring.
    #[must_use]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of dense rows.
    #[must_use]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// The dense block, row-major.
    #[must_use]
    pub fn dense(&self) -> &[u32] {
        &self.dense
    }

    /// Output coordinates of the trivial rows.
    #[must_use]
    pub fn trivial_idx(&self) -> &[usize] {
        &self.trivial_idx
    }

    /// Input coordinates copied by the trivial rows.
    #[must_use]
    pub fn trivial_pos(&self) -> &[usize] {
        &self.trivial_pos
    }

    /// Output coordinates of the dense rows.
    #[must_use]
    pub fn dense_idx(&self) -> &[usize] {
        &self.dense_idx
    }

    /// Number of zero entries in the dense block.
    #[must_use]
    pub fn zero_entries(&self) -> usize {
        self.dense.iter().filter(|&&c| c == 0).count()
    }

    /// Fraction of non-zero entries in the dense block (1.0 when it is empty).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn density(&self) -> f64 {
        if self.dense.is_empty() {
            return 1.0;
        }
        (self.dense.len() - self.zero_entries()) as f64 / self.dense.len() as f64
    }
}

impl LinearOperator for FglmMatrix {
    fn dimension(&self) -> usize {
        self.ncols
    }

    fn check_field(&self, field: PrimeField) -> Result<(), MatrixError> {
        let p = field.modulus();
        if let Some(i) = self.dense.iter().position(|&c| c >= p) {
            return Err(MatrixError::UnreducedEntry {
                row: i / self.ncols,
                value: self.dense[i],
                prime: p,
            });
        }
        debug!(
            "[{} x {}] matrix, {} dense rows, density {:.2}%",
            self.ncols,
            self.ncols,
            self.nrows,
            100.0 * self.density()
        );
        Ok(())
    }

    fn apply(&self, field: PrimeField, src: &[u32], dst: &mut [u32]) {
        self.apply_with_scratch(field, src, dst, &mut Vec::new());
    }

    fn apply_with_scratch(
        &self,
        field: PrimeField,
        src: &[u32],
        dst: &mut [u32],
        scratch: &mut Vec<u32>,
    ) {
        for (&idx, &pos) in self.trivial_idx.iter().zip(&self.trivial_pos) {
            dst[idx] = src[pos];
        }

        if self.nrows == 0 {
            return;
        }

        if self.parallel.use_parallel(self.nrows) {
            // Parallel rows land in `scratch` first: their targets are scattered.
            scratch.clear();
            scratch.resize(self.nrows, 0);
            par_dense_matvec(field, &self.dense, self.ncols, src, scratch);
            for (&idx, &value) in self.dense_idx.iter().zip(scratch.iter()) {
                dst[idx] = value;
            }
        } else {
            for (row, &idx) in self.dense.chunks_exact(self.ncols).zip(&self.dense_idx) {
                dst[idx] = field.dot(row, src);
            }
        }
    }
}

/// Returns `Some(k)` when `row` is the unit vector `e_k`.
fn unit_position(row: &[u32]) -> Option<usize> {
    let mut nonzero = row.iter().enumerate().filter(|(_, c)| **c != 0);
    match (nonzero.next(), nonzero.next()) {
        (Some((k, &1)), None) => Some(k),
        _ => None,
    }
}

fn check_len(what: &'static str, expected: usize, found: usize) -> Result<(), MatrixError> {
    if expected == found {
        Ok(())
    } else {
        Err(MatrixError::LengthMismatch {
            what,
            expected,
            found,
        })
    }
}

fn check_range(what: &'static str, indices: &[usize], ncols: usize) -> Result<(), MatrixError> {
    match indices.iter().find(|&&i| i >= ncols) {
        Some(&index) => Err(MatrixError::IndexOutOfRange { what, index, ncols }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gf7() -> PrimeField {
        PrimeField::new(7).unwrap()
    }

    /// Multiplication by x in GF(7)[x]/(x^2 - 2), basis (1, x).
    fn sqrt_two() -> FglmMatrix {
        FglmMatrix::new(2, vec![2, 0], vec![0], vec![1], vec![1]).unwrap()
    }

    #[test]
    fn test_apply_hybrid() {
        let m = sqrt_two();
        let mut dst = [0; 2];
        // (a, b) -> (b, 2a)
        m.apply(gf7(), &[3, 5], &mut dst);
        assert_eq!(dst, [5, 6]);
    }

    #[test]
    fn test_from_rows_classifies_unit_rows() {
        let m = FglmMatrix::from_rows(&[vec![0, 1], vec![2, 0]]).unwrap();
        assert_eq!(m, sqrt_two());
        assert_eq!(m.nrows(), 1);
        assert_eq!(m.trivial_idx(), &[0]);
        assert_eq!(m.trivial_pos(), &[1]);
        assert_eq!(m.dense_idx(), &[1]);
    }

    #[test]
    fn test_scaled_unit_row_is_dense() {
        let m = FglmMatrix::from_rows(&[vec![0, 3], vec![1, 0]]).unwrap();
        assert_eq!(m.dense_idx(), &[0]);
        assert_eq!(m.trivial_idx(), &[1]);
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert_eq!(
            FglmMatrix::new(0, vec![], vec![], vec![], vec![]),
            Err(MatrixError::EmptyMatrix)
        );
        assert!(matches!(
            FglmMatrix::new(2, vec![2], vec![0], vec![1], vec![1]),
            Err(MatrixError::LengthMismatch { what: "dense", .. })
        ));
        assert!(matches!(
            FglmMatrix::new(2, vec![2, 0], vec![0], vec![2], vec![1]),
            Err(MatrixError::IndexOutOfRange { what: "trivial_pos", .. })
        ));
        assert_eq!(
            FglmMatrix::new(2, vec![2, 0], vec![1], vec![1], vec![1]),
            Err(MatrixError::NotAPartition(1))
        );
        assert!(FglmMatrix::from_rows(&[vec![0, 1], vec![2]]).is_err());
    }

    #[test]
    fn test_density_and_field_check() {
        let m = sqrt_two();
        assert_eq!(m.zero_entries(), 1);
        assert!((m.density() - 0.5).abs() < f64::EPSILON);
        assert!(m.check_field(gf7()).is_ok());
        assert!(matches!(
            m.check_field(PrimeField::new(2).unwrap()),
            Err(MatrixError::UnreducedEntry { row: 0, value: 2, prime: 2 })
        ));
    }
}
