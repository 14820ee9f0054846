//! The matrix-vector product seam.

use modfglm_field::PrimeField;

use crate::fglm_matrix::MatrixError;

/// A square linear map on `GF(p)^n` applied to residue vectors.
///
/// Implementations must be pure: `dst` depends only on `src` and the
/// operator. Operators are `Sync` so that independent computations (for
/// instance at different primes) can share one.
pub trait LinearOperator: Sync {
    /// Dimension `n` of the space the operator acts on.
    fn dimension(&self) -> usize;

    /// Writes `M * src` into `dst`. Both slices have length `n` and every
    /// entry of `src` is reduced modulo the field prime.
    fn apply(&self, field: PrimeField, src: &[u32], dst: &mut [u32]);

    /// Like [`LinearOperator::apply`], with a caller-owned scratch buffer
    /// that is kept between calls.
    ///
    /// The default ignores `scratch`.
    fn apply_with_scratch(
        &self,
        field: PrimeField,
        src: &[u32],
        dst: &mut [u32],
        scratch: &mut Vec<u32>,
    ) {
        let _ = scratch;
        self.apply(field, src, dst);
    }

    /// Checks that the operator is usable over `field`.
    ///
    /// The default accepts every field.
    ///
    /// # Errors
    ///
    /// Returns the first entry that is not a residue modulo the prime.
    fn check_field(&self, field: PrimeField) -> Result<(), MatrixError> {
        let _ = field;
        Ok(())
    }
}
