//! Error type of the FGLM kernel.

use thiserror::Error;

use modfglm_field::{FieldError, MAX_PRIME};
use modfglm_linalg::MatrixError;

/// Everything that can make an FGLM computation fail.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FglmError {
    /// The prime does not fit the single-word arithmetic.
    #[error("prime {prime} is too large, primes must be below {MAX_PRIME}")]
    PrimeTooLarge {
        /// The rejected prime.
        prime: u64,
    },

    /// The modulus is not a prime number.
    #[error("modulus {0} is not prime")]
    InvalidModulus(u64),

    /// The multiplication matrix is malformed.
    #[error("invalid multiplication matrix: {0}")]
    InvalidMatrix(#[from] MatrixError),

    /// The description of linear and non-linear variables is inconsistent.
    #[error("invalid variable layout: {0}")]
    InvalidLayout(String),

    /// No escalation level produced an invertible Hankel matrix.
    #[error("Hankel matrix of dimension {dim} is singular")]
    SingularHankelMatrix {
        /// Dimension of the Hankel matrix.
        dim: usize,
    },

    /// The denominator table is not invertible modulo the elimination polynomial.
    #[error("denominator is not invertible modulo the elimination polynomial")]
    NonInvertibleTable,

    /// The randomized check rejected a coordinate of a non-radical ideal.
    #[error("only {verified} of {total} coordinates passed the radical check")]
    UnverifiedRadicalParametrization {
        /// Coordinates checked before the first failure.
        verified: usize,
        /// Number of coordinates.
        total: usize,
    },

    /// A trace run found an elimination polynomial of an unexpected degree.
    #[error("elimination polynomial has degree {found}, expected {expected}")]
    TraceDegreeMismatch {
        /// Degree recorded by the learning run.
        expected: usize,
        /// Degree found at the new prime.
        found: usize,
    },
}

impl From<FieldError> for FglmError {
    fn from(err: FieldError) -> Self {
        match err {
            FieldError::PrimeTooLarge { prime } => Self::PrimeTooLarge { prime },
            FieldError::InvalidModulus(p) => Self::InvalidModulus(p),
        }
    }
}
