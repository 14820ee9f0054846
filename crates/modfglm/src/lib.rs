//! # modfglm
//!
//! Rational parametrizations of zero-dimensional polynomial systems over
//! word-size prime fields, computed from a sparse multiplication matrix.
//!
//! ## Features
//!
//! - **Prime fields**: `u32` residues with delayed reduction, primes below
//!   [`field::MAX_PRIME`]
//! - **Polynomials**: dense arithmetic, extended GCD, squarefree parts,
//!   Berlekamp-Massey
//! - **Matrices**: multiplication matrices split into copy rows and a
//!   dense block, with rayon-parallel products
//! - **Solver**: sparse FGLM with Hankel inversion, non-shape-position
//!   reconstruction, a randomized radical check and trace runs across
//!   primes
//!
//! ## Quick Start
//!
//! ```rust
//! use modfglm::prelude::*;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! // Multiplication by t in GF(7)[y, t]/(y - t, t^2 - 2), basis (1, t)
//! let matrix = FglmMatrix::new(2, vec![2, 0], vec![0], vec![1], vec![1])?;
//! // y is linear: y = t
//! let layout = SystemLayout::new(2, 1, vec![true], vec![1, 1, 0], vec![None])?;
//!
//! let mut context = FglmContext::new(7, FglmConfig::default())?;
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let outcome = context.compute_from_probe(&matrix, &layout, &[1, 0], &mut rng)?;
//!
//! assert_eq!(outcome.param.elim().coeffs(), &[5, 0, 1]);
//! assert_eq!(outcome.param.coord(0).coeffs(), &[0, 1]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use modfglm_field as field;
pub use modfglm_linalg as linalg;
pub use modfglm_poly as poly;
pub use modfglm_solve as solve;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use modfglm_field::{PrimeField, MAX_PRIME};
    pub use modfglm_linalg::{FglmMatrix, LinearOperator, ParallelConfig};
    pub use modfglm_poly::{BmsState, ModPoly};
    pub use modfglm_solve::{
        fglm_compute, FglmConfig, FglmContext, FglmError, FglmOutcome, Parametrization,
        RadicalCheck, SystemLayout,
    };
}
