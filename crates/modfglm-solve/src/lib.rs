//! # modfglm-solve
//!
//! Sparse FGLM over word-size prime fields.
//!
//! Given the multiplication matrix by the last variable `t` in the quotient
//! of a zero-dimensional ideal, this crate computes a rational
//! parametrization of the solutions:
//!
//! ```text
//! elim(t) = 0,    x_i = coords[i](t),    i < n - 1
//! ```
//!
//! The matrix is only used through matrix-vector products, so its sparse
//! structure is never destroyed.
//!
//! ## Pipeline
//!
//! - [`sequence`]: Krylov sequence from a random probe vector
//! - [`minpoly`]: Berlekamp-Massey and squarefree reduction
//! - [`hankel`]: Hankel inversion through the extended Euclidean algorithm
//! - [`radical`]: rational reconstruction and the radical check outside
//!   shape position
//! - [`linear`]: back-substitution of linear variables
//!
//! [`FglmContext`] keeps the buffers between runs so that a system can be
//! replayed at several primes.
//!
//! ## Logging
//!
//! Stages report through the `log` facade: sizes and outcomes at `info`,
//! timings at `debug`, escalations and failed checks at `warn`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod fglm;
pub mod hankel;
pub mod layout;
pub mod linear;
pub mod minpoly;
pub mod param;
pub mod radical;
pub mod sequence;

#[cfg(test)]
mod proptests;

pub use config::FglmConfig;
pub use error::FglmError;
pub use fglm::{fglm_compute, FglmContext, FglmOutcome};
pub use hankel::{Escalation, HankelInverse};
pub use layout::SystemLayout;
pub use param::Parametrization;
pub use radical::{RadicalCheck, RadicalVerifier};
pub use sequence::SequenceBuffers;
