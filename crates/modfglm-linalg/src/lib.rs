//! # modfglm-linalg
//!
//! Linear algebra for the FGLM kernel.
//!
//! This crate provides:
//! - [`LinearOperator`], the matrix-vector product the sequence generator
//!   is written against
//! - [`FglmMatrix`], the multiplication matrix of a quotient ring, split
//!   into rows that copy a single coordinate and a dense block
//! - Parallel dense matrix-vector products via rayon
//!
//! ## Parallelism
//!
//! Only the dense block is parallelised, row by row, once it reaches
//! [`ParallelConfig::parallel_threshold`] rows. The product is a pure
//! function of the matrix and the input vector, so the parallel and
//! sequential paths agree exactly.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod fglm_matrix;
pub mod operator;
pub mod parallel;

pub use fglm_matrix::{FglmMatrix, MatrixError};
pub use operator::LinearOperator;
pub use parallel::ParallelConfig;
