//! # modfglm-poly
//!
//! Dense univariate polynomial arithmetic over word-size prime fields.
//!
//! This crate provides:
//! - [`ModPoly`], a trimmed coefficient vector that carries its field
//! - Division, GCD and extended GCD
//! - Squarefree decomposition valid in positive characteristic
//! - The Euclidean formulation of Berlekamp-Massey ([`BmsState`])
//!
//! ## Algorithm Selection
//!
//! Multiplication automatically selects the algorithm:
//! - Both operands shorter than 32 coefficients: schoolbook with delayed reduction
//! - Otherwise: Karatsuba

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod algorithms;
pub mod dense;

#[cfg(test)]
mod proptests;

pub use algorithms::berlekamp_massey::BmsState;
pub use dense::ModPoly;
