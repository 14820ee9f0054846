//! # modfglm-field
//!
//! Prime field arithmetic for the modfglm kernel.
//!
//! The modulus is chosen at runtime, so the field is a small `Copy` value
//! that travels with the data it describes (polynomials, sequence tables)
//! rather than a type parameter. Residues are `u32`, products are formed in
//! `u64`.
//!
//! ## Modulus bound
//!
//! Only primes below [`MAX_PRIME`] are accepted. For those `p² < 2^61`, which
//! lets dot products accumulate several products before a reduction.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod prime_field;

#[cfg(test)]
mod proptests;

pub use prime_field::{FieldError, PrimeField, MAX_PRIME};
