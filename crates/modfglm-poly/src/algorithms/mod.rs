//! Polynomial algorithms.
//!
//! This module contains:
//! - Karatsuba multiplication on coefficient slices
//! - Division with remainder and (extended) GCD
//! - Squarefree decomposition and radicals
//! - Berlekamp-Massey through the Euclidean recursion

pub mod berlekamp_massey;
pub mod gcd;
pub mod karatsuba;
pub mod squarefree;
