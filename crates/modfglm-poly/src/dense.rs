//! Dense univariate polynomials over a prime field.
//!
//! A [`ModPoly`] owns its coefficients and the [`PrimeField`] they live in.
//! The coefficient vector is always trimmed: the zero polynomial is the
//! empty vector and otherwise the last coefficient is non-zero, so
//! [`ModPoly::length`] is the true length and not an allocation size.

use std::fmt;

use modfglm_field::PrimeField;

use crate::algorithms::karatsuba::karatsuba_mul;

/// A dense univariate polynomial over `Z/pZ`.
///
/// Coefficients are stored in ascending degree order.
#[derive(Clone, PartialEq, Eq)]
pub struct ModPoly {
    field: PrimeField,
    /// Coefficients in ascending degree order, trimmed.
    coeffs: Vec<u32>,
}

impl ModPoly {
    /// Creates a new polynomial, reducing and trimming the coefficients.
    #[must_use]
    pub fn new(field: PrimeField, mut coeffs: Vec<u32>) -> Self {
        let p = field.modulus();
        for c in &mut coeffs {
            if *c >= p {
                *c %= p;
            }
        }
        let mut poly = Self { field, coeffs };
        poly.trim();
        poly
    }

    /// Creates a polynomial from signed integer coefficients.
    #[must_use]
    pub fn from_signed(field: PrimeField, coeffs: &[i64]) -> Self {
        Self::new(field, coeffs.iter().map(|&c| field.from_signed(c)).collect())
    }

    /// Creates the zero polynomial.
    #[must_use]
    pub fn zero(field: PrimeField) -> Self {
        Self {
            field,
            coeffs: Vec::new(),
        }
    }

    /// Creates the constant polynomial 1.
    #[must_use]
    pub fn one(field: PrimeField) -> Self {
        Self::constant(field, 1)
    }

    /// Creates a constant polynomial.
    #[must_use]
    pub fn constant(field: PrimeField, c: u32) -> Self {
        Self::new(field, vec![c])
    }

    /// Creates the polynomial x.
    #[must_use]
    pub fn x(field: PrimeField) -> Self {
        Self::new(field, vec![0, 1])
    }

    /// Creates the monomial c * x^n.
    #[must_use]
    pub fn monomial(field: PrimeField, c: u32, n: usize) -> Self {
        let mut coeffs = vec![0; n + 1];
        coeffs[n] = c;
        Self::new(field, coeffs)
    }

    /// Returns the coefficient field.
    #[must_use]
    pub fn field(&self) -> PrimeField {
        self.field
    }

    /// Returns the number of coefficients (degree + 1, or 0 for zero).
    #[must_use]
    pub fn length(&self) -> usize {
        self.coeffs.len()
    }

    /// Returns the degree, or `None` for the zero polynomial.
    #[must_use]
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Returns true if this is the constant polynomial 1.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.coeffs == [1]
    }

    /// Returns the leading coefficient, or `None` for zero.
    #[must_use]
    pub fn leading_coeff(&self) -> Option<u32> {
        self.coeffs.last().copied()
    }

    /// Returns the coefficient of x^i.
    #[must_use]
    pub fn coeff(&self, i: usize) -> u32 {
        self.coeffs.get(i).copied().unwrap_or(0)
    }

    /// Returns all coefficients.
    #[must_use]
    pub fn coeffs(&self) -> &[u32] {
        &self.coeffs
    }

    /// Sets the coefficient of x^i, growing or trimming as needed.
    pub fn set_coeff(&mut self, i: usize, c: u32) {
        let c = self.field.reduce(u64::from(c));
        if i >= self.coeffs.len() {
            if c == 0 {
                return;
            }
            self.coeffs.resize(i + 1, 0);
        }
        self.coeffs[i] = c;
        self.trim();
    }

    /// Resets to zero, keeping the allocation.
    pub fn reset(&mut self) {
        self.coeffs.clear();
    }

    /// Moves the polynomial into another prime field.
    ///
    /// Coefficients are reduced modulo the new prime.
    pub fn set_field(&mut self, field: PrimeField) {
        self.field = field;
        let p = field.modulus();
        for c in &mut self.coeffs {
            *c %= p;
        }
        self.trim();
    }

    fn trim(&mut self) {
        while self.coeffs.last() == Some(&0) {
            self.coeffs.pop();
        }
    }

    /// Evaluates the polynomial at a point using Horner's method.
    #[must_use]
    pub fn eval(&self, x: u32) -> u32 {
        self.coeffs
            .iter()
            .rev()
            .fold(0, |acc, &c| self.field.mul_add(c, acc, x))
    }

    /// Adds two polynomials.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len)
            .map(|i| self.field.add(self.coeff(i), other.coeff(i)))
            .collect();
        Self::new(self.field, coeffs)
    }

    /// Subtracts two polynomials.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len)
            .map(|i| self.field.sub(self.coeff(i), other.coeff(i)))
            .collect();
        Self::new(self.field, coeffs)
    }

    /// Negates a polynomial.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            field: self.field,
            coeffs: self.coeffs.iter().map(|&c| self.field.neg(c)).collect(),
        }
    }

    /// Multiplies by a scalar.
    #[must_use]
    pub fn scale(&self, c: u32) -> Self {
        if c == 0 {
            return Self::zero(self.field);
        }
        Self::new(
            self.field,
            self.coeffs.iter().map(|&x| self.field.mul(x, c)).collect(),
        )
    }

    /// Multiplies two polynomials.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero(self.field);
        }
        Self::new(
            self.field,
            karatsuba_mul(self.field, &self.coeffs, &other.coeffs),
        )
    }

    /// Multiplies two polynomials modulo x^n.
    #[must_use]
    pub fn mullow(&self, other: &Self, n: usize) -> Self {
        let a = &self.coeffs[..self.coeffs.len().min(n)];
        let b = &other.coeffs[..other.coeffs.len().min(n)];
        if a.is_empty() || b.is_empty() {
            return Self::zero(self.field);
        }
        let mut coeffs = karatsuba_mul(self.field, a, b);
        coeffs.truncate(n);
        Self::new(self.field, coeffs)
    }

    /// Keeps the coefficients of x^0 .. x^(n-1).
    #[must_use]
    pub fn truncate(&self, n: usize) -> Self {
        Self::new(self.field, self.coeffs[..self.coeffs.len().min(n)].to_vec())
    }

    /// Multiplies by x^n.
    #[must_use]
    pub fn shift_left(&self, n: usize) -> Self {
        if self.is_zero() || n == 0 {
            return self.clone();
        }
        let mut coeffs = vec![0; n];
        coeffs.extend_from_slice(&self.coeffs);
        Self {
            field: self.field,
            coeffs,
        }
    }

    /// Drops the n lowest coefficients (exact division by x^n when possible).
    #[must_use]
    pub fn shift_right(&self, n: usize) -> Self {
        if n >= self.coeffs.len() {
            return Self::zero(self.field);
        }
        Self {
            field: self.field,
            coeffs: self.coeffs[n..].to_vec(),
        }
    }

    /// Reverses the first `n` coefficients.
    ///
    /// The result satisfies `out[n-1-i] = in[i]` for `i < n`; coefficients
    /// at positions `n` and above are discarded.
    #[must_use]
    pub fn reverse(&self, n: usize) -> Self {
        let mut coeffs = vec![0; n];
        for (i, &c) in self.coeffs.iter().take(n).enumerate() {
            coeffs[n - 1 - i] = c;
        }
        Self::new(self.field, coeffs)
    }

    /// Computes the formal derivative.
    #[must_use]
    pub fn derivative(&self) -> Self {
        if self.coeffs.len() <= 1 {
            return Self::zero(self.field);
        }
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| self.field.mul(c, self.field.reduce(i as u64)))
            .collect();
        Self::new(self.field, coeffs)
    }

    /// Makes the polynomial monic (leading coefficient = 1).
    #[must_use]
    pub fn make_monic(&self) -> Self {
        match self.leading_coeff().and_then(|lc| self.field.inv(lc)) {
            Some(inv) => self.scale(inv),
            None => self.clone(),
        }
    }

    /// Raises the polynomial to a non-negative integer power.
    #[must_use]
    pub fn pow(&self, n: usize) -> Self {
        let mut result = Self::one(self.field);
        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(&base);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.mul(&base);
            }
        }

        result
    }

    /// Returns g with g^p = self, assuming only exponents divisible by p occur.
    ///
    /// Over a prime field the Frobenius map fixes every coefficient, so the
    /// root keeps every p-th coefficient.
    #[must_use]
    pub fn pth_root(&self) -> Self {
        let p = self.field.modulus() as usize;
        Self::new(self.field, self.coeffs.iter().step_by(p).copied().collect())
    }
}

impl fmt::Debug for ModPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModPoly({:?}, {:?})", self.field, self.coeffs)
    }
}

impl fmt::Display for ModPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut terms = Vec::new();
        for (i, c) in self.coeffs.iter().enumerate().rev() {
            if *c == 0 {
                continue;
            }

            let term = match i {
                0 => format!("{c}"),
                1 => format!("{c}*x"),
                _ => format!("{c}*x^{i}"),
            };
            terms.push(term);
        }

        write!(f, "{}", terms.join(" + "))
    }
}
