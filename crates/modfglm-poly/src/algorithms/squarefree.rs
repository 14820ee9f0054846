//! Squarefree decomposition of polynomials over prime fields.
//!
//! A polynomial is squarefree if it has no repeated factors.
//! The squarefree decomposition writes a polynomial as:
//!
//! f = f₁ * f₂² * f₃³ * ...
//!
//! where each fᵢ is squarefree and coprime to the others.
//!
//! # Algorithm
//!
//! Yun's algorithm breaks down in characteristic p once a multiplicity is
//! divisible by p, because those factors vanish from the derivative. The
//! variant used here peels off every factor whose multiplicity is prime to
//! p, then takes the p-th root of what remains and recurses.

use crate::algorithms::gcd::{poly_div_rem, poly_gcd};
use crate::dense::ModPoly;

/// A factor with its multiplicity in the squarefree decomposition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SquarefreeFactor {
    /// The monic squarefree polynomial factor.
    pub factor: ModPoly,
    /// The multiplicity (power) of this factor.
    pub multiplicity: usize,
}

/// Result of squarefree decomposition.
#[derive(Clone, Debug)]
pub struct SquarefreeDecomposition {
    /// The unit (leading coefficient).
    pub unit: u32,
    /// The squarefree factors with multiplicities, pairwise coprime.
    pub factors: Vec<SquarefreeFactor>,
}

impl SquarefreeDecomposition {
    /// Reconstructs the decomposed polynomial.
    #[must_use]
    pub fn to_polynomial(&self, template: &ModPoly) -> ModPoly {
        let field = template.field();
        let mut result = ModPoly::constant(field, self.unit);

        for sf in &self.factors {
            result = result.mul(&sf.factor.pow(sf.multiplicity));
        }

        result
    }

    /// Returns true if all multiplicities are 1.
    #[must_use]
    pub fn is_squarefree(&self) -> bool {
        self.factors.iter().all(|f| f.multiplicity == 1)
    }

    /// Returns the product of the distinct factors (the monic radical).
    #[must_use]
    pub fn radical(&self, template: &ModPoly) -> ModPoly {
        self.factors
            .iter()
            .fold(ModPoly::one(template.field()), |acc, sf| acc.mul(&sf.factor))
    }
}

/// Computes the squarefree decomposition of a polynomial.
///
/// Returns f = unit * f₁ * f₂² * f₃³ * ... with every fᵢ monic. Factors are
/// listed in the order they are found, which is by increasing multiplicity
/// within each p-th root level.
#[must_use]
pub fn squarefree_decomposition(f: &ModPoly) -> SquarefreeDecomposition {
    let Some(unit) = f.leading_coeff() else {
        return SquarefreeDecomposition {
            unit: 0,
            factors: Vec::new(),
        };
    };

    let mut factors = Vec::new();
    if f.length() > 1 {
        decompose(&f.make_monic(), 1, &mut factors);
    }

    SquarefreeDecomposition { unit, factors }
}

fn decompose(f: &ModPoly, scale: usize, out: &mut Vec<SquarefreeFactor>) {
    let mut c = poly_gcd(f, &f.derivative());
    let mut w = poly_div_rem(f, &c).0;
    let mut i = 1;

    while w.length() > 1 {
        let y = poly_gcd(&w, &c);
        let z = poly_div_rem(&w, &y).0;
        if z.length() > 1 {
            out.push(SquarefreeFactor {
                factor: z,
                multiplicity: i * scale,
            });
        }
        i += 1;
        c = poly_div_rem(&c, &y).0;
        w = y;
    }

    // What is left has only multiplicities divisible by p
    if c.length() > 1 {
        let p = c.field().modulus() as usize;
        decompose(&c.pth_root(), scale * p, out);
    }
}

/// Checks if a polynomial is squarefree.
///
/// Constants (including zero) count as squarefree.
#[must_use]
pub fn is_squarefree(f: &ModPoly) -> bool {
    if f.length() <= 1 {
        return true;
    }
    let d = f.derivative();
    if d.is_zero() {
        return false;
    }
    poly_gcd(f, &d).is_one()
}

/// Returns the product of the distinct monic irreducible factors of `f`.
///
/// The zero polynomial is returned unchanged.
#[must_use]
pub fn radical(f: &ModPoly) -> ModPoly {
    if f.is_zero() {
        return f.clone();
    }
    squarefree_decomposition(f).radical(f)
}
