//! Rational parametrizations and their text formats.
//!
//! A parametrization of a zero-dimensional ideal in `x_0, ..., x_{n-1}`
//! with `t = x_{n-1}` is
//!
//!   elim(t) = 0,   x_i = coords[i](t) / denom(t)   for i < n - 1.
//!
//! This kernel always produces `denom = 1` and `deg coords[i] < deg elim`.

use std::fmt;

use modfglm_field::PrimeField;
use modfglm_poly::ModPoly;

/// The output of an FGLM computation at one prime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parametrization {
    field: PrimeField,
    nvars: usize,
    elim: ModPoly,
    denom: ModPoly,
    coords: Vec<ModPoly>,
}

impl Parametrization {
    /// An empty parametrization: `elim = 0`, `denom = 1`, zero coordinates.
    #[must_use]
    pub fn new(field: PrimeField, nvars: usize) -> Self {
        Self {
            field,
            nvars,
            elim: ModPoly::zero(field),
            denom: ModPoly::one(field),
            coords: vec![ModPoly::zero(field); nvars.saturating_sub(1)],
        }
    }

    /// The coefficient field.
    #[must_use]
    pub fn field(&self) -> PrimeField {
        self.field
    }

    /// The prime the parametrization lives over.
    #[must_use]
    pub fn prime(&self) -> u32 {
        self.field.modulus()
    }

    /// Number of variables, `t` included.
    #[must_use]
    pub fn nvars(&self) -> usize {
        self.nvars
    }

    /// The elimination polynomial in `t`.
    #[must_use]
    pub fn elim(&self) -> &ModPoly {
        &self.elim
    }

    /// The common denominator.
    #[must_use]
    pub fn denom(&self) -> &ModPoly {
        &self.denom
    }

    /// Numerators of `x_0, ..., x_{n-2}`.
    #[must_use]
    pub fn coords(&self) -> &[ModPoly] {
        &self.coords
    }

    /// Numerator of `x_i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= nvars - 1`.
    #[must_use]
    pub fn coord(&self, i: usize) -> &ModPoly {
        &self.coords[i]
    }

    pub(crate) fn set_elim(&mut self, elim: ModPoly) {
        self.elim = elim;
    }

    pub(crate) fn set_coord(&mut self, i: usize, poly: ModPoly) {
        self.coords[i] = poly;
    }

    /// Moves the parametrization to another prime, reducing every
    /// coefficient.
    pub fn set_field(&mut self, field: PrimeField) {
        self.field = field;
        self.elim.set_field(field);
        self.denom.set_field(field);
        for c in &mut self.coords {
            c.set_field(field);
        }
    }

    /// Evaluates `(x_0, ..., x_{n-2})` at a root `t` of the elimination
    /// polynomial.
    ///
    /// Returns `None` when the denominator vanishes at `t`.
    #[must_use]
    pub fn point_at(&self, t: u32) -> Option<Vec<u32>> {
        let d = self.field.inv(self.denom.eval(t))?;
        Some(
            self.coords
                .iter()
                .map(|c| self.field.mul(c.eval(t), d))
                .chain(std::iter::once(self.field.reduce(u64::from(t))))
                .collect(),
        )
    }

    /// The Maple list format: `[p, n, elim, denom, coords...]:`.
    #[must_use]
    pub fn maple(&self) -> MapleDisplay<'_> {
        MapleDisplay(self)
    }

    /// Polynomials in output order: elim, denom, then `x_{n-2}` down to `x_0`.
    fn blocks(&self) -> impl Iterator<Item = &ModPoly> {
        [&self.elim, &self.denom]
            .into_iter()
            .chain(self.coords.iter().rev())
    }
}

/// Writes `[deg,\n[c_0, ..., c_deg]]`, with `[-1,\n[0]]` for zero.
fn write_poly(f: &mut fmt::Formatter<'_>, poly: &ModPoly) -> fmt::Result {
    let Some(deg) = poly.degree() else {
        return write!(f, "[-1,\n[0]]");
    };
    write!(f, "[{deg},\n[")?;
    for (i, c) in poly.coeffs().iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{c}")?;
    }
    write!(f, "]]")
}

impl fmt::Display for Parametrization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.prime())?;
        writeln!(f, "{}", self.nvars)?;
        for poly in self.blocks() {
            write_poly(f, poly)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Maple rendering of a [`Parametrization`].
pub struct MapleDisplay<'a>(&'a Parametrization);

impl fmt::Display for MapleDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let param = self.0;
        write!(f, "[{}, \n{}", param.prime(), param.nvars)?;
        for poly in param.blocks() {
            f.write_str(", \n")?;
            write_poly(f, poly)?;
        }
        writeln!(f, "]:")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Parametrization {
        let f = PrimeField::new(7).unwrap();
        let mut param = Parametrization::new(f, 3);
        param.set_elim(ModPoly::new(f, vec![5, 0, 1]));
        param.set_coord(0, ModPoly::new(f, vec![0, 1]));
        param.set_coord(1, ModPoly::new(f, vec![3]));
        param
    }

    #[test]
    fn test_new_is_empty() {
        let param = Parametrization::new(PrimeField::new(7).unwrap(), 3);
        assert!(param.elim().is_zero());
        assert!(param.denom().is_one());
        assert_eq!(param.coords().len(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            sample().to_string(),
            "7\n3\n[2,\n[5, 0, 1]]\n[0,\n[1]]\n[0,\n[3]]\n[1,\n[0, 1]]\n"
        );
    }

    #[test]
    fn test_display_zero_coordinate() {
        let f = PrimeField::new(7).unwrap();
        let mut param = Parametrization::new(f, 2);
        param.set_elim(ModPoly::new(f, vec![1, 1]));
        assert_eq!(param.to_string(), "7\n2\n[1,\n[1, 1]]\n[0,\n[1]]\n[-1,\n[0]]\n");
    }

    #[test]
    fn test_maple() {
        assert_eq!(
            sample().maple().to_string(),
            "[7, \n3, \n[2,\n[5, 0, 1]], \n[0,\n[1]], \n[0,\n[3]], \n[1,\n[0, 1]]]:\n"
        );
    }

    #[test]
    fn test_set_field() {
        let mut param = sample();
        param.set_field(PrimeField::new(5).unwrap());
        assert_eq!(param.prime(), 5);
        assert_eq!(param.elim().coeffs(), &[0, 0, 1]);
        assert_eq!(param.coord(1).coeffs(), &[3]);
    }

    #[test]
    fn test_point_at() {
        // t = 3 is a root of t^2 + 5 over GF(7)
        assert_eq!(sample().point_at(3), Some(vec![3, 3, 3]));
    }
}
