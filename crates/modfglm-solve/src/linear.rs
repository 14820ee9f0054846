//! Back-substitution of the linear variables.

use modfglm_poly::algorithms::gcd::poly_rem;
use modfglm_poly::ModPoly;

use crate::layout::SystemLayout;
use crate::param::Parametrization;

/// Fills the coordinates of linear variables from their equations.
///
/// Equations are processed from the highest variable down, so every
/// coordinate an equation refers to is already known. Results are reduced
/// modulo the elimination polynomial, which must be set.
pub struct LinearVariableEliminator<'a> {
    layout: &'a SystemLayout,
}

impl<'a> LinearVariableEliminator<'a> {
    /// Creates an eliminator for `layout`.
    #[must_use]
    pub fn new(layout: &'a SystemLayout) -> Self {
        Self { layout }
    }

    /// Writes `x_k = c_t t + c_0 - sum_{j > k} c_j x_j mod elim` for every
    /// linear `x_k`.
    pub fn apply(&self, param: &mut Parametrization) {
        let field = param.field();
        let nvars = self.layout.nvars();
        let elim = param.elim().clone();
        if elim.is_zero() {
            return;
        }

        let linear: Vec<usize> = self.layout.linear_coordinates().collect();
        for (r, &k) in linear.iter().enumerate().rev() {
            let row = self.layout.lineq_row(r);
            let mut acc = ModPoly::new(field, vec![row[nvars], row[nvars - 1]]);
            for j in k + 1..nvars - 1 {
                if row[j] != 0 {
                    acc = acc.sub(&param.coord(j).scale(row[j]));
                }
            }
            param.set_coord(k, poly_rem(&acc, &elim));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modfglm_field::PrimeField;

    #[test]
    fn test_chain_of_linear_variables() {
        let f = PrimeField::new(101).unwrap();
        // x_0 = x_1 + 1, x_1 = 2 x_2 + t, x_2 = t^2 with t^3 = 1
        let layout = SystemLayout::new(
            4,
            2,
            vec![true, true, false],
            vec![1, 100, 0, 0, 1, 0, 1, 99, 1, 0],
            vec![None; 3],
        )
        .unwrap();

        let mut param = Parametrization::new(f, 4);
        param.set_elim(ModPoly::from_signed(f, &[-1, 0, 0, 1]));
        param.set_coord(2, ModPoly::new(f, vec![0, 0, 1]));
        LinearVariableEliminator::new(&layout).apply(&mut param);

        assert_eq!(param.coord(1).coeffs(), &[0, 1, 2]);
        assert_eq!(param.coord(0).coeffs(), &[1, 1, 2]);
    }

    #[test]
    fn test_t_and_constant_columns_are_added() {
        let f = PrimeField::new(101).unwrap();
        // Row [1, 3, 1] reads x_0 = 3 t + 1
        let layout = SystemLayout::new(2, 1, vec![true], vec![1, 3, 1], vec![None]).unwrap();
        let mut param = Parametrization::new(f, 2);
        param.set_elim(ModPoly::from_signed(f, &[1, 0, 1]));
        LinearVariableEliminator::new(&layout).apply(&mut param);
        assert_eq!(param.coord(0).coeffs(), &[1, 3]);
    }

    #[test]
    fn test_reduces_modulo_elim() {
        let f = PrimeField::new(7).unwrap();
        // x_0 = 2 t + 1 vanishes at t = 3 over GF(7)
        let layout = SystemLayout::new(2, 1, vec![true], vec![1, 2, 1], vec![None]).unwrap();
        let mut param = Parametrization::new(f, 2);
        param.set_elim(ModPoly::from_signed(f, &[-3, 1]));
        LinearVariableEliminator::new(&layout).apply(&mut param);
        assert!(param.coord(0).is_zero());
    }
}
