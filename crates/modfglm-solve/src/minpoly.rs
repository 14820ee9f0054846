//! Elimination polynomial from the power sums of `t`.

use log::{debug, info};

use modfglm_poly::algorithms::squarefree::{is_squarefree, radical};
use modfglm_poly::{BmsState, ModPoly};

use crate::layout::SystemLayout;

/// Output of the minimal polynomial stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EliminationPolynomial {
    /// Monic squarefree polynomial vanishing on the `t`-coordinates.
    pub elim: ModPoly,
    /// Minimal polynomial of the power sums.
    pub minpoly: ModPoly,
    /// True when `elim` has degree `D`: `t` separates the solutions and
    /// the ideal is radical.
    pub shape_position: bool,
}

impl EliminationPolynomial {
    /// Degree of the elimination polynomial.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.elim.degree().unwrap_or(0)
    }
}

/// Computes the elimination polynomial of a quotient of dimension `dim`.
///
/// `sequence` holds the `2 * dim` power sums. When every variable is
/// linear the quotient is a point and the polynomial is read off the last
/// linear equation instead.
#[must_use]
pub fn elimination_polynomial(
    bms: &mut BmsState,
    sequence: &[u32],
    dim: usize,
    layout: &SystemLayout,
) -> EliminationPolynomial {
    let field = bms.field();

    if layout.all_linear() {
        let row = layout.lineq_row(layout.nlins() - 1);
        let elim = ModPoly::new(field, vec![row[layout.nvars()], 1]);
        return EliminationPolynomial {
            minpoly: elim.clone(),
            elim,
            shape_position: true,
        };
    }

    bms.reset();
    bms.add_points(sequence);
    bms.reduce();
    let minpoly = bms.minimal_polynomial();
    let degree = minpoly.degree().unwrap_or(0);
    debug!("minimal polynomial of degree {degree} from {} points", sequence.len());

    if degree == dim && is_squarefree(&minpoly) {
        return EliminationPolynomial {
            elim: minpoly.clone(),
            minpoly,
            shape_position: true,
        };
    }

    let elim = radical(&minpoly);
    info!(
        "elimination polynomial has degree {} < {dim}, not in shape position",
        elim.degree().unwrap_or(0)
    );
    EliminationPolynomial {
        elim,
        minpoly,
        shape_position: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modfglm_field::PrimeField;

    fn gf(p: u64) -> PrimeField {
        PrimeField::new(p).unwrap()
    }

    #[test]
    fn test_shape_position() {
        // s_i = 1 + 2^i + 4^i over GF(101): roots 1, 2, 4
        let f = gf(101);
        let s: Vec<u32> = (0..6)
            .map(|i| f.add(f.add(1, f.pow(2, i)), f.pow(4, i)))
            .collect();
        let mut bms = BmsState::new(f);
        let e = elimination_polynomial(&mut bms, &s, 3, &SystemLayout::generic(2));
        assert!(e.shape_position);
        assert_eq!(e.elim, ModPoly::from_signed(f, &[-8, 14, -7, 1]));
        assert_eq!(e.degree(), 3);
    }

    #[test]
    fn test_repeated_root() {
        // s_i = 1 + (i + 1) 3^i: minimal polynomial (x - 1)(x - 3)^2
        let f = gf(101);
        let s: Vec<u32> = (0..6u32)
            .map(|i| f.add(1, f.mul(i + 1, f.pow(3, u64::from(i)))))
            .collect();
        let mut bms = BmsState::new(f);
        let e = elimination_polynomial(&mut bms, &s, 3, &SystemLayout::generic(2));
        assert!(!e.shape_position);
        assert_eq!(e.minpoly, ModPoly::from_signed(f, &[-9, 15, -7, 1]));
        assert_eq!(e.elim, ModPoly::from_signed(f, &[3, -4, 1]));
    }

    #[test]
    fn test_degree_drop_without_repeated_root() {
        // Two of three points share their t-coordinate
        let f = gf(101);
        let s: Vec<u32> = (0..6).map(|i| f.add(f.mul(2, f.pow(5, i)), 1)).collect();
        let mut bms = BmsState::new(f);
        let e = elimination_polynomial(&mut bms, &s, 3, &SystemLayout::generic(2));
        assert!(!e.shape_position);
        assert_eq!(e.degree(), 2);
    }

    #[test]
    fn test_all_linear_reads_last_equation() {
        let f = gf(101);
        // x = 3, t = 5
        let layout =
            SystemLayout::new(2, 2, vec![true], vec![1, 0, 3, 0, 1, 96], vec![None]).unwrap();
        let mut bms = BmsState::new(f);
        let e = elimination_polynomial(&mut bms, &[1, 5], 1, &layout);
        assert!(e.shape_position);
        assert_eq!(e.elim, ModPoly::from_signed(f, &[-5, 1]));
    }
}
