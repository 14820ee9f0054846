//! Property-based tests for polynomial arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use modfglm_field::PrimeField;

    use crate::algorithms::gcd::{poly_div_rem, poly_extended_gcd, poly_inverse_mod};
    use crate::algorithms::squarefree::{is_squarefree, radical, squarefree_decomposition};
    use crate::dense::ModPoly;
    use crate::BmsState;

    fn field() -> PrimeField {
        PrimeField::new(65521).unwrap()
    }

    // Strategy for generating small polynomials (degree 0-7)
    fn small_poly() -> impl Strategy<Value = ModPoly> {
        proptest::collection::vec(0u32..65521, 1..=8).prop_map(|c| ModPoly::new(field(), c))
    }

    // Strategy for generating non-zero polynomials
    fn nonzero_poly() -> impl Strategy<Value = ModPoly> {
        small_poly().prop_filter("polynomial must be non-zero", |p| !p.is_zero())
    }

    // Polynomials with small roots, so repeated factors are common
    fn split_poly() -> impl Strategy<Value = ModPoly> {
        proptest::collection::vec(0u32..4, 1..=6).prop_map(|roots| {
            roots.into_iter().fold(ModPoly::one(field()), |acc, r| {
                acc.mul(&ModPoly::new(field(), vec![field().neg(r), 1]))
            })
        })
    }

    proptest! {
        #[test]
        fn poly_mul_commutative(a in small_poly(), b in small_poly()) {
            prop_assert_eq!(a.mul(&b), b.mul(&a));
        }

        #[test]
        fn poly_distributive(a in small_poly(), b in small_poly(), c in small_poly()) {
            let left = a.mul(&b.add(&c));
            let right = a.mul(&b).add(&a.mul(&c));
            prop_assert_eq!(left, right);
        }

        #[test]
        fn poly_additive_inverse(a in small_poly()) {
            prop_assert!(a.add(&a.neg()).is_zero());
        }

        #[test]
        fn poly_eval_mul(a in small_poly(), b in small_poly(), x in 0u32..65521) {
            let f = field();
            prop_assert_eq!(a.mul(&b).eval(x), f.mul(a.eval(x), b.eval(x)));
        }

        #[test]
        fn mullow_is_truncated_mul(a in small_poly(), b in small_poly(), n in 0usize..16) {
            prop_assert_eq!(a.mullow(&b, n), a.mul(&b).truncate(n));
        }

        #[test]
        fn reverse_is_involution(a in small_poly(), extra in 0usize..4) {
            let n = a.length() + extra;
            prop_assert_eq!(a.reverse(n).reverse(n), a);
        }

        #[test]
        fn shift_roundtrip(a in small_poly(), n in 0usize..8) {
            prop_assert_eq!(a.shift_left(n).shift_right(n), a);
        }

        #[test]
        fn div_rem_identity(a in small_poly(), b in nonzero_poly()) {
            let (q, r) = poly_div_rem(&a, &b);
            prop_assert_eq!(q.mul(&b).add(&r), a);
            prop_assert!(r.length() < b.length());
        }

        #[test]
        fn bezout_identity(a in small_poly(), b in small_poly()) {
            let (g, s, t) = poly_extended_gcd(&a, &b);
            prop_assert_eq!(s.mul(&a).add(&t.mul(&b)), g.clone());
            if !g.is_zero() {
                prop_assert_eq!(g.leading_coeff(), Some(1));
            }
        }

        #[test]
        fn inverse_mod_roundtrip(a in small_poly(), m in nonzero_poly()) {
            if let Some(inv) = poly_inverse_mod(&a, &m) {
                let one = poly_div_rem(&a.mul(&inv), &m).1;
                if m.length() > 1 {
                    prop_assert!(one.is_one());
                }
            }
        }

        #[test]
        fn squarefree_reconstructs(p in split_poly()) {
            let decomp = squarefree_decomposition(&p);
            prop_assert_eq!(decomp.to_polynomial(&p), p.clone());

            let rad = radical(&p);
            prop_assert!(is_squarefree(&rad));
            // Every root of p is a root of the radical
            for r in 0u32..4 {
                prop_assert_eq!(p.eval(r) == 0, rad.eval(r) == 0);
            }
        }

        #[test]
        fn berlekamp_massey_recovers_recurrence(
            roots in proptest::collection::vec(1u32..65521, 1..=4),
            weights in proptest::collection::vec(1u32..65521, 4)
        ) {
            // s_i = sum_k w_k r_k^i satisfies the recurrence of prod (x - r_k)
            let f = field();
            let n = 2 * roots.len();
            let points: Vec<u32> = (0..n)
                .map(|i| {
                    roots.iter().zip(&weights).fold(0, |acc, (&r, &w)| {
                        f.mul_add(acc, w, f.pow(r, i as u64))
                    })
                })
                .collect();

            let mut bms = BmsState::new(f);
            bms.add_points(&points);
            bms.reduce();
            let m = bms.minimal_polynomial();

            // Repeated roots or cancelling weights can only lower the order
            prop_assert!(m.length() <= roots.len() + 1);
            for i in 0..n - m.length() + 1 {
                let sum = (0..m.length()).fold(0, |acc, j| f.mul_add(acc, m.coeff(j), points[i + j]));
                prop_assert_eq!(sum, 0);
            }
        }
    }
}
