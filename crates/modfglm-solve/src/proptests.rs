//! Property-based tests for the Hankel solver.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use modfglm_field::PrimeField;
    use modfglm_poly::BmsState;

    use crate::hankel::invert_hankel;

    fn field() -> PrimeField {
        PrimeField::new(65521).unwrap()
    }

    proptest! {
        #[test]
        fn hankel_solution_satisfies_system(
            s in proptest::collection::vec(0u32..65521, 2..=14),
            c in proptest::collection::vec(0u32..65521, 8),
        ) {
            let f = field();
            let d = s.len() / 2;
            let mut bms = BmsState::new(f);
            if let Ok(inverse) = invert_hankel(&mut bms, &s, d) {
                prop_assert!(inverse.check(&s));

                let w = inverse.level().window(f, &s, 2 * d - 1);
                let rhs = inverse.level().window(f, &c, d);
                let a = inverse.solve_stream(&c);
                prop_assert!(a.length() <= d);
                for i in 0..d {
                    let row = (0..d).fold(0, |acc, j| f.mul_add(acc, w[i + j], a.coeff(j)));
                    prop_assert_eq!(row, rhs[i]);
                }
            }
        }
    }
}
