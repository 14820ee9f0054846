//! Property-based tests for prime field arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::PrimeField;

    // Includes the largest accepted prime
    const PRIMES: [u64; 3] = [7, 65521, 1_518_500_183];

    fn field() -> impl Strategy<Value = PrimeField> {
        prop::sample::select(PRIMES.to_vec()).prop_map(|p| PrimeField::new(p).unwrap())
    }

    fn field_and_elems() -> impl Strategy<Value = (PrimeField, u32, u32)> {
        field().prop_flat_map(|f| {
            let p = f.modulus();
            (Just(f), 0..p, 0..p)
        })
    }

    proptest! {
        #[test]
        fn add_sub_inverse((f, a, b) in field_and_elems()) {
            prop_assert_eq!(f.sub(f.add(a, b), b), a);
        }

        #[test]
        fn neg_is_additive_inverse((f, a, _b) in field_and_elems()) {
            prop_assert_eq!(f.add(a, f.neg(a)), 0);
        }

        #[test]
        fn mul_matches_wide_product((f, a, b) in field_and_elems()) {
            let expected = (u128::from(a) * u128::from(b) % u128::from(f.modulus())) as u32;
            prop_assert_eq!(f.mul(a, b), expected);
        }

        #[test]
        fn inverse_roundtrip((f, a, _b) in field_and_elems()) {
            prop_assume!(a != 0);
            let inv = f.inv(a).unwrap();
            prop_assert_eq!(f.mul(a, inv), 1);
        }

        #[test]
        fn fermat_little_theorem((f, a, _b) in field_and_elems()) {
            prop_assume!(a != 0);
            prop_assert_eq!(f.pow(a, u64::from(f.modulus()) - 1), 1);
        }

        #[test]
        fn dot_matches_naive(
            f in field(),
            raw in proptest::collection::vec((any::<u32>(), any::<u32>()), 0..40)
        ) {
            let a: Vec<u32> = raw.iter().map(|&(x, _)| f.reduce(u64::from(x))).collect();
            let b: Vec<u32> = raw.iter().map(|&(_, y)| f.reduce(u64::from(y))).collect();
            let naive = a.iter().zip(&b).fold(0, |acc, (&x, &y)| f.mul_add(acc, x, y));
            prop_assert_eq!(f.dot(&a, &b), naive);
        }
    }
}
