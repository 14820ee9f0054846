//! Polynomial division and GCD algorithms.

use modfglm_field::PrimeField;

use crate::dense::ModPoly;

/// Divides polynomial a by b, returning (quotient, remainder).
///
/// # Panics
///
/// Panics if `b` is the zero polynomial.
#[must_use]
pub fn poly_div_rem(a: &ModPoly, b: &ModPoly) -> (ModPoly, ModPoly) {
    let field = a.field();
    let Some(b_lead) = b.leading_coeff() else {
        panic!("division by zero polynomial");
    };
    if a.length() < b.length() {
        return (ModPoly::zero(field), a.clone());
    }

    let b_lead_inv = lead_inverse(field, b_lead);
    let bc = b.coeffs();
    let mut quotient = vec![0u32; a.length() - b.length() + 1];
    let mut remainder = a.coeffs().to_vec();

    for deg_diff in (0..quotient.len()).rev() {
        let top = remainder[deg_diff + bc.len() - 1];
        if top == 0 {
            continue;
        }
        let coeff = field.mul(top, b_lead_inv);
        quotient[deg_diff] = coeff;

        for (i, &c) in bc.iter().enumerate() {
            let slot = &mut remainder[deg_diff + i];
            *slot = field.sub(*slot, field.mul(coeff, c));
        }
    }

    remainder.truncate(bc.len() - 1);
    (ModPoly::new(field, quotient), ModPoly::new(field, remainder))
}

/// Computes the remainder of a modulo b.
///
/// # Panics
///
/// Panics if `b` is the zero polynomial.
#[must_use]
pub fn poly_rem(a: &ModPoly, b: &ModPoly) -> ModPoly {
    if a.length() < b.length() {
        return a.clone();
    }
    poly_div_rem(a, b).1
}

/// Computes the monic GCD of two polynomials with the Euclidean algorithm.
#[must_use]
pub fn poly_gcd(a: &ModPoly, b: &ModPoly) -> ModPoly {
    let mut p = a.clone();
    let mut q = b.clone();

    while !q.is_zero() {
        let r = poly_rem(&p, &q);
        p = q;
        q = r;
    }

    p.make_monic()
}

/// Extended polynomial GCD.
///
/// Computes (gcd, s, t) such that gcd = s*a + t*b with gcd monic.
/// When both inputs are zero the gcd is zero and (s, t) = (1, 0).
#[must_use]
pub fn poly_extended_gcd(a: &ModPoly, b: &ModPoly) -> (ModPoly, ModPoly, ModPoly) {
    let field = a.field();

    let mut old_r = a.clone();
    let mut r = b.clone();
    let mut old_s = ModPoly::one(field);
    let mut s = ModPoly::zero(field);
    let mut old_t = ModPoly::zero(field);
    let mut t = ModPoly::one(field);

    while !r.is_zero() {
        let (q, rem) = poly_div_rem(&old_r, &r);

        let new_s = old_s.sub(&q.mul(&s));
        let new_t = old_t.sub(&q.mul(&t));

        old_r = std::mem::replace(&mut r, rem);
        old_s = std::mem::replace(&mut s, new_s);
        old_t = std::mem::replace(&mut t, new_t);
    }

    let Some(lead) = old_r.leading_coeff() else {
        return (old_r, ModPoly::one(field), ModPoly::zero(field));
    };

    let lead_inv = lead_inverse(field, lead);
    (
        old_r.scale(lead_inv),
        old_s.scale(lead_inv),
        old_t.scale(lead_inv),
    )
}

/// Computes the inverse of `a` modulo `m`, if it exists.
///
/// The result is reduced modulo `m`.
#[must_use]
pub fn poly_inverse_mod(a: &ModPoly, m: &ModPoly) -> Option<ModPoly> {
    let reduced = poly_rem(a, m);
    let (g, _, t) = poly_extended_gcd(m, &reduced);
    if g.is_one() {
        Some(poly_rem(&t, m))
    } else {
        None
    }
}

/// Inverse of a leading coefficient, which is non-zero by the trimming invariant.
fn lead_inverse(field: PrimeField, lead: u32) -> u32 {
    field.inv(lead).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gf(p: u64) -> PrimeField {
        PrimeField::new(p).unwrap()
    }

    #[test]
    fn test_poly_div_rem() {
        let f = gf(7);
        // (x^2 + 2x + 1) / (x + 1) = (x + 1), remainder 0
        let a = ModPoly::new(f, vec![1, 2, 1]);
        let b = ModPoly::new(f, vec![1, 1]);

        let (q, r) = poly_div_rem(&a, &b);

        assert_eq!(q.coeffs(), &[1, 1]);
        assert!(r.is_zero());
    }

    #[test]
    fn test_poly_div_rem_with_remainder() {
        let f = gf(7);
        // x^3 = (x^2 + x + 1)(x - 1) + 1
        let a = ModPoly::monomial(f, 1, 3);
        let b = ModPoly::new(f, vec![1, 1, 1]);

        let (q, r) = poly_div_rem(&a, &b);
        assert_eq!(q.coeffs(), &[6, 1]);
        assert_eq!(r.coeffs(), &[1]);
    }

    #[test]
    #[should_panic(expected = "division by zero polynomial")]
    fn test_div_by_zero_panics() {
        let f = gf(7);
        let _ = poly_div_rem(&ModPoly::one(f), &ModPoly::zero(f));
    }

    #[test]
    fn test_poly_gcd() {
        let f = gf(7);
        // gcd(x^2 - 1, x^2 - 2x + 1) = x - 1
        let a = ModPoly::from_signed(f, &[-1, 0, 1]);
        let b = ModPoly::from_signed(f, &[1, -2, 1]);

        let g = poly_gcd(&a, &b);
        assert_eq!(g.coeffs(), &[6, 1]);
    }

    #[test]
    fn test_poly_extended_gcd() {
        let f = gf(7);
        let a = ModPoly::from_signed(f, &[-1, 0, 1]); // x^2 - 1
        let b = ModPoly::from_signed(f, &[-1, 1]); // x - 1

        let (gcd, s, t) = poly_extended_gcd(&a, &b);

        assert_eq!(gcd.coeffs(), &[6, 1]);
        let check = s.mul(&a).add(&t.mul(&b));
        assert_eq!(check, gcd);
    }

    #[test]
    fn test_poly_extended_gcd_coprime() {
        let f = gf(7);
        // x^2 + 1 is irreducible over GF(7)
        let a = ModPoly::new(f, vec![1, 0, 1]);
        let b = ModPoly::from_signed(f, &[-1, 1]);

        let (gcd, s, t) = poly_extended_gcd(&a, &b);

        assert!(gcd.is_one());
        let check = s.mul(&a).add(&t.mul(&b));
        assert_eq!(check, gcd);
    }

    #[test]
    fn test_poly_extended_gcd_zero() {
        let f = gf(7);
        let a = ModPoly::new(f, vec![1, 2]); // 1 + 2x
        let b = ModPoly::zero(f);

        let (gcd, s, t) = poly_extended_gcd(&a, &b);

        assert_eq!(gcd.coeffs(), &[4, 1]);
        assert!(t.is_zero());
        assert_eq!(s.mul(&a), gcd);
    }

    #[test]
    fn test_inverse_mod() {
        let f = gf(7);
        let m = ModPoly::new(f, vec![1, 0, 1]); // x^2 + 1
        let a = ModPoly::new(f, vec![0, 1]); // x, inverse is -x
        let inv = poly_inverse_mod(&a, &m).unwrap();
        assert_eq!(inv.coeffs(), &[0, 6]);

        let shared = ModPoly::from_signed(f, &[-1, 0, 1]);
        let root = ModPoly::from_signed(f, &[-1, 1]);
        assert!(poly_inverse_mod(&root, &shared).is_none());
    }
}
