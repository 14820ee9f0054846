//! Karatsuba multiplication algorithm.
//!
//! Operates on raw residue slices over a [`PrimeField`]. The outputs are not
//! trimmed; callers wrap them in [`crate::ModPoly::new`].

use modfglm_field::PrimeField;

/// Karatsuba multiplication threshold.
///
/// Below this length, schoolbook multiplication is faster.
pub const KARATSUBA_THRESHOLD: usize = 32;

/// Rows accumulated before the schoolbook accumulator is reduced.
const REDUCE_EVERY: usize = 8;

/// Performs Karatsuba multiplication on coefficient slices.
#[must_use]
pub fn karatsuba_mul(field: PrimeField, a: &[u32], b: &[u32]) -> Vec<u32> {
    let n = a.len();
    let m = b.len();

    if n < KARATSUBA_THRESHOLD || m < KARATSUBA_THRESHOLD {
        return schoolbook_mul(field, a, b);
    }

    let size = n.max(m).next_power_of_two();
    let half = size / 2;

    let mut a_ext = a.to_vec();
    let mut b_ext = b.to_vec();
    a_ext.resize(size, 0);
    b_ext.resize(size, 0);

    // a = a0 + a1*x^half, b = b0 + b1*x^half
    let (a0, a1) = a_ext.split_at(half);
    let (b0, b1) = b_ext.split_at(half);

    let z0 = karatsuba_mul(field, a0, b0);
    let z2 = karatsuba_mul(field, a1, b1);

    let a01: Vec<u32> = a0.iter().zip(a1).map(|(&x, &y)| field.add(x, y)).collect();
    let b01: Vec<u32> = b0.iter().zip(b1).map(|(&x, &y)| field.add(x, y)).collect();

    // z1 = (a0+a1)*(b0+b1) - z0 - z2
    let mut z1 = karatsuba_mul(field, &a01, &b01);
    for (i, &c) in z0.iter().enumerate() {
        z1[i] = field.sub(z1[i], c);
    }
    for (i, &c) in z2.iter().enumerate() {
        z1[i] = field.sub(z1[i], c);
    }

    let mut result = vec![0u32; 2 * size - 1];
    result[..z0.len()].copy_from_slice(&z0);
    for (i, c) in z1.into_iter().enumerate() {
        result[i + half] = field.add(result[i + half], c);
    }
    for (i, c) in z2.into_iter().enumerate() {
        result[i + 2 * half] = field.add(result[i + 2 * half], c);
    }

    result.truncate(n + m - 1);
    result
}

/// Schoolbook multiplication: O(n²).
///
/// Each output slot receives one product per row, so the `u64`
/// accumulator only needs reducing every [`REDUCE_EVERY`] rows.
#[must_use]
pub fn schoolbook_mul(field: PrimeField, a: &[u32], b: &[u32]) -> Vec<u32> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let p = u64::from(field.modulus());
    let mut acc = vec![0u64; a.len() + b.len() - 1];

    for (i, &ai) in a.iter().enumerate() {
        if ai != 0 {
            let ai = u64::from(ai);
            for (slot, &bj) in acc[i..].iter_mut().zip(b) {
                *slot += ai * u64::from(bj);
            }
        }
        if i % REDUCE_EVERY == REDUCE_EVERY - 1 {
            acc.iter_mut().for_each(|c| *c %= p);
        }
    }

    acc.into_iter().map(|c| field.reduce(c)).collect()
}
