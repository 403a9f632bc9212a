//! Fixtures and proptest strategies shared across the workspace's hafnian
//! law tests: known-value scenarios, symmetric-matrix generation, and
//! permutation application for the symmetry-insensitivity law.

use haf_matrix::Mat;
use proptest::prelude::*;

/// The `n x n` all-ones matrix (`n` need not be even; callers slice as
/// needed).
pub fn all_ones(n: usize) -> Mat<f64> {
    Mat::from_row_major(vec![1.0; n * n]).unwrap()
}

/// `haf(J_{2m}) = (2m-1)!!`, the number of perfect matchings of `K_{2m}`.
pub fn expected_all_ones_hafnian(two_m: usize) -> f64 {
    debug_assert_eq!(two_m % 2, 0);
    let mut product = 1.0;
    let mut k = two_m as i64 - 1;
    while k > 0 {
        product *= k as f64;
        k -= 2;
    }
    product
}

/// `loop_haf(J_{2m}) = sum_{k=0}^{m} C(2m,2k) * (2k-1)!!`, the number of
/// perfect matchings of `K_{2m}` when self-loops are also allowed.
pub fn expected_all_ones_loop_hafnian(two_m: usize) -> f64 {
    debug_assert_eq!(two_m % 2, 0);
    let m = two_m / 2;
    (0..=m)
        .map(|k| binomial(two_m, 2 * k) * expected_all_ones_hafnian(2 * k).max(1.0))
        .sum()
}

fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let mut result = 1.0;
    for i in 0..k {
        result *= (n - i) as f64;
        result /= (i + 1) as f64;
    }
    result
}

/// Applies the permutation `perm` (a bijection on `0..n`) to `a`, returning
/// `P A P^T` in the same row-major layout.
pub fn permute(a: &Mat<f64>, perm: &[usize]) -> Mat<f64> {
    let n = a.order();
    let mut data = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            data[i * n + j] = a.get(perm[i], perm[j]);
        }
    }
    Mat::from_row_major(data).unwrap()
}

/// A proptest strategy producing a random permutation of `0..n` via
/// Fisher-Yates over a sequence of index swaps.
pub fn permutation_strategy(n: usize) -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..n.max(1), n).prop_map(move |swaps| {
        let mut perm: Vec<usize> = (0..n).collect();
        for (i, &j) in swaps.iter().enumerate() {
            perm.swap(i, j % n.max(1));
        }
        perm
    })
}

/// A proptest strategy producing a random symmetric `n x n` real matrix with
/// entries in `[-bound, bound]`.
pub fn symmetric_matrix_strategy(n: usize, bound: f64) -> impl Strategy<Value = Mat<f64>> {
    prop::collection::vec(-bound..bound, n * n).prop_map(move |flat| {
        let mut data = flat;
        for i in 0..n {
            for j in 0..i {
                let v = data[i * n + j];
                data[j * n + i] = v;
            }
        }
        Mat::from_row_major(data).unwrap()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_ones_hafnian_matches_known_values() {
        assert_eq!(expected_all_ones_hafnian(2), 1.0);
        assert_eq!(expected_all_ones_hafnian(4), 3.0);
        assert_eq!(expected_all_ones_hafnian(6), 15.0);
        assert_eq!(expected_all_ones_hafnian(8), 105.0);
    }

    #[test]
    fn all_ones_loop_hafnian_matches_known_values() {
        assert_eq!(expected_all_ones_loop_hafnian(2), 2.0);
        assert_eq!(expected_all_ones_loop_hafnian(4), 10.0);
    }

    #[test]
    fn permute_identity_is_a_no_op() {
        let a = all_ones(4);
        let id: Vec<usize> = (0..4).collect();
        assert_eq!(permute(&a, &id), a);
    }
}
