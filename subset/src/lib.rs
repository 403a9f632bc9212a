//! Subset enumerator / chunk worker.
//!
//! For each subset index `x` in `[0, 2^m)` this builds the reduced matrix
//! `B(x)`, its power traces, and folds them into a truncated
//! `Pi_i exp(factor_i * z^i)` generating function whose degree-`m`
//! coefficient is `x`'s signed contribution to the hafnian.

use haf_eigen::{self, EigensolverFailure};
use haf_field::HafnianScalar;
use haf_matrix::{pos, Mat};
use haf_maybe_rayon::prelude::*;
use num_complex::Complex64;
use num_traits::Zero;
use tracing::instrument;

/// Diagonal auxiliaries for loop-hafnian mode: `d[i] = A[i,i]`, and `c` is
/// `d` with sibling pairs swapped (`c[2k] = d[2k+1]`, `c[2k+1] = d[2k]`).
pub struct LoopAux<'a, T> {
    pub c: &'a [T],
    pub d: &'a [T],
}

/// Builds the `c` vector from a matrix's diagonal: sibling pairs swapped.
pub fn sibling_swap<T: Copy>(d: &[T]) -> Vec<T> {
    let mut c = d.to_vec();
    for i in (0..d.len()).step_by(2) {
        if i + 1 < d.len() {
            c.swap(i, i + 1);
        }
    }
    c
}

/// The per-subset procedure: build the reduced matrix, its power traces, and
/// fold them into the generating-function accumulator, with the loop-mode
/// diagonal correction folded in when `loop_aux` is given.
fn subset_summand<T: HafnianScalar>(
    a: &Mat<T>,
    m: usize,
    x: usize,
    loop_aux: Option<&LoopAux<T>>,
) -> Result<Complex64, EigensolverFailure> {
    let positions = pos(x, m);
    let k = positions.len() / 2;

    let b = a.reduced(&positions);
    let eigs = haf_eigen::eigenvalues(&b)?;
    let tau = haf_traces::power_traces(&eigs, m);

    // c1/d1: the loop-mode diagonal auxiliaries restricted to this subset's
    // rows. c1 is advanced by one row-vector * matrix multiply by b per
    // iteration, so each i's factor genuinely depends on the evolving c1 —
    // this cannot be hoisted out of the loop and precomputed.
    let mut c1: Vec<T> = loop_aux
        .map(|aux| positions.iter().map(|&i| aux.c[i]).collect())
        .unwrap_or_default();
    let d1: Vec<T> = loop_aux
        .map(|aux| positions.iter().map(|&i| aux.d[i]).collect())
        .unwrap_or_default();

    let mut prev = vec![Complex64::new(0.0, 0.0); m + 1];
    prev[0] = Complex64::new(1.0, 0.0);
    let mut curr = prev.clone();

    for i in 1..=m {
        let mut factor = tau[i - 1] / (2.0 * i as f64);
        if loop_aux.is_some() {
            let dot: T = c1
                .iter()
                .zip(d1.iter())
                .map(|(&c, &d)| c * d)
                .fold(T::zero(), |acc, v| acc + v);
            factor += Complex64::new(0.5, 0.0) * dot.to_complex();
            c1 = vec_times_matrix(&c1, &b);
        }

        curr.copy_from_slice(&prev);
        let mut powfactor = Complex64::new(1.0, 0.0);
        for j in 1..=(m / i) {
            powfactor *= factor / (j as f64);
            for kp in (i * j + 1)..=(m + 1) {
                let new_idx = kp - 1;
                let old_idx = kp - i * j - 1;
                curr[new_idx] += prev[old_idx] * powfactor;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let sigma = if (k % 2) == (m % 2) { 1.0 } else { -1.0 };
    Ok(sigma * prev[m])
}

fn vec_times_matrix<T: HafnianScalar>(v: &[T], mat: &Mat<T>) -> Vec<T> {
    let n = mat.order();
    (0..n)
        .map(|j| {
            (0..n)
                .map(|i| v[i] * mat.get(i, j))
                .fold(T::zero(), |acc, x| acc + x)
        })
        .collect()
}

/// Sums `summand(x)` for every subset `x` in `[0, 2^m)`, dispatched across
/// the ambient rayon pool. `min_chunk_len` tunes task granularity as a pool
/// knob rather than a caller-supplied start/length pair. `None` lets rayon
/// pick.
///
/// On failure, every subset is still evaluated (no early abort); the first
/// `EigensolverFailure` encountered is returned.
#[instrument(skip_all, fields(m = m))]
pub fn hafnian_sum<T: HafnianScalar>(
    a: &Mat<T>,
    m: usize,
    loop_aux: Option<&LoopAux<T>>,
    min_chunk_len: Option<usize>,
) -> Result<Complex64, EigensolverFailure> {
    let total = 1usize << m;

    #[cfg(feature = "parallel")]
    let results: Vec<Result<Complex64, EigensolverFailure>> = {
        let iter = (0..total).into_par_iter();
        let iter = match min_chunk_len {
            Some(len) => iter.with_min_len(len.max(1)),
            None => iter,
        };
        iter.map(|x| subset_summand(a, m, x, loop_aux)).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let results: Vec<Result<Complex64, EigensolverFailure>> = {
        let _ = min_chunk_len;
        (0..total)
            .into_par_iter()
            .map(|x| subset_summand(a, m, x, loop_aux))
            .collect()
    };

    if let Some(err) = results.iter().find_map(|r| r.as_ref().err().copied()) {
        tracing::trace!(size = err.size, "eigensolver failed for some subset");
        return Err(err);
    }
    Ok(results.into_iter().map(Result::unwrap).sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use haf_matrix::Mat;

    fn all_ones(n: usize) -> Mat<f64> {
        Mat::from_row_major(vec![1.0; n * n]).unwrap()
    }

    #[test]
    fn all_ones_4x4_has_three_matchings() {
        let a = all_ones(4);
        let sum = hafnian_sum(&a, 2, None, None).unwrap();
        assert!((sum.re - 3.0).abs() < 1e-9, "got {sum:?}");
    }

    #[test]
    fn all_ones_6x6_has_fifteen_matchings() {
        let a = all_ones(6);
        let sum = hafnian_sum(&a, 3, None, None).unwrap();
        assert!((sum.re - 15.0).abs() < 1e-8, "got {sum:?}");
    }

    #[test]
    fn sibling_swap_exchanges_pairs() {
        let d = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(sibling_swap(&d), vec![2.0, 1.0, 4.0, 3.0]);
    }

    #[test]
    fn two_by_two_loop_hafnian_matches_ac_plus_b() {
        // A = [[a,b],[b,c]]
        let (a_, b_, c_) = (2.0, 5.0, 3.0);
        let a = Mat::from_row_major(vec![a_, b_, b_, c_]).unwrap();
        let d = vec![a_, c_];
        let c = sibling_swap(&d);
        let aux = LoopAux { c: &c, d: &d };
        let sum = hafnian_sum(&a, 1, Some(&aux), None).unwrap();
        assert!((sum.re - (a_ * c_ + b_)).abs() < 1e-9, "got {sum:?}");
    }
}
