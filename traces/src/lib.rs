//! Power-trace engine.
//!
//! `tr(B^k) = sum_j lambda_j^k` for `k = 1..=l`, computed in `O(l*n)` from a
//! precomputed eigenvalue list rather than `O(l)` matrix multiplications.

use num_complex::Complex64;

/// Returns `tau` of length `l` with `tau[k-1] = tr(B^k) = sum_j eigs[j]^k`.
///
/// Maintains a running vector of powers of each eigenvalue, advancing it by
/// one multiplication per step instead of recomputing `eigs[j].powi(k)` from
/// scratch.
pub fn power_traces(eigs: &[Complex64], l: usize) -> Vec<Complex64> {
    let mut running: Vec<Complex64> = eigs.to_vec();
    let mut tau = Vec::with_capacity(l);
    for _ in 0..l {
        tau.push(running.iter().sum());
        for (p, &lambda) in running.iter_mut().zip(eigs) {
            *p *= lambda;
        }
    }
    tau
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_eigenvalues_give_zero_traces() {
        assert_eq!(power_traces(&[], 3), vec![Complex64::new(0.0, 0.0); 3]);
    }

    #[test]
    fn l_zero_gives_empty_traces() {
        assert_eq!(power_traces(&[Complex64::new(2.0, 0.0)], 0), Vec::new());
    }

    #[test]
    fn matches_direct_power_sums() {
        let eigs = vec![
            Complex64::new(2.0, 0.0),
            Complex64::new(-1.0, 0.5),
            Complex64::new(0.0, 3.0),
        ];
        let tau = power_traces(&eigs, 4);
        for (k, &t) in tau.iter().enumerate() {
            let k = k + 1;
            let expected: Complex64 = eigs.iter().map(|e| e.powu(k as u32)).sum();
            assert!((t - expected).norm() < 1e-9);
        }
    }
}
