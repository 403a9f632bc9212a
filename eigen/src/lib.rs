//! Eigensolver adapter.
//!
//! Wraps `nalgebra`'s Schur decomposition: given a dense square matrix of
//! either element type, returns its eigenvalues as `Complex64`, in whatever
//! order the backend happens to produce them. Downstream (`haf-traces`) only
//! ever sums powers of these, so ordering is never observable.

use std::fmt;

use haf_field::HafnianScalar;
use haf_matrix::Mat;
use nalgebra::{linalg::Schur, DMatrix};
use num_complex::Complex64;

/// The eigensolver backend failed to converge for a matrix of this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EigensolverFailure {
    pub size: usize,
}

impl fmt::Display for EigensolverFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "eigensolver did not converge for a {0}x{0} matrix",
            self.size
        )
    }
}

impl std::error::Error for EigensolverFailure {}

/// Returns the eigenvalues of `b`. On `order() == 0`, returns an empty vector
/// without invoking the backend at all.
pub fn eigenvalues<T: HafnianScalar>(b: &Mat<T>) -> Result<Vec<Complex64>, EigensolverFailure> {
    let n = b.order();
    if n == 0 {
        return Ok(Vec::new());
    }

    let complex_data: Vec<Complex64> = b.as_slice().iter().map(|&v| v.to_complex()).collect();
    let m = DMatrix::from_row_slice(n, n, &complex_data);

    let schur = Schur::try_new(m).ok_or(EigensolverFailure { size: n })?;
    let eigs = schur.eigenvalues().ok_or(EigensolverFailure { size: n })?;
    Ok(eigs.iter().copied().collect())
}
