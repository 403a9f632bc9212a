//! Top-level drivers: `hafnian`, `loop_hafnian`, `hafnian_int`.
//!
//! Thin orchestrators — compute `m`, build the loop-mode `C`/`D` vectors
//! when needed, and dispatch into `haf-subset` or `haf-int`. All three are
//! pure functions of their input; there is no persisted state.

use std::fmt;

use haf_field::HafnianScalar;
use haf_matrix::Mat;

/// Errors the core can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HafnianError {
    /// The input's length is not a perfect square, or its order is odd.
    EvenDimensionRequired { order: usize },
    /// The eigensolver backend failed to converge for some subset's reduced
    /// matrix.
    EigensolverFailure { size: usize },
}

impl fmt::Display for HafnianError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HafnianError::EvenDimensionRequired { order } => {
                write!(f, "matrix order {order} is not a positive even integer")
            }
            HafnianError::EigensolverFailure { size } => {
                write!(f, "eigensolver did not converge for a {size}x{size} matrix")
            }
        }
    }
}

impl std::error::Error for HafnianError {}

impl From<haf_eigen::EigensolverFailure> for HafnianError {
    fn from(e: haf_eigen::EigensolverFailure) -> Self {
        HafnianError::EigensolverFailure { size: e.size }
    }
}

/// Validates that `len` is a perfect square of even order and returns that
/// order. Checked once at driver entry: every other component trusts it has
/// already happened.
fn even_square_order(len: usize) -> Result<usize, HafnianError> {
    let order = (len as f64).sqrt().round() as usize;
    if order * order != len || order % 2 != 0 {
        return Err(HafnianError::EvenDimensionRequired { order });
    }
    Ok(order)
}

/// The hafnian of a dense, symmetric, `2m x 2m` matrix, given as a flat
/// row-major buffer of length `(2m)^2`.
#[tracing::instrument(skip_all, fields(len = a.len()))]
pub fn hafnian<T: HafnianScalar>(a: &[T]) -> Result<T, HafnianError> {
    let order = even_square_order(a.len())?;
    let mat = Mat::from_row_major(a.to_vec()).expect("length already validated as a perfect square");
    let m = order / 2;
    let sum = haf_subset::hafnian_sum(&mat, m, None, None)?;
    Ok(T::from_accumulator(sum))
}

/// The loop hafnian: as [`hafnian`], but self-loops (diagonal entries) also
/// contribute to the matching sum.
#[tracing::instrument(skip_all, fields(len = a.len()))]
pub fn loop_hafnian<T: HafnianScalar>(a: &[T]) -> Result<T, HafnianError> {
    let order = even_square_order(a.len())?;
    let mat = Mat::from_row_major(a.to_vec()).expect("length already validated as a perfect square");
    let m = order / 2;

    let d = mat.diagonal();
    let c = haf_subset::sibling_swap(&d);
    let aux = haf_subset::LoopAux { c: &c, d: &d };

    let sum = haf_subset::hafnian_sum(&mat, m, Some(&aux), None)?;
    Ok(T::from_accumulator(sum))
}

/// The exact hafnian of a dense `2m x 2m` integer matrix. Overflow of the
/// underlying `i64` arithmetic is a caller obligation, not a detected error.
#[tracing::instrument(skip_all, fields(len = a.len()))]
pub fn hafnian_int(a: &[i64]) -> Result<i64, HafnianError> {
    let order = even_square_order(a.len())?;
    Ok(haf_int::hafnian_int(a, order))
}
