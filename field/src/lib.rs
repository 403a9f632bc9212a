//! Scalar abstraction over the element types a hafnian can be computed over.
//!
//! The Cygan-Pilipczuk power-sum expansion (see `haf-subset`) always folds its
//! per-subset contributions in `Complex64`, regardless of whether the caller's
//! matrix is real or complex — eigenvalues of a real matrix still need a
//! complex home. `HafnianScalar` is the seam between "whatever the caller
//! stores" and that common complex accumulator.

use std::fmt::Debug;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};

use num_complex::Complex64;
use num_traits::{One, Zero};

/// An element type a dense matrix can be built from and a hafnian computed over.
///
/// Implemented for `f64` (real hafnian) and `Complex64` (complex hafnian). Not
/// implemented for `i64` — the exact integer path (`haf-int`) never touches
/// eigenvalues and works directly on `i64` coefficients instead.
pub trait HafnianScalar:
    Copy
    + Clone
    + Debug
    + PartialEq
    + Send
    + Sync
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + Sum
    + 'static
{
    /// Lift into the complex field the eigensolver and generating-function
    /// fold always operate in.
    fn to_complex(self) -> Complex64;

    /// Narrow a complex accumulator back down to `Self` once the subset sum
    /// has been folded. For real scalars this takes the real part; the
    /// imaginary part is provably zero up to round-off for a real input
    /// matrix (conjugate eigenvalue pairs cancel it).
    fn from_accumulator(c: Complex64) -> Self;
}

impl HafnianScalar for f64 {
    fn to_complex(self) -> Complex64 {
        Complex64::new(self, 0.0)
    }

    fn from_accumulator(c: Complex64) -> Self {
        c.re
    }
}

impl HafnianScalar for Complex64 {
    fn to_complex(self) -> Complex64 {
        self
    }

    fn from_accumulator(c: Complex64) -> Self {
        c
    }
}
