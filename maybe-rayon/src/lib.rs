//! Feature-gated wrapper around `rayon`.
//!
//! `haf-subset` is the only crate that needs a work-sharing pool — the
//! subset loop is embarrassingly parallel (§5), everything else here is too
//! small to bother threading. Gating it behind a `parallel` feature lets a
//! caller building for a constrained target drop the `rayon` dependency
//! entirely without `haf-subset`'s code changing shape.

#[cfg(feature = "parallel")]
pub mod prelude {
    pub use rayon::prelude::*;
}

#[cfg(not(feature = "parallel"))]
pub mod prelude {
    //! Serial substitute for the one `rayon::prelude` entry point
    //! `haf-subset` uses: `into_par_iter`, backed by a plain `Iterator`.

    pub trait IntoParallelIterator {
        type Iter: Iterator<Item = Self::Item>;
        type Item;
        fn into_par_iter(self) -> Self::Iter;
    }

    impl<I: IntoIterator> IntoParallelIterator for I {
        type Iter = I::IntoIter;
        type Item = I::Item;
        fn into_par_iter(self) -> Self::Iter {
            self.into_iter()
        }
    }
}
