//! Dense row-major matrix storage, subset decoding and the reduced-matrix
//! construction shared by every hafnian evaluation algorithm.
//!
//! None of this enforces matrix symmetry: per the caller contract, `A` is
//! guaranteed symmetric (and, for loop mode, its diagonal carries meaningful
//! self-loop weights) by whoever calls the top-level drivers in `haf-core`.

use haf_field::HafnianScalar;

/// A square, dense, row-major matrix. Owns its backing storage; read-only to
/// every algorithm that borrows it.
#[derive(Clone, Debug, PartialEq)]
pub struct Mat<T> {
    order: usize,
    data: Vec<T>,
}

impl<T: Copy> Mat<T> {
    /// Builds a matrix from a flat row-major buffer. Returns `None` if
    /// `data.len()` is not a perfect square.
    pub fn from_row_major(data: Vec<T>) -> Option<Self> {
        let order = (data.len() as f64).sqrt().round() as usize;
        if order * order != data.len() {
            return None;
        }
        Some(Self { order, data })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.order + col]
    }

    pub fn diagonal(&self) -> Vec<T> {
        (0..self.order).map(|i| self.get(i, i)).collect()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: HafnianScalar> Mat<T> {
    /// Builds the reduced matrix `B(x)` for a subset position list: `B[i][j]
    /// = A[pos[i], sibling(pos[j])]`. `pos` must already satisfy the
    /// position-list invariant (strictly increasing, each even entry
    /// immediately followed by its odd sibling).
    pub fn reduced(&self, pos: &[usize]) -> Mat<T> {
        let k = pos.len();
        let mut data = Vec::with_capacity(k * k);
        for &i in pos {
            for &j in pos {
                data.push(self.get(i, sibling(j)));
            }
        }
        Mat { order: k, data }
    }
}

/// The index-pair sibling of a row/column: pairs `2i` with `2i+1`.
#[inline]
pub fn sibling(i: usize) -> usize {
    i ^ 1
}

/// Decodes a subset index `x` (a value in `[0, 2^m)`) into its position list:
/// for every set bit `i` of `x`, appends `2i, 2i+1` in order. The result is
/// strictly increasing and satisfies the even/odd-sibling adjacency
/// invariant required by [`Mat::reduced`].
pub fn pos(x: usize, m: usize) -> Vec<usize> {
    let mut out = Vec::with_capacity(2 * x.count_ones() as usize);
    for i in 0..m {
        if x & (1 << i) != 0 {
            out.push(2 * i);
            out.push(2 * i + 1);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pos_decodes_set_bits_into_sibling_pairs() {
        // m = 3, x = 0b101 selects pair-indices 0 and 2.
        assert_eq!(pos(0b101, 3), vec![0, 1, 4, 5]);
    }

    #[test]
    fn pos_empty_subset_is_empty() {
        assert_eq!(pos(0, 4), Vec::<usize>::new());
    }

    #[test]
    fn sibling_is_involution() {
        for i in 0..8 {
            assert_eq!(sibling(sibling(i)), i);
        }
        assert_eq!(sibling(0), 1);
        assert_eq!(sibling(1), 0);
    }

    #[test]
    fn from_row_major_rejects_non_square_len() {
        assert!(Mat::from_row_major(vec![1.0_f64, 2.0, 3.0]).is_none());
        assert!(Mat::from_row_major(vec![1.0_f64; 9]).is_some());
    }

    #[test]
    fn reduced_matrix_pairs_rows_with_sibling_columns() {
        let a = Mat::from_row_major((0..16).map(|v| v as f64).collect()).unwrap();
        let b = a.reduced(&[0, 1, 2, 3]);
        // B[i][j] = A[pos[i], sibling(pos[j])]; pos = [0,1,2,3].
        assert_eq!(b.get(0, 0), a.get(0, 1));
        assert_eq!(b.get(0, 1), a.get(0, 0));
        assert_eq!(b.get(2, 3), a.get(2, 2));
    }
}
