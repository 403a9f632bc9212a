//! Recursive integer engine: an exact-integer hafnian obtained by repeatedly
//! eliminating the last two vertices of the complete graph on `order`
//! vertices and folding the edge incident on them into a pair of polynomial
//! arrays, rather than by eigenvalue arithmetic.
//!
//! Edge coefficients live in a `HashMap` keyed by unordered vertex pairs
//! rather than a computed triangular offset into a flat array — a plain map
//! is just as fast here and considerably more legible.

use std::collections::HashMap;

use haf_maybe_rayon::prelude::*;

type EdgePoly = Vec<i64>;
/// `b[(j, k)]`, `j > k`, is the coefficient vector (degree <= the number of
/// edges in a perfect matching) carried by the pair `(j, k)`.
type EdgeMap = HashMap<(usize, usize), EdgePoly>;

#[inline]
fn edge_key(i: usize, j: usize) -> (usize, usize) {
    if i > j {
        (i, j)
    } else {
        (j, i)
    }
}

/// The exact hafnian of an `order x order` integer matrix (`order` even), as
/// a signed 64-bit integer. Overflow of the accumulating `i64` arithmetic is
/// not detected — that is a caller obligation, not a library error.
///
/// `mat` is a flat row-major buffer, `mat[j * order + k]`, the same plain
/// dense layout used everywhere else in this workspace.
pub fn hafnian_int(mat: &[i64], order: usize) -> i64 {
    debug_assert_eq!(order % 2, 0, "hafnian_int requires an even order");
    let deg_bound = order / 2;

    let mut b = EdgeMap::with_capacity(order * order / 2);
    for j in 1..order {
        for k in 0..j {
            let mut poly = vec![0i64; deg_bound + 1];
            poly[0] = mat[j * order + k];
            b.insert((j, k), poly);
        }
    }

    let mut g = vec![0i64; deg_bound + 1];
    g[0] = 1;

    recursive(&b, order, 1, &g, deg_bound)
}

/// `recursive(b, s, w, g, n) -> w * g[n]` after folding in the contribution
/// of vertices `{0, .., s-1}`; `n` is fixed across the whole recursion (the
/// matching's total edge count, `order / 2`).
fn recursive(b: &EdgeMap, s: usize, w: i64, g: &[i64], n: usize) -> i64 {
    if s == 0 {
        return w.wrapping_mul(g[n]);
    }

    let (v_hi, v_lo) = (s - 1, s - 2);
    let dropped_edge = &b[&edge_key(v_hi, v_lo)];

    let reduced: EdgeMap = b
        .iter()
        .filter(|(&(j, k), _)| j < v_lo && k < v_lo)
        .map(|(&key, poly)| (key, poly.clone()))
        .collect();

    let h = recursive(&reduced, s - 2, -w, g, n);

    // Step 3: the edge directly joining the two dropped vertices adds one
    // matching edge to whatever `g` already accounts for.
    let mut e = g.to_vec();
    for u in 0..=n {
        if g[u] == 0 {
            continue;
        }
        // u + v < n, strictly: u + v + 1 must stay a valid index (<= n).
        for v in 0..(n - u) {
            if dropped_edge[v] == 0 {
                continue;
            }
            e[u + v + 1] = e[u + v + 1].wrapping_add(g[u].wrapping_mul(dropped_edge[v]));
        }
    }

    // Every remaining pair can instead route through one of the two dropped
    // vertices; fold both routes' convolutions into `c`. Independent per
    // remaining pair, so this loop is the parallel one.
    let remaining_keys: Vec<(usize, usize)> = reduced.keys().copied().collect();
    let updates: Vec<((usize, usize), EdgePoly)> = remaining_keys
        .into_par_iter()
        .map(|(j, k)| {
            let b_j_hi = &b[&edge_key(j, v_hi)];
            let b_k_lo = &b[&edge_key(k, v_lo)];
            let b_k_hi = &b[&edge_key(k, v_hi)];
            let b_j_lo = &b[&edge_key(j, v_lo)];
            let mut poly = reduced[&(j, k)].clone();
            for u in 0..=n {
                for v in 0..(n - u) {
                    let cross = b_j_hi[u]
                        .wrapping_mul(b_k_lo[v])
                        .wrapping_add(b_k_hi[u].wrapping_mul(b_j_lo[v]));
                    if cross != 0 {
                        poly[u + v + 1] = poly[u + v + 1].wrapping_add(cross);
                    }
                }
            }
            ((j, k), poly)
        })
        .collect();

    let mut c = reduced;
    for (key, poly) in updates {
        c.insert(key, poly);
    }

    h.wrapping_add(recursive(&c, s - 2, w, &e, n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_ones(n: usize) -> Vec<i64> {
        vec![1; n * n]
    }

    #[test]
    fn two_by_two_is_the_off_diagonal_entry() {
        // [[0,5],[5,0]] has exactly one matching: the edge itself.
        assert_eq!(hafnian_int(&[0, 5, 5, 0], 2), 5);
    }

    #[test]
    fn all_ones_4x4_has_three_matchings() {
        assert_eq!(hafnian_int(&all_ones(4), 4), 3);
    }

    #[test]
    fn all_ones_6x6_has_fifteen_matchings() {
        assert_eq!(hafnian_int(&all_ones(6), 6), 15);
    }

    #[test]
    fn all_ones_8x8_has_105_matchings() {
        assert_eq!(hafnian_int(&all_ones(8), 8), 105);
    }

    #[test]
    fn zero_by_zero_is_one() {
        assert_eq!(hafnian_int(&[], 0), 1);
    }

    #[test]
    fn block_diagonal_factors() {
        // Two disjoint 2x2 blocks with off-diagonal weights 5 and 7: the
        // only matching is {edge 1, edge 2}, weight 5*7=35.
        let n = 4;
        let mut m = vec![0i64; n * n];
        m[0 * n + 1] = 5;
        m[1 * n + 0] = 5;
        m[2 * n + 3] = 7;
        m[3 * n + 2] = 7;
        assert_eq!(hafnian_int(&m, 4), 35);
    }
}
