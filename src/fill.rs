use num_traits::Float;

use crate::matrix::{SparseMatrix, NIL};
use crate::traits::Scalar;

/// Per-row and per-column bookkeeping over the active submatrix.
///
/// `row_fill`/`col_fill` count the active nonzeros of each row and column and
/// are kept current incrementally by the elimination. `col_norm` holds the
/// largest active magnitude of each column and is rebuilt every step.
#[derive(Debug, Clone)]
pub struct FillTracker<N> {
    pub(crate) row_fill: Vec<usize>,
    pub(crate) col_fill: Vec<usize>,
    pub(crate) col_norm: Vec<N>,
}

impl<N: Float> FillTracker<N> {
    /// Counts every entry of `m` in a single pass.
    pub fn new<S: Scalar<Norm = N>>(m: &SparseMatrix<S>) -> Self {
        let mut row_fill = vec![0; m.height()];
        let mut col_fill = vec![0; m.width()];

        for (r, fill) in row_fill.iter_mut().enumerate() {
            for (c, _) in m.row(r) {
                *fill += 1;
                col_fill[c] += 1;
            }
        }

        Self {
            row_fill,
            col_fill,
            col_norm: vec![N::zero(); m.width()],
        }
    }

    /// Recomputes the column norms over rows `k..` of `m`.
    pub fn update_norms<S: Scalar<Norm = N>>(&mut self, m: &SparseMatrix<S>, k: usize) {
        self.col_norm.iter_mut().for_each(|x| *x = N::zero());

        for &head in &m.row_head[k..] {
            let mut q = head;
            while q != NIL {
                let j = m.cols[q];
                let x = m.values[q].norm();
                if x > self.col_norm[j] {
                    self.col_norm[j] = x;
                }
                q = m.next[q];
            }
        }
    }

    pub fn row_fill(&self, row: usize) -> usize {
        self.row_fill[row]
    }

    pub fn col_fill(&self, col: usize) -> usize {
        self.col_fill[col]
    }

    pub fn col_norm(&self, col: usize) -> N {
        self.col_norm[col]
    }

    /// Markowitz count `(r - 1) * (c - 1)` of an entry at `(row, col)`.
    pub fn markowitz(&self, row: usize, col: usize) -> usize {
        self.row_fill[row].saturating_sub(1) * self.col_fill[col].saturating_sub(1)
    }

    pub(crate) fn swap_rows(&mut self, r1: usize, r2: usize) {
        self.row_fill.swap(r1, r2);
    }

    pub(crate) fn swap_cols(&mut self, c1: usize, c2: usize) {
        self.col_fill.swap(c1, c2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SparseMatrix<f64> {
        SparseMatrix::from_dense(&[
            vec![1.0, -8.0, 0.0],
            vec![0.0, 4.0, 0.0],
            vec![-5.0, 2.0, 6.0],
        ])
    }

    #[test]
    fn counts_rows_and_columns() {
        let fill = FillTracker::new(&sample());
        assert_eq!(fill.row_fill, vec![2, 1, 3]);
        assert_eq!(fill.col_fill, vec![2, 3, 1]);
        assert_eq!(fill.markowitz(2, 1), 4);
        assert_eq!(fill.markowitz(1, 2), 0);
    }

    #[test]
    fn norms_cover_active_rows_only() {
        let m = sample();
        let mut fill = FillTracker::new(&m);

        fill.update_norms(&m, 0);
        assert_eq!(fill.col_norm, vec![5.0, 8.0, 6.0]);

        fill.update_norms(&m, 1);
        assert_eq!(fill.col_norm, vec![5.0, 4.0, 6.0]);

        fill.update_norms(&m, 3);
        assert_eq!(fill.col_norm, vec![0.0, 0.0, 0.0]);
    }
}
