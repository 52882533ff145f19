use num_traits::NumCast;

use crate::debug::debug;
use crate::error::FactorError;
use crate::fill::FillTracker;
use crate::matrix::{Entries, SparseMatrix, NIL};
use crate::perm::Permutation;
use crate::pivot::{select_pivot, PivotRecord};
use crate::traits::Scalar;

/// Default stability ratio: a pivot must be at least this fraction of the
/// largest active magnitude in its column.
pub const DEFAULT_THRESHOLD: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    /// Stability ratio in `[0, 1]`. Zero is pure Markowitz, one only admits
    /// the largest entry of each column.
    pub threshold: f64,
    /// Extra entry slots reserved up front, as a multiple of the input's
    /// nonzero count. Must be finite and non-negative.
    pub fill_ratio: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            fill_ratio: 1.0,
        }
    }
}

impl Options {
    fn threshold<N: NumCast>(&self) -> Result<N, FactorError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(FactorError::InvalidThreshold(self.threshold));
        }
        <N as NumCast>::from(self.threshold).ok_or(FactorError::InvalidThreshold(self.threshold))
    }

    fn fill_reserve(&self, nnz: usize, n: usize) -> Result<usize, FactorError> {
        if !self.fill_ratio.is_finite() || self.fill_ratio < 0.0 {
            return Err(FactorError::InvalidFillRatio(self.fill_ratio));
        }
        let extra = (nnz as f64 * self.fill_ratio) as usize;
        Ok(extra.min(n.saturating_mul(n).saturating_sub(nnz)))
    }
}

/// LU factors of `P A Q` sharing one entry arena.
///
/// Each row of the working matrix is split in two lists: the `U` part hangs
/// off the matrix's own row heads and holds the columns at or right of the
/// diagonal; the `L` part holds the multipliers, one per elimination step
/// that touched the row, in step order. The unit diagonal of `L` is not
/// stored. Row and column indices of both parts are positions in the
/// permuted matrix.
#[derive(Debug, Clone)]
pub struct Lups<S: Scalar> {
    u: SparseMatrix<S>,
    l_head: Vec<usize>,
    l_tail: Vec<usize>,
    perm: Permutation,
    pivots: Vec<PivotRecord<S::Norm>>,
}

/// Factorizes `a` with default options.
pub fn factorize<S: Scalar>(a: &SparseMatrix<S>) -> Result<Lups<S>, FactorError> {
    factorize_with(a, &Options::default())
}

// Markowitz LU with threshold pivoting (right-looking).
//
// for k := 0 to n-1
//   choose pivot (i, j) in the active submatrix;
//   swap row i with row k and column j with column k;
//   for each active row r with a nonzero in column k
//     l(r, k) := a(r, k) / a(k, k);
//     a(r, :) -= l(r, k) * a(k, :), inserting fill-in;
//   od
// od
//
// `a` is copied; the input matrix is never modified.
pub fn factorize_with<S: Scalar>(
    a: &SparseMatrix<S>,
    options: &Options,
) -> Result<Lups<S>, FactorError> {
    if !a.is_square() {
        return Err(FactorError::ShapeMismatch {
            height: a.height(),
            width: a.width(),
        });
    }
    let threshold: S::Norm = options.threshold()?;
    let n = a.height();

    let mut lups = Lups::start(a, options.fill_reserve(a.nnz(), n)?);
    let mut fill = FillTracker::new(&lups.u);
    let mut pivot_row = Vec::new();

    for k in 0..n {
        fill.update_norms(&lups.u, k);
        let pivot = select_pivot(&lups.u, &fill, k, threshold);
        if pivot.is_empty() {
            return Err(FactorError::Singular { step: k });
        }
        debug!(
            "\nk = {}, pivot = ({}, {}), score = {}, |a| = {}",
            k,
            pivot.row,
            pivot.col,
            pivot.score,
            pivot.magnitude
        );

        #[cfg(feature = "debug")]
        let nnz = lups.u.nnz();
        lups.eliminate(k, &pivot, &mut fill, &mut pivot_row);
        debug!("fill-in = {}", lups.u.nnz() - nnz);

        #[cfg(feature = "debug")]
        print!("U =\n{}", crate::matrix_table(&lups.u));

        lups.pivots.push(pivot);
    }
    lups.perm.invert();

    Ok(lups)
}

impl<S: Scalar> Lups<S> {
    fn start(a: &SparseMatrix<S>, reserve: usize) -> Self {
        let n = a.height();
        let mut u = a.clone();
        u.reserve(reserve);

        Self {
            u,
            l_head: vec![NIL; n],
            l_tail: vec![NIL; n],
            perm: Permutation::identity(n),
            pivots: Vec::with_capacity(n),
        }
    }

    fn eliminate(
        &mut self,
        k: usize,
        pivot: &PivotRecord<S::Norm>,
        fill: &mut FillTracker<S::Norm>,
        pivot_row: &mut Vec<(usize, S)>,
    ) {
        let n = self.u.height();

        // Column swaps leave L alone: its entries are all left of column k.
        if pivot.row != k {
            self.u.swap_rows(pivot.row, k);
            self.perm.swap_rows(pivot.row, k);
            self.l_head.swap(pivot.row, k);
            self.l_tail.swap(pivot.row, k);
            fill.swap_rows(pivot.row, k);
        }
        if pivot.col != k {
            self.u.swap_cols(pivot.col, k);
            self.perm.swap_cols(pivot.col, k);
            fill.swap_cols(pivot.col, k);
        }

        let head = self.u.row_head[k];
        debug_assert_eq!(self.u.cols[head], k);
        let diag = self.u.values[head];

        // Scaled pivot row. The stored row keeps its values; it becomes row k of U.
        pivot_row.clear();
        let mut q = self.u.next[head];
        while q != NIL {
            let j = self.u.cols[q];
            pivot_row.push((j, self.u.values[q] / diag));
            fill.col_fill[j] -= 1;
            q = self.u.next[q];
        }

        for i in k + 1..n {
            let first = self.u.row_head[i];
            if first == NIL || self.u.cols[first] != k {
                continue;
            }
            fill.row_fill[i] -= 1;

            let b = self.u.values[first];
            self.u.values[first] = b / diag;

            // Both lists ascend by column; walk them together.
            let (mut p, mut q) = (first, self.u.next[first]);
            for &(j, x) in pivot_row.iter() {
                while q != NIL && self.u.cols[q] < j {
                    p = q;
                    q = self.u.next[q];
                }
                if q != NIL && self.u.cols[q] == j {
                    self.u.values[q] -= x * b;
                    p = q;
                    q = self.u.next[q];
                } else {
                    p = self.u.insert_after(i, p, j, -(x * b));
                    fill.row_fill[i] += 1;
                    fill.col_fill[j] += 1;
                }
            }

            let l = self.u.pop_front(i);
            self.push_l(i, l);
        }
    }

    fn push_l(&mut self, row: usize, q: usize) {
        if self.l_head[row] == NIL {
            self.l_head[row] = q;
        } else {
            self.u.next[self.l_tail[row]] = q;
        }
        self.l_tail[row] = q;
    }

    pub fn n(&self) -> usize {
        self.u.height()
    }

    /// The working matrix viewed through its `U` row heads.
    pub fn u(&self) -> &SparseMatrix<S> {
        &self.u
    }

    pub fn u_row(&self, row: usize) -> Entries<'_, S> {
        self.u.row(row)
    }

    /// Strictly lower entries of `row` of `L`, ascending by column.
    pub fn l_row(&self, row: usize) -> Entries<'_, S> {
        self.u.entries_from(self.l_head[row])
    }

    pub fn perm(&self) -> &Permutation {
        &self.perm
    }

    /// The pivot chosen at each step, in order.
    pub fn pivots(&self) -> &[PivotRecord<S::Norm>] {
        &self.pivots
    }

    /// Entries held by `L` and `U` together.
    pub fn nnz(&self) -> usize {
        self.u.nnz()
    }

    /// Entries created by elimination, given the input's nonzero count.
    pub fn fill_in(&self, nnz_before: usize) -> usize {
        self.nnz().saturating_sub(nnz_before)
    }

    pub fn l_to_dense(&self) -> Vec<Vec<S>> {
        let n = self.n();
        let mut dense = vec![vec![S::zero(); n]; n];
        for (i, row) in dense.iter_mut().enumerate() {
            row[i] = S::one();
            for (j, x) in self.l_row(i) {
                row[j] = x;
            }
        }
        dense
    }

    pub fn u_to_dense(&self) -> Vec<Vec<S>> {
        self.u.to_dense()
    }

    /// Dense `P A Q` for the input `a` this factorization was computed from.
    pub fn permute(&self, a: &SparseMatrix<S>) -> Vec<Vec<S>> {
        let dense = a.to_dense();
        self.perm
            .rows()
            .iter()
            .map(|&r| self.perm.cols().iter().map(|&c| dense[r][c]).collect())
            .collect()
    }
}
