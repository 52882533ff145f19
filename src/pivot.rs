use num_traits::{Float, Zero};

use crate::fill::FillTracker;
use crate::matrix::{SparseMatrix, NIL};
use crate::traits::Scalar;

/// A pivot candidate as seen by the selector, in the row/column positions
/// of the working matrix before it is swapped onto the diagonal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotRecord<N> {
    pub row: usize,
    pub col: usize,
    /// Markowitz count of the entry.
    pub score: usize,
    pub magnitude: N,
    /// Largest active magnitude of the pivot column when it was chosen.
    pub col_norm: N,
}

impl<N: Float> PivotRecord<N> {
    /// True when no nonzero entry was eligible.
    pub fn is_empty(&self) -> bool {
        self.magnitude.is_zero()
    }
}

// Threshold Markowitz search.
//
// Every nonzero active entry whose magnitude is at least `threshold` times
// the norm of its column is a candidate. The candidate with the lowest
// Markowitz count wins, larger magnitude breaking ties. A zero count cannot
// be beaten, so the scan stops at the first one.
//
// If nothing qualifies the result is the diagonal (k, k) with a count of
// n*n and zero magnitude.
pub fn select_pivot<S: Scalar>(
    m: &SparseMatrix<S>,
    fill: &FillTracker<S::Norm>,
    k: usize,
    threshold: S::Norm,
) -> PivotRecord<S::Norm> {
    let n = m.height();
    let mut best = PivotRecord {
        row: k,
        col: k,
        score: n.saturating_mul(n),
        magnitude: S::Norm::zero(),
        col_norm: S::Norm::zero(),
    };

    for i in k..n {
        let mut q = m.row_head[i];
        while q != NIL {
            let j = m.cols[q];
            let x = m.values[q].norm();
            q = m.next[q];

            let col_norm = fill.col_norm(j);
            if x.is_zero() || x < threshold * col_norm {
                continue;
            }
            let score = fill.markowitz(i, j);
            if score < best.score || (score == best.score && x > best.magnitude) {
                best = PivotRecord {
                    row: i,
                    col: j,
                    score,
                    magnitude: x,
                    col_norm,
                };
                if score == 0 {
                    return best;
                }
            }
        }
    }
    best
}
