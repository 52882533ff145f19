use crate::traits::{Int, Scalar};

/// Link value meaning "no entry".
///
/// Slot 0 of every entry arena is a placeholder that never belongs to a row,
/// so a `next` or head link of `NIL` always means "end of list".
pub const NIL: usize = 0;

// Row-linked sparse storage.
//
// Entries live in parallel arrays (`values`, `cols`, `next`) and each row is a
// singly linked list threaded through `next`, strictly ascending by column.
// Entries are referenced by arena index only, so growing the arena never
// invalidates a link held elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix<S> {
    height: usize,
    width: usize,

    pub(crate) values: Vec<S>,
    pub(crate) cols: Vec<usize>,
    pub(crate) next: Vec<usize>,

    pub(crate) row_head: Vec<usize>,
    row_tail: Vec<usize>,
}

impl<S: Scalar> SparseMatrix<S> {
    pub fn new(height: usize, width: usize) -> Self {
        Self::with_capacity(height, width, 0)
    }

    /// Creates an empty matrix with room for `capacity` entries.
    pub fn with_capacity(height: usize, width: usize, capacity: usize) -> Self {
        let mut values = Vec::with_capacity(capacity + 1);
        let mut cols = Vec::with_capacity(capacity + 1);
        let mut next = Vec::with_capacity(capacity + 1);
        values.push(S::zero());
        cols.push(0);
        next.push(NIL);

        Self {
            height,
            width,
            values,
            cols,
            next,
            row_head: vec![NIL; height],
            row_tail: vec![NIL; height],
        }
    }

    /// Builds a matrix from dense rows, dropping exact zeros.
    ///
    /// Panics if the rows differ in length.
    pub fn from_dense(rows: &[Vec<S>]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());

        let mut m = Self::new(height, width);
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), width, "row {} has length {}", r, row.len());
            for (c, &x) in row.iter().enumerate() {
                if !x.is_zero() {
                    m.append(r, c, x);
                }
            }
        }
        m
    }

    /// Builds a matrix from compressed sparse row arrays. Column indices of
    /// each row must be strictly ascending.
    pub fn from_csr<I: Int>(
        height: usize,
        width: usize,
        rowptr: &[I], // height+1
        colind: &[I],
        values: &[S],
    ) -> Self {
        let mut m = Self::with_capacity(height, width, values.len());
        for r in 0..height {
            for k in rowptr[r].to_index()..rowptr[r + 1].to_index() {
                m.append(r, colind[k].to_index(), values[k]);
            }
        }
        m
    }

    pub fn reserve(&mut self, additional: usize) {
        self.values.reserve(additional);
        self.cols.reserve(additional);
        self.next.reserve(additional);
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_square(&self) -> bool {
        self.height == self.width
    }

    /// Number of stored entries, not counting the reserved slot.
    pub fn nnz(&self) -> usize {
        self.values.len() - 1
    }

    /// Arena index of the first entry of each row, `NIL` for empty rows.
    pub fn row_heads(&self) -> &[usize] {
        &self.row_head
    }

    /// Adds `(col, value)` as the last entry of `row`.
    ///
    /// Entries of a row must be appended in strictly increasing column order;
    /// the store does not sort.
    pub fn append(&mut self, row: usize, col: usize, value: S) {
        debug_assert!(row < self.height && col < self.width);
        let tail = self.row_tail[row];
        debug_assert!(tail == NIL || self.cols[tail] < col);

        let q = self.push_entry(col, value);
        self.link_after(row, tail, q);
    }

    pub fn get(&self, row: usize, col: usize) -> Option<S> {
        self.row(row)
            .take_while(|&(c, _)| c <= col)
            .find(|&(c, _)| c == col)
            .map(|(_, x)| x)
    }

    /// Iterates the `(column, value)` entries of `row` in column order.
    pub fn row(&self, row: usize) -> Entries<'_, S> {
        self.entries_from(self.row_head[row])
    }

    pub(crate) fn entries_from(&self, head: usize) -> Entries<'_, S> {
        Entries { m: self, q: head }
    }

    pub fn swap_rows(&mut self, r1: usize, r2: usize) {
        self.row_head.swap(r1, r2);
        self.row_tail.swap(r1, r2);
    }

    /// Exchanges columns `c1` and `c2` in every row, keeping rows sorted.
    ///
    /// When both columns are present only the values move. When one is present
    /// its entry is relabelled and, if other entries lie between the two
    /// columns, relinked to its new sorted position.
    pub fn swap_cols(&mut self, c1: usize, c2: usize) {
        if c1 == c2 {
            return;
        }
        let (lo, hi) = if c1 < c2 { (c1, c2) } else { (c2, c1) };

        for r in 0..self.height {
            let mut lo_pred = NIL; // last entry left of `lo`
            let mut hi_pred = NIL; // last entry left of `hi`
            let mut lo_at = NIL;
            let mut hi_at = NIL;

            let mut q = self.row_head[r];
            while q != NIL {
                let c = self.cols[q];
                if c > hi {
                    break;
                }
                if c == hi {
                    hi_at = q;
                    break;
                }
                if c == lo {
                    lo_at = q;
                } else if c < lo {
                    lo_pred = q;
                }
                hi_pred = q;
                q = self.next[q];
            }

            match (lo_at != NIL, hi_at != NIL) {
                (true, true) => self.values.swap(lo_at, hi_at),
                (true, false) => {
                    self.cols[lo_at] = hi;
                    if hi_pred != lo_at {
                        self.unlink(r, lo_pred, lo_at);
                        self.link_after(r, hi_pred, lo_at);
                    }
                }
                (false, true) => {
                    self.cols[hi_at] = lo;
                    if hi_pred != lo_pred {
                        self.unlink(r, hi_pred, hi_at);
                        self.link_after(r, lo_pred, hi_at);
                    }
                }
                (false, false) => {}
            }
        }
    }

    /// Splices a new entry into `row` after `pred` (`NIL` for the front) and
    /// returns its index. The caller keeps the row sorted.
    pub(crate) fn insert_after(&mut self, row: usize, pred: usize, col: usize, value: S) -> usize {
        let q = self.push_entry(col, value);
        self.link_after(row, pred, q);
        q
    }

    /// Detaches the first entry of `row` and returns its index, `NIL` if the
    /// row is empty. The entry stays in the arena.
    pub(crate) fn pop_front(&mut self, row: usize) -> usize {
        let q = self.row_head[row];
        if q != NIL {
            self.unlink(row, NIL, q);
        }
        q
    }

    fn push_entry(&mut self, col: usize, value: S) -> usize {
        let q = self.values.len();
        self.values.push(value);
        self.cols.push(col);
        self.next.push(NIL);
        q
    }

    fn link_after(&mut self, row: usize, pred: usize, q: usize) {
        let succ = if pred == NIL {
            self.row_head[row]
        } else {
            self.next[pred]
        };
        self.next[q] = succ;
        if pred == NIL {
            self.row_head[row] = q;
        } else {
            self.next[pred] = q;
        }
        if succ == NIL {
            self.row_tail[row] = q;
        }
    }

    fn unlink(&mut self, row: usize, pred: usize, q: usize) {
        let succ = self.next[q];
        if pred == NIL {
            self.row_head[row] = succ;
        } else {
            self.next[pred] = succ;
        }
        if succ == NIL {
            self.row_tail[row] = pred;
        }
        self.next[q] = NIL;
    }

    pub fn to_dense(&self) -> Vec<Vec<S>> {
        let mut dense = vec![vec![S::zero(); self.width]; self.height];
        for (r, row) in dense.iter_mut().enumerate() {
            for (c, x) in self.row(r) {
                row[c] = x;
            }
        }
        dense
    }

    /// Returns `(rowptr, colind, values)` in compressed sparse row form.
    pub fn to_csr<I: Int>(&self) -> (Vec<I>, Vec<I>, Vec<S>) {
        let mut rowptr = Vec::with_capacity(self.height + 1);
        let mut colind = Vec::with_capacity(self.nnz());
        let mut values = Vec::with_capacity(self.nnz());

        rowptr.push(I::zero());
        for r in 0..self.height {
            for (c, x) in self.row(r) {
                colind.push(I::from_usize(c));
                values.push(x);
            }
            rowptr.push(I::from_usize(colind.len()));
        }
        (rowptr, colind, values)
    }
}

/// Iterator over the `(column, value)` pairs of a linked row.
pub struct Entries<'a, S> {
    m: &'a SparseMatrix<S>,
    q: usize,
}

impl<'a, S: Copy> Iterator for Entries<'a, S> {
    type Item = (usize, S);

    fn next(&mut self) -> Option<Self::Item> {
        if self.q == NIL {
            return None;
        }
        let q = self.q;
        self.q = self.m.next[q];
        Some((self.m.cols[q], self.m.values[q]))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    // Internal consistency: rows strictly ascending, tails correct, and no
    // entry reachable from two rows.
    pub(crate) fn checkups<S: Scalar>(m: &SparseMatrix<S>) {
        let mut seen = vec![false; m.values.len()];
        for r in 0..m.height {
            let mut q = m.row_head[r];
            let mut last = NIL;
            while q != NIL {
                assert_ne!(q, NIL);
                assert!(!seen[q], "entry {} linked twice", q);
                seen[q] = true;
                if last != NIL {
                    assert!(m.cols[last] < m.cols[q], "row {} not ascending", r);
                }
                last = q;
                q = m.next[q];
            }
            assert_eq!(m.row_tail[r], last, "row {} tail", r);
        }
    }

    fn sample() -> SparseMatrix<f64> {
        // |1 2 . 3|
        // |. 4 . .|
        // |5 . 6 .|
        // |. . . 7|
        SparseMatrix::from_dense(&[
            vec![1.0, 2.0, 0.0, 3.0],
            vec![0.0, 4.0, 0.0, 0.0],
            vec![5.0, 0.0, 6.0, 0.0],
            vec![0.0, 0.0, 0.0, 7.0],
        ])
    }

    #[test]
    fn slot_zero_is_reserved() {
        let m = sample();
        assert_eq!(m.nnz(), 7);
        assert_eq!(m.values.len(), 8);
        assert!(m.row_heads().iter().all(|&h| h != NIL));
        assert_eq!(SparseMatrix::<f64>::new(3, 3).nnz(), 0);
    }

    #[test]
    fn append_keeps_rows_in_order() {
        let mut m = SparseMatrix::new(2, 3);
        m.append(1, 0, 1.0);
        m.append(0, 1, 2.0);
        m.append(1, 2, 3.0);
        m.append(0, 2, 4.0);
        checkups(&m);

        assert_eq!(m.row(0).collect::<Vec<_>>(), vec![(1, 2.0), (2, 4.0)]);
        assert_eq!(m.row(1).collect::<Vec<_>>(), vec![(0, 1.0), (2, 3.0)]);
        assert_eq!(m.get(0, 0), None);
        assert_eq!(m.get(1, 2), Some(3.0));
    }

    #[test]
    fn swap_rows_is_an_involution() {
        let mut m = sample();
        let heads = m.row_heads().to_vec();

        m.swap_rows(0, 2);
        assert_eq!(m.row(0).collect::<Vec<_>>(), vec![(0, 5.0), (2, 6.0)]);
        m.swap_rows(0, 2);
        assert_eq!(m.row_heads(), &heads[..]);

        m.swap_rows(1, 1);
        assert_eq!(m, sample());
    }

    #[test]
    fn swap_cols_both_present_swaps_values() {
        let mut m = sample();
        m.swap_cols(0, 1);
        checkups(&m);
        assert_eq!(m.row(0).collect::<Vec<_>>(), vec![(0, 2.0), (1, 1.0), (3, 3.0)]);
    }

    #[test]
    fn swap_cols_relinks_single_entries() {
        let mut m = sample();
        m.swap_cols(1, 3);
        checkups(&m);
        assert_eq!(
            m.to_dense(),
            vec![
                vec![1.0, 3.0, 0.0, 2.0],
                vec![0.0, 0.0, 0.0, 4.0],
                vec![5.0, 0.0, 6.0, 0.0],
                vec![0.0, 7.0, 0.0, 0.0],
            ]
        );

        // Moving across an entry at the front and back of a row.
        let mut m = sample();
        m.swap_cols(0, 3);
        checkups(&m);
        assert_eq!(m.row(2).collect::<Vec<_>>(), vec![(2, 6.0), (3, 5.0)]);
        assert_eq!(m.row(3).collect::<Vec<_>>(), vec![(0, 7.0)]);
    }

    #[test]
    fn swap_cols_adjacent_relabels() {
        let mut m = sample();
        let next = m.next.clone();
        m.swap_cols(2, 3);
        checkups(&m);
        assert_eq!(m.next, next);
        assert_eq!(m.get(2, 3), Some(6.0));
        assert_eq!(m.get(0, 2), Some(3.0));
    }

    #[test]
    fn swap_cols_is_an_involution() {
        for (c1, c2) in [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3), (3, 0)] {
            let mut m = sample();
            m.swap_cols(c1, c2);
            m.swap_cols(c1, c2);
            assert_eq!(m, sample(), "swap_cols({}, {})", c1, c2);
        }

        let mut m = sample();
        m.swap_cols(2, 2);
        assert_eq!(m, sample());
    }

    #[test]
    fn append_after_swaps_uses_fresh_tails() {
        let mut m = SparseMatrix::new(2, 4);
        m.append(0, 0, 1.0);
        m.append(1, 1, 2.0);
        m.swap_cols(0, 2);
        m.swap_rows(0, 1);
        m.append(1, 3, 3.0);
        checkups(&m);
        assert_eq!(m.row(1).collect::<Vec<_>>(), vec![(2, 1.0), (3, 3.0)]);
    }

    #[test]
    fn insert_and_pop_front() {
        let mut m = sample();
        let head = m.row_heads()[1];
        let q = m.insert_after(1, NIL, 0, 9.0);
        m.insert_after(1, head, 3, 8.0);
        checkups(&m);
        assert_eq!(m.row(1).collect::<Vec<_>>(), vec![(0, 9.0), (1, 4.0), (3, 8.0)]);

        assert_eq!(m.pop_front(1), q);
        assert_eq!(m.next[q], NIL);
        m.pop_front(1);
        m.pop_front(1);
        assert_eq!(m.pop_front(1), NIL);
        checkups(&m);
        assert_eq!(m.row(1).count(), 0);
    }

    #[test]
    fn csr_round_trip() {
        let m = sample();
        let (rowptr, colind, values) = m.to_csr::<u32>();
        assert_eq!(rowptr, vec![0, 3, 4, 6, 7]);
        assert_eq!(colind, vec![0, 1, 3, 1, 0, 2, 3]);

        let m2 = SparseMatrix::from_csr(4, 4, &rowptr, &colind, &values);
        assert_eq!(m2.to_dense(), m.to_dense());
    }
}
