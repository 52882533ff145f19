/// Row and column permutations of a factorization.
///
/// `rows()[i]` is the original row placed at position `i`, `cols()[j]` the
/// original column placed at position `j`. The inverses map an original
/// index to its final position and are filled in once elimination is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    rows: Vec<usize>,
    cols: Vec<usize>,
    rows_inv: Vec<usize>,
    cols_inv: Vec<usize>,
}

impl Permutation {
    pub fn identity(n: usize) -> Self {
        Self {
            rows: (0..n).collect(),
            cols: (0..n).collect(),
            rows_inv: (0..n).collect(),
            cols_inv: (0..n).collect(),
        }
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn cols(&self) -> &[usize] {
        &self.cols
    }

    pub fn rows_inv(&self) -> &[usize] {
        &self.rows_inv
    }

    pub fn cols_inv(&self) -> &[usize] {
        &self.cols_inv
    }

    pub fn is_identity(&self) -> bool {
        self.rows.iter().enumerate().all(|(i, &r)| i == r)
            && self.cols.iter().enumerate().all(|(j, &c)| j == c)
    }

    pub(crate) fn swap_rows(&mut self, a: usize, b: usize) {
        self.rows.swap(a, b);
    }

    pub(crate) fn swap_cols(&mut self, a: usize, b: usize) {
        self.cols.swap(a, b);
    }

    pub(crate) fn invert(&mut self) {
        for (i, &r) in self.rows.iter().enumerate() {
            self.rows_inv[r] = i;
        }
        for (j, &c) in self.cols.iter().enumerate() {
            self.cols_inv[c] = j;
        }
    }
}
