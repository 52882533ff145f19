use thiserror::Error;

/// Reasons a factorization can be refused.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FactorError {
    /// The matrix is not square.
    #[error("matrix must be square: height {height}, width {width}")]
    ShapeMismatch { height: usize, width: usize },

    /// No nonzero entry of the active submatrix is eligible as a pivot.
    #[error("matrix is structurally or numerically singular at step {step}")]
    Singular { step: usize },

    /// The pivot threshold is outside `[0, 1]`.
    #[error("pivot threshold must lie in [0, 1], got {0}")]
    InvalidThreshold(f64),

    /// The fill reservation ratio is negative or not finite.
    #[error("fill ratio must be finite and non-negative, got {0}")]
    InvalidFillRatio(f64),
}

/// Errors raised while reading a matrix from its text form.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid header line: {0:?}")]
    Header(String),

    #[error("row {row}: invalid entry {token:?}")]
    Entry { row: usize, token: String },

    #[error("row {row}: column {col} outside 1..={width}")]
    ColumnRange { row: usize, col: usize, width: usize },

    #[error("row {row}: column {col} not strictly greater than {prev}")]
    Unsorted { row: usize, col: usize, prev: usize },

    #[error("expected {expected} rows, found {found}")]
    MissingRows { expected: usize, found: usize },
}
