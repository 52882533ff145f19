//! Sparse LU Decomposition (Markowitz threshold pivoting)

mod debug;
mod error;
mod fill;
pub mod io;
mod lups;
mod matrix;
mod perm;
mod pivot;
mod traits;

pub use error::*;
pub use fill::FillTracker;
pub use lups::*;
pub use matrix::{Entries, SparseMatrix, NIL};
pub use perm::Permutation;
pub use pivot::{select_pivot, PivotRecord};
pub use traits::*;

#[cfg(feature = "debug")]
pub use debug::matrix_table;
