//! Integer sparse matrices stored as a map from `(row, col)` to nonzero
//! values, with a line-oriented text format and the binary operations
//! addition, subtraction and multiplication.

pub mod args;
pub mod data_loader;
pub mod data_structures;
pub mod error;
pub mod ops;

pub use data_loader::{format_matrix, load_matrix, parse, save_matrix};
pub use data_structures::{HashMapSparseMatrix, SparseMatrixView};
pub use error::{SparseError, SparseResult};
pub use ops::{add, multiply, negate, subtract, Operation};
