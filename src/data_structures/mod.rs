use std::ops::Index;
pub mod hash_map_spmat;

pub use hash_map_spmat::HashMapSparseMatrix;

/// Read-only access to a sparse integer matrix.
pub trait SparseMatrixView: Index<(usize, usize), Output = i64> {
    type Iter: Iterator<Item = ((usize, usize), i64)>;

    fn n_rows(&self) -> usize;
    fn n_cols(&self) -> usize;
    fn shape(&self) -> (usize, usize);

    fn nnz(&self) -> usize;

    fn get(&self, row: usize, col: usize) -> i64;
    fn contains(&self, row: usize, col: usize) -> bool;

    /// Stored entries in no particular order.
    fn iter(&self) -> Self::Iter;
}
