use std::{
    collections::{hash_map, HashMap},
    ops::Index,
};

use itertools::Itertools;

use crate::data_structures::SparseMatrixView;

const ZERO: i64 = 0;

/// Integer sparse matrix backed by a hash map keyed by `(row, col)`.
///
/// Only nonzero values are stored: [`HashMapSparseMatrix::set`] removes the
/// entry when asked to write a zero, and it is the only way to mutate a
/// matrix. Indices are not checked against the declared shape, so reads
/// outside it return `0` and writes outside it are stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HashMapSparseMatrix {
    n_rows: usize,
    n_cols: usize,
    /// `entries[(u, v)]` = nonzero entry of the matrix at (`u`, `v`)
    entries: HashMap<(usize, usize), i64>,
}

impl HashMapSparseMatrix {
    pub fn new_empty(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            entries: HashMap::new(),
        }
    }

    /// Value at (`row`, `col`), `0` when nothing is stored there.
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.entries.get(&(row, col)).copied().unwrap_or(ZERO)
    }

    /// Write `value` at (`row`, `col`). Writing `0` deletes the entry.
    pub fn set(&mut self, row: usize, col: usize, value: i64) {
        if value == 0 {
            self.entries.remove(&(row, col));
        } else {
            self.entries.insert((row, col), value);
        }
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.entries.contains_key(&(row, col))
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            iter: self.entries.iter(),
        }
    }

    /// Stored entries in ascending (`row`, `col`) order.
    pub fn iter_sorted(&self) -> impl Iterator<Item = ((usize, usize), i64)> + '_ {
        self.iter().sorted_unstable_by_key(|&(key, _)| key)
    }
}

impl Index<(usize, usize)> for HashMapSparseMatrix {
    type Output = i64;
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        self.entries.get(&index).unwrap_or(&ZERO)
    }
}

impl<'a> Index<(usize, usize)> for &'a HashMapSparseMatrix {
    type Output = i64;
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        self.entries.get(&index).unwrap_or(&ZERO)
    }
}

pub struct Iter<'a> {
    iter: hash_map::Iter<'a, (usize, usize), i64>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = ((usize, usize), i64);
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(&(i, j), &v)| ((i, j), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a> IntoIterator for &'a HashMapSparseMatrix {
    type Item = ((usize, usize), i64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> SparseMatrixView for &'a HashMapSparseMatrix {
    type Iter = Iter<'a>;

    fn n_rows(&self) -> usize {
        HashMapSparseMatrix::n_rows(self)
    }

    fn n_cols(&self) -> usize {
        HashMapSparseMatrix::n_cols(self)
    }

    fn shape(&self) -> (usize, usize) {
        HashMapSparseMatrix::shape(self)
    }

    fn nnz(&self) -> usize {
        HashMapSparseMatrix::nnz(self)
    }

    fn get(&self, row: usize, col: usize) -> i64 {
        HashMapSparseMatrix::get(self, row, col)
    }

    fn contains(&self, row: usize, col: usize) -> bool {
        HashMapSparseMatrix::contains(self, row, col)
    }

    fn iter(&self) -> Self::Iter {
        HashMapSparseMatrix::iter(*self)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_get_absent_is_zero() {
        let m = HashMapSparseMatrix::new_empty(2, 2);
        assert_eq!(m.get(0, 0), 0);
        assert_eq!(m[(1, 1)], 0);
        assert!(m.is_empty());
    }

    #[test]
    fn test_get_out_of_range_is_zero() {
        let mut m = HashMapSparseMatrix::new_empty(2, 2);
        m.set(1, 1, 5);
        assert_eq!(m.get(7, 9), 0);
    }

    #[test]
    fn test_set_and_overwrite() {
        let mut m = HashMapSparseMatrix::new_empty(3, 3);
        m.set(0, 1, 4);
        m.set(0, 1, -2);
        assert_eq!(m.get(0, 1), -2);
        assert_eq!(m.nnz(), 1);
    }

    #[test]
    fn test_set_zero_removes() {
        let mut m = HashMapSparseMatrix::new_empty(3, 3);
        m.set(2, 0, 9);
        m.set(2, 0, 0);
        assert_eq!(m.get(2, 0), 0);
        assert!(!m.contains(2, 0));
        assert_eq!(m.nnz(), 0);

        // Removing an absent entry is a no-op.
        m.set(1, 1, 0);
        assert!(m.is_empty());
    }

    #[test]
    fn test_iter_sorted() {
        let mut m = HashMapSparseMatrix::new_empty(3, 3);
        m.set(2, 0, 3);
        m.set(0, 2, 2);
        m.set(0, 1, 1);
        let keys: Vec<_> = m.iter_sorted().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![(0, 1), (0, 2), (2, 0)]);
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let mut a = HashMapSparseMatrix::new_empty(2, 2);
        a.set(0, 0, 1);
        a.set(1, 1, 2);
        let mut b = HashMapSparseMatrix::new_empty(2, 2);
        b.set(1, 1, 2);
        b.set(0, 1, 7);
        b.set(0, 0, 1);
        b.set(0, 1, 0);
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn proptest_set_keeps_invariants(
            writes in prop::collection::vec((0usize..5, 0usize..5, -3i64..4), 0..40),
        ) {
            let mut m = HashMapSparseMatrix::new_empty(5, 5);
            for &(i, j, v) in &writes {
                m.set(i, j, v);
                prop_assert_eq!(m.get(i, j), v);
            }

            prop_assert!(m.iter().all(|(_, v)| v != 0));
            prop_assert_eq!(m.iter().count(), m.nnz());
            for i in 0..5 {
                for j in 0..5 {
                    prop_assert_eq!(m.contains(i, j), m.get(i, j) != 0);
                }
            }
        }
    }
}
