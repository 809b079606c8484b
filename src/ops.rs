//! Binary operations on sparse matrices. Every operation checks operand
//! shapes before doing any work and returns a freshly allocated result.

use std::collections::HashMap;

use clap::ValueEnum;
use tracing::{debug, instrument};

use crate::{
    data_structures::{HashMapSparseMatrix, SparseMatrixView},
    error::{SparseError, SparseResult},
};

/// Binary operation selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
}

impl Operation {
    /// Display name used when reporting the result.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "Addition",
            Operation::Subtract => "Subtraction",
            Operation::Multiply => "Multiplication",
        }
    }

    pub fn apply(
        self,
        a: &HashMapSparseMatrix,
        b: &HashMapSparseMatrix,
    ) -> SparseResult<HashMapSparseMatrix> {
        match self {
            Operation::Add => add(a, b),
            Operation::Subtract => subtract(a, b),
            Operation::Multiply => multiply(a, b),
        }
    }
}

fn check_same_shape(
    op: &'static str,
    a: &impl SparseMatrixView,
    b: &impl SparseMatrixView,
) -> SparseResult<()> {
    if a.shape() != b.shape() {
        return Err(SparseError::Dimension {
            op,
            lhs: a.shape(),
            rhs: b.shape(),
        });
    }
    Ok(())
}

/// Element-wise combination over the union of stored keys. `both` sees keys
/// stored in `a` (with `b`'s value or `0`), `only_b` sees keys stored only in
/// `b`.
fn merge<A, B>(
    op: &'static str,
    a: A,
    b: B,
    both: impl Fn(i64, i64) -> Option<i64>,
    only_b: impl Fn(i64) -> Option<i64>,
) -> SparseResult<HashMapSparseMatrix>
where
    A: SparseMatrixView,
    B: SparseMatrixView,
{
    check_same_shape(op, &a, &b)?;

    let mut res = HashMapSparseMatrix::new_empty(a.n_rows(), a.n_cols());
    for ((i, j), va) in a.iter() {
        let v = both(va, b.get(i, j)).ok_or(SparseError::Overflow { op })?;
        res.set(i, j, v);
    }
    for ((i, j), vb) in b.iter() {
        if !a.contains(i, j) {
            let v = only_b(vb).ok_or(SparseError::Overflow { op })?;
            res.set(i, j, v);
        }
    }

    debug!(nnz = res.nnz(), "{} done", op);
    Ok(res)
}

#[instrument(skip_all, fields(lhs = ?a.shape(), rhs = ?b.shape()))]
pub fn add<A, B>(a: A, b: B) -> SparseResult<HashMapSparseMatrix>
where
    A: SparseMatrixView,
    B: SparseMatrixView,
{
    merge("addition", a, b, i64::checked_add, Some)
}

/// `a - b`. Not commutative.
#[instrument(skip_all, fields(lhs = ?a.shape(), rhs = ?b.shape()))]
pub fn subtract<A, B>(a: A, b: B) -> SparseResult<HashMapSparseMatrix>
where
    A: SparseMatrixView,
    B: SparseMatrixView,
{
    merge("subtraction", a, b, i64::checked_sub, i64::checked_neg)
}

/// Matrix product `a * b`.
///
/// Entries of `b` are grouped by row first, so each stored `a[i, k]` only
/// meets the entries of row `k` of `b`. Partial sums are accumulated per
/// output cell in `i128`, so intermediate values may leave the `i64` range as
/// long as the final one does not. Final sums are written through [`HashMapSparseMatrix::set`] at the end, so
/// cells that cancel out are not stored.
#[instrument(skip_all, fields(lhs = ?a.shape(), rhs = ?b.shape()))]
pub fn multiply<A, B>(a: A, b: B) -> SparseResult<HashMapSparseMatrix>
where
    A: SparseMatrixView,
    B: SparseMatrixView,
{
    const OP: &str = "multiplication";

    if a.n_cols() != b.n_rows() {
        return Err(SparseError::Dimension {
            op: OP,
            lhs: a.shape(),
            rhs: b.shape(),
        });
    }

    let mut b_rows: HashMap<usize, Vec<(usize, i64)>> = HashMap::new();
    for ((k, j), vb) in b.iter() {
        b_rows.entry(k).or_default().push((j, vb));
    }

    // i64 products fit in i128; only the final sum is range checked.
    let mut sums: HashMap<(usize, usize), i128> = HashMap::new();
    for ((i, k), va) in a.iter() {
        let Some(row) = b_rows.get(&k) else {
            continue;
        };
        for &(j, vb) in row {
            *sums.entry((i, j)).or_insert(0) += i128::from(va) * i128::from(vb);
        }
    }

    let mut res = HashMapSparseMatrix::new_empty(a.n_rows(), b.n_cols());
    for ((i, j), v) in sums {
        let v = i64::try_from(v).map_err(|_| SparseError::Overflow { op: OP })?;
        res.set(i, j, v);
    }

    debug!(nnz = res.nnz(), "{} done", OP);
    Ok(res)
}

/// `-a`.
pub fn negate<A: SparseMatrixView>(a: A) -> SparseResult<HashMapSparseMatrix> {
    let mut res = HashMapSparseMatrix::new_empty(a.n_rows(), a.n_cols());
    for ((i, j), v) in a.iter() {
        let v = v
            .checked_neg()
            .ok_or(SparseError::Overflow { op: "negation" })?;
        res.set(i, j, v);
    }
    Ok(res)
}

impl std::ops::Add for &HashMapSparseMatrix {
    type Output = SparseResult<HashMapSparseMatrix>;

    fn add(self, rhs: Self) -> Self::Output {
        add(self, rhs)
    }
}

impl std::ops::Sub for &HashMapSparseMatrix {
    type Output = SparseResult<HashMapSparseMatrix>;

    fn sub(self, rhs: Self) -> Self::Output {
        subtract(self, rhs)
    }
}

impl std::ops::Mul for &HashMapSparseMatrix {
    type Output = SparseResult<HashMapSparseMatrix>;

    fn mul(self, rhs: Self) -> Self::Output {
        multiply(self, rhs)
    }
}

impl std::ops::Neg for &HashMapSparseMatrix {
    type Output = SparseResult<HashMapSparseMatrix>;

    fn neg(self) -> Self::Output {
        negate(self)
    }
}
