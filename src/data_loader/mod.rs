//! Text representation of a [`HashMapSparseMatrix`].
//!
//! ```text
//! rows=<n_rows>
//! cols=<n_cols>
//! (<row>, <col>, <value>)
//! ...
//! ```
//!
//! Blank lines between entries are ignored and a later triple for the same
//! position overwrites an earlier one. Serialization always emits entries in
//! ascending (`row`, `col`) order, so formatting is canonical.

pub mod file;

use std::{fmt, str::FromStr};

use tracing::{debug, trace};

use crate::{
    data_structures::HashMapSparseMatrix,
    error::{SparseError, SparseResult},
};

pub use file::{load_matrix, save_matrix};

const ROWS_KEY: &str = "rows";
const COLS_KEY: &str = "cols";

pub fn parse(text: &str) -> SparseResult<HashMapSparseMatrix> {
    // Line numbers are 1-based in error messages.
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

    let n_rows = parse_header(lines.next(), 1, ROWS_KEY)?;
    let n_cols = parse_header(lines.next(), 2, COLS_KEY)?;
    let mut m = HashMapSparseMatrix::new_empty(n_rows, n_cols);

    for (line_no, line) in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (row, col, value) = parse_entry(line_no, line)?;
        trace!(row, col, value, "entry");
        m.set(row, col, value);
    }

    debug!(n_rows, n_cols, nnz = m.nnz(), "parsed matrix");
    Ok(m)
}

fn parse_header(line: Option<(usize, &str)>, line_no: usize, key: &str) -> SparseResult<usize> {
    let (line_no, line) =
        line.ok_or_else(|| SparseError::format(line_no, format!("missing `{}=` header", key)))?;

    let (k, v) = line
        .split_once('=')
        .ok_or_else(|| SparseError::format(line_no, format!("expected `{}=<int>`", key)))?;
    if k.trim() != key {
        return Err(SparseError::format(
            line_no,
            format!("expected `{}=<int>`, found key `{}`", key, k.trim()),
        ));
    }

    let v = v.trim();
    match v.parse::<i64>() {
        Ok(n) if n < 0 => Err(SparseError::format(
            line_no,
            format!("negative dimension {}={}", key, n),
        )),
        _ => v.parse::<usize>().map_err(|e| {
            SparseError::format(line_no, format!("invalid {} value `{}`: {}", key, v, e))
        }),
    }
}

fn parse_entry(line_no: usize, line: &str) -> SparseResult<(usize, usize, i64)> {
    let inner = line
        .strip_prefix('(')
        .and_then(|l| l.strip_suffix(')'))
        .ok_or_else(|| SparseError::format(line_no, "entry must be wrapped in parentheses"))?;

    let toks: Vec<&str> = inner.split(',').map(str::trim).collect();
    let &[row, col, value] = toks.as_slice() else {
        return Err(SparseError::format(
            line_no,
            format!("expected 3 comma separated values, found {}", toks.len()),
        ));
    };

    let row = row
        .parse::<usize>()
        .map_err(|e| SparseError::format(line_no, format!("invalid row `{}`: {}", row, e)))?;
    let col = col
        .parse::<usize>()
        .map_err(|e| SparseError::format(line_no, format!("invalid col `{}`: {}", col, e)))?;
    let value = value
        .parse::<i64>()
        .map_err(|e| SparseError::format(line_no, format!("invalid value `{}`: {}", value, e)))?;

    Ok((row, col, value))
}

impl FromStr for HashMapSparseMatrix {
    type Err = SparseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl fmt::Display for HashMapSparseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}={}", ROWS_KEY, self.n_rows())?;
        writeln!(f, "{}={}", COLS_KEY, self.n_cols())?;
        for ((i, j), v) in self.iter_sorted() {
            writeln!(f, "({}, {}, {})", i, j, v)?;
        }
        Ok(())
    }
}

/// Canonical text for `m`, identical to its [`Display`](fmt::Display) output.
pub fn format_matrix(m: &HashMapSparseMatrix) -> String {
    m.to_string()
}
