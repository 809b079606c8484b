//! Error types for sparse matrix parsing and arithmetic.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Result type alias using [`SparseError`].
pub type SparseResult<T> = Result<T, SparseError>;

#[derive(Error, Debug)]
pub enum SparseError {
    /// Serialized matrix text does not follow the `rows=`/`cols=`/triples layout.
    #[error("line {line}: {message}")]
    Format { line: usize, message: String },

    /// Operand shapes are incompatible for `op`.
    #[error("matrix dimensions are not compatible for {op}: {lhs:?} and {rhs:?}")]
    Dimension {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    /// An entry of the result does not fit in `i64`.
    #[error("integer overflow during {op}")]
    Overflow { op: &'static str },

    /// Reading or writing the matrix file at `path` failed.
    #[error("cannot access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SparseError {
    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }
}
