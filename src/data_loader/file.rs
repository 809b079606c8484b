use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use tracing::{debug, instrument};

use crate::{
    data_loader::parse,
    data_structures::HashMapSparseMatrix,
    error::{SparseError, SparseResult},
};

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SparseError + '_ {
    move |source| SparseError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Read and parse the matrix stored at `path`.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_matrix(path: impl AsRef<Path>) -> SparseResult<HashMapSparseMatrix> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(io_error(path))?;
    let text = String::from_utf8(bytes).map_err(|e| {
        let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
        let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
        SparseError::format(line, "invalid UTF-8")
    })?;

    let m = parse(&text)?;
    debug!(shape = ?m.shape(), nnz = m.nnz(), "loaded matrix");
    Ok(m)
}

/// Write `m` to `path` in canonical form. The parent directory must exist.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn save_matrix(path: impl AsRef<Path>, m: &HashMapSparseMatrix) -> SparseResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(io_error(path))?;
    let mut writer = BufWriter::new(file);
    write!(writer, "{}", m).map_err(io_error(path))?;
    writer.flush().map_err(io_error(path))?;
    debug!(shape = ?m.shape(), nnz = m.nnz(), "saved matrix");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{env, path::PathBuf, process};

    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("spmat-{}-{}.txt", process::id(), name))
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path("save_then_load");
        let mut m = HashMapSparseMatrix::new_empty(3, 4);
        m.set(0, 3, 11);
        m.set(2, 1, -5);

        save_matrix(&path, &m).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "rows=3\ncols=4\n(0, 3, 11)\n(2, 1, -5)\n"
        );
        assert_eq!(load_matrix(&path).unwrap(), m);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let path = scratch_path("does_not_exist");
        match load_matrix(&path) {
            Err(SparseError::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected io error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_malformed_file() {
        let path = scratch_path("malformed");
        fs::write(&path, "rows=2\ncols=2\n(1,2)\n").unwrap();
        let res = load_matrix(&path);
        fs::remove_file(&path).unwrap();
        assert!(matches!(res, Err(SparseError::Format { line: 3, .. })));
    }

    #[test]
    fn test_load_invalid_utf8_is_format_error() {
        let path = scratch_path("invalid_utf8");
        fs::write(&path, b"rows=2\ncols=2\n(0, 0, \xff)\n").unwrap();
        let res = load_matrix(&path);
        fs::remove_file(&path).unwrap();
        assert!(matches!(res, Err(SparseError::Format { line: 3, .. })));
    }
}
