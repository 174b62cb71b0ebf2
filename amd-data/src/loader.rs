//! Reading matrices from disk.
//!
//! Dense files store `n*n` values in column-major order, either as text or as
//! raw little-endian `f64`. Sparse files list `i j v` triplets, one per line.

use crate::format::FileFormat;
use amd_core::{AmdError, DenseMatrix, SparseMatrix};
use log::{debug, error, warn};
use std::fs;
use std::path::Path;

/// Loads an `n x n` dense matrix.
///
/// # Errors
/// - `Io` if the file cannot be read.
/// - `InvalidArguments` for a sparse `format`, an unparsable value, or fewer
///   than `n*n` values.
pub fn load_dense<P: AsRef<Path>>(
    path: P,
    format: FileFormat,
    n: usize,
) -> Result<DenseMatrix, AmdError> {
    let path = path.as_ref();
    debug!("Loading {}x{} {} matrix from {}", n, n, format, path.display());
    let expected = n * n;
    let values = match format {
        FileFormat::DenseTxt => read_dense_txt(path)?,
        FileFormat::DenseBin => read_dense_bin(path)?,
        FileFormat::SparseIjv => {
            return Err(AmdError::InvalidArguments(format!(
                "{} is not a dense format",
                format
            )))
        }
    };
    if values.len() < expected {
        return Err(AmdError::InvalidArguments(format!(
            "{} holds {} values, expected {}",
            path.display(),
            values.len(),
            expected
        )));
    }
    if values.len() > expected {
        warn!(
            "{} holds {} values, ignoring all but the first {}",
            path.display(),
            values.len(),
            expected
        );
    }
    DenseMatrix::from_column_major(&values[..expected], n, n)
}

/// Loads an `n x n` sparse matrix from at most `nnz` triplets.
///
/// Duplicate coordinates are summed.
///
/// # Errors
/// - `Io` if the file cannot be read.
/// - `InvalidArguments` for a dense `format`, a malformed line, or an index
///   outside the matrix.
pub fn load_sparse<P: AsRef<Path>>(
    path: P,
    format: FileFormat,
    n: usize,
    nnz: usize,
) -> Result<SparseMatrix, AmdError> {
    let path = path.as_ref();
    if format != FileFormat::SparseIjv {
        return Err(AmdError::InvalidArguments(format!(
            "{} is not a sparse format",
            format
        )));
    }
    debug!(
        "Loading {}x{} sparse matrix ({} entries) from {}",
        n,
        n,
        nnz,
        path.display()
    );
    let contents = read_to_string(path)?;
    let mut triplets = Vec::with_capacity(nnz);
    for (line_no, line) in contents.lines().enumerate() {
        if triplets.len() == nnz {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        let (i, j, v) = parse_triplet(line).ok_or_else(|| {
            AmdError::InvalidArguments(format!(
                "{}:{}: expected 'i j v', got '{}'",
                path.display(),
                line_no + 1,
                line.trim()
            ))
        })?;
        if i >= n || j >= n {
            return Err(AmdError::InvalidArguments(format!(
                "{}:{}: index ({}, {}) outside a {}x{} matrix",
                path.display(),
                line_no + 1,
                i,
                j,
                n,
                n
            )));
        }
        triplets.push((i, j, v));
    }
    if triplets.len() < nnz {
        warn!(
            "{} holds {} entries, expected {}",
            path.display(),
            triplets.len(),
            nnz
        );
    }
    SparseMatrix::from_triplets(n, n, &triplets)
}

fn parse_triplet(line: &str) -> Option<(usize, usize, f64)> {
    let mut tokens = line.split_whitespace();
    let i = tokens.next()?.parse().ok()?;
    let j = tokens.next()?.parse().ok()?;
    let v = tokens.next()?.parse().ok()?;
    Some((i, j, v))
}

fn read_dense_txt(path: &Path) -> Result<Vec<f64>, AmdError> {
    read_to_string(path)?
        .split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| {
                AmdError::InvalidArguments(format!(
                    "invalid value '{}' in {}",
                    token,
                    path.display()
                ))
            })
        })
        .collect()
}

fn read_dense_bin(path: &Path) -> Result<Vec<f64>, AmdError> {
    let bytes = fs::read(path).map_err(|e| io_error(path, e))?;
    let chunks = bytes.chunks_exact(8);
    let trailing = chunks.remainder().len();
    if trailing != 0 {
        warn!(
            "{} ends with {} bytes that do not form a value, ignoring them",
            path.display(),
            trailing
        );
    }
    let mut values = Vec::with_capacity(bytes.len() / 8);
    for chunk in chunks {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(chunk);
        values.push(f64::from_le_bytes(raw));
    }
    Ok(values)
}

fn read_to_string(path: &Path) -> Result<String, AmdError> {
    fs::read_to_string(path).map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, e: std::io::Error) -> AmdError {
    error!("Could not open {}: {}", path.display(), e);
    AmdError::Io(format!("{}: {}", path.display(), e))
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
