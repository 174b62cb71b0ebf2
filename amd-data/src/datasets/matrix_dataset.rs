use super::traits::Dataset;
use crate::format::FileFormat;
use crate::loader::{load_dense, load_sparse};
use amd_core::{AmdError, DenseMatrix};
use log::debug;
use std::path::PathBuf;

/// Where and how to load one named matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixSpec {
    pub name: String,
    pub path: PathBuf,
    pub format: FileFormat,
    /// Order of the square matrix.
    pub n: usize,
    /// Number of triplets to read; only used by sparse formats.
    pub nnz: usize,
}

impl MatrixSpec {
    pub fn dense<S: Into<String>, P: Into<PathBuf>>(
        name: S,
        path: P,
        format: FileFormat,
        n: usize,
    ) -> Self {
        MatrixSpec {
            name: name.into(),
            path: path.into(),
            format,
            n,
            nnz: n * n,
        }
    }

    pub fn sparse<S: Into<String>, P: Into<PathBuf>>(name: S, path: P, n: usize, nnz: usize) -> Self {
        MatrixSpec {
            name: name.into(),
            path: path.into(),
            format: FileFormat::SparseIjv,
            n,
            nnz,
        }
    }

    /// Loads the matrix, densifying sparse input.
    pub fn load(&self) -> Result<DenseMatrix, AmdError> {
        if self.format.is_dense() {
            load_dense(&self.path, self.format, self.n)
        } else {
            Ok(load_sparse(&self.path, self.format, self.n, self.nnz)?.to_dense())
        }
    }
}

/// Named dense matrices, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MatrixDataset {
    entries: Vec<(String, DenseMatrix)>,
}

impl MatrixDataset {
    pub fn new(entries: Vec<(String, DenseMatrix)>) -> Self {
        Self { entries }
    }

    /// Loads every spec in order, stopping at the first failure.
    pub fn from_specs(specs: &[MatrixSpec]) -> Result<Self, AmdError> {
        let entries = specs
            .iter()
            .map(|spec| Ok((spec.name.clone(), spec.load()?)))
            .collect::<Result<Vec<_>, AmdError>>()?;
        debug!("Loaded {} matrices", entries.len());
        Ok(Self { entries })
    }

    pub fn by_name(&self, name: &str) -> Option<&DenseMatrix> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, matrix)| matrix)
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl Dataset for MatrixDataset {
    type Item = (String, DenseMatrix);

    /// Returns a clone of the name and matrix at `index`.
    fn get(&self, index: usize) -> Result<Self::Item, AmdError> {
        self.entries.get(index).cloned().ok_or_else(|| {
            AmdError::InvalidArguments(format!(
                "index {} out of range for a dataset of {} matrices",
                index,
                self.entries.len()
            ))
        })
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
#[path = "matrix_dataset_test.rs"]
mod tests;
