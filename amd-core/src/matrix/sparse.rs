use crate::error::AmdError;
use crate::matrix::dense::DenseMatrix;
use crate::matrix::{check_inner_dims, check_same_shape, check_square, MatrixAdaptor};
use std::fmt;

/// A sparse `f64` matrix in compressed sparse row (CSR) form.
///
/// Column indices are sorted within each row and no explicit zeros are stored.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    rows: usize,
    cols: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<f64>,
}

impl SparseMatrix {
    /// Builds a matrix from `(row, col, value)` triplets.
    ///
    /// Duplicate coordinates are summed; entries that end up as zero are dropped.
    ///
    /// # Errors
    /// `InvalidArguments` if a coordinate lies outside `rows x cols`.
    pub fn from_triplets(
        rows: usize,
        cols: usize,
        triplets: &[(usize, usize, f64)],
    ) -> Result<Self, AmdError> {
        let mut sorted = Vec::with_capacity(triplets.len());
        for &(r, c, v) in triplets {
            if r >= rows || c >= cols {
                return Err(AmdError::InvalidArguments(format!(
                    "entry ({}, {}) outside a {}x{} matrix",
                    r, c, rows, cols
                )));
            }
            sorted.push((r, c, v));
        }
        sorted.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

        let mut merged: Vec<(usize, usize, f64)> = Vec::with_capacity(sorted.len());
        for (r, c, v) in sorted {
            match merged.last_mut() {
                Some(last) if last.0 == r && last.1 == c => last.2 += v,
                _ => merged.push((r, c, v)),
            }
        }
        merged.retain(|&(_, _, v)| v != 0.0);
        Ok(Self::from_sorted(rows, cols, merged))
    }

    /// Converts a dense matrix, dropping zero entries.
    pub fn from_dense(dense: &DenseMatrix) -> Self {
        let (rows, cols) = dense.shape();
        let mut entries = Vec::new();
        for r in 0..rows {
            for c in 0..cols {
                let v = dense[(r, c)];
                if v != 0.0 {
                    entries.push((r, c, v));
                }
            }
        }
        Self::from_sorted(rows, cols, entries)
    }

    fn from_sorted(rows: usize, cols: usize, entries: Vec<(usize, usize, f64)>) -> Self {
        let mut row_ptr = vec![0usize; rows + 1];
        let mut col_idx = Vec::with_capacity(entries.len());
        let mut values = Vec::with_capacity(entries.len());
        for (r, c, v) in entries {
            row_ptr[r + 1] += 1;
            col_idx.push(c);
            values.push(v);
        }
        for r in 0..rows {
            row_ptr[r + 1] += row_ptr[r];
        }
        SparseMatrix {
            rows,
            cols,
            row_ptr,
            col_idx,
            values,
        }
    }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// The entry at `(row, col)`, zero when not stored.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        if row >= self.rows {
            return 0.0;
        }
        let (cols, vals) = self.row(row);
        match cols.binary_search(&col) {
            Ok(pos) => vals[pos],
            Err(_) => 0.0,
        }
    }

    fn row(&self, r: usize) -> (&[usize], &[f64]) {
        let start = self.row_ptr[r];
        let end = self.row_ptr[r + 1];
        (&self.col_idx[start..end], &self.values[start..end])
    }

    /// Stored entries as `(row, col, value)` in row-major order.
    pub fn triplets(&self) -> Vec<(usize, usize, f64)> {
        let mut out = Vec::with_capacity(self.nnz());
        for r in 0..self.rows {
            let (cols, vals) = self.row(r);
            for (&c, &v) in cols.iter().zip(vals.iter()) {
                out.push((r, c, v));
            }
        }
        out
    }

    pub fn to_dense(&self) -> DenseMatrix {
        let mut dense = DenseMatrix::zeros(self.rows, self.cols);
        for (r, c, v) in self.triplets() {
            dense[(r, c)] = v;
        }
        dense
    }

    fn map_values<F: Fn(f64) -> f64>(&self, f: F) -> SparseMatrix {
        let entries = self
            .triplets()
            .into_iter()
            .map(|(r, c, v)| (r, c, f(v)))
            .filter(|&(_, _, v)| v != 0.0)
            .collect();
        Self::from_sorted(self.rows, self.cols, entries)
    }

    /// Row-wise merge of two matrices of the same shape.
    ///
    /// `f` receives `(a, b)` for every column present in either row, with the
    /// missing side as zero.
    fn merge<F: Fn(f64, f64) -> f64>(
        &self,
        other: &SparseMatrix,
        operation: &str,
        f: F,
    ) -> Result<SparseMatrix, AmdError> {
        check_same_shape(self, other, operation)?;
        let mut entries = Vec::with_capacity(self.nnz() + other.nnz());
        for r in 0..self.rows {
            let (ac, av) = self.row(r);
            let (bc, bv) = other.row(r);
            let (mut i, mut j) = (0, 0);
            while i < ac.len() || j < bc.len() {
                let (c, v) = if j >= bc.len() || (i < ac.len() && ac[i] < bc[j]) {
                    i += 1;
                    (ac[i - 1], f(av[i - 1], 0.0))
                } else if i >= ac.len() || bc[j] < ac[i] {
                    j += 1;
                    (bc[j - 1], f(0.0, bv[j - 1]))
                } else {
                    i += 1;
                    j += 1;
                    (ac[i - 1], f(av[i - 1], bv[j - 1]))
                };
                if v != 0.0 {
                    entries.push((r, c, v));
                }
            }
        }
        Ok(Self::from_sorted(self.rows, self.cols, entries))
    }

    /// Inverse through the Cholesky factor, solving `L L' x = e_j` column by column.
    fn llt_inverse(&self) -> Result<DenseMatrix, AmdError> {
        let l = self.to_dense().cholesky()?;
        let n = self.rows;
        let mut inv = DenseMatrix::zeros(n, n);
        let mut y = vec![0.0_f64; n];
        for j in 0..n {
            // forward: L y = e_j
            for i in 0..n {
                let mut s = if i == j { 1.0 } else { 0.0 };
                for k in 0..i {
                    s -= l[(i, k)] * y[k];
                }
                y[i] = s / l[(i, i)];
            }
            // backward: L' x = y
            for i in (0..n).rev() {
                let mut s = y[i];
                for k in (i + 1)..n {
                    s -= l[(k, i)] * inv[(k, j)];
                }
                inv[(i, j)] = s / l[(i, i)];
            }
        }
        Ok(inv)
    }
}

impl MatrixAdaptor for SparseMatrix {
    type Scalar = f64;

    fn num_rows(&self) -> usize {
        self.rows
    }

    fn num_cols(&self) -> usize {
        self.cols
    }

    fn add(&self, other: &Self) -> Result<Self, AmdError> {
        self.merge(other, "add", |a, b| a + b)
    }

    fn minus(&self, other: &Self) -> Result<Self, AmdError> {
        self.merge(other, "minus", |a, b| a - b)
    }

    fn multiply(&self, other: &Self) -> Result<Self, AmdError> {
        check_inner_dims(self, other, "multiply")?;
        let n = other.cols;
        let mut acc = vec![0.0_f64; n];
        let mut touched = vec![false; n];
        let mut pattern: Vec<usize> = Vec::new();
        let mut entries = Vec::new();
        for r in 0..self.rows {
            let (ac, av) = self.row(r);
            for (&k, &a) in ac.iter().zip(av.iter()) {
                let (bc, bv) = other.row(k);
                for (&c, &b) in bc.iter().zip(bv.iter()) {
                    if !touched[c] {
                        touched[c] = true;
                        pattern.push(c);
                    }
                    acc[c] += a * b;
                }
            }
            pattern.sort_unstable();
            for &c in &pattern {
                if acc[c] != 0.0 {
                    entries.push((r, c, acc[c]));
                }
                acc[c] = 0.0;
                touched[c] = false;
            }
            pattern.clear();
        }
        Ok(Self::from_sorted(self.rows, n, entries))
    }

    fn transpose(&self) -> Self {
        let mut entries: Vec<(usize, usize, f64)> = self
            .triplets()
            .into_iter()
            .map(|(r, c, v)| (c, r, v))
            .collect();
        entries.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        Self::from_sorted(self.cols, self.rows, entries)
    }

    fn negation(&self) -> Self {
        self.map_values(|v| -v)
    }

    fn inv(&self) -> Result<Self, AmdError> {
        check_square(self, "inv")?;
        // The Cholesky path only reads the lower triangle.
        let dense = self.to_dense();
        if !dense.is_symmetric() {
            return Ok(SparseMatrix::from_dense(&dense.inv()?));
        }
        Ok(SparseMatrix::from_dense(&self.llt_inverse()?))
    }

    fn trace(&self) -> Result<f64, AmdError> {
        check_square(self, "trace")?;
        Ok((0..self.rows).map(|i| self.get(i, i)).sum())
    }

    fn logdet(&self) -> Result<f64, AmdError> {
        check_square(self, "logdet")?;
        self.to_dense().logdet()
    }

    fn fnorm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    fn diag(&self) -> Result<Self, AmdError> {
        check_square(self, "diag")?;
        let entries = (0..self.rows)
            .map(|i| (i, i, self.get(i, i)))
            .filter(|&(_, _, v)| v != 0.0)
            .collect();
        Ok(Self::from_sorted(self.rows, self.cols, entries))
    }

    fn elementwise_product(&self, other: &Self) -> Result<Self, AmdError> {
        self.merge(other, "elementwise_product", |a, b| a * b)
    }

    fn scale(&self, s: &f64) -> Self {
        let s = *s;
        self.map_values(|v| s * v)
    }

    fn divide_scalar(&self, s: &f64) -> Self {
        let s = *s;
        self.map_values(|v| v / s)
    }

    fn eye(n: usize) -> Self {
        Self::from_sorted(n, n, (0..n).map(|i| (i, i, 1.0)).collect())
    }

    fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_sorted(rows, cols, Vec::new())
    }
}

impl fmt::Display for SparseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dense())
    }
}

#[cfg(test)]
#[path = "sparse_test.rs"]
mod tests;
