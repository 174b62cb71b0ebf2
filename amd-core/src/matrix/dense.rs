use crate::error::AmdError;
use crate::matrix::{check_inner_dims, check_same_shape, check_square, MatrixAdaptor};
use approx::{AbsDiffEq, RelativeEq};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Relative pivot threshold below which a matrix is treated as singular.
const SINGULAR_PIVOT_RATIO: f64 = 1e-12;

/// A dense `f64` matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl DenseMatrix {
    /// Creates a matrix from row-major data.
    ///
    /// # Errors
    /// Returns `AmdError::InvalidArguments` if `data.len() != rows * cols`.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self, AmdError> {
        if data.len() != rows * cols {
            return Err(AmdError::InvalidArguments(format!(
                "data length {} does not match {}x{}",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(DenseMatrix { rows, cols, data })
    }

    /// Creates a matrix from column-major data, the layout used by the
    /// on-disk dense formats.
    pub fn from_column_major(data: &[f64], rows: usize, cols: usize) -> Result<Self, AmdError> {
        if data.len() != rows * cols {
            return Err(AmdError::InvalidArguments(format!(
                "data length {} does not match {}x{}",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self::from_fn(rows, cols, |r, c| data[c * rows + r]))
    }

    /// Creates a matrix from a slice of rows. All rows must have the same length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, AmdError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n_cols {
                return Err(AmdError::InvalidArguments(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    n_cols
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(DenseMatrix {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        DenseMatrix { rows, cols, data }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Row-major view of the entries.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Largest absolute entry, `0.0` for an empty matrix.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }

    /// Lower triangular Cholesky factor `L` with `self = L * L'`.
    ///
    /// Only the lower triangle of `self` is read.
    ///
    /// # Errors
    /// `NonSquare` for rectangular input, `NotPositiveDefinite` when a pivot is
    /// not strictly positive.
    pub fn cholesky(&self) -> Result<DenseMatrix, AmdError> {
        check_square(self, "cholesky")?;
        let n = self.rows;
        let mut l = vec![0.0_f64; n * n];
        for j in 0..n {
            let mut d = self.data[j * n + j];
            for k in 0..j {
                d -= l[j * n + k] * l[j * n + k];
            }
            if d <= 0.0 || !d.is_finite() {
                return Err(AmdError::NotPositiveDefinite {
                    operation: "cholesky".to_string(),
                });
            }
            let ljj = d.sqrt();
            l[j * n + j] = ljj;
            for i in (j + 1)..n {
                let mut s = self.data[i * n + j];
                for k in 0..j {
                    s -= l[i * n + k] * l[j * n + k];
                }
                l[i * n + j] = s / ljj;
            }
        }
        Ok(DenseMatrix {
            rows: n,
            cols: n,
            data: l,
        })
    }

    /// True when `self` is square and equal to its transpose.
    pub fn is_symmetric(&self) -> bool {
        let n = self.cols;
        self.rows == n && (0..n).all(|r| (0..r).all(|c| self.data[r * n + c] == self.data[c * n + r]))
    }

    /// `log(det(self))` through an LU factorisation with partial pivoting, for
    /// matrices that are not symmetric (finite difference perturbations, for
    /// example). A non-positive determinant has no real logarithm.
    fn lu_logdet(&self) -> Result<f64, AmdError> {
        let n = self.rows;
        let mut a = self.data.clone();
        let mut negative = false;
        let mut log_abs = 0.0_f64;
        for col in 0..n {
            let mut pivot = col;
            for r in (col + 1)..n {
                if a[r * n + col].abs() > a[pivot * n + col].abs() {
                    pivot = r;
                }
            }
            let p = a[pivot * n + col];
            if p == 0.0 {
                return Err(AmdError::SingularMatrix {
                    operation: "logdet".to_string(),
                });
            }
            if pivot != col {
                for c in 0..n {
                    a.swap(pivot * n + c, col * n + c);
                }
                negative = !negative;
            }
            if p < 0.0 {
                negative = !negative;
            }
            log_abs += p.abs().ln();
            for r in (col + 1)..n {
                let factor = a[r * n + col] / p;
                if factor == 0.0 {
                    continue;
                }
                for c in col..n {
                    a[r * n + c] -= factor * a[col * n + c];
                }
            }
        }
        if negative {
            return Err(AmdError::NotPositiveDefinite {
                operation: "logdet".to_string(),
            });
        }
        Ok(log_abs)
    }

    fn map<F: Fn(f64) -> f64>(&self, f: F) -> DenseMatrix {
        DenseMatrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    fn zip_with<F: Fn(f64, f64) -> f64>(
        &self,
        other: &DenseMatrix,
        operation: &str,
        f: F,
    ) -> Result<DenseMatrix, AmdError> {
        check_same_shape(self, other, operation)?;
        Ok(DenseMatrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }
}

impl MatrixAdaptor for DenseMatrix {
    type Scalar = f64;

    fn num_rows(&self) -> usize {
        self.rows
    }

    fn num_cols(&self) -> usize {
        self.cols
    }

    fn add(&self, other: &Self) -> Result<Self, AmdError> {
        self.zip_with(other, "add", |a, b| a + b)
    }

    fn minus(&self, other: &Self) -> Result<Self, AmdError> {
        self.zip_with(other, "minus", |a, b| a - b)
    }

    fn multiply(&self, other: &Self) -> Result<Self, AmdError> {
        check_inner_dims(self, other, "multiply")?;
        let m = self.rows;
        let k = self.cols;
        let n = other.cols;
        let mut out = vec![0.0_f64; m * n];
        for i in 0..m {
            for l in 0..k {
                let a = self.data[i * k + l];
                if a == 0.0 {
                    continue;
                }
                for j in 0..n {
                    out[i * n + j] += a * other.data[l * n + j];
                }
            }
        }
        Ok(DenseMatrix {
            rows: m,
            cols: n,
            data: out,
        })
    }

    fn transpose(&self) -> Self {
        DenseMatrix::from_fn(self.cols, self.rows, |r, c| self.data[c * self.cols + r])
    }

    fn negation(&self) -> Self {
        self.map(|v| -v)
    }

    fn inv(&self) -> Result<Self, AmdError> {
        check_square(self, "inv")?;
        let n = self.rows;
        let mut a = self.data.clone();
        let mut inv = DenseMatrix::eye(n).data;
        let threshold = SINGULAR_PIVOT_RATIO * self.max_abs();

        for col in 0..n {
            let mut pivot = col;
            for r in (col + 1)..n {
                if a[r * n + col].abs() > a[pivot * n + col].abs() {
                    pivot = r;
                }
            }
            let p = a[pivot * n + col];
            if p.abs() <= threshold || p == 0.0 {
                return Err(AmdError::SingularMatrix {
                    operation: "inv".to_string(),
                });
            }
            if pivot != col {
                for c in 0..n {
                    a.swap(pivot * n + c, col * n + c);
                    inv.swap(pivot * n + c, col * n + c);
                }
            }
            for c in 0..n {
                a[col * n + c] /= p;
                inv[col * n + c] /= p;
            }
            for r in 0..n {
                if r == col {
                    continue;
                }
                let factor = a[r * n + col];
                if factor == 0.0 {
                    continue;
                }
                for c in 0..n {
                    a[r * n + c] -= factor * a[col * n + c];
                    inv[r * n + c] -= factor * inv[col * n + c];
                }
            }
        }
        Ok(DenseMatrix {
            rows: n,
            cols: n,
            data: inv,
        })
    }

    fn trace(&self) -> Result<f64, AmdError> {
        check_square(self, "trace")?;
        Ok((0..self.rows).map(|i| self.data[i * self.cols + i]).sum())
    }

    fn logdet(&self) -> Result<f64, AmdError> {
        check_square(self, "logdet")?;
        if !self.is_symmetric() {
            return self.lu_logdet();
        }
        let l = self.cholesky()?;
        let n = l.rows;
        let log_trace: f64 = (0..n).map(|i| l.data[i * n + i].ln()).sum();
        Ok(2.0 * log_trace)
    }

    fn fnorm(&self) -> f64 {
        self.data.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    fn diag(&self) -> Result<Self, AmdError> {
        check_square(self, "diag")?;
        let n = self.rows;
        Ok(DenseMatrix::from_fn(n, n, |r, c| {
            if r == c {
                self.data[r * n + c]
            } else {
                0.0
            }
        }))
    }

    fn elementwise_product(&self, other: &Self) -> Result<Self, AmdError> {
        self.zip_with(other, "elementwise_product", |a, b| a * b)
    }

    fn scale(&self, s: &f64) -> Self {
        let s = *s;
        self.map(|v| s * v)
    }

    fn divide_scalar(&self, s: &f64) -> Self {
        let s = *s;
        self.map(|v| v / s)
    }

    fn eye(n: usize) -> Self {
        DenseMatrix::from_fn(n, n, |r, c| if r == c { 1.0 } else { 0.0 })
    }

    fn zeros(rows: usize, cols: usize) -> Self {
        DenseMatrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }
}

impl Index<(usize, usize)> for DenseMatrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(row < self.rows && col < self.cols, "index ({}, {}) out of bounds", row, col);
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for DenseMatrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(row < self.rows && col < self.cols, "index ({}, {}) out of bounds", row, col);
        &mut self.data[row * self.cols + col]
    }
}

impl fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            let row: Vec<String> = (0..self.cols)
                .map(|c| format!("{}", self.data[r * self.cols + c]))
                .collect();
            write!(f, "{}", row.join(" "))?;
            if r + 1 < self.rows {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl AbsDiffEq for DenseMatrix {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for DenseMatrix {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(test)]
#[path = "dense_test.rs"]
mod tests;
