//! Matrix adaptors.
//!
//! The differentiation engine never touches matrix storage directly. Every
//! operation goes through [`MatrixAdaptor`], which is implemented for dense
//! and sparse `f64` matrices and for symbolic MATLAB-notation matrices.

use crate::error::AmdError;
use num_traits::{One, Zero};
use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Neg, Sub};

pub mod dense;
pub mod random;
#[cfg(feature = "sparse")]
pub mod sparse;
pub mod symbolic;

pub use dense::DenseMatrix;
#[cfg(feature = "sparse")]
pub use sparse::SparseMatrix;
pub use symbolic::{SymbolicMatrix, SymbolicScalar};

/// Scalar values produced by `trace`, `logdet` and `fnorm`.
pub trait ScalarAdaptor:
    Clone
    + Debug
    + Display
    + PartialEq
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Send
    + Sync
    + 'static
{
    fn from_f64(value: f64) -> Self;

    fn from_usize(value: usize) -> Self;

    fn sqrt(&self) -> Self;
}

impl ScalarAdaptor for f64 {
    fn from_f64(value: f64) -> Self {
        value
    }

    fn from_usize(value: usize) -> Self {
        value as f64
    }

    fn sqrt(&self) -> Self {
        f64::sqrt(*self)
    }
}

/// The set of matrix operations the differentiation engine relies on.
///
/// Binary operations check dimensions and report
/// [`AmdError::MismatchedDimensions`]; operations that need a square operand
/// report [`AmdError::NonSquare`].
pub trait MatrixAdaptor: Clone + Debug + Display + Send + Sync + 'static {
    type Scalar: ScalarAdaptor;

    fn num_rows(&self) -> usize;

    fn num_cols(&self) -> usize;

    fn shape(&self) -> (usize, usize) {
        (self.num_rows(), self.num_cols())
    }

    fn is_square(&self) -> bool {
        self.num_rows() == self.num_cols()
    }

    /// `self + other`.
    fn add(&self, other: &Self) -> Result<Self, AmdError>;

    /// `self - other`.
    fn minus(&self, other: &Self) -> Result<Self, AmdError>;

    /// Matrix product `self * other`.
    fn multiply(&self, other: &Self) -> Result<Self, AmdError>;

    fn transpose(&self) -> Self;

    fn negation(&self) -> Self;

    /// Inverse of a square, non-singular matrix.
    fn inv(&self) -> Result<Self, AmdError>;

    fn trace(&self) -> Result<Self::Scalar, AmdError>;

    /// Log-determinant of a symmetric positive definite matrix, computed from
    /// its Cholesky factor as `2 * sum(log(diag(L)))`.
    fn logdet(&self) -> Result<Self::Scalar, AmdError>;

    /// Frobenius norm.
    fn fnorm(&self) -> Self::Scalar;

    /// Square matrix holding only the diagonal of `self`.
    fn diag(&self) -> Result<Self, AmdError>;

    fn elementwise_product(&self, other: &Self) -> Result<Self, AmdError>;

    /// `s * self`.
    fn scale(&self, s: &Self::Scalar) -> Self;

    /// `self / s`.
    fn divide_scalar(&self, s: &Self::Scalar) -> Self;

    fn eye(n: usize) -> Self;

    fn zeros(rows: usize, cols: usize) -> Self;
}

/// Structural tag carried by function nodes, used by the simplifier and by
/// the backward pass to skip work on identity and zero matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixKind {
    #[default]
    General,
    Identity,
    Zero,
}

pub(crate) fn check_same_shape<M: MatrixAdaptor>(
    a: &M,
    b: &M,
    operation: &str,
) -> Result<(), AmdError> {
    if a.shape() != b.shape() {
        return Err(AmdError::mismatch(a.shape(), b.shape(), operation));
    }
    Ok(())
}

pub(crate) fn check_square<M: MatrixAdaptor>(a: &M, operation: &str) -> Result<(), AmdError> {
    if !a.is_square() {
        return Err(AmdError::non_square(a.num_rows(), a.num_cols(), operation));
    }
    Ok(())
}

pub(crate) fn check_inner_dims<M: MatrixAdaptor>(
    a: &M,
    b: &M,
    operation: &str,
) -> Result<(), AmdError> {
    if a.num_cols() != b.num_rows() {
        return Err(AmdError::mismatch(
            (a.num_cols(), b.num_cols()),
            b.shape(),
            operation,
        ));
    }
    Ok(())
}
