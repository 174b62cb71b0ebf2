//! Automatic matrix differentiation.
//!
//! Functions of a single matrix variable `X` are built as graphs of
//! [`MatrixMatrixFunc`] nodes and reduced to a scalar with `trace`, `logdet`
//! or `fnorm`. The resulting [`ScalarMatrixFunc`] carries both the value and
//! the derivative with respect to `X`, computed by reverse accumulation.
//!
//! The same graph works over dense, sparse and symbolic matrices through the
//! [`MatrixAdaptor`](matrix::MatrixAdaptor) trait. With [`SymbolicMatrix`]
//! the derivative comes out as a MATLAB-style string, which is what the
//! [`Calculator`] front end exposes.

pub mod autograd;
pub mod calculator;
pub mod error;
pub mod expr;
pub mod matrix;
pub mod ops;
pub mod simplify;
pub mod utils;

pub use autograd::{MatrixMatrixFunc, OpType, ScalarMatrixFunc};
pub use calculator::{Calculator, CalculatorConfig};
pub use error::{AmdError, ErrorCode};
pub use expr::{differentiate, parse_expression, Expression};
pub use matrix::{DenseMatrix, MatrixAdaptor, MatrixKind, SymbolicMatrix, SymbolicScalar};
#[cfg(feature = "sparse")]
pub use matrix::SparseMatrix;
pub use simplify::{simplify, Traversal};
// Re-export traits required by public functions/structs
pub use num_traits;
