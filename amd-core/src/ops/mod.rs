//! # Matrix function operations (`ops`)
//!
//! Every differentiable operation on [`MatrixMatrixFunc`] lives here, grouped
//! by kind:
//!
//! - [`arithmetic`]: `+`, `-`, negation, element-wise product and scaling by
//!   a scalar function.
//! - [`linalg`]: matrix product, transpose, inverse and `diag`.
//! - [`reduction`]: the scalar-valued roots `trace`, `logdet` and `fnorm`.
//!
//! Each operation has a forward function named `xxx_op` that computes the
//! value through the [`MatrixAdaptor`](crate::matrix::MatrixAdaptor), and a
//! `XxxBackward` struct implementing
//! [`BackwardOp`](crate::autograd::BackwardOp) that turns the adjoint of the
//! output into adjoints of the inputs. The same operations are available as
//! methods on [`MatrixMatrixFunc`].
//!
//! [`MatrixMatrixFunc`]: crate::autograd::MatrixMatrixFunc

pub mod arithmetic;
pub mod linalg;
pub mod reduction;

pub use arithmetic::{add_op, elementwise_product_op, neg_op, scale_op, sub_op};
pub use linalg::{diag_op, inv_op, matmul_op, transpose_op};
pub use reduction::{fnorm_op, logdet_op, trace_op};
