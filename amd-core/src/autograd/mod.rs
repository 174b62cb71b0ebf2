//! # Reverse-mode matrix differentiation
//!
//! A function of one matrix variable is built as a graph of
//! [`MatrixMatrixFunc`] nodes. Reducing the graph to a scalar with `trace`,
//! `logdet` or `fnorm` yields a [`ScalarMatrixFunc`] holding both the value
//! and the derivative with respect to the variable.
//!
//! - [`backward_op`]: the [`BackwardOp`] trait implemented by every operation,
//!   and the [`Adjoint`] value it propagates.
//! - [`matrix_func`]: graph nodes and [`OpType`].
//! - [`scalar_func`]: scalar functions and their sum, product and quotient rules.
//! - [`graph`]: the backward pass.
//! - [`grad_check`]: finite difference verification on dense matrices.

pub mod backward_op;
pub mod grad_check;
pub(crate) mod graph;
pub mod matrix_func;
pub mod scalar_func;

pub use backward_op::{Adjoint, BackwardOp};
pub use grad_check::{check_grad, GradCheckConfig, GradCheckError};
pub use matrix_func::{MatrixMatrixFunc, OpType};
pub use scalar_func::ScalarMatrixFunc;
