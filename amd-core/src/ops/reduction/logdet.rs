use crate::autograd::graph::gradient;
use crate::autograd::{Adjoint, MatrixMatrixFunc, OpType, ScalarMatrixFunc};
use crate::error::AmdError;
use crate::matrix::MatrixAdaptor;
use log::trace;

/// `log(det(f))`, seeding the backward pass with `inv(f)'`.
///
/// `logdet(a')` is evaluated as `logdet(a)` and `logdet(inv(a))` as
/// `-logdet(a)`, which avoids forming the transpose or inverse.
///
/// # Errors
/// `NonSquare` when `f` is not square; adaptors report matrices without a
/// real log-determinant as `NotPositiveDefinite`.
pub fn logdet_op<M: MatrixAdaptor>(f: &MatrixMatrixFunc<M>) -> Result<ScalarMatrixFunc<M>, AmdError> {
    match (f.op(), f.left()) {
        (OpType::Transpose, Some(inner)) => {
            trace!("logdet(A') rewritten as logdet(A)");
            return logdet_op(&inner);
        }
        (OpType::Inv, Some(inner)) => {
            trace!("logdet(inv(A)) rewritten as -logdet(A)");
            return Ok(logdet_op(&inner)?.neg());
        }
        _ => {}
    }

    let value = f.value().logdet()?;
    let (rows, cols) = f.var_shape();
    if f.is_const() {
        return Ok(ScalarMatrixFunc::constant(value, rows, cols));
    }
    let seed = Adjoint::transposed(f.value().inv()?);
    let derivative = gradient(f, seed)?;
    Ok(ScalarMatrixFunc::new(value, derivative))
}

#[cfg(test)]
#[path = "logdet_test.rs"]
mod tests;
