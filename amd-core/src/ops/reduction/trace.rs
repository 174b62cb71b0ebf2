use crate::autograd::graph::gradient;
use crate::autograd::{Adjoint, MatrixMatrixFunc, ScalarMatrixFunc};
use crate::error::AmdError;
use crate::matrix::MatrixAdaptor;

/// `trace(f)`, seeding the backward pass with the identity.
///
/// # Errors
/// `NonSquare` when `f` is not square.
pub fn trace_op<M: MatrixAdaptor>(f: &MatrixMatrixFunc<M>) -> Result<ScalarMatrixFunc<M>, AmdError> {
    let value = f.value().trace()?;
    let (rows, cols) = f.var_shape();
    if f.is_const() {
        return Ok(ScalarMatrixFunc::constant(value, rows, cols));
    }
    let derivative = gradient(f, Adjoint::identity(f.value().num_rows()))?;
    Ok(ScalarMatrixFunc::new(value, derivative))
}

#[cfg(test)]
#[path = "trace_test.rs"]
mod tests;
