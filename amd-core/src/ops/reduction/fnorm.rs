use crate::autograd::graph::gradient;
use crate::autograd::{Adjoint, MatrixMatrixFunc, ScalarMatrixFunc};
use crate::error::AmdError;
use crate::matrix::MatrixAdaptor;
use num_traits::Zero;

/// Frobenius norm `||f||_F`, seeding the backward pass with `f / ||f||_F`.
///
/// # Errors
/// `InvalidOperation` when a non-constant `f` evaluates to zero, where the
/// norm has no derivative.
pub fn fnorm_op<M: MatrixAdaptor>(f: &MatrixMatrixFunc<M>) -> Result<ScalarMatrixFunc<M>, AmdError> {
    let value = f.value().fnorm();
    let (rows, cols) = f.var_shape();
    if f.is_const() {
        return Ok(ScalarMatrixFunc::constant(value, rows, cols));
    }
    if value.is_zero() {
        return Err(AmdError::InvalidOperation(
            "fnorm is not differentiable at the zero matrix".to_string(),
        ));
    }
    let seed = Adjoint::new(f.value().divide_scalar(&value));
    let derivative = gradient(f, seed)?;
    Ok(ScalarMatrixFunc::new(value, derivative))
}
