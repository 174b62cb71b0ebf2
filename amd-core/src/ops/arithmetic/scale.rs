use crate::autograd::{Adjoint, BackwardOp, MatrixMatrixFunc, OpType, ScalarMatrixFunc};
use crate::error::AmdError;
use crate::matrix::MatrixAdaptor;
use std::sync::Arc;

// --- Backward Operation ---

/// Backward pass of `s * m` where `s` is a scalar function.
///
/// The matrix input receives `s * G`. When `s` itself depends on the
/// variable, the term `<G, m> ds` is added to the result directly, with
/// `<G, m> = trace(G' * m)`.
#[derive(Debug)]
struct ScaleBackward<M: MatrixAdaptor> {
    scalar: ScalarMatrixFunc<M>,
    input: MatrixMatrixFunc<M>,
}

impl<M: MatrixAdaptor> BackwardOp<M> for ScaleBackward<M> {
    fn backward(&self, adjoint: &Adjoint<M>) -> Result<Vec<Adjoint<M>>, AmdError> {
        Ok(vec![Adjoint {
            value: adjoint.value.scale(self.scalar.value()),
            transposed: adjoint.transposed,
            identity: false,
        }])
    }

    fn inputs(&self) -> Vec<MatrixMatrixFunc<M>> {
        vec![self.input.clone()]
    }

    fn scalar_contribution(&self, adjoint: &Adjoint<M>) -> Result<Option<M>, AmdError> {
        if self.scalar.is_const() {
            return Ok(None);
        }
        let inner = if adjoint.identity {
            self.input.value().trace()?
        } else {
            adjoint
                .materialize()
                .transpose()
                .multiply(self.input.value())?
                .trace()?
        };
        Ok(Some(self.scalar.derivative().scale(&inner)))
    }
}

// --- Forward Operation ---

/// `s * a`, scaling a matrix function by a scalar function.
///
/// Both factors may depend on the variable.
pub fn scale_op<M: MatrixAdaptor>(
    s: &ScalarMatrixFunc<M>,
    a: &MatrixMatrixFunc<M>,
) -> Result<MatrixMatrixFunc<M>, AmdError> {
    if !s.is_const() && !a.is_const() && s.derivative().shape() != a.var_shape() {
        return Err(AmdError::mismatch(
            a.var_shape(),
            s.derivative().shape(),
            "scale",
        ));
    }
    let value = a.value().scale(s.value());
    let grad_fn = ScaleBackward {
        scalar: s.clone(),
        input: a.clone(),
    };
    Ok(MatrixMatrixFunc::from_op_with_scalar(
        value,
        OpType::ScalarTimesMatrix,
        Arc::new(grad_fn),
        Some(s.clone()),
    ))
}

#[cfg(test)]
#[path = "scale_test.rs"]
mod tests;
