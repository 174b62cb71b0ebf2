use crate::autograd::{Adjoint, BackwardOp, MatrixMatrixFunc, OpType};
use crate::error::AmdError;
use crate::matrix::MatrixAdaptor;
use std::sync::Arc;

// --- Backward Operation ---

/// Backward pass of `a + b`: both inputs receive the adjoint unchanged.
#[derive(Debug)]
struct AddBackward<M: MatrixAdaptor> {
    a: MatrixMatrixFunc<M>,
    b: MatrixMatrixFunc<M>,
}

impl<M: MatrixAdaptor> BackwardOp<M> for AddBackward<M> {
    fn backward(&self, adjoint: &Adjoint<M>) -> Result<Vec<Adjoint<M>>, AmdError> {
        Ok(vec![adjoint.clone(), adjoint.clone()])
    }

    fn inputs(&self) -> Vec<MatrixMatrixFunc<M>> {
        vec![self.a.clone(), self.b.clone()]
    }
}

// --- Forward Operation ---

/// `a + b`.
///
/// # Errors
/// `MismatchedDimensions` if the shapes differ.
pub fn add_op<M: MatrixAdaptor>(
    a: &MatrixMatrixFunc<M>,
    b: &MatrixMatrixFunc<M>,
) -> Result<MatrixMatrixFunc<M>, AmdError> {
    let value = a.value().add(b.value())?;
    let grad_fn = AddBackward {
        a: a.clone(),
        b: b.clone(),
    };
    Ok(MatrixMatrixFunc::from_op(value, OpType::Plus, Arc::new(grad_fn)))
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
