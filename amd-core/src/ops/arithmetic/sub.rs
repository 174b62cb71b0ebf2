use crate::autograd::{Adjoint, BackwardOp, MatrixMatrixFunc, OpType};
use crate::error::AmdError;
use crate::matrix::MatrixAdaptor;
use std::sync::Arc;

// --- Backward Operation ---

/// Backward pass of `a - b`.
///
/// The right input receives the negated adjoint. A negated identity is no
/// longer the identity, so that flag is dropped on the right branch.
#[derive(Debug)]
struct SubBackward<M: MatrixAdaptor> {
    a: MatrixMatrixFunc<M>,
    b: MatrixMatrixFunc<M>,
}

impl<M: MatrixAdaptor> BackwardOp<M> for SubBackward<M> {
    fn backward(&self, adjoint: &Adjoint<M>) -> Result<Vec<Adjoint<M>>, AmdError> {
        let negated = Adjoint {
            value: adjoint.value.negation(),
            transposed: adjoint.transposed,
            identity: false,
        };
        Ok(vec![adjoint.clone(), negated])
    }

    fn inputs(&self) -> Vec<MatrixMatrixFunc<M>> {
        vec![self.a.clone(), self.b.clone()]
    }
}

// --- Forward Operation ---

/// `a - b`.
///
/// # Errors
/// `MismatchedDimensions` if the shapes differ.
pub fn sub_op<M: MatrixAdaptor>(
    a: &MatrixMatrixFunc<M>,
    b: &MatrixMatrixFunc<M>,
) -> Result<MatrixMatrixFunc<M>, AmdError> {
    let value = a.value().minus(b.value())?;
    let grad_fn = SubBackward {
        a: a.clone(),
        b: b.clone(),
    };
    Ok(MatrixMatrixFunc::from_op(value, OpType::Minus, Arc::new(grad_fn)))
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
