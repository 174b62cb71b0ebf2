use crate::autograd::{Adjoint, BackwardOp, MatrixMatrixFunc, OpType};
use crate::error::AmdError;
use crate::matrix::MatrixAdaptor;
use std::sync::Arc;

// --- Backward Operation ---

#[derive(Debug)]
struct NegBackward<M: MatrixAdaptor> {
    input: MatrixMatrixFunc<M>,
}

impl<M: MatrixAdaptor> BackwardOp<M> for NegBackward<M> {
    fn backward(&self, adjoint: &Adjoint<M>) -> Result<Vec<Adjoint<M>>, AmdError> {
        Ok(vec![Adjoint {
            value: adjoint.value.negation(),
            transposed: adjoint.transposed,
            identity: false,
        }])
    }

    fn inputs(&self) -> Vec<MatrixMatrixFunc<M>> {
        vec![self.input.clone()]
    }
}

// --- Forward Operation ---

/// `-a`.
pub fn neg_op<M: MatrixAdaptor>(a: &MatrixMatrixFunc<M>) -> MatrixMatrixFunc<M> {
    let value = a.value().negation();
    let grad_fn = NegBackward { input: a.clone() };
    MatrixMatrixFunc::from_op(value, OpType::Negation, Arc::new(grad_fn))
}

#[cfg(test)]
#[path = "neg_test.rs"]
mod tests;
