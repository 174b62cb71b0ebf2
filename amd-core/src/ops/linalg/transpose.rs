use crate::autograd::{Adjoint, BackwardOp, MatrixMatrixFunc, OpType};
use crate::error::AmdError;
use crate::matrix::MatrixAdaptor;
use std::sync::Arc;

// --- Backward Operation ---

/// Backward pass of `a'`: toggles the pending transpose. The identity is its
/// own transpose and passes through unchanged.
#[derive(Debug)]
struct TransposeBackward<M: MatrixAdaptor> {
    input: MatrixMatrixFunc<M>,
}

impl<M: MatrixAdaptor> BackwardOp<M> for TransposeBackward<M> {
    fn backward(&self, adjoint: &Adjoint<M>) -> Result<Vec<Adjoint<M>>, AmdError> {
        let mut next = adjoint.clone();
        if !adjoint.identity {
            next.transposed = !adjoint.transposed;
        }
        Ok(vec![next])
    }

    fn inputs(&self) -> Vec<MatrixMatrixFunc<M>> {
        vec![self.input.clone()]
    }
}

// --- Forward Operation ---

/// `a'`. The transpose of a transpose node returns the original node.
pub fn transpose_op<M: MatrixAdaptor>(a: &MatrixMatrixFunc<M>) -> MatrixMatrixFunc<M> {
    if a.op() == OpType::Transpose {
        if let Some(inner) = a.left() {
            return inner;
        }
    }
    let value = a.value().transpose();
    let grad_fn = TransposeBackward { input: a.clone() };
    MatrixMatrixFunc::from_op(value, OpType::Transpose, Arc::new(grad_fn))
}
