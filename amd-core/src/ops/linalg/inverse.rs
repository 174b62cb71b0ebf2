use crate::autograd::{Adjoint, BackwardOp, MatrixMatrixFunc, OpType};
use crate::error::AmdError;
use crate::matrix::MatrixAdaptor;
use std::sync::Arc;

// --- Backward Operation ---

/// Backward pass of `inv(a)`.
///
/// With `T = inv(a)` and adjoint `G`, the input receives `-T' G T'`. This is
/// stored as `(-(T G' T))'`, which lets a pending transpose on `G` cancel.
#[derive(Debug)]
struct InvBackward<M: MatrixAdaptor> {
    input: MatrixMatrixFunc<M>,
    inverse: M,
}

impl<M: MatrixAdaptor> BackwardOp<M> for InvBackward<M> {
    fn backward(&self, adjoint: &Adjoint<M>) -> Result<Vec<Adjoint<M>>, AmdError> {
        let t = &self.inverse;
        let product = if adjoint.identity {
            t.multiply(t)?
        } else if adjoint.transposed {
            t.multiply(&adjoint.value.multiply(t)?)?
        } else {
            t.multiply(&adjoint.value.transpose().multiply(t)?)?
        };
        Ok(vec![Adjoint::transposed(product.negation())])
    }

    fn inputs(&self) -> Vec<MatrixMatrixFunc<M>> {
        vec![self.input.clone()]
    }
}

// --- Forward Operation ---

/// `inv(a)`. The inverse of an inverse node returns the original node.
///
/// # Errors
/// `NonSquare` for a rectangular input; adaptors report singular input as
/// `SingularMatrix` or `NotPositiveDefinite`.
pub fn inv_op<M: MatrixAdaptor>(a: &MatrixMatrixFunc<M>) -> Result<MatrixMatrixFunc<M>, AmdError> {
    if a.op() == OpType::Inv {
        if let Some(inner) = a.left() {
            return Ok(inner);
        }
    }
    let value = a.value().inv()?;
    let grad_fn = InvBackward {
        input: a.clone(),
        inverse: value.clone(),
    };
    Ok(MatrixMatrixFunc::from_op(value, OpType::Inv, Arc::new(grad_fn)))
}

#[cfg(test)]
#[path = "inverse_test.rs"]
mod tests;
