use crate::autograd::{Adjoint, BackwardOp, MatrixMatrixFunc, OpType};
use crate::error::AmdError;
use crate::matrix::MatrixAdaptor;
use std::sync::Arc;

// --- Backward Operation ---

/// Backward pass of `a * b`.
///
/// With adjoint `G` the inputs receive `G b'` and `a' G`. The pending
/// transpose flag selects how this is evaluated:
///
/// - `G = I`: the inputs receive `b'` and `a'`, with no product at all. A
///   factor that is itself a transpose node is unwrapped instead of being
///   transposed twice.
/// - `G = C'`: `C' b' = (b C)'` and `a' C' = (C a)'`, so both adjoints are
///   stored with the transpose still pending.
/// - otherwise the products are formed directly.
#[derive(Debug)]
struct MatmulBackward<M: MatrixAdaptor> {
    a: MatrixMatrixFunc<M>,
    b: MatrixMatrixFunc<M>,
}

/// `f'` as an adjoint, reading through a transpose node.
fn transposed_factor<M: MatrixAdaptor>(f: &MatrixMatrixFunc<M>) -> Adjoint<M> {
    match (f.op(), f.left()) {
        (OpType::Transpose, Some(inner)) => Adjoint::new(inner.value().clone()),
        _ => Adjoint::transposed(f.value().clone()),
    }
}

impl<M: MatrixAdaptor> BackwardOp<M> for MatmulBackward<M> {
    fn backward(&self, adjoint: &Adjoint<M>) -> Result<Vec<Adjoint<M>>, AmdError> {
        let a = self.a.value();
        let b = self.b.value();
        let current = &adjoint.value;
        if adjoint.identity {
            return Ok(vec![transposed_factor(&self.b), transposed_factor(&self.a)]);
        }
        if adjoint.transposed {
            let grad_a = b.multiply(current)?;
            let grad_b = current.multiply(a)?;
            return Ok(vec![Adjoint::transposed(grad_a), Adjoint::transposed(grad_b)]);
        }
        let grad_a = current.multiply(&b.transpose())?;
        let grad_b = a.transpose().multiply(current)?;
        Ok(vec![Adjoint::new(grad_a), Adjoint::new(grad_b)])
    }

    fn inputs(&self) -> Vec<MatrixMatrixFunc<M>> {
        vec![self.a.clone(), self.b.clone()]
    }
}

// --- Forward Operation ---

/// Matrix product `a * b`.
///
/// # Errors
/// `MismatchedDimensions` if `a` has a different number of columns than `b`
/// has rows.
pub fn matmul_op<M: MatrixAdaptor>(
    a: &MatrixMatrixFunc<M>,
    b: &MatrixMatrixFunc<M>,
) -> Result<MatrixMatrixFunc<M>, AmdError> {
    let value = a.value().multiply(b.value())?;
    let grad_fn = MatmulBackward {
        a: a.clone(),
        b: b.clone(),
    };
    Ok(MatrixMatrixFunc::from_op(value, OpType::Times, Arc::new(grad_fn)))
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
