use crate::autograd::{Adjoint, BackwardOp, MatrixMatrixFunc, OpType};
use crate::error::AmdError;
use crate::matrix::MatrixAdaptor;
use std::sync::Arc;

// --- Backward Operation ---

/// Backward pass of `a .* b`: each input receives the other input's value
/// multiplied entry-wise with the adjoint.
#[derive(Debug)]
struct ElementwiseProductBackward<M: MatrixAdaptor> {
    a: MatrixMatrixFunc<M>,
    b: MatrixMatrixFunc<M>,
}

impl<M: MatrixAdaptor> BackwardOp<M> for ElementwiseProductBackward<M> {
    fn backward(&self, adjoint: &Adjoint<M>) -> Result<Vec<Adjoint<M>>, AmdError> {
        let g = adjoint.materialize();
        let grad_a = self.b.value().elementwise_product(&g)?;
        let grad_b = self.a.value().elementwise_product(&g)?;
        Ok(vec![Adjoint::new(grad_a), Adjoint::new(grad_b)])
    }

    fn inputs(&self) -> Vec<MatrixMatrixFunc<M>> {
        vec![self.a.clone(), self.b.clone()]
    }
}

// --- Forward Operation ---

/// Element-wise (Hadamard) product `a .* b`.
///
/// # Errors
/// `MismatchedDimensions` if the shapes differ.
pub fn elementwise_product_op<M: MatrixAdaptor>(
    a: &MatrixMatrixFunc<M>,
    b: &MatrixMatrixFunc<M>,
) -> Result<MatrixMatrixFunc<M>, AmdError> {
    let value = a.value().elementwise_product(b.value())?;
    let grad_fn = ElementwiseProductBackward {
        a: a.clone(),
        b: b.clone(),
    };
    Ok(MatrixMatrixFunc::from_op(
        value,
        OpType::ElementwiseProduct,
        Arc::new(grad_fn),
    ))
}

#[cfg(test)]
#[path = "mul_elem_test.rs"]
mod tests;
