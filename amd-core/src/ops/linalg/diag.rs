use crate::autograd::{Adjoint, BackwardOp, MatrixMatrixFunc, OpType};
use crate::error::AmdError;
use crate::matrix::MatrixAdaptor;
use std::sync::Arc;

// --- Backward Operation ---

/// Backward pass of `diag(a)`: the input receives the diagonal of the
/// adjoint. The diagonal is unaffected by a pending transpose.
#[derive(Debug)]
struct DiagBackward<M: MatrixAdaptor> {
    input: MatrixMatrixFunc<M>,
}

impl<M: MatrixAdaptor> BackwardOp<M> for DiagBackward<M> {
    fn backward(&self, adjoint: &Adjoint<M>) -> Result<Vec<Adjoint<M>>, AmdError> {
        Ok(vec![Adjoint {
            value: adjoint.value.diag()?,
            transposed: false,
            identity: adjoint.identity,
        }])
    }

    fn inputs(&self) -> Vec<MatrixMatrixFunc<M>> {
        vec![self.input.clone()]
    }
}

// --- Forward Operation ---

/// The square matrix holding only the diagonal of `a`.
///
/// # Errors
/// `NonSquare` for a rectangular input.
pub fn diag_op<M: MatrixAdaptor>(a: &MatrixMatrixFunc<M>) -> Result<MatrixMatrixFunc<M>, AmdError> {
    let value = a.value().diag()?;
    let grad_fn = DiagBackward { input: a.clone() };
    Ok(MatrixMatrixFunc::from_op(value, OpType::Diag, Arc::new(grad_fn)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{DenseMatrix, SymbolicMatrix};

    #[test]
    fn test_diag_value() -> Result<(), AmdError> {
        let a = MatrixMatrixFunc::constant(DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]])?);
        let d = diag_op(&a)?;
        assert_eq!(d.op(), OpType::Diag);
        assert_eq!(*d.value(), DenseMatrix::from_rows(&[[1.0, 0.0], [0.0, 4.0]])?);
        let rect = MatrixMatrixFunc::constant(SymbolicMatrix::new("A", 2, 3));
        assert!(matches!(diag_op(&rect), Err(AmdError::NonSquare { .. })));
        Ok(())
    }

    #[test]
    fn test_diag_backward() -> Result<(), AmdError> {
        // d trace(diag(X) A) = diag(A')
        let a = MatrixMatrixFunc::constant(DenseMatrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]])?);
        let x = MatrixMatrixFunc::variable(DenseMatrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]])?);
        let f = diag_op(&x)?.matmul(&a)?.trace()?;
        assert_eq!(*f.value(), 37.0);
        assert_eq!(*f.derivative(), DenseMatrix::from_rows(&[[1.0, 0.0], [0.0, 4.0]])?);

        let xs = MatrixMatrixFunc::variable(SymbolicMatrix::new("X", 3, 3));
        let g = diag_op(&xs)?.trace()?;
        assert_eq!(g.derivative().symbol(), "diag(eye(3))");
        Ok(())
    }
}
