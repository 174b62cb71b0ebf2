use crate::autograd::matrix_func::MatrixMatrixFunc;
use crate::error::AmdError;
use crate::matrix::MatrixAdaptor;
use std::fmt::Debug;

/// The derivative of the final scalar with respect to one node, as it travels
/// down a single path of the graph.
///
/// The pending transpose is kept as a flag rather than applied eagerly: the
/// product rules can absorb it into the order of their factors, which keeps
/// symbolic results short (`A'` rather than `(eye(n)*A')'`). `identity` marks
/// the seed of `trace`, which lets products skip a multiplication by `I`.
#[derive(Debug, Clone, PartialEq)]
pub struct Adjoint<M> {
    pub value: M,
    pub transposed: bool,
    pub identity: bool,
}

impl<M: MatrixAdaptor> Adjoint<M> {
    pub fn new(value: M) -> Self {
        Adjoint {
            value,
            transposed: false,
            identity: false,
        }
    }

    /// An adjoint whose true value is `value'`.
    pub fn transposed(value: M) -> Self {
        Adjoint {
            value,
            transposed: true,
            identity: false,
        }
    }

    /// The identity seed used by `trace`.
    pub fn identity(n: usize) -> Self {
        Adjoint {
            value: M::eye(n),
            transposed: false,
            identity: true,
        }
    }

    /// Same flags, new stored value.
    pub fn with_value(&self, value: M) -> Self {
        Adjoint {
            value,
            transposed: self.transposed,
            identity: self.identity,
        }
    }

    /// The adjoint with the pending transpose applied.
    pub fn materialize(&self) -> M {
        if self.transposed {
            self.value.transpose()
        } else {
            self.value.clone()
        }
    }
}

/// Defines the backward pass of a differentiable matrix operation.
///
/// Every non-leaf [`MatrixMatrixFunc`] stores one implementation in its
/// `grad_fn`. The backward pass walks the graph from the root and asks each
/// node to turn the adjoint of its output into adjoints of its inputs.
///
/// The `Debug + Send + Sync` bounds let nodes be shared behind an `Arc`.
pub trait BackwardOp<M: MatrixAdaptor>: Debug + Send + Sync {
    /// Computes one adjoint per input, in the order returned by [`inputs`].
    ///
    /// [`inputs`]: BackwardOp::inputs
    fn backward(&self, adjoint: &Adjoint<M>) -> Result<Vec<Adjoint<M>>, AmdError>;

    /// The matrix-valued inputs of the forward operation.
    fn inputs(&self) -> Vec<MatrixMatrixFunc<M>>;

    /// Derivative contributed directly to the result rather than through an
    /// input node.
    ///
    /// Only operations with a scalar-valued factor, such as `s * M`, return
    /// `Some`.
    fn scalar_contribution(&self, _adjoint: &Adjoint<M>) -> Result<Option<M>, AmdError> {
        Ok(None)
    }
}
