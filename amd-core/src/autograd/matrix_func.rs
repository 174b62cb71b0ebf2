use crate::autograd::backward_op::BackwardOp;
use crate::autograd::scalar_func::ScalarMatrixFunc;
use crate::error::AmdError;
use crate::matrix::{MatrixAdaptor, MatrixKind};
use crate::ops;
use std::fmt;
use std::sync::Arc;

/// The operation that produced a [`MatrixMatrixFunc`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpType {
    /// A leaf: constant or variable matrix.
    None,
    Plus,
    Minus,
    Times,
    Transpose,
    Inv,
    Negation,
    ElementwiseProduct,
    ScalarTimesMatrix,
    Diag,
}

impl OpType {
    /// Short operator label used when printing computational trees.
    pub fn label(&self) -> &'static str {
        match self {
            OpType::None => "leaf",
            OpType::Plus => "+",
            OpType::Minus => "-",
            OpType::Times => "*",
            OpType::Transpose => "transpose",
            OpType::Inv => "inv",
            OpType::Negation => "neg",
            OpType::ElementwiseProduct => ".*",
            OpType::ScalarTimesMatrix => "s*",
            OpType::Diag => "diag",
        }
    }
}

impl fmt::Display for OpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

struct FuncNode<M: MatrixAdaptor> {
    value: M,
    op: OpType,
    kind: MatrixKind,
    is_const: bool,
    var_rows: usize,
    var_cols: usize,
    grad_fn: Option<Arc<dyn BackwardOp<M>>>,
    scalar_factor: Option<ScalarMatrixFunc<M>>,
}

/// A matrix-valued function of one matrix variable, built as an expression
/// graph.
///
/// Cloning is cheap: the node is shared and never mutated after
/// construction. Leaves are constants or the variable; internal nodes are
/// produced by the operations in [`crate::ops`] or the methods below.
///
/// ```
/// use amd_core::autograd::MatrixMatrixFunc;
/// use amd_core::matrix::SymbolicMatrix;
///
/// let x = MatrixMatrixFunc::variable(SymbolicMatrix::new("X", 3, 3));
/// let a = MatrixMatrixFunc::constant(SymbolicMatrix::new("A", 3, 3));
/// let f = x.matmul(&a)?.trace()?;
/// assert_eq!(f.derivative().symbol(), "A'");
/// # Ok::<(), amd_core::error::AmdError>(())
/// ```
#[derive(Clone)]
pub struct MatrixMatrixFunc<M: MatrixAdaptor> {
    node: Arc<FuncNode<M>>,
}

impl<M: MatrixAdaptor> MatrixMatrixFunc<M> {
    fn leaf(value: M, kind: MatrixKind, is_const: bool) -> Self {
        let (var_rows, var_cols) = if is_const { (0, 0) } else { value.shape() };
        MatrixMatrixFunc {
            node: Arc::new(FuncNode {
                value,
                op: OpType::None,
                kind,
                is_const,
                var_rows,
                var_cols,
                grad_fn: None,
                scalar_factor: None,
            }),
        }
    }

    /// A constant leaf.
    pub fn constant(value: M) -> Self {
        Self::leaf(value, MatrixKind::General, true)
    }

    /// The variable the graph is differentiated with respect to.
    pub fn variable(value: M) -> Self {
        Self::leaf(value, MatrixKind::General, false)
    }

    /// Constant `n x n` identity, tagged so the simplifier can recognise it.
    pub fn identity(n: usize) -> Self {
        Self::leaf(M::eye(n), MatrixKind::Identity, true)
    }

    /// Constant zero matrix, tagged so the simplifier can recognise it.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::leaf(M::zeros(rows, cols), MatrixKind::Zero, true)
    }

    /// Builds an internal node. Constness and the variable shape come from
    /// the inputs reported by `grad_fn`.
    pub(crate) fn from_op(value: M, op: OpType, grad_fn: Arc<dyn BackwardOp<M>>) -> Self {
        Self::from_op_with_scalar(value, op, grad_fn, None)
    }

    pub(crate) fn from_op_with_scalar(
        value: M,
        op: OpType,
        grad_fn: Arc<dyn BackwardOp<M>>,
        scalar_factor: Option<ScalarMatrixFunc<M>>,
    ) -> Self {
        let inputs = grad_fn.inputs();
        let matrix_const = inputs.iter().all(|input| input.is_const());
        let scalar_const = scalar_factor.as_ref().map_or(true, |s| s.is_const());
        let (var_rows, var_cols) = inputs
            .iter()
            .find(|input| !input.is_const())
            .map(|input| input.var_shape())
            .or_else(|| {
                scalar_factor
                    .as_ref()
                    .filter(|s| !s.is_const())
                    .map(|s| s.derivative().shape())
            })
            .unwrap_or((0, 0));
        MatrixMatrixFunc {
            node: Arc::new(FuncNode {
                value,
                op,
                kind: MatrixKind::General,
                is_const: matrix_const && scalar_const,
                var_rows,
                var_cols,
                grad_fn: Some(grad_fn),
                scalar_factor,
            }),
        }
    }

    pub fn value(&self) -> &M {
        &self.node.value
    }

    pub fn op(&self) -> OpType {
        self.node.op
    }

    pub fn kind(&self) -> MatrixKind {
        self.node.kind
    }

    pub fn is_const(&self) -> bool {
        self.node.is_const
    }

    pub fn is_leaf(&self) -> bool {
        self.node.grad_fn.is_none()
    }

    pub fn is_identity(&self) -> bool {
        self.node.kind == MatrixKind::Identity
    }

    pub fn is_zero(&self) -> bool {
        self.node.kind == MatrixKind::Zero
    }

    /// Shape of the value.
    pub fn shape(&self) -> (usize, usize) {
        self.node.value.shape()
    }

    /// Shape of the variable, and so of every derivative; `(0, 0)` when constant.
    pub fn var_shape(&self) -> (usize, usize) {
        (self.node.var_rows, self.node.var_cols)
    }

    pub fn grad_fn(&self) -> Option<Arc<dyn BackwardOp<M>>> {
        self.node.grad_fn.clone()
    }

    /// The scalar factor of a `ScalarTimesMatrix` node.
    pub fn scalar_factor(&self) -> Option<&ScalarMatrixFunc<M>> {
        self.node.scalar_factor.as_ref()
    }

    /// Matrix inputs of this node, empty for leaves.
    pub fn children(&self) -> Vec<MatrixMatrixFunc<M>> {
        self.node
            .grad_fn
            .as_ref()
            .map(|grad_fn| grad_fn.inputs())
            .unwrap_or_default()
    }

    pub fn left(&self) -> Option<MatrixMatrixFunc<M>> {
        self.children().into_iter().next()
    }

    pub fn right(&self) -> Option<MatrixMatrixFunc<M>> {
        self.children().into_iter().nth(1)
    }

    /// True when both handles point at the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    /// Address of the shared node, stable while any handle to it is alive.
    pub(crate) fn node_id(&self) -> usize {
        Arc::as_ptr(&self.node) as *const () as usize
    }

    /// Number of nodes reachable from this one, counting shared nodes once
    /// per use.
    pub fn num_nodes(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(|child| child.num_nodes())
            .sum::<usize>()
    }

    pub fn add(&self, other: &Self) -> Result<Self, AmdError> {
        ops::arithmetic::add_op(self, other)
    }

    pub fn sub(&self, other: &Self) -> Result<Self, AmdError> {
        ops::arithmetic::sub_op(self, other)
    }

    pub fn neg(&self) -> Self {
        ops::arithmetic::neg_op(self)
    }

    pub fn matmul(&self, other: &Self) -> Result<Self, AmdError> {
        ops::linalg::matmul_op(self, other)
    }

    pub fn t(&self) -> Self {
        ops::linalg::transpose_op(self)
    }

    pub fn inv(&self) -> Result<Self, AmdError> {
        ops::linalg::inv_op(self)
    }

    pub fn elementwise_product(&self, other: &Self) -> Result<Self, AmdError> {
        ops::arithmetic::elementwise_product_op(self, other)
    }

    pub fn diag(&self) -> Result<Self, AmdError> {
        ops::linalg::diag_op(self)
    }

    /// `s * self`.
    pub fn scale(&self, s: &ScalarMatrixFunc<M>) -> Result<Self, AmdError> {
        ops::arithmetic::scale_op(s, self)
    }

    pub fn trace(&self) -> Result<ScalarMatrixFunc<M>, AmdError> {
        ops::reduction::trace_op(self)
    }

    pub fn logdet(&self) -> Result<ScalarMatrixFunc<M>, AmdError> {
        ops::reduction::logdet_op(self)
    }

    pub fn fnorm(&self) -> Result<ScalarMatrixFunc<M>, AmdError> {
        ops::reduction::fnorm_op(self)
    }
}

impl<M: MatrixAdaptor> fmt::Debug for MatrixMatrixFunc<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixMatrixFunc")
            .field("op", &self.node.op)
            .field("kind", &self.node.kind)
            .field("is_const", &self.node.is_const)
            .field("shape", &self.shape())
            .field("var_shape", &self.var_shape())
            .field("children", &self.children().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::SymbolicMatrix;

    fn sym(s: &str) -> SymbolicMatrix {
        SymbolicMatrix::new(s, 3, 3)
    }

    #[test]
    fn test_leaf_constructors() {
        let x = MatrixMatrixFunc::variable(SymbolicMatrix::new("X", 2, 3));
        assert!(!x.is_const());
        assert!(x.is_leaf());
        assert_eq!(x.var_shape(), (2, 3));
        assert_eq!(x.op(), OpType::None);

        let a = MatrixMatrixFunc::constant(sym("A"));
        assert!(a.is_const());
        assert_eq!(a.var_shape(), (0, 0));

        let i: MatrixMatrixFunc<SymbolicMatrix> = MatrixMatrixFunc::identity(3);
        assert!(i.is_identity());
        assert!(i.is_const());
        assert_eq!(i.value().symbol(), "eye(3)");

        let z: MatrixMatrixFunc<SymbolicMatrix> = MatrixMatrixFunc::zeros(2, 4);
        assert!(z.is_zero());
        assert_eq!(z.shape(), (2, 4));
    }

    #[test]
    fn test_constness_and_var_shape_propagate() -> Result<(), AmdError> {
        let x = MatrixMatrixFunc::variable(sym("X"));
        let a = MatrixMatrixFunc::constant(sym("A"));
        let b = MatrixMatrixFunc::constant(sym("B"));

        let ab = a.matmul(&b)?;
        assert!(ab.is_const());
        assert_eq!(ab.var_shape(), (0, 0));

        let ax = a.add(&x)?;
        assert!(!ax.is_const());
        assert_eq!(ax.var_shape(), (3, 3));
        assert_eq!(ax.op(), OpType::Plus);
        assert!(ax.left().is_some_and(|l| l.ptr_eq(&a)));
        assert!(ax.right().is_some_and(|r| r.ptr_eq(&x)));
        Ok(())
    }

    #[test]
    fn test_children_and_num_nodes() -> Result<(), AmdError> {
        let x = MatrixMatrixFunc::variable(sym("X"));
        let a = MatrixMatrixFunc::constant(sym("A"));
        let f = a.matmul(&x)?.t().neg();
        assert_eq!(f.op(), OpType::Negation);
        assert_eq!(f.children().len(), 1);
        assert_eq!(f.num_nodes(), 5);
        assert!(x.children().is_empty());
        Ok(())
    }

    #[test]
    fn test_op_labels() {
        assert_eq!(OpType::Times.to_string(), "*");
        assert_eq!(OpType::ElementwiseProduct.label(), ".*");
        assert_eq!(OpType::None.label(), "leaf");
    }
}
