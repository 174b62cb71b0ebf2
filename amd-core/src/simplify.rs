//! Algebraic simplification of function graphs.
//!
//! [`simplify`] rebuilds a graph bottom-up (or in the requested order),
//! replacing sub-expressions that involve identity and zero matrices, double
//! transposes and inverses, and products of a matrix with its own inverse.
//! Values are recomputed through the ordinary operations, so the result is a
//! regular graph that can be differentiated as usual.

use crate::autograd::{MatrixMatrixFunc, OpType, ScalarMatrixFunc};
use crate::error::AmdError;
use crate::matrix::{MatrixAdaptor, ScalarAdaptor};
use log::{debug, trace};
use num_traits::Zero;
use std::collections::HashMap;

/// Order in which a node is rewritten relative to its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Traversal {
    /// The node before its children.
    PreOrder,
    /// The node after its left child and before its right child.
    InOrder,
    /// The node after both children.
    #[default]
    PostOrder,
}

/// Returns a simplified copy of `f`.
///
/// Sub-graphs shared in `f` stay shared in the result, which is what lets
/// `A*inv(A)` be recognised when `A` is itself an expression.
///
/// # Errors
/// Propagates errors from recomputing node values, e.g. a singular inverse.
pub fn simplify<M: MatrixAdaptor>(
    f: &MatrixMatrixFunc<M>,
    traversal: Traversal,
) -> Result<MatrixMatrixFunc<M>, AmdError> {
    debug!("Simplifying {} nodes ({:?})", f.num_nodes(), traversal);
    let mut simplifier = Simplifier {
        traversal,
        memo: HashMap::new(),
    };
    let result = simplifier.visit(f)?;
    debug!("Simplified to {} nodes", result.num_nodes());
    Ok(result)
}

/// `trace(f)` with `trace(I_n) = n` and `trace(0) = 0` taken as constants.
pub fn simplified_trace<M: MatrixAdaptor>(
    f: &MatrixMatrixFunc<M>,
) -> Result<ScalarMatrixFunc<M>, AmdError> {
    let g = simplify(f, Traversal::PostOrder)?;
    let (rows, cols) = f.var_shape();
    if g.is_identity() {
        return Ok(ScalarMatrixFunc::constant(
            M::Scalar::from_usize(g.shape().0),
            rows,
            cols,
        ));
    }
    if g.is_zero() {
        return Ok(ScalarMatrixFunc::constant(M::Scalar::zero(), rows, cols));
    }
    g.trace()
}

/// `logdet(f)` with `logdet(I) = 0` taken as a constant.
pub fn simplified_logdet<M: MatrixAdaptor>(
    f: &MatrixMatrixFunc<M>,
) -> Result<ScalarMatrixFunc<M>, AmdError> {
    let g = simplify(f, Traversal::PostOrder)?;
    if g.is_identity() {
        let (rows, cols) = f.var_shape();
        return Ok(ScalarMatrixFunc::constant(M::Scalar::zero(), rows, cols));
    }
    g.logdet()
}

struct Simplifier<M: MatrixAdaptor> {
    traversal: Traversal,
    // Keyed by node address; the key node is kept alive so addresses of
    // temporary replacements are never reused.
    memo: HashMap<usize, (MatrixMatrixFunc<M>, MatrixMatrixFunc<M>)>,
}

impl<M: MatrixAdaptor> Simplifier<M> {
    fn visit(&mut self, node: &MatrixMatrixFunc<M>) -> Result<MatrixMatrixFunc<M>, AmdError> {
        if node.is_leaf() {
            return Ok(node.clone());
        }
        if let Some((_, done)) = self.memo.get(&node.node_id()) {
            return Ok(done.clone());
        }
        let result = match self.traversal {
            Traversal::PostOrder => {
                let children = self.visit_all(&node.children())?;
                self.rewrite(node, children)?
            }
            Traversal::PreOrder => {
                let children = node.children();
                match apply_rule(node.op(), &children, node.scalar_factor()) {
                    Some(replacement) => self.visit(&replacement)?,
                    None => {
                        let children = self.visit_all(&children)?;
                        rebuild(node, &children)?
                    }
                }
            }
            Traversal::InOrder => {
                let mut children = node.children();
                if let Some(first) = children.first_mut() {
                    *first = self.visit(first)?;
                }
                match apply_rule(node.op(), &children, node.scalar_factor()) {
                    Some(replacement) => self.visit(&replacement)?,
                    None => {
                        for child in children.iter_mut().skip(1) {
                            *child = self.visit(child)?;
                        }
                        rebuild(node, &children)?
                    }
                }
            }
        };
        self.memo
            .insert(node.node_id(), (node.clone(), result.clone()));
        Ok(result)
    }

    fn visit_all(
        &mut self,
        nodes: &[MatrixMatrixFunc<M>],
    ) -> Result<Vec<MatrixMatrixFunc<M>>, AmdError> {
        nodes.iter().map(|n| self.visit(n)).collect()
    }

    fn rewrite(
        &mut self,
        node: &MatrixMatrixFunc<M>,
        children: Vec<MatrixMatrixFunc<M>>,
    ) -> Result<MatrixMatrixFunc<M>, AmdError> {
        match apply_rule(node.op(), &children, node.scalar_factor()) {
            Some(replacement) => Ok(replacement),
            None => rebuild(node, &children),
        }
    }
}

/// Rebuilds `node` over new children, reusing it when nothing changed.
fn rebuild<M: MatrixAdaptor>(
    node: &MatrixMatrixFunc<M>,
    children: &[MatrixMatrixFunc<M>],
) -> Result<MatrixMatrixFunc<M>, AmdError> {
    let old = node.children();
    if old.len() == children.len() && old.iter().zip(children).all(|(a, b)| a.ptr_eq(b)) {
        return Ok(node.clone());
    }
    let arity_error = || {
        AmdError::InternalError(format!(
            "{:?} node rebuilt with {} children",
            node.op(),
            children.len()
        ))
    };
    match (node.op(), children) {
        (OpType::Plus, [a, b]) => a.add(b),
        (OpType::Minus, [a, b]) => a.sub(b),
        (OpType::Times, [a, b]) => a.matmul(b),
        (OpType::ElementwiseProduct, [a, b]) => a.elementwise_product(b),
        (OpType::Transpose, [a]) => Ok(a.t()),
        (OpType::Inv, [a]) => a.inv(),
        (OpType::Negation, [a]) => Ok(a.neg()),
        (OpType::Diag, [a]) => a.diag(),
        (OpType::ScalarTimesMatrix, [a]) => match node.scalar_factor() {
            Some(s) => a.scale(s),
            None => Err(AmdError::InternalNode),
        },
        _ => Err(arity_error()),
    }
}

/// The replacement for a node with operation `op` over `children`, if any
/// rule applies.
fn apply_rule<M: MatrixAdaptor>(
    op: OpType,
    children: &[MatrixMatrixFunc<M>],
    scalar: Option<&ScalarMatrixFunc<M>>,
) -> Option<MatrixMatrixFunc<M>> {
    let replacement = match (op, children) {
        (OpType::Plus, [a, b]) => {
            if a.is_zero() {
                Some(b.clone())
            } else if b.is_zero() {
                Some(a.clone())
            } else {
                None
            }
        }
        (OpType::Minus, [a, b]) => {
            if b.is_zero() {
                Some(a.clone())
            } else if a.is_zero() {
                Some(b.neg())
            } else {
                None
            }
        }
        (OpType::Times, [a, b]) => simplify_product(a, b),
        (OpType::Transpose, [a]) if a.is_zero() && a.shape().0 != a.shape().1 => {
            let (rows, cols) = a.shape();
            Some(MatrixMatrixFunc::zeros(cols, rows))
        }
        (OpType::Transpose, [a]) | (OpType::Inv, [a]) if a.is_identity() || a.is_zero() => {
            Some(a.clone())
        }
        (OpType::Transpose, [a]) if a.op() == OpType::Transpose => a.left(),
        (OpType::Inv, [a]) if a.op() == OpType::Inv => a.left(),
        (OpType::ScalarTimesMatrix, [a]) => {
            let zero_scalar = scalar.map_or(false, |s| s.is_const() && s.value().is_zero());
            if a.is_zero() {
                Some(a.clone())
            } else if zero_scalar {
                let (rows, cols) = a.shape();
                Some(MatrixMatrixFunc::zeros(rows, cols))
            } else {
                None
            }
        }
        _ => None,
    };
    if let Some(r) = &replacement {
        trace!("Simplified {:?} node to {:?} ({:?})", op, r.op(), r.kind());
    }
    replacement
}

fn simplify_product<M: MatrixAdaptor>(
    a: &MatrixMatrixFunc<M>,
    b: &MatrixMatrixFunc<M>,
) -> Option<MatrixMatrixFunc<M>> {
    if a.is_zero() || b.is_zero() {
        return Some(MatrixMatrixFunc::zeros(a.shape().0, b.shape().1));
    }
    if a.is_identity() {
        return Some(b.clone());
    }
    if b.is_identity() {
        return Some(a.clone());
    }
    let inverse_of = |inv: &MatrixMatrixFunc<M>, other: &MatrixMatrixFunc<M>| {
        inv.op() == OpType::Inv && inv.left().map_or(false, |inner| inner.ptr_eq(other))
    };
    if inverse_of(b, a) || inverse_of(a, b) {
        return Some(MatrixMatrixFunc::identity(a.shape().0));
    }
    None
}

#[cfg(test)]
#[path = "simplify_test.rs"]
mod tests;
