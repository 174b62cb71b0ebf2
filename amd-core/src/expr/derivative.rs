//! Symbolic reverse-mode derivative over [`ExpressionTree`]s.
//!
//! The derivative of a scalar expression `f` with respect to a matrix letter
//! is itself a matrix expression. Each trace or log-determinant seeds an
//! adjoint (`I` and `(F_)'` respectively), which is pushed down the matrix
//! sub-tree until it reaches occurrences of the target. The letter `I` is
//! read as the identity.

use crate::error::AmdError;
use crate::expr::tree::{ExprKind, Expression, ExpressionTree};
use log::{debug, trace};

/// Differentiates the scalar expression `expr` with respect to the matrix
/// named `target`.
///
/// Returns `None` when `expr` does not depend on `target`.
///
/// # Errors
/// - `InvalidExpression` if `expr` is not scalar valued.
/// - `InvalidOperation` if `target` occurs in a divisor.
pub fn differentiate(expr: &Expression, target: char) -> Result<Option<Expression>, AmdError> {
    debug!("Differentiating {} with respect to {}", expr, target);
    if expr.kind() != ExprKind::Scalar {
        return Err(AmdError::InvalidExpression(format!(
            "Expression is not scalar valued: {}",
            expr
        )));
    }
    Differentiator {
        target: target.to_string(),
    }
    .scalar(expr)
}

struct Differentiator {
    target: String,
}

impl Differentiator {
    /// Derivative of a scalar-valued node.
    fn scalar(&self, e: &Expression) -> Result<Option<Expression>, AmdError> {
        if e.is_number_leaf() {
            return Ok(None);
        }
        let (left, right) = (e.left(), e.right());
        match (e.info(), left, right) {
            ("tr", Some(f), None) => self.matrix(f, leaf("I")?),
            ("lgdt", Some(f), None) => {
                let seed = transpose(ExpressionTree::unary("_", f.clone())?)?;
                self.matrix(f, seed)
            }
            ("+", Some(l), Some(r)) => sum(self.scalar(l)?, self.scalar(r)?),
            ("-", Some(l), Some(r)) => difference(self.scalar(l)?, self.scalar(r)?),
            ("-", Some(l), None) => self.scalar(l)?.map(negate).transpose(),
            ("*", Some(l), Some(r)) => {
                let dl = self.scalar(l)?.map(|dl| times(r.clone(), dl)).transpose()?;
                let dr = self.scalar(r)?.map(|dr| times(l.clone(), dr)).transpose()?;
                sum(dl, dr)
            }
            ("/", Some(l), Some(r)) => {
                self.check_divisor(r)?;
                self.scalar(l)?
                    .map(|dl| ExpressionTree::binary("/", dl, r.clone()))
                    .transpose()
            }
            (op, _, _) => Err(AmdError::InvalidExpression(format!(
                "Cannot differentiate '{}' as a scalar",
                op
            ))),
        }
    }

    /// Contribution of the matrix-valued node `e` given its adjoint `acc`.
    fn matrix(&self, e: &Expression, acc: Expression) -> Result<Option<Expression>, AmdError> {
        trace!("Propagating {} into {}", acc, e);
        if e.is_leaf() {
            return Ok(if e.info() == self.target { Some(acc) } else { None });
        }
        let (left, right) = (e.left(), e.right());
        match (e.info(), left, right) {
            ("+", Some(l), Some(r)) => sum(self.matrix(l, acc.clone())?, self.matrix(r, acc)?),
            ("-", Some(l), Some(r)) => sum(self.matrix(l, acc.clone())?, self.matrix(r, negate(acc)?)?),
            ("-", Some(l), None) => self.matrix(l, negate(acc)?),
            ("'", Some(f), None) => self.matrix(f, transpose(acc)?),
            ("_", Some(f), None) => {
                let inv_t = transpose(ExpressionTree::unary("_", f.clone())?)?;
                let inner = product(product(inv_t.clone(), acc)?, inv_t)?;
                self.matrix(f, negate(inner)?)
            }
            ("o", Some(l), Some(r)) => {
                let dl = self.matrix(l, ExpressionTree::binary("o", r.clone(), acc.clone())?)?;
                let dr = self.matrix(r, ExpressionTree::binary("o", l.clone(), acc)?)?;
                sum(dl, dr)
            }
            ("*", Some(l), Some(r)) => self.matrix_product(l, r, acc),
            ("/", Some(l), Some(r)) => {
                self.check_divisor(r)?;
                self.matrix(l, ExpressionTree::binary("/", acc, r.clone())?)
            }
            (op, _, _) => Err(AmdError::InvalidExpression(format!(
                "Cannot differentiate '{}' as a matrix",
                op
            ))),
        }
    }

    fn matrix_product(
        &self,
        l: &Expression,
        r: &Expression,
        acc: Expression,
    ) -> Result<Option<Expression>, AmdError> {
        match (l.kind(), r.kind()) {
            (ExprKind::Scalar, _) => {
                let dl = self.scaled_by_inner(l, &acc, r)?;
                let dr = self.matrix(r, times(l.clone(), acc)?)?;
                sum(dl, dr)
            }
            (_, ExprKind::Scalar) => {
                let dl = self.matrix(l, times(r.clone(), acc.clone())?)?;
                let dr = self.scaled_by_inner(r, &acc, l)?;
                sum(dl, dr)
            }
            _ => {
                let dl = self.matrix(l, product(acc.clone(), transpose(r.clone())?)?)?;
                let dr = self.matrix(r, product(transpose(l.clone())?, acc)?)?;
                sum(dl, dr)
            }
        }
    }

    /// Contribution of the scalar factor `s` in `s*m`: `tr(acc' * m) * ds`.
    fn scaled_by_inner(
        &self,
        s: &Expression,
        acc: &Expression,
        m: &Expression,
    ) -> Result<Option<Expression>, AmdError> {
        match self.scalar(s)? {
            None => Ok(None),
            Some(ds) => {
                let inner = product(transpose(acc.clone())?, m.clone())?;
                times(ExpressionTree::unary("tr", inner)?, ds).map(Some)
            }
        }
    }

    fn check_divisor(&self, divisor: &Expression) -> Result<(), AmdError> {
        if divisor.contains_leaf(&self.target) {
            return Err(AmdError::InvalidOperation(format!(
                "Cannot differentiate with respect to {} in the divisor {}",
                self.target, divisor
            )));
        }
        Ok(())
    }
}

fn leaf(name: &str) -> Result<Expression, AmdError> {
    ExpressionTree::leaf(name)
}

fn is_identity(e: &Expression) -> bool {
    e.is_leaf() && e.info() == "I"
}

/// `e'`, with `I' = I` and `(x')' = x`.
fn transpose(e: Expression) -> Result<Expression, AmdError> {
    if is_identity(&e) {
        return Ok(e);
    }
    if e.info() == "'" {
        if let Some(inner) = e.left() {
            return Ok(inner.clone());
        }
    }
    ExpressionTree::unary("'", e)
}

fn negate(e: Expression) -> Result<Expression, AmdError> {
    ExpressionTree::unary("-", e)
}

/// Matrix product, dropping identity factors.
fn product(a: Expression, b: Expression) -> Result<Expression, AmdError> {
    if is_identity(&a) {
        return Ok(b);
    }
    if is_identity(&b) {
        return Ok(a);
    }
    ExpressionTree::binary("*", a, b)
}

/// Product involving a scalar factor; identities are kept.
fn times(a: Expression, b: Expression) -> Result<Expression, AmdError> {
    ExpressionTree::binary("*", a, b)
}

fn sum(a: Option<Expression>, b: Option<Expression>) -> Result<Option<Expression>, AmdError> {
    match (a, b) {
        (Some(a), Some(b)) => ExpressionTree::binary("+", a, b).map(Some),
        (a, b) => Ok(a.or(b)),
    }
}

fn difference(a: Option<Expression>, b: Option<Expression>) -> Result<Option<Expression>, AmdError> {
    match (a, b) {
        (Some(a), Some(b)) => ExpressionTree::binary("-", a, b).map(Some),
        (None, Some(b)) => negate(b).map(Some),
        (a, None) => Ok(a),
    }
}
