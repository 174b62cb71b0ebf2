use crate::error::AmdError;
use std::fmt;
use std::sync::Arc;

/// Shared handle to an immutable expression node.
pub type Expression = Arc<ExpressionTree>;

const BINARY_OPS: [&str; 4] = ["+", "o", "*", "/"];
const UNARY_OPS: [&str; 4] = ["'", "_", "tr", "lgdt"];

/// Whether an expression denotes a matrix, a scalar, or nothing meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprKind {
    Matrix,
    Scalar,
    Invalid,
}

impl ExprKind {
    /// Historical one-letter tag: `M`, `S` or `I`.
    pub fn tag(self) -> char {
        match self {
            ExprKind::Matrix => 'M',
            ExprKind::Scalar => 'S',
            ExprKind::Invalid => 'I',
        }
    }
}

/// A node of a parsed matrix expression.
///
/// `info` holds the operator (`+`, `-`, `*`, `/`, `o`, `'`, `_`, `tr`,
/// `lgdt`) for internal nodes, and a matrix letter or the verbatim text of a
/// number for leaves. A `-` node with only a left child is a negation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpressionTree {
    info: String,
    left: Option<Expression>,
    right: Option<Expression>,
}

impl ExpressionTree {
    /// Builds a node, checking that `info` is used with the right number of
    /// children.
    ///
    /// # Errors
    /// `InvalidExpression` when an operator is missing an operand, a unary
    /// operator is given two, or a leaf is given any.
    pub fn new<S: Into<String>>(
        info: S,
        left: Option<Expression>,
        right: Option<Expression>,
    ) -> Result<Expression, AmdError> {
        let info = info.into();
        let op = info.as_str();
        if op == "-" {
            if left.is_none() {
                return Err(invalid("Incorrect use of negation operator"));
            }
        } else if BINARY_OPS.contains(&op) {
            if left.is_none() || right.is_none() {
                return Err(invalid("Incorrect use of binary operator"));
            }
        } else if UNARY_OPS.contains(&op) {
            if left.is_none() || right.is_some() {
                return Err(invalid("Incorrect use of unary operator"));
            }
        } else if left.is_some() || right.is_some() {
            return Err(invalid("No operator and not matrix or float"));
        }
        Ok(Arc::new(ExpressionTree { info, left, right }))
    }

    pub fn leaf<S: Into<String>>(info: S) -> Result<Expression, AmdError> {
        Self::new(info, None, None)
    }

    pub fn unary<S: Into<String>>(op: S, operand: Expression) -> Result<Expression, AmdError> {
        Self::new(op, Some(operand), None)
    }

    pub fn binary<S: Into<String>>(
        op: S,
        left: Expression,
        right: Expression,
    ) -> Result<Expression, AmdError> {
        Self::new(op, Some(left), Some(right))
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn left(&self) -> Option<&Expression> {
        self.left.as_ref()
    }

    pub fn right(&self) -> Option<&Expression> {
        self.right.as_ref()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// True for a leaf naming a matrix (`A`..`Z`).
    pub fn is_matrix_leaf(&self) -> bool {
        self.is_leaf() && is_matrix_name(&self.info)
    }

    /// True for a leaf holding a number.
    pub fn is_number_leaf(&self) -> bool {
        self.is_leaf() && !is_matrix_name(&self.info)
    }

    /// A `-` node with a single operand.
    pub fn is_negation(&self) -> bool {
        self.info == "-" && self.right.is_none()
    }

    /// Copies every node, sharing nothing with `self`.
    pub fn deep_copy(&self) -> Expression {
        Arc::new(ExpressionTree {
            info: self.info.clone(),
            left: self.left.as_ref().map(|l| l.deep_copy()),
            right: self.right.as_ref().map(|r| r.deep_copy()),
        })
    }

    /// True if the matrix letter `name` occurs anywhere below this node.
    pub fn contains_leaf(&self, name: &str) -> bool {
        if self.is_leaf() {
            return self.info == name;
        }
        self.left.as_ref().map_or(false, |l| l.contains_leaf(name))
            || self.right.as_ref().map_or(false, |r| r.contains_leaf(name))
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        1 + self.left.as_ref().map_or(0, |l| l.size()) + self.right.as_ref().map_or(0, |r| r.size())
    }

    /// Indented listing, one node per line, children two dashes deeper than
    /// their parent.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.pretty_into(&mut out, "");
        out
    }

    fn pretty_into(&self, out: &mut String, indentation: &str) {
        out.push_str(indentation);
        out.push_str(&self.info);
        out.push('\n');
        let deeper = format!("{}--", indentation);
        for child in self.left.iter().chain(self.right.iter()) {
            child.pretty_into(out, &deeper);
        }
    }

    /// Infers whether the expression is matrix or scalar valued.
    ///
    /// Traces and log-determinants of matrices are scalars. Scalars may
    /// multiply matrices on either side and divide them, but cannot be added
    /// to them.
    pub fn kind(&self) -> ExprKind {
        use ExprKind::{Invalid, Matrix, Scalar};

        if self.is_leaf() {
            return if is_matrix_name(&self.info) { Matrix } else { Scalar };
        }
        let left = self.left.as_ref().map_or(Invalid, |l| l.kind());
        let right = self.right.as_ref().map(|r| r.kind());
        match (self.info.as_str(), left, right) {
            (_, Invalid, _) | (_, _, Some(Invalid)) => Invalid,
            ("tr" | "lgdt", Matrix, None) => Scalar,
            ("'" | "_", Matrix, None) => Matrix,
            ("-", kind, None) => kind,
            ("+" | "-", l, Some(r)) if l == r => l,
            ("o", Matrix, Some(Matrix)) => Matrix,
            ("*", Scalar, Some(Scalar)) => Scalar,
            ("*", _, Some(_)) => Matrix,
            ("/", l, Some(Scalar)) => l,
            _ => Invalid,
        }
    }
}

impl fmt::Display for ExpressionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            return write!(f, "\"{}\"", self.info);
        }
        write!(f, "({}", self.info)?;
        for child in self.left.iter().chain(self.right.iter()) {
            write!(f, " {}", child)?;
        }
        write!(f, ")")
    }
}

pub(crate) fn is_matrix_name(info: &str) -> bool {
    let mut chars = info.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_uppercase())
}

fn invalid(message: &str) -> AmdError {
    AmdError::InvalidExpression(message.to_string())
}
