//! Symbolic matrices and scalars in MATLAB notation.
//!
//! Evaluating a function graph over [`SymbolicMatrix`] yields the derivative
//! as a formula, e.g. `trace(X*A)` differentiates to `A'`. Every binary
//! result is wrapped in parentheses so precedence never depends on the
//! reader; [`remove_parenthesis`] strips the outermost pair for display.

use crate::error::AmdError;
use crate::matrix::{check_inner_dims, check_same_shape, check_square, MatrixAdaptor, ScalarAdaptor};
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Strips one pair of outer parentheses when `s` starts with `(` and ends with `)`.
///
/// The check is purely lexical, as in `"(A)*(B)"` -> `"A)*(B"`; callers only
/// pass strings produced by this module, where a leading `(` always closes at
/// the end.
pub fn remove_parenthesis(s: &str) -> &str {
    if s.len() >= 2 && s.starts_with('(') && s.ends_with(')') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

/// A scalar expression such as `trace(A*X)` or `(a+b)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolicScalar {
    symbol: String,
}

impl SymbolicScalar {
    pub fn new<S: Into<String>>(symbol: S) -> Self {
        SymbolicScalar {
            symbol: symbol.into(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The printed form, with one outer pair of parentheses removed.
    pub fn get_string(&self) -> String {
        remove_parenthesis(&self.symbol).to_string()
    }
}

impl fmt::Display for SymbolicScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", remove_parenthesis(&self.symbol))
    }
}

impl From<&str> for SymbolicScalar {
    fn from(symbol: &str) -> Self {
        SymbolicScalar::new(symbol)
    }
}

impl Add for SymbolicScalar {
    type Output = SymbolicScalar;

    fn add(self, rhs: SymbolicScalar) -> SymbolicScalar {
        SymbolicScalar::new(format!("({}+{})", self.symbol, rhs.symbol))
    }
}

impl Sub for SymbolicScalar {
    type Output = SymbolicScalar;

    fn sub(self, rhs: SymbolicScalar) -> SymbolicScalar {
        SymbolicScalar::new(format!("({}-{})", self.symbol, rhs.symbol))
    }
}

impl Mul for SymbolicScalar {
    type Output = SymbolicScalar;

    fn mul(self, rhs: SymbolicScalar) -> SymbolicScalar {
        SymbolicScalar::new(format!("({}*{})", self.symbol, rhs.symbol))
    }
}

impl Div for SymbolicScalar {
    type Output = SymbolicScalar;

    fn div(self, rhs: SymbolicScalar) -> SymbolicScalar {
        SymbolicScalar::new(format!("({}/{})", self.symbol, rhs.symbol))
    }
}

impl Neg for SymbolicScalar {
    type Output = SymbolicScalar;

    fn neg(self) -> SymbolicScalar {
        SymbolicScalar::new(format!("(-{})", self.symbol))
    }
}

impl Zero for SymbolicScalar {
    fn zero() -> Self {
        SymbolicScalar::new("0")
    }

    fn is_zero(&self) -> bool {
        self.symbol == "0"
    }
}

impl One for SymbolicScalar {
    fn one() -> Self {
        SymbolicScalar::new("1")
    }
}

impl ScalarAdaptor for SymbolicScalar {
    fn from_f64(value: f64) -> Self {
        SymbolicScalar::new(format!("{}", value))
    }

    fn from_usize(value: usize) -> Self {
        SymbolicScalar::new(value.to_string())
    }

    fn sqrt(&self) -> Self {
        SymbolicScalar::new(format!("sqrt({})", remove_parenthesis(&self.symbol)))
    }
}

/// A matrix expression with known dimensions, e.g. `(A*inv(X))` of size n x n.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolicMatrix {
    symbol: String,
    rows: usize,
    cols: usize,
}

impl SymbolicMatrix {
    pub fn new<S: Into<String>>(symbol: S, rows: usize, cols: usize) -> Self {
        SymbolicMatrix {
            symbol: symbol.into(),
            rows,
            cols,
        }
    }

    /// The raw symbol, including any outer parentheses.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The printed form, with one outer pair of parentheses removed.
    pub fn get_string(&self) -> String {
        remove_parenthesis(&self.symbol).to_string()
    }

    fn derived(&self, symbol: String, rows: usize, cols: usize) -> SymbolicMatrix {
        SymbolicMatrix { symbol, rows, cols }
    }
}

impl fmt::Display for SymbolicMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", remove_parenthesis(&self.symbol))
    }
}

impl MatrixAdaptor for SymbolicMatrix {
    type Scalar = SymbolicScalar;

    fn num_rows(&self) -> usize {
        self.rows
    }

    fn num_cols(&self) -> usize {
        self.cols
    }

    fn add(&self, other: &Self) -> Result<Self, AmdError> {
        check_same_shape(self, other, "add")?;
        Ok(self.derived(
            format!("({}+{})", self.symbol, other.symbol),
            self.rows,
            self.cols,
        ))
    }

    fn minus(&self, other: &Self) -> Result<Self, AmdError> {
        check_same_shape(self, other, "minus")?;
        Ok(self.derived(
            format!("({}-{})", self.symbol, other.symbol),
            self.rows,
            self.cols,
        ))
    }

    fn multiply(&self, other: &Self) -> Result<Self, AmdError> {
        check_inner_dims(self, other, "multiply")?;
        Ok(self.derived(
            format!("({}*{})", self.symbol, other.symbol),
            self.rows,
            other.cols,
        ))
    }

    fn transpose(&self) -> Self {
        self.derived(format!("{}'", self.symbol), self.cols, self.rows)
    }

    fn negation(&self) -> Self {
        self.derived(format!("(-{})", self.symbol), self.rows, self.cols)
    }

    fn inv(&self) -> Result<Self, AmdError> {
        check_square(self, "inv")?;
        Ok(self.derived(
            format!("inv({})", remove_parenthesis(&self.symbol)),
            self.rows,
            self.cols,
        ))
    }

    fn trace(&self) -> Result<SymbolicScalar, AmdError> {
        check_square(self, "trace")?;
        Ok(SymbolicScalar::new(format!(
            "trace({})",
            remove_parenthesis(&self.symbol)
        )))
    }

    fn logdet(&self) -> Result<SymbolicScalar, AmdError> {
        check_square(self, "logdet")?;
        Ok(SymbolicScalar::new(format!(
            "log(det({}))",
            remove_parenthesis(&self.symbol)
        )))
    }

    fn fnorm(&self) -> SymbolicScalar {
        SymbolicScalar::new(format!(
            "norm({},'fro')",
            remove_parenthesis(&self.symbol)
        ))
    }

    fn diag(&self) -> Result<Self, AmdError> {
        check_square(self, "diag")?;
        Ok(self.derived(
            format!("diag({})", remove_parenthesis(&self.symbol)),
            self.rows,
            self.cols,
        ))
    }

    fn elementwise_product(&self, other: &Self) -> Result<Self, AmdError> {
        check_same_shape(self, other, "elementwise_product")?;
        Ok(self.derived(
            format!("({}.*{})", self.symbol, other.symbol),
            self.rows,
            self.cols,
        ))
    }

    fn scale(&self, s: &SymbolicScalar) -> Self {
        self.derived(
            format!("({}.*{})", s.symbol, self.symbol),
            self.rows,
            self.cols,
        )
    }

    fn divide_scalar(&self, s: &SymbolicScalar) -> Self {
        self.derived(
            format!("({}./{})", self.symbol, s.symbol),
            self.rows,
            self.cols,
        )
    }

    fn eye(n: usize) -> Self {
        SymbolicMatrix::new(format!("eye({})", n), n, n)
    }

    fn zeros(rows: usize, cols: usize) -> Self {
        SymbolicMatrix::new(format!("zeros({},{})", rows, cols), rows, cols)
    }
}

#[cfg(test)]
#[path = "symbolic_test.rs"]
mod tests;
