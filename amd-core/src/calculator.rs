//! A symbolic calculator for scalar functions of a matrix.
//!
//! Input such as `trace(A*X) + 2*logdet(X)` is tokenized, converted to
//! reverse Polish notation with the shunting-yard algorithm and evaluated
//! over [`SymbolicMatrix`] graphs. The result carries the function and its
//! derivative with respect to `X` as MATLAB formulas.
//!
//! Inside `trace(...)` and `logdet(...)` the operators are `+`, `-`, `*`,
//! `.*`, and the prefix functions `inv` and `transpose`. Outside, traces and
//! log-determinants are combined with `+`, `-`, `*` and `/`, together with
//! integer literals and lowercase constants (any letter other than `x`).

use crate::autograd::{MatrixMatrixFunc, ScalarMatrixFunc};
use crate::error::AmdError;
use crate::matrix::{SymbolicMatrix, SymbolicScalar};
use log::{debug, trace};

/// Dimensions of the symbolic matrices the calculator works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculatorConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        CalculatorConfig { rows: 4, cols: 4 }
    }
}

/// Operators understood by the tokenizer, in matching order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Times,
    Divide,
    Inv,
    Transpose,
    LeftParen,
    RightParen,
    ElementwiseProduct,
}

const OPERATORS: [Operator; 9] = [
    Operator::Plus,
    Operator::Minus,
    Operator::Times,
    Operator::Divide,
    Operator::Inv,
    Operator::Transpose,
    Operator::LeftParen,
    Operator::RightParen,
    Operator::ElementwiseProduct,
];

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Times => "*",
            Operator::Divide => "/",
            Operator::Inv => "inv",
            Operator::Transpose => "transpose",
            Operator::LeftParen => "(",
            Operator::RightParen => ")",
            Operator::ElementwiseProduct => ".*",
        }
    }

    pub fn priority(self) -> u8 {
        match self {
            Operator::Plus | Operator::Minus => 1,
            Operator::Times | Operator::Divide | Operator::ElementwiseProduct => 2,
            Operator::Inv | Operator::Transpose => 3,
            Operator::LeftParen | Operator::RightParen => 4,
        }
    }
}

/// A lexical unit of calculator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Op(Operator),
    /// `trace` with its parenthesised argument, e.g. `(A*X)`.
    Trace(String),
    /// `logdet` with its parenthesised argument.
    Logdet(String),
    Letter(char),
    Number(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Op(op) => write!(f, "{}", op.symbol()),
            Token::Trace(arg) => write!(f, "trace{}", arg),
            Token::Logdet(arg) => write!(f, "logdet{}", arg),
            Token::Letter(c) => write!(f, "{}", c),
            Token::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Splits `input` (without spaces) into tokens.
///
/// # Errors
/// `InvalidExpression("Parentheses mismatch")` when a `trace(` or `logdet(`
/// argument is not closed, and `InvalidExpression("Invalid term or
/// character")` for anything unrecognised.
pub fn tokenize(input: &str) -> Result<Vec<Token>, AmdError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let rest = &input[i..];
        if let Some(op) = OPERATORS.iter().find(|op| rest.starts_with(op.symbol())) {
            tokens.push(Token::Op(*op));
            i += op.symbol().len();
        } else if let Some(arg) = rest.strip_prefix("trace").filter(|a| a.starts_with('(')) {
            let len = balanced_len(arg)?;
            tokens.push(Token::Trace(arg[..len].to_string()));
            i += "trace".len() + len;
        } else if let Some(arg) = rest.strip_prefix("logdet").filter(|a| a.starts_with('(')) {
            let len = balanced_len(arg)?;
            tokens.push(Token::Logdet(arg[..len].to_string()));
            i += "logdet".len() + len;
        } else if bytes[i].is_ascii_alphabetic() {
            tokens.push(Token::Letter(bytes[i] as char));
            i += 1;
        } else if bytes[i].is_ascii_digit() {
            let len = rest.bytes().take_while(u8::is_ascii_digit).count();
            tokens.push(Token::Number(rest[..len].to_string()));
            i += len;
        } else {
            return Err(invalid("Invalid term or character"));
        }
    }
    Ok(tokens)
}

/// Length of the prefix of `s` (which starts with `(`) up to and including
/// the matching `)`.
fn balanced_len(s: &str) -> Result<usize, AmdError> {
    let mut depth = 0usize;
    for (i, b) in s.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i + 1);
                }
            }
            _ => {}
        }
    }
    Err(invalid("Parentheses mismatch"))
}

/// Converts infix tokens to reverse Polish notation (shunting-yard).
///
/// Parentheses do not appear in the output. Operators of equal priority
/// are left associative.
///
/// # Errors
/// `InvalidExpression("Parentheses mismatch")` for unbalanced parentheses.
pub fn infix_to_rpn(infix: &[Token]) -> Result<Vec<Token>, AmdError> {
    let mut output = Vec::with_capacity(infix.len());
    let mut stack: Vec<Operator> = Vec::new();
    for token in infix {
        let op = match token {
            Token::Op(op) => *op,
            operand => {
                output.push(operand.clone());
                continue;
            }
        };
        match op {
            Operator::LeftParen => stack.push(op),
            Operator::RightParen => loop {
                match stack.pop() {
                    Some(Operator::LeftParen) => break,
                    Some(top) => output.push(Token::Op(top)),
                    None => return Err(invalid("Parentheses mismatch")),
                }
            },
            _ => {
                while let Some(&top) = stack.last() {
                    if top == Operator::LeftParen || op.priority() > top.priority() {
                        break;
                    }
                    output.push(Token::Op(top));
                    stack.pop();
                }
                stack.push(op);
            }
        }
    }
    while let Some(top) = stack.pop() {
        if top == Operator::LeftParen {
            return Err(invalid("Parentheses mismatch"));
        }
        output.push(Token::Op(top));
    }
    Ok(output)
}

/// Evaluates textual scalar functions of the symbolic variable `X`.
///
/// Every capital letter names a constant `rows x cols` matrix, except `X`
/// (the variable), `I` (the identity) and `Z` (the zero matrix).
///
/// ```
/// use amd_core::calculator::{Calculator, CalculatorConfig};
///
/// let mut calc = Calculator::new(CalculatorConfig::default())?;
/// calc.compute("trace(X*A)")?;
/// assert_eq!(calc.function_str().as_deref(), Some("trace(X*A)"));
/// assert_eq!(calc.derivative_str().as_deref(), Some("A'"));
/// # Ok::<(), amd_core::error::AmdError>(())
/// ```
#[derive(Debug)]
pub struct Calculator {
    config: CalculatorConfig,
    matrices: Vec<MatrixMatrixFunc<SymbolicMatrix>>,
    expression: String,
    infix: Vec<Token>,
    rpn: Vec<Token>,
    func: Option<ScalarMatrixFunc<SymbolicMatrix>>,
}

impl Calculator {
    /// # Errors
    /// `InvalidDimensions` if either dimension is zero.
    pub fn new(config: CalculatorConfig) -> Result<Self, AmdError> {
        let CalculatorConfig { rows, cols } = config;
        if rows == 0 || cols == 0 {
            return Err(AmdError::InvalidDimensions { rows, cols });
        }
        let matrices = ('A'..='Z')
            .map(|c| match c {
                'X' => MatrixMatrixFunc::variable(SymbolicMatrix::new("X", rows, cols)),
                'I' => MatrixMatrixFunc::identity(rows),
                'Z' => MatrixMatrixFunc::zeros(rows, cols),
                _ => MatrixMatrixFunc::constant(SymbolicMatrix::new(c.to_string(), rows, cols)),
            })
            .collect();
        Ok(Calculator {
            config,
            matrices,
            expression: String::new(),
            infix: Vec::new(),
            rpn: Vec::new(),
            func: None,
        })
    }

    pub fn config(&self) -> CalculatorConfig {
        self.config
    }

    /// Parses and evaluates `expr`, replacing any previous result.
    ///
    /// # Errors
    /// `InvalidExpression` for empty input, unbalanced parentheses, unknown
    /// characters, misplaced operands or operators, and operators without
    /// enough operands. Dimension errors from the matrix operations are
    /// propagated as is.
    pub fn compute(&mut self, expr: &str) -> Result<&ScalarMatrixFunc<SymbolicMatrix>, AmdError> {
        debug!("Calculator input '{}'", expr);
        self.func = None;
        self.expression = expr.chars().filter(|c| *c != ' ').collect();
        if self.expression.is_empty() {
            return Err(invalid("Empty expression"));
        }
        self.infix = tokenize(&self.expression)?;
        self.rpn = infix_to_rpn(&self.infix)?;
        trace!("RPN: {}", join(&self.rpn));
        let func = self.evaluate_scalar(&self.rpn)?;
        Ok(self.func.insert(func))
    }

    /// The function value of the last successful [`compute`](Self::compute).
    pub fn function_str(&self) -> Option<String> {
        self.func.as_ref().map(|f| f.value().get_string())
    }

    /// The derivative with respect to `X` of the last successful computation.
    pub fn derivative_str(&self) -> Option<String> {
        self.func.as_ref().map(|f| f.derivative().get_string())
    }

    /// The scalar function built by the last successful computation.
    pub fn computational_tree(&self) -> Option<&ScalarMatrixFunc<SymbolicMatrix>> {
        self.func.as_ref()
    }

    /// The last input, without spaces.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The last input in reverse Polish notation, tokens separated by spaces.
    pub fn rpn_str(&self) -> String {
        join(&self.rpn)
    }

    fn matrix(&self, name: char) -> MatrixMatrixFunc<SymbolicMatrix> {
        self.matrices[(name as u8 - b'A') as usize].clone()
    }

    fn scalar_constant(&self, symbol: &str) -> ScalarMatrixFunc<SymbolicMatrix> {
        let CalculatorConfig { rows, cols } = self.config;
        ScalarMatrixFunc::constant(SymbolicScalar::new(symbol), rows, cols)
    }

    fn evaluate_scalar(&self, rpn: &[Token]) -> Result<ScalarMatrixFunc<SymbolicMatrix>, AmdError> {
        let mut stack: Vec<ScalarMatrixFunc<SymbolicMatrix>> = Vec::new();
        for token in rpn {
            let value = match token {
                Token::Op(op @ (Operator::Plus | Operator::Minus | Operator::Times | Operator::Divide)) => {
                    let (lhs, rhs) = pop_two(&mut stack)?;
                    match op {
                        Operator::Plus => lhs.add(&rhs)?,
                        Operator::Minus => lhs.sub(&rhs)?,
                        Operator::Times => lhs.mul(&rhs)?,
                        _ => lhs.div(&rhs)?,
                    }
                }
                Token::Trace(arg) => self.evaluate_matrix(arg)?.trace()?,
                Token::Logdet(arg) => self.evaluate_matrix(arg)?.logdet()?,
                Token::Number(n) => self.scalar_constant(n),
                Token::Letter(c) if c.is_ascii_lowercase() && *c != 'x' => {
                    self.scalar_constant(&c.to_string())
                }
                _ => return Err(invalid("Invalid operation or operand")),
            };
            stack.push(value);
        }
        single(stack)
    }

    /// Evaluates the argument of `trace(...)` or `logdet(...)`.
    fn evaluate_matrix(&self, arg: &str) -> Result<MatrixMatrixFunc<SymbolicMatrix>, AmdError> {
        let rpn = infix_to_rpn(&tokenize(arg)?)?;
        trace!("Matrix RPN: {}", join(&rpn));
        let mut stack: Vec<MatrixMatrixFunc<SymbolicMatrix>> = Vec::new();
        for token in &rpn {
            let value = match token {
                Token::Letter(c) if c.is_ascii_uppercase() => self.matrix(*c),
                Token::Op(Operator::Inv) => pop(&mut stack)?.inv()?,
                Token::Op(Operator::Transpose) => pop(&mut stack)?.t(),
                Token::Op(op @ (Operator::Plus | Operator::Minus | Operator::Times | Operator::ElementwiseProduct)) => {
                    let (lhs, rhs) = pop_two(&mut stack)?;
                    match op {
                        Operator::Plus => lhs.add(&rhs)?,
                        Operator::Minus => lhs.sub(&rhs)?,
                        Operator::Times => lhs.matmul(&rhs)?,
                        _ => lhs.elementwise_product(&rhs)?,
                    }
                }
                _ => return Err(invalid("Invalid operation or operand")),
            };
            stack.push(value);
        }
        single(stack)
    }
}

fn pop<T>(stack: &mut Vec<T>) -> Result<T, AmdError> {
    stack.pop().ok_or_else(|| invalid("Not enough operands"))
}

fn pop_two<T>(stack: &mut Vec<T>) -> Result<(T, T), AmdError> {
    let rhs = pop(stack)?;
    let lhs = pop(stack)?;
    Ok((lhs, rhs))
}

fn single<T>(mut stack: Vec<T>) -> Result<T, AmdError> {
    let top = pop(&mut stack)?;
    if !stack.is_empty() {
        return Err(invalid("Not enough operations"));
    }
    Ok(top)
}

fn join(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn invalid(message: &str) -> AmdError {
    AmdError::InvalidExpression(message.to_string())
}

#[cfg(test)]
#[path = "calculator_test.rs"]
mod tests;
