//! Recursive descent parser for matrix expressions.
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := unary (('*' | '/' | 'o') unary)*
//! unary      := '-' unary | '+' unary | postfix
//! postfix    := primary ('\'' | '_')*
//! primary    := 'A'..'Z' | number | '(' expression ')'
//!             | 'tr' '(' expression ')' | 'lgdt' '(' expression ')'
//! ```
//!
//! Binary operators are left associative. Whitespace is ignored. An operator
//! whose right operand fails to parse is left unconsumed, so `A+` parses `A`
//! and reports `+` as trailing input.

use crate::error::AmdError;
use crate::expr::tree::{Expression, ExpressionTree};
use log::debug;

/// Parses `input` into an expression tree.
///
/// # Errors
/// `Parse` with message `"Parsing failed"` if no expression can be read, or
/// `"Parsing failed at: <rest>"` if input remains after the longest
/// expression.
pub fn parse_expression(input: &str) -> Result<Expression, AmdError> {
    debug!("Parsing expression '{}'", input);
    let mut parser = Parser { input, pos: 0 };
    let expr = match parser.expression()? {
        Some(expr) => expr,
        None => {
            return Err(AmdError::Parse {
                message: "Parsing failed".to_string(),
                rest: input.to_string(),
            })
        }
    };
    parser.skip_ws();
    let rest = parser.rest();
    if !rest.is_empty() {
        return Err(AmdError::Parse {
            message: format!("Parsing failed at: {}", rest),
            rest: rest.to_string(),
        });
    }
    Ok(expr)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

// Every rule returns `Ok(None)` and restores `pos` when it does not match.
// `Err` is reserved for trees the node constructor rejects.
impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_ws();
        self.rest().chars().next()
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expression(&mut self) -> Result<Option<Expression>, AmdError> {
        self.left_assoc(&['+', '-'], Self::term)
    }

    fn term(&mut self) -> Result<Option<Expression>, AmdError> {
        self.left_assoc(&['*', '/', 'o'], Self::unary)
    }

    fn left_assoc(
        &mut self,
        ops: &[char],
        operand: fn(&mut Self) -> Result<Option<Expression>, AmdError>,
    ) -> Result<Option<Expression>, AmdError> {
        let mut lhs = match operand(self)? {
            Some(lhs) => lhs,
            None => return Ok(None),
        };
        loop {
            let save = self.pos;
            let op = match self.peek() {
                Some(c) if ops.contains(&c) => c,
                _ => return Ok(Some(lhs)),
            };
            self.pos += op.len_utf8();
            match operand(self)? {
                Some(rhs) => lhs = ExpressionTree::binary(op.to_string(), lhs, rhs)?,
                None => {
                    self.pos = save;
                    return Ok(Some(lhs));
                }
            }
        }
    }

    fn unary(&mut self) -> Result<Option<Expression>, AmdError> {
        let save = self.pos;
        if self.eat("-") {
            if let Some(operand) = self.unary()? {
                return ExpressionTree::unary("-", operand).map(Some);
            }
        } else if self.eat("+") {
            if let Some(operand) = self.unary()? {
                return Ok(Some(operand));
            }
        } else {
            return self.postfix();
        }
        self.pos = save;
        Ok(None)
    }

    fn postfix(&mut self) -> Result<Option<Expression>, AmdError> {
        let mut expr = match self.primary()? {
            Some(expr) => expr,
            None => return Ok(None),
        };
        while let Some(op @ ('\'' | '_')) = self.peek() {
            self.pos += 1;
            expr = ExpressionTree::unary(op.to_string(), expr)?;
        }
        Ok(Some(expr))
    }

    fn primary(&mut self) -> Result<Option<Expression>, AmdError> {
        let save = self.pos;
        for function in ["tr", "lgdt"] {
            if self.eat(function) {
                if let Some(inner) = self.parenthesized()? {
                    return ExpressionTree::unary(function, inner).map(Some);
                }
                self.pos = save;
            }
        }
        match self.peek() {
            Some(c) if c.is_ascii_uppercase() => {
                self.pos += 1;
                ExpressionTree::leaf(c.to_string()).map(Some)
            }
            Some(c) if c.is_ascii_digit() => match self.number() {
                Some(text) => ExpressionTree::leaf(text).map(Some),
                None => Ok(None),
            },
            Some('(') => self.parenthesized(),
            _ => Ok(None),
        }
    }

    fn parenthesized(&mut self) -> Result<Option<Expression>, AmdError> {
        let save = self.pos;
        if self.eat("(") {
            if let Some(inner) = self.expression()? {
                if self.eat(")") {
                    return Ok(Some(inner));
                }
            }
        }
        self.pos = save;
        Ok(None)
    }

    /// Unsigned decimal with optional fraction and exponent, returned verbatim.
    fn number(&mut self) -> Option<&'a str> {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        let digits = |mut i: usize| {
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            i
        };

        let mut end = digits(start);
        if end == start {
            return None;
        }
        if end < bytes.len() && bytes[end] == b'.' {
            end = digits(end + 1);
        }
        if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
            let mut exp = end + 1;
            if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
                exp += 1;
            }
            let exp_end = digits(exp);
            if exp_end > exp {
                end = exp_end;
            }
        }
        self.pos = end;
        Some(&self.input[start..end])
    }
}

#[cfg(test)]
#[path = "grammar_test.rs"]
mod tests;
