use crate::error::AmdError;
use crate::matrix::MatrixAdaptor;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A scalar-valued function of a matrix variable, carried as its value and
/// its derivative with respect to the variable.
///
/// Values come out of `trace`, `logdet` and `fnorm`, or are constants. The
/// arithmetic below applies the sum, product and quotient rules. A constant
/// operand contributes no derivative, so its zero matrix is never added.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarMatrixFunc<M: MatrixAdaptor> {
    value: M::Scalar,
    derivative: M,
    is_const: bool,
}

impl<M: MatrixAdaptor> ScalarMatrixFunc<M> {
    /// A non-constant function.
    pub fn new(value: M::Scalar, derivative: M) -> Self {
        ScalarMatrixFunc {
            value,
            derivative,
            is_const: false,
        }
    }

    /// A constant whose derivative is the `rows x cols` zero matrix.
    pub fn constant(value: M::Scalar, rows: usize, cols: usize) -> Self {
        ScalarMatrixFunc {
            value,
            derivative: M::zeros(rows, cols),
            is_const: true,
        }
    }

    pub fn value(&self) -> &M::Scalar {
        &self.value
    }

    pub fn derivative(&self) -> &M {
        &self.derivative
    }

    pub fn is_const(&self) -> bool {
        self.is_const
    }

    pub fn into_parts(self) -> (M::Scalar, M) {
        (self.value, self.derivative)
    }

    fn combine(&self, value: M::Scalar, other: &Self, derivative: Option<M>) -> Self {
        match derivative {
            Some(derivative) => ScalarMatrixFunc::new(value, derivative),
            None => {
                // constants built from a constant graph carry a 0x0 derivative
                let (rows, cols) = if self.derivative.shape() == (0, 0) {
                    other.derivative.shape()
                } else {
                    self.derivative.shape()
                };
                ScalarMatrixFunc::constant(value, rows, cols)
            }
        }
    }

    /// `f + g`.
    pub fn add(&self, other: &Self) -> Result<Self, AmdError> {
        let value = self.value.clone() + other.value.clone();
        let derivative = match (self.is_const, other.is_const) {
            (true, true) => None,
            (true, false) => Some(other.derivative.clone()),
            (false, true) => Some(self.derivative.clone()),
            (false, false) => Some(self.derivative.add(&other.derivative)?),
        };
        Ok(self.combine(value, other, derivative))
    }

    /// `f - g`.
    pub fn sub(&self, other: &Self) -> Result<Self, AmdError> {
        let value = self.value.clone() - other.value.clone();
        let derivative = match (self.is_const, other.is_const) {
            (true, true) => None,
            (true, false) => Some(other.derivative.negation()),
            (false, true) => Some(self.derivative.clone()),
            (false, false) => Some(self.derivative.minus(&other.derivative)?),
        };
        Ok(self.combine(value, other, derivative))
    }

    /// `f * g`, with derivative `f dg + g df`.
    pub fn mul(&self, other: &Self) -> Result<Self, AmdError> {
        let f = &self.value;
        let g = &other.value;
        let value = f.clone() * g.clone();
        let derivative = match (self.is_const, other.is_const) {
            (true, true) => None,
            (true, false) => Some(other.derivative.scale(f)),
            (false, true) => Some(self.derivative.scale(g)),
            (false, false) => Some(other.derivative.scale(f).add(&self.derivative.scale(g))?),
        };
        Ok(self.combine(value, other, derivative))
    }

    /// `f / g`, with derivative `(g df - f dg) / g^2`.
    pub fn div(&self, other: &Self) -> Result<Self, AmdError> {
        let f = &self.value;
        let g = &other.value;
        let value = f.clone() / g.clone();
        let g2 = g.clone() * g.clone();
        let derivative = match (self.is_const, other.is_const) {
            (true, true) => None,
            (true, false) => Some(other.derivative.scale(f).negation().divide_scalar(&g2)),
            (false, true) => Some(self.derivative.divide_scalar(g)),
            (false, false) => Some(
                self.derivative
                    .scale(g)
                    .minus(&other.derivative.scale(f))?
                    .divide_scalar(&g2),
            ),
        };
        Ok(self.combine(value, other, derivative))
    }

    /// `-f`.
    pub fn neg(&self) -> Self {
        let value = -self.value.clone();
        if self.is_const {
            ScalarMatrixFunc {
                value,
                derivative: self.derivative.clone(),
                is_const: true,
            }
        } else {
            ScalarMatrixFunc::new(value, self.derivative.negation())
        }
    }
}

impl<'a, M: MatrixAdaptor> Add<&'a ScalarMatrixFunc<M>> for &'a ScalarMatrixFunc<M> {
    type Output = Result<ScalarMatrixFunc<M>, AmdError>;

    fn add(self, rhs: &'a ScalarMatrixFunc<M>) -> Self::Output {
        ScalarMatrixFunc::add(self, rhs)
    }
}

impl<'a, M: MatrixAdaptor> Sub<&'a ScalarMatrixFunc<M>> for &'a ScalarMatrixFunc<M> {
    type Output = Result<ScalarMatrixFunc<M>, AmdError>;

    fn sub(self, rhs: &'a ScalarMatrixFunc<M>) -> Self::Output {
        ScalarMatrixFunc::sub(self, rhs)
    }
}

impl<'a, M: MatrixAdaptor> Mul<&'a ScalarMatrixFunc<M>> for &'a ScalarMatrixFunc<M> {
    type Output = Result<ScalarMatrixFunc<M>, AmdError>;

    fn mul(self, rhs: &'a ScalarMatrixFunc<M>) -> Self::Output {
        ScalarMatrixFunc::mul(self, rhs)
    }
}

impl<'a, M: MatrixAdaptor> Div<&'a ScalarMatrixFunc<M>> for &'a ScalarMatrixFunc<M> {
    type Output = Result<ScalarMatrixFunc<M>, AmdError>;

    fn div(self, rhs: &'a ScalarMatrixFunc<M>) -> Self::Output {
        ScalarMatrixFunc::div(self, rhs)
    }
}

impl<'a, M: MatrixAdaptor> Neg for &'a ScalarMatrixFunc<M> {
    type Output = ScalarMatrixFunc<M>;

    fn neg(self) -> Self::Output {
        ScalarMatrixFunc::neg(self)
    }
}
