use thiserror::Error;

/// Numeric error codes of the historical AMD interface.
///
/// Negative codes are errors, `Success` is zero. The values are kept so that
/// callers bridging to the old C interface can report the same numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Error = -0xFFFF,
    MismatchedDimensions,
    InternalNode,
    ConstantFn,
    VariableFn,
    NullPtr,
    InvalidOperation,
    NoMem,
    InvalidArguments,
    InvalidSharedPtr,
    NotNullPtr,
    NonSquare,
    InvalidDimensions,
    InvalidExpression,
    Success = 0,
}

/// Custom error type for the AMD crates.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum AmdError {
    #[error("Matrices don't match up: expected {expected:?}, got {actual:?} during operation {operation}")]
    MismatchedDimensions {
        expected: (usize, usize),
        actual: (usize, usize),
        operation: String,
    },

    #[error("Non square matrix ({rows}x{cols}) passed to {operation}")]
    NonSquare {
        rows: usize,
        cols: usize,
        operation: String,
    },

    #[error("Invalid matrix dimensions: {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("Internal node found where a leaf node was expected")]
    InternalNode,

    #[error("Node is a constant function")]
    ConstantFunction,

    #[error("Node is a variable function")]
    VariableFunction,

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    #[error("{message}")]
    Parse { message: String, rest: String },

    #[error("Matrix is singular in {operation}")]
    SingularMatrix { operation: String },

    #[error("Matrix is not positive definite in {operation}")]
    NotPositiveDefinite { operation: String },

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AmdError {
    /// Returns the historical numeric code for this error.
    pub fn code(&self) -> i32 {
        let code = match self {
            AmdError::MismatchedDimensions { .. } => ErrorCode::MismatchedDimensions,
            AmdError::NonSquare { .. } => ErrorCode::NonSquare,
            AmdError::InvalidDimensions { .. } => ErrorCode::InvalidDimensions,
            AmdError::InternalNode => ErrorCode::InternalNode,
            AmdError::ConstantFunction => ErrorCode::ConstantFn,
            AmdError::VariableFunction => ErrorCode::VariableFn,
            AmdError::InvalidOperation(_) => ErrorCode::InvalidOperation,
            AmdError::InvalidArguments(_) => ErrorCode::InvalidArguments,
            AmdError::InvalidExpression(_) | AmdError::Parse { .. } => {
                ErrorCode::InvalidExpression
            }
            AmdError::SingularMatrix { .. } | AmdError::NotPositiveDefinite { .. } => {
                ErrorCode::InvalidOperation
            }
            AmdError::Io(_) | AmdError::InternalError(_) => ErrorCode::Error,
        };
        code as i32
    }

    pub(crate) fn mismatch(
        expected: (usize, usize),
        actual: (usize, usize),
        operation: &str,
    ) -> Self {
        AmdError::MismatchedDimensions {
            expected,
            actual,
            operation: operation.to_string(),
        }
    }

    pub(crate) fn non_square(rows: usize, cols: usize, operation: &str) -> Self {
        AmdError::NonSquare {
            rows,
            cols,
            operation: operation.to_string(),
        }
    }
}
