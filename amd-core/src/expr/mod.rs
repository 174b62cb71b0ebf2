//! # Matrix expression language
//!
//! Expressions such as `tr(A*X') + lgdt(X_)` are parsed into immutable
//! [`ExpressionTree`]s and differentiated symbolically with respect to a
//! matrix letter. `'` is the transpose, `_` the inverse, `o` the elementwise
//! product, `tr` the trace and `lgdt` the log-determinant.
//!
//! ```
//! use amd_core::expr::{differentiate, parse_expression};
//!
//! let f = parse_expression("tr(A*X)").unwrap();
//! assert_eq!(f.to_string(), "(tr (* \"A\" \"X\"))");
//! let df = differentiate(&f, 'X').unwrap().unwrap();
//! assert_eq!(df.to_string(), "(' \"A\")");
//! ```

pub mod derivative;
pub mod grammar;
pub mod rewrite;
pub mod tree;

pub use derivative::differentiate;
pub use grammar::parse_expression;
pub use rewrite::{find_matching_paren, to_right_recursive_rep};
pub use tree::{ExprKind, Expression, ExpressionTree};
