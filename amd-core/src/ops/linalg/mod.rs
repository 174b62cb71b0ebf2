// Linear algebra operations: products, transposition, inversion.

pub mod diag;
pub mod inverse;
pub mod matmul;
pub mod transpose;

pub use diag::diag_op;
pub use inverse::inv_op;
pub use matmul::matmul_op;
pub use transpose::transpose_op;
