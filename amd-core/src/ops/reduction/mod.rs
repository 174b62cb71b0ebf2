// Reductions of a matrix function to a scalar function. These are the roots
// from which the backward pass starts.

pub mod fnorm;
pub mod logdet;
pub mod trace;

pub use fnorm::fnorm_op;
pub use logdet::logdet_op;
pub use trace::trace_op;
