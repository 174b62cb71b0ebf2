use amd_core::matrix::random::RandomPsdConfig;
use amd_core::{MatrixMatrixFunc, SymbolicMatrix};
use rand::rngs::StdRng;

// Shared by several test binaries; not every binary uses every helper.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Constant symbolic `n x n` matrix named `name`.
#[allow(dead_code)]
pub fn sym(name: &str, n: usize) -> MatrixMatrixFunc<SymbolicMatrix> {
    MatrixMatrixFunc::constant(SymbolicMatrix::new(name, n, n))
}

/// The symbolic variable `X`.
#[allow(dead_code)]
pub fn sym_var(n: usize) -> MatrixMatrixFunc<SymbolicMatrix> {
    MatrixMatrixFunc::variable(SymbolicMatrix::new("X", n, n))
}

#[allow(dead_code)]
pub fn seeded_rng(seed: u64) -> StdRng {
    RandomPsdConfig::with_seed(seed).rng()
}
