use crate::matrix::{DenseMatrix, MatrixAdaptor};

/// Installs `env_logger` for the test binary. Safe to call from every test.
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Checks that two dense matrices have the same shape and agree entry-wise
/// within `tolerance`. Panics with the first offending index otherwise.
pub(crate) fn check_matrix_near(actual: &DenseMatrix, expected: &DenseMatrix, tolerance: f64) {
    assert_eq!(actual.shape(), expected.shape(), "Shape mismatch");
    for (i, (a, e)) in actual.data().iter().zip(expected.data()).enumerate() {
        let diff = (a - e).abs();
        if diff > tolerance {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// Dense matrix from row slices, for test fixtures.
pub(crate) fn dense(rows: &[&[f64]]) -> DenseMatrix {
    DenseMatrix::from_rows(rows).expect("Failed to create test matrix")
}
