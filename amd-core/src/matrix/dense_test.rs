use super::*;
use crate::error::AmdError;
use approx::assert_relative_eq;

fn m(rows: &[&[f64]]) -> DenseMatrix {
    DenseMatrix::from_rows(rows).expect("Failed to create test matrix")
}

#[test]
fn test_new_checks_length() {
    let result = DenseMatrix::new(vec![1.0, 2.0, 3.0], 2, 2);
    assert!(matches!(result, Err(AmdError::InvalidArguments(_))));
}

#[test]
fn test_from_rows_rejects_ragged() {
    let rows: Vec<Vec<f64>> = vec![vec![1.0, 2.0], vec![3.0]];
    assert!(DenseMatrix::from_rows(&rows).is_err());
}

#[test]
fn test_from_column_major() {
    let a = DenseMatrix::from_column_major(&[1.0, 3.0, 2.0, 4.0], 2, 2).unwrap();
    assert_eq!(a, m(&[&[1.0, 2.0], &[3.0, 4.0]]));
}

#[test]
fn test_add_minus_multiply() -> Result<(), AmdError> {
    let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
    let b = m(&[&[5.0, 6.0], &[7.0, 8.0]]);
    assert_eq!(a.add(&b)?, m(&[&[6.0, 8.0], &[10.0, 12.0]]));
    assert_eq!(b.minus(&a)?, m(&[&[4.0, 4.0], &[4.0, 4.0]]));
    assert_eq!(a.multiply(&b)?, m(&[&[19.0, 22.0], &[43.0, 50.0]]));
    Ok(())
}

#[test]
fn test_multiply_non_square() -> Result<(), AmdError> {
    let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
    let b = m(&[&[7.0, 8.0], &[9.0, 10.0], &[11.0, 12.0]]);
    let c = a.multiply(&b)?;
    assert_eq!(c.shape(), (2, 2));
    assert_eq!(c, m(&[&[58.0, 64.0], &[139.0, 154.0]]));
    Ok(())
}

#[test]
fn test_multiply_inner_mismatch() {
    let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
    let b = m(&[&[1.0], &[2.0], &[3.0]]);
    match a.multiply(&b) {
        Err(AmdError::MismatchedDimensions { operation, .. }) => assert_eq!(operation, "multiply"),
        other => panic!("Expected MismatchedDimensions, got {:?}", other),
    }
}

#[test]
fn test_add_shape_mismatch() {
    let a = DenseMatrix::zeros(2, 2);
    let b = DenseMatrix::zeros(2, 3);
    assert!(matches!(
        a.add(&b),
        Err(AmdError::MismatchedDimensions { .. })
    ));
}

#[test]
fn test_transpose_and_negation() {
    let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
    let t = a.transpose();
    assert_eq!(t.shape(), (3, 2));
    assert_eq!(t[(2, 1)], 6.0);
    assert_eq!(a.negation()[(0, 1)], -2.0);
}

#[test]
fn test_inverse() -> Result<(), AmdError> {
    let a = m(&[&[4.0, 7.0], &[2.0, 6.0]]);
    let inv = a.inv()?;
    let expected = m(&[&[0.6, -0.7], &[-0.2, 0.4]]);
    assert_relative_eq!(inv, expected, epsilon = 1e-12);
    assert_relative_eq!(a.multiply(&inv)?, DenseMatrix::eye(2), epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_inverse_needs_pivoting() -> Result<(), AmdError> {
    let a = m(&[&[0.0, 1.0], &[1.0, 0.0]]);
    assert_relative_eq!(a.inv()?, a, epsilon = 1e-15);
    Ok(())
}

#[test]
fn test_inverse_singular() {
    let a = m(&[&[1.0, 2.0], &[2.0, 4.0]]);
    assert!(matches!(a.inv(), Err(AmdError::SingularMatrix { .. })));
    assert!(matches!(
        DenseMatrix::zeros(3, 3).inv(),
        Err(AmdError::SingularMatrix { .. })
    ));
}

#[test]
fn test_inverse_non_square() {
    let a = DenseMatrix::zeros(2, 3);
    assert!(matches!(a.inv(), Err(AmdError::NonSquare { .. })));
}

#[test]
fn test_trace_and_diag() -> Result<(), AmdError> {
    let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
    assert_eq!(a.trace()?, 5.0);
    assert_eq!(a.diag()?, m(&[&[1.0, 0.0], &[0.0, 4.0]]));
    assert!(DenseMatrix::zeros(1, 2).trace().is_err());
    Ok(())
}

#[test]
fn test_cholesky_and_logdet() -> Result<(), AmdError> {
    let a = m(&[&[4.0, 2.0], &[2.0, 3.0]]);
    let l = a.cholesky()?;
    assert_relative_eq!(l[(0, 0)], 2.0, epsilon = 1e-12);
    assert_relative_eq!(l[(1, 0)], 1.0, epsilon = 1e-12);
    assert_relative_eq!(l[(1, 1)], 2.0_f64.sqrt(), epsilon = 1e-12);
    assert_eq!(l[(0, 1)], 0.0);
    // det = 12 - 4 = 8
    assert_relative_eq!(a.logdet()?, 8.0_f64.ln(), epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_logdet_not_positive_definite() {
    let a = m(&[&[1.0, 2.0], &[2.0, 1.0]]);
    assert!(matches!(
        a.logdet(),
        Err(AmdError::NotPositiveDefinite { .. })
    ));
}

#[test]
fn test_logdet_of_non_symmetric_matrix() -> Result<(), AmdError> {
    // det = 1*2 - 3*4 = -10
    let a = m(&[&[1.0, 3.0], &[4.0, 2.0]]);
    assert!(!a.is_symmetric());
    assert!(matches!(
        a.logdet(),
        Err(AmdError::NotPositiveDefinite { .. })
    ));
    // det = 2, needs a row swap under partial pivoting
    let b = m(&[&[2.0, 1.0], &[4.0, 3.0]]);
    assert_relative_eq!(b.logdet()?, 2.0_f64.ln(), epsilon = 1e-12);
    let c = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
    // det = -2
    assert!(c.logdet().is_err());
    Ok(())
}

#[test]
fn test_fnorm_scale_elementwise() -> Result<(), AmdError> {
    let a = m(&[&[3.0, 0.0], &[0.0, 4.0]]);
    assert_relative_eq!(a.fnorm(), 5.0);
    assert_eq!(a.scale(&2.0), m(&[&[6.0, 0.0], &[0.0, 8.0]]));
    assert_eq!(a.divide_scalar(&2.0), m(&[&[1.5, 0.0], &[0.0, 2.0]]));
    let b = m(&[&[1.0, 5.0], &[6.0, 0.5]]);
    assert_eq!(a.elementwise_product(&b)?, m(&[&[3.0, 0.0], &[0.0, 2.0]]));
    Ok(())
}

#[test]
fn test_display() {
    let a = m(&[&[1.0, 2.5], &[3.0, 4.0]]);
    assert_eq!(format!("{}", a), "1 2.5\n3 4");
}

#[test]
fn test_get_out_of_bounds() {
    let a = DenseMatrix::eye(2);
    assert_eq!(a.get(1, 1), Some(1.0));
    assert_eq!(a.get(2, 0), None);
}

#[test]
#[should_panic]
fn test_index_out_of_bounds_panics() {
    let a = DenseMatrix::eye(2);
    let _ = a[(0, 2)];
}
