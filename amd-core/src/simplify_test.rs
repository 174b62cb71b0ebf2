use super::*;
use crate::matrix::{DenseMatrix, SymbolicMatrix, SymbolicScalar};
use crate::utils::testing::{check_matrix_near, dense, init_logger};

fn sym(name: &str) -> MatrixMatrixFunc<SymbolicMatrix> {
    MatrixMatrixFunc::constant(SymbolicMatrix::new(name, 4, 4))
}

fn var() -> MatrixMatrixFunc<SymbolicMatrix> {
    MatrixMatrixFunc::variable(SymbolicMatrix::new("X", 4, 4))
}

fn post(f: &MatrixMatrixFunc<SymbolicMatrix>) -> MatrixMatrixFunc<SymbolicMatrix> {
    simplify(f, Traversal::PostOrder).unwrap()
}

#[test]
fn test_plus_and_minus_with_zero() -> Result<(), AmdError> {
    let x = var();
    let z = MatrixMatrixFunc::zeros(4, 4);
    assert!(post(&z.add(&x)?).ptr_eq(&x));
    assert!(post(&x.add(&z)?).ptr_eq(&x));
    assert!(post(&x.sub(&z)?).ptr_eq(&x));

    let negated = post(&z.sub(&x)?);
    assert_eq!(negated.op(), OpType::Negation);
    assert_eq!(negated.value().symbol(), "(-X)");
    Ok(())
}

#[test]
fn test_product_rules() -> Result<(), AmdError> {
    let x = var();
    let i = MatrixMatrixFunc::identity(4);
    let z = MatrixMatrixFunc::zeros(4, 4);
    assert!(post(&i.matmul(&x)?).ptr_eq(&x));
    assert!(post(&x.matmul(&i)?).ptr_eq(&x));

    let zero = post(&x.matmul(&z)?);
    assert!(zero.is_zero());
    assert!(zero.is_const());
    assert_eq!(zero.shape(), (4, 4));
    Ok(())
}

#[test]
fn test_product_with_inverse() -> Result<(), AmdError> {
    let a = sym("A");
    assert!(post(&a.matmul(&a.inv()?)?).is_identity());
    assert!(post(&a.inv()?.matmul(&a)?).is_identity());

    // a shared sub-expression is still recognised after rebuilding
    let s = sym("A").add(&sym("B"))?.add(&MatrixMatrixFunc::zeros(4, 4))?;
    let f = s.matmul(&s.inv()?)?;
    assert!(post(&f).is_identity());

    let b = sym("B");
    assert!(!post(&a.matmul(&b.inv()?)?).is_identity());
    Ok(())
}

#[test]
fn test_transpose_and_inverse_of_special_matrices() -> Result<(), AmdError> {
    let i = MatrixMatrixFunc::<SymbolicMatrix>::identity(4);
    let z = MatrixMatrixFunc::<SymbolicMatrix>::zeros(4, 4);
    assert!(post(&i.t()).ptr_eq(&i));
    assert!(post(&z.t()).ptr_eq(&z));
    assert!(post(&i.inv()?).ptr_eq(&i));

    // (X + 0)' ' only collapses once the inner sum is simplified
    let x = var();
    let inner = x.add(&z)?.t();
    let f = inner.add(&z)?.t();
    assert!(post(&f).ptr_eq(&x));
    Ok(())
}

#[test]
fn test_transpose_of_rectangular_zero() -> Result<(), AmdError> {
    let z = MatrixMatrixFunc::<SymbolicMatrix>::zeros(2, 3);
    let zt = post(&z.t());
    assert!(zt.is_zero());
    assert_eq!(zt.shape(), (3, 2));

    // rebuilding (Z' .* B) + X keeps the dimensions consistent
    let b = MatrixMatrixFunc::constant(SymbolicMatrix::new("B", 3, 2));
    let x = MatrixMatrixFunc::variable(SymbolicMatrix::new("X", 3, 2));
    let f = z.t().elementwise_product(&b)?.add(&x)?;
    let s = simplify(&f, Traversal::PostOrder)?;
    assert_eq!(s.shape(), (3, 2));
    assert_eq!(s.op(), OpType::Plus);
    Ok(())
}

#[test]
fn test_scalar_times_matrix() -> Result<(), AmdError> {
    let x = var();
    let zero = ScalarMatrixFunc::constant(SymbolicScalar::new("0"), 4, 4);
    assert!(post(&x.scale(&zero)?).is_zero());

    let z = MatrixMatrixFunc::zeros(4, 4);
    let s = x.trace()?;
    assert!(post(&z.scale(&s)?).ptr_eq(&z));

    let two = ScalarMatrixFunc::constant(SymbolicScalar::new("2"), 4, 4);
    let kept = post(&x.scale(&two)?);
    assert_eq!(kept.op(), OpType::ScalarTimesMatrix);
    Ok(())
}

#[test]
fn test_zero_propagates_upward() -> Result<(), AmdError> {
    let a = sym("A");
    let f = MatrixMatrixFunc::zeros(4, 4).matmul(&var())?.add(&a)?;
    let g = post(&f);
    assert!(g.ptr_eq(&a));
    assert!(g.is_const());
    Ok(())
}

#[test]
fn test_unchanged_graph_is_reused() -> Result<(), AmdError> {
    let f = sym("A").matmul(&var())?.t();
    assert!(post(&f).ptr_eq(&f));
    Ok(())
}

#[test]
fn test_traversal_orders_agree() -> Result<(), AmdError> {
    let x = var();
    let f = MatrixMatrixFunc::zeros(4, 4)
        .add(&x)?
        .matmul(&MatrixMatrixFunc::identity(4))?;
    for order in [Traversal::PreOrder, Traversal::InOrder, Traversal::PostOrder] {
        assert!(simplify(&f, order)?.ptr_eq(&x), "{:?}", order);
    }
    assert_eq!(Traversal::default(), Traversal::PostOrder);
    Ok(())
}

#[test]
fn test_simplified_trace() -> Result<(), AmdError> {
    let x = var();
    let f = simplified_trace(&x.matmul(&x.inv()?)?)?;
    assert!(f.is_const());
    assert_eq!(f.value().symbol(), "4");
    assert_eq!(f.derivative().symbol(), "zeros(4,4)");

    let zero = simplified_trace(&MatrixMatrixFunc::<SymbolicMatrix>::zeros(4, 4))?;
    assert_eq!(zero.value().symbol(), "0");

    let g = simplified_trace(&x.matmul(&MatrixMatrixFunc::identity(4))?)?;
    assert_eq!(g.value().symbol(), "trace(X)");
    assert_eq!(g.derivative().symbol(), "eye(4)");
    Ok(())
}

#[test]
fn test_simplified_logdet() -> Result<(), AmdError> {
    let i = MatrixMatrixFunc::<SymbolicMatrix>::identity(4);
    let f = simplified_logdet(&i.matmul(&i)?)?;
    assert!(f.is_const());
    assert_eq!(f.value().symbol(), "0");

    let x = var();
    let g = simplified_logdet(&x.matmul(&i)?)?;
    assert_eq!(g.derivative().symbol(), "inv(X)'");
    Ok(())
}

#[test]
fn test_dense_values_are_recomputed() -> Result<(), AmdError> {
    init_logger();
    let x0 = dense(&[&[1.0, 2.0], &[3.0, 4.0]]);
    let x = MatrixMatrixFunc::variable(x0.clone());
    let f = x
        .matmul(&MatrixMatrixFunc::identity(2))?
        .add(&MatrixMatrixFunc::zeros(2, 2))?
        .t();
    let g = simplify(&f, Traversal::PostOrder)?;
    assert_eq!(g.op(), OpType::Transpose);
    assert!(g.left().map_or(false, |inner| inner.ptr_eq(&x)));
    check_matrix_near(g.value(), &x0.transpose(), 0.0);
    check_matrix_near(simplified_trace(&f)?.derivative(), &DenseMatrix::eye(2), 1e-12);
    Ok(())
}
