use super::*;
use crate::error::AmdError;

fn sym(s: &str) -> SymbolicMatrix {
    SymbolicMatrix::new(s, 3, 3)
}

#[test]
fn test_remove_parenthesis() {
    assert_eq!(remove_parenthesis("(A+B)"), "A+B");
    assert_eq!(remove_parenthesis("(A+B)'"), "(A+B)'");
    assert_eq!(remove_parenthesis("A"), "A");
    assert_eq!(remove_parenthesis("()"), "");
    assert_eq!(remove_parenthesis("("), "(");
}

#[test]
fn test_binary_operations() -> Result<(), AmdError> {
    let a = sym("A");
    let b = sym("B");
    assert_eq!(a.add(&b)?.symbol(), "(A+B)");
    assert_eq!(a.minus(&b)?.symbol(), "(A-B)");
    assert_eq!(a.multiply(&b)?.symbol(), "(A*B)");
    assert_eq!(a.elementwise_product(&b)?.symbol(), "(A.*B)");
    Ok(())
}

#[test]
fn test_unary_operations() -> Result<(), AmdError> {
    let a = sym("A");
    let sum = a.add(&sym("X"))?;
    assert_eq!(a.transpose().symbol(), "A'");
    assert_eq!(a.negation().symbol(), "(-A)");
    assert_eq!(sum.inv()?.symbol(), "inv(A+X)");
    assert_eq!(sum.diag()?.symbol(), "diag(A+X)");
    assert_eq!(sum.transpose().symbol(), "(A+X)'");
    Ok(())
}

#[test]
fn test_scalar_valued_operations() -> Result<(), AmdError> {
    let ax = sym("A").multiply(&sym("X"))?;
    assert_eq!(ax.trace()?.symbol(), "trace(A*X)");
    assert_eq!(ax.logdet()?.symbol(), "log(det(A*X))");
    assert_eq!(ax.fnorm().symbol(), "norm(A*X,'fro')");
    Ok(())
}

#[test]
fn test_scale_and_divide() {
    let s = SymbolicScalar::new("s");
    assert_eq!(sym("A").scale(&s).symbol(), "(s.*A)");
    assert_eq!(sym("A").divide_scalar(&s).symbol(), "(A./s)");
}

#[test]
fn test_eye_and_zeros() {
    let i = SymbolicMatrix::eye(128);
    assert_eq!(i.symbol(), "eye(128)");
    assert_eq!(i.shape(), (128, 128));
    let z = SymbolicMatrix::zeros(2, 3);
    assert_eq!(z.symbol(), "zeros(2,3)");
    assert_eq!(z.shape(), (2, 3));
}

#[test]
fn test_dimension_checks() {
    let a = SymbolicMatrix::new("A", 2, 3);
    let b = SymbolicMatrix::new("B", 2, 3);
    assert!(matches!(
        a.multiply(&b),
        Err(AmdError::MismatchedDimensions { .. })
    ));
    assert!(matches!(a.trace(), Err(AmdError::NonSquare { .. })));
    assert!(matches!(a.inv(), Err(AmdError::NonSquare { .. })));
    let c = a.multiply(&b.transpose()).unwrap();
    assert_eq!(c.shape(), (2, 2));
    assert!(matches!(
        a.add(&c),
        Err(AmdError::MismatchedDimensions { .. })
    ));
}

#[test]
fn test_display_strips_outer_parenthesis() {
    let a = sym("A").add(&sym("B")).unwrap();
    assert_eq!(a.to_string(), "A+B");
    assert_eq!(a.get_string(), "A+B");
}

#[test]
fn test_scalar_arithmetic() {
    let a = SymbolicScalar::new("a");
    let b = SymbolicScalar::new("b");
    assert_eq!((a.clone() + b.clone()).symbol(), "(a+b)");
    assert_eq!((a.clone() - b.clone()).symbol(), "(a-b)");
    assert_eq!((a.clone() * b.clone()).symbol(), "(a*b)");
    assert_eq!((a.clone() / b).symbol(), "(a/b)");
    assert_eq!((-a.clone()).symbol(), "(-a)");
    assert_eq!(a.sqrt().symbol(), "sqrt(a)");
    assert_eq!((SymbolicScalar::new("a") + SymbolicScalar::new("b")).sqrt().symbol(), "sqrt(a+b)");
}

#[test]
fn test_scalar_constants() {
    assert!(SymbolicScalar::zero().is_zero());
    assert_eq!(SymbolicScalar::one().symbol(), "1");
    assert_eq!(SymbolicScalar::from_f64(2.0).symbol(), "2");
    assert_eq!(SymbolicScalar::from_f64(0.5).symbol(), "0.5");
    assert_eq!(SymbolicScalar::from_usize(128).symbol(), "128");
}
