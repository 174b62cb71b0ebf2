use amd_core::{AmdError, Calculator, CalculatorConfig, ErrorCode};

mod common;
use common::init_logger;

#[test]
fn test_session_of_expressions() -> Result<(), AmdError> {
    init_logger();
    let mut calc = Calculator::new(CalculatorConfig::default())?;
    let cases = [
        ("trace(X*A)", "A'"),
        ("logdet(X)", "inv(X)'"),
        ("trace(A*X*B*X)", "((B*X)*A)'+((A*X)*B)'"),
        ("trace(inv(X))", "(-(inv(X)*inv(X)))'"),
        ("trace(X)-logdet(X)", "eye(4)-inv(X)'"),
    ];
    for (expr, expected) in cases {
        calc.compute(expr)?;
        assert_eq!(calc.derivative_str().as_deref(), Some(expected), "{}", expr);
    }
    assert_eq!(calc.expression(), "trace(X)-logdet(X)");
    Ok(())
}

#[test]
fn test_failed_compute_clears_previous_result() -> Result<(), AmdError> {
    let mut calc = Calculator::new(CalculatorConfig::default())?;
    calc.compute("trace(X)")?;
    assert!(calc.computational_tree().is_some());

    let err = calc.compute("trace(X)+").unwrap_err();
    assert_eq!(err, AmdError::InvalidExpression("Not enough operands".to_string()));
    assert_eq!(err.code(), ErrorCode::InvalidExpression as i32);
    assert!(calc.computational_tree().is_none());
    Ok(())
}

#[test]
fn test_rectangular_configuration() -> Result<(), AmdError> {
    let mut calc = Calculator::new(CalculatorConfig { rows: 3, cols: 2 })?;
    calc.compute("trace(transpose(A)*X)")?;
    assert_eq!(calc.derivative_str().as_deref(), Some("A"));
    assert!(calc.compute("logdet(X)").is_err());
    Ok(())
}
