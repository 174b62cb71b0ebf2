use super::parse_expression;
use crate::error::AmdError;

fn parsed(input: &str) -> String {
    match parse_expression(input) {
        Ok(expr) => expr.to_string(),
        Err(e) => panic!("failed to parse '{}': {}", input, e),
    }
}

#[test]
fn test_leaves() {
    assert_eq!(parsed("A"), "\"A\"");
    assert_eq!(parsed("  Z "), "\"Z\"");
    assert_eq!(parsed("3.14"), "\"3.14\"");
    assert_eq!(parsed("1e-3"), "\"1e-3\"");
    assert_eq!(parsed("(((B)))"), "\"B\"");
}

#[test]
fn test_binary_operators() {
    assert_eq!(parsed("A+B"), "(+ \"A\" \"B\")");
    assert_eq!(parsed("A-B"), "(- \"A\" \"B\")");
    assert_eq!(parsed("A*B"), "(* \"A\" \"B\")");
    assert_eq!(parsed("A/2"), "(/ \"A\" \"2\")");
    assert_eq!(parsed("AoB"), "(o \"A\" \"B\")");
    assert_eq!(parsed("A o B"), "(o \"A\" \"B\")");
}

#[test]
fn test_left_associativity() {
    assert_eq!(parsed("A-B+C"), "(+ (- \"A\" \"B\") \"C\")");
    assert_eq!(parsed("A+B-C"), "(- (+ \"A\" \"B\") \"C\")");
    assert_eq!(
        parsed("A+B-C-D-E"),
        "(- (- (- (+ \"A\" \"B\") \"C\") \"D\") \"E\")"
    );
    assert_eq!(parsed("7*4*A"), "(* (* \"7\" \"4\") \"A\")");
}

#[test]
fn test_functions_and_postfix() {
    assert_eq!(parsed("tr(B)"), "(tr \"B\")");
    assert_eq!(parsed("lgdt(B)"), "(lgdt \"B\")");
    assert_eq!(parsed("B'"), "(' \"B\")");
    assert_eq!(parsed("B_"), "(_ \"B\")");
    assert_eq!(parsed("B''"), "(' (' \"B\"))");
    assert_eq!(parsed("tr(A)'"), "(' (tr \"A\"))");
}

#[test]
fn test_unary_minus_and_plus() {
    assert_eq!(parsed("-B'"), "(- (' \"B\"))");
    assert_eq!(parsed("-B'_"), "(- (_ (' \"B\")))");
    assert_eq!(parsed("-+-A"), "(- (- \"A\"))");
    assert_eq!(parsed("+A"), "\"A\"");
}

#[test]
fn test_precedence() {
    assert_eq!(parsed("A'+B'"), "(+ (' \"A\") (' \"B\"))");
    assert_eq!(parsed("A+B'"), "(+ \"A\" (' \"B\"))");
    assert_eq!(parsed("-A'*-B'"), "(* (- (' \"A\")) (- (' \"B\")))");
    assert_eq!(parsed("tr(A)*tr(B)"), "(* (tr \"A\") (tr \"B\"))");
    assert_eq!(parsed("-A'+A"), "(+ (- (' \"A\")) \"A\")");
    assert_eq!(parsed("-B*C'"), "(* (- \"B\") (' \"C\"))");
    assert_eq!(parsed("A+B*C"), "(+ \"A\" (* \"B\" \"C\"))");
}

#[test]
fn test_nested_parentheses() {
    assert_eq!(
        parsed("-(tr(B)*tr(B)+-tr(B))"),
        "(- (+ (* (tr \"B\") (tr \"B\")) (- (tr \"B\"))))"
    );
    assert_eq!(
        parsed("-A'*(B+((C)))"),
        "(* (- (' \"A\")) (+ \"B\" \"C\"))"
    );
    assert_eq!(parsed("-(-A+-B)"), "(- (+ (- \"A\") (- \"B\")))");
}

#[test]
fn test_parse_failures() {
    for input in ["", "   ", "-", "(A", "tr A", "a+B", ")"] {
        match parse_expression(input) {
            Err(AmdError::Parse { message, .. }) => assert_eq!(message, "Parsing failed", "{}", input),
            other => panic!("'{}' should not parse, got {:?}", input, other),
        }
    }
}

#[test]
fn test_trailing_input() {
    assert_eq!(
        parse_expression("A+"),
        Err(AmdError::Parse {
            message: "Parsing failed at: +".to_string(),
            rest: "+".to_string(),
        })
    );
    assert_eq!(
        parse_expression("A B"),
        Err(AmdError::Parse {
            message: "Parsing failed at: B".to_string(),
            rest: "B".to_string(),
        })
    );
    assert!(matches!(
        parse_expression("tr(A))"),
        Err(AmdError::Parse { rest, .. }) if rest == ")"
    ));
}
