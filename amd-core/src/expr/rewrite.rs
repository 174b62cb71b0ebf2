//! String rewrites on matrix expressions.

use crate::error::AmdError;

/// Index of the `(` matching the `)` at byte `close_index`.
///
/// Returns `None` if `close_index` is out of range, does not hold `)`, or the
/// parenthesis is unmatched.
pub fn find_matching_paren(s: &str, close_index: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.get(close_index) != Some(&b')') {
        return None;
    }
    let mut depth = 0usize;
    for i in (0..=close_index).rev() {
        match bytes[i] {
            b')' => depth += 1,
            b'(' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Rewrites postfix transpose and inverse as prefix calls: `x'` becomes
/// `(trans(x))` and `x_` becomes `(inv(x))`, where `x` is the preceding
/// letter or parenthesised group.
///
/// ```
/// use amd_core::expr::to_right_recursive_rep;
///
/// assert_eq!(to_right_recursive_rep("A+B'_").unwrap(), "A+(inv((trans(B))))");
/// ```
///
/// # Errors
/// `InvalidExpression` for unbalanced parentheses or a postfix operator with
/// nothing to apply to.
pub fn to_right_recursive_rep(s: &str) -> Result<String, AmdError> {
    let mut out = String::with_capacity(s.len() * 2);
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '\'' | '_' => {
                let function = if c == '\'' { "trans" } else { "inv" };
                out.truncate(out.trim_end().len());
                let start = operand_start(&out)?;
                let operand = out.split_off(start);
                out.push_str(&format!("({}({}))", function, operand));
            }
            '(' => {
                depth += 1;
                out.push(c);
            }
            ')' => {
                depth = depth.checked_sub(1).ok_or_else(unbalanced)?;
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    if depth != 0 {
        return Err(unbalanced());
    }
    Ok(out)
}

fn operand_start(out: &str) -> Result<usize, AmdError> {
    match out.chars().last() {
        Some(')') => find_matching_paren(out, out.len() - 1).ok_or_else(unbalanced),
        Some(c) if c.is_ascii_alphabetic() => Ok(out.len() - 1),
        _ => Err(AmdError::InvalidExpression(
            "Postfix operator without operand".to_string(),
        )),
    }
}

fn unbalanced() -> AmdError {
    AmdError::InvalidExpression("Unbalanced parentheses".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_matching_paren() {
        assert_eq!(find_matching_paren("()", 1), Some(0));
        assert_eq!(find_matching_paren("(A)", 2), Some(0));
        assert_eq!(find_matching_paren("B+(A)", 4), Some(2));

        let nested = "(((((-(A+B))))))";
        assert_eq!(find_matching_paren(nested, 15), Some(0));
        assert_eq!(find_matching_paren(nested, 14), Some(1));
        assert_eq!(find_matching_paren(nested, 13), Some(2));
        assert_eq!(find_matching_paren(nested, 12), Some(3));
        assert_eq!(find_matching_paren(nested, 11), Some(4));
    }

    #[test]
    fn test_find_matching_paren_unmatched() {
        assert_eq!(find_matching_paren("A_ + B)))))", 10), None);
        assert_eq!(find_matching_paren("(A)", 1), None);
        assert_eq!(find_matching_paren("(A)", 7), None);
    }

    #[test]
    fn test_to_right_recursive_rep() -> Result<(), AmdError> {
        let cases = [
            ("", ""),
            ("A+B", "A+B"),
            ("A'", "(trans(A))"),
            ("A_", "(inv(A))"),
            ("A+B'", "A+(trans(B))"),
            ("A+B_", "A+(inv(B))"),
            ("(A+B)'", "(trans((A+B)))"),
            ("(A+B)_", "(inv((A+B)))"),
            ("A+B'_", "A+(inv((trans(B))))"),
            ("A+B_'", "A+(trans((inv(B))))"),
            ("(A+B)'_", "(inv((trans((A+B)))))"),
            ("(A+B)_'", "(trans((inv((A+B)))))"),
        ];
        for (input, expected) in cases {
            assert_eq!(to_right_recursive_rep(input)?, expected, "{}", input);
        }
        Ok(())
    }

    #[test]
    fn test_to_right_recursive_rep_errors() {
        assert!(matches!(
            to_right_recursive_rep("A+B)'"),
            Err(AmdError::InvalidExpression(_))
        ));
        assert!(to_right_recursive_rep("(A+B").is_err());
        assert!(to_right_recursive_rep("'A").is_err());
        assert!(to_right_recursive_rep("A+'").is_err());
    }
}
