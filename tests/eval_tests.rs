// tests/eval_tests.rs

use sloop::{EvalError, Rule};

fn check(rule: &str, input: &str) -> bool {
    let mut compiled = Rule::parse(rule).unwrap_or_else(|e| panic!("parse {:?}: {}", rule, e));
    compiled
        .eval(input)
        .unwrap_or_else(|e| panic!("eval {:?} against {:?}: {}", rule, input, e))
}

fn check_err(rule: &str, input: &str) -> EvalError {
    let mut compiled = Rule::parse(rule).unwrap_or_else(|e| panic!("parse {:?}: {}", rule, e));
    match compiled.eval(input) {
        Ok(v) => panic!("expected an error for {:?} against {:?}, got {}", rule, input, v),
        Err(e) => e,
    }
}

// ============================================================================
// Verdict scenarios
// ============================================================================

#[test]
fn test_rule_scenarios() {
    let test_cases = vec![
        ("hello world", r#"123 | "hello " + "world""#, true),
        ("100", ">=100 & <=100", true),
        ("100", ">100", false),
        ("50", ">=100/2 & <100", true),
        ("49", ">=100/2 & <100", false),
        ("7", "<(1+2)*3", true),
        ("7", "<1+2*3", false),
        ("8", "<(1+2)*3", true),
        ("9", "<(1+2)*3", false),
        ("1", "!(>=1 & <=400 | >=500 & <=600)", false),
        ("0", "!(>=1 & <=400 | >=500 & <=600)", true),
        ("hehe", r#""he" * 3"#, false),
        ("hehehe", r#""he" * 3"#, true),
        ("hello\nworld\test", r#""hello\nworld\test""#, true),
        ("\u{ff} test \u{2847} \u{ff}", r#""\377 test \u2847 \xff""#, true),
    ];

    for (input, rule, expected) in test_cases {
        assert_eq!(
            check(rule, input),
            expected,
            "Failed for rule {:?} against input {:?}",
            rule,
            input
        );

        // the raw-bytes form compiles to the same rule
        let mut compiled = Rule::parse_bytes(rule.as_bytes()).unwrap();
        assert_eq!(
            compiled.eval(input).unwrap(),
            expected,
            "Failed for byte rule {:?} against input {:?}",
            rule,
            input
        );
    }
}

#[test]
fn test_invalid_rules() {
    // each of these must fail, at parse or at eval
    let test_cases = vec![
        r#""hello" ++"#,
        r#"123 + "hello world""#,
        r#""test" - 3"#,
        r#""test" / 3"#,
        r#">="test""#,
        "123 -+ 4",
        r#""hello world"#,
        "0xfg",
    ];

    for rule in test_cases {
        let failed = match Rule::parse(rule) {
            Err(_) => true,
            Ok(mut compiled) => compiled.eval("invalid").is_err(),
        };
        assert!(failed, "expected a failure for rule {:?}", rule);
    }
}

// ============================================================================
// Input decoding
// ============================================================================

#[test]
fn test_numeric_inputs_decode_by_base() {
    assert!(check("100", "0x64"));
    assert!(check("100", "0o144"));
    assert!(check("100", "0b1100100"));
    assert!(check("100", "0144"));
    assert!(check("-16", "-0x10"));
    assert!(check("100.0", "100.00"));
}

#[test]
fn test_float_and_int_inputs_cross_match() {
    // ints and floats compare by value across tags
    assert!(check("5.0", "5"));
    assert!(check("5", "5.0"));
    assert!(check("5", "5.000"));
    assert!(!check("5.5", "5"));
}

#[test]
fn test_text_input_is_verbatim() {
    assert!(check(r#""hello world""#, "hello world"));
    assert!(!check(r#""hello world""#, "hello"));
    // a numeric-looking rule never matches a text input
    assert!(!check("123", "hello"));
}

#[test]
fn test_malformed_numeric_input_is_an_error() {
    // a digit-led input must decode as a number
    assert!(matches!(check_err("123", "7even"), EvalError::Decode(_)));
    assert!(matches!(check_err("123", "-"), EvalError::Decode(_)));
    assert!(matches!(check_err("1.5", "1.2.3"), EvalError::Decode(_)));
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_comparisons() {
    assert!(check(">5", "6"));
    assert!(!check(">5", "5"));
    assert!(check(">=5", "5"));
    assert!(check("<5", "4"));
    assert!(check("<=5", "5"));
    assert!(check(">5.5", "6"));
    assert!(check("<0.5", ".196"));
    // comparisons against a non-numeric input are simply false
    assert!(!check(">5", "abc"));
    assert!(!check("<5", "abc"));
}

#[test]
fn test_unary_minus() {
    assert!(check("-5", "-5"));
    assert!(check("-5.5", "-5.5"));
    assert!(check("3--2", "5"));
    assert!(check(">=-10 & <=10", "0"));
    assert!(check("-(3)", "-3"));
}

#[test]
fn test_bang() {
    assert!(check("!5", "3"));
    assert!(!check("!5", "5"));
    assert!(check("!5", "abc"));
    assert!(check(r#"!"a""#, "b"));
    assert!(!check(r#"!"a""#, "a"));
    assert!(check(r#"!"a""#, "5"));
    assert!(!check("!(>=1)", "2"));
    assert!(check("!(>=1)", "0"));
}

#[test]
fn test_arithmetic() {
    assert!(check("2+3", "5"));
    assert!(check("2*3+1", "7"));
    assert!(check("2+3*2", "8"));
    assert!(check("(2+3)*2", "10"));
    assert!(check("10-2-3", "5")); // left-associative
    assert!(check("1+2.5", "3.5"));
    assert!(check("10/4", "2")); // integer division truncates
    assert!(check("10.0/4", "2.5"));
    assert!(check("-7/2", "-3")); // truncation toward zero
}

#[test]
fn test_integer_arithmetic_wraps() {
    assert!(check("9223372036854775807 + 1", "-9223372036854775808"));
    assert!(check("-9223372036854775808 - 1", "9223372036854775807"));
    assert!(check("9223372036854775807 * 2", "-2"));
}

#[test]
fn test_division_by_zero() {
    assert_eq!(check_err("1/0", "1"), EvalError::DivisionByZero);
    assert_eq!(check_err("10/(5-5)", "1"), EvalError::DivisionByZero);
    // float division follows IEEE-754 instead
    assert!(!check("1.0/0", "1"));
    assert!(check("1.0/0 | >=0", "1"));
}

#[test]
fn test_text_concat_and_repeat() {
    assert!(check(r#""foo" + "bar""#, "foobar"));
    assert!(check(r#""ab" * 2 + "c""#, "ababc"));
    assert!(check(r#""he" * 0"#, ""));
    // a negative count clamps to zero
    assert!(check(r#""he" * -2"#, ""));
}

#[test]
fn test_oversized_repeat() {
    assert_eq!(
        check_err(r#""hello" * 99999999999"#, "x"),
        EvalError::OversizedRepeat
    );
    assert_eq!(
        check_err(r#""hello" * 9223372036854775807"#, "x"),
        EvalError::OversizedRepeat
    );
}

#[test]
fn test_combinators() {
    assert!(check("1 | 2", "2"));
    assert!(!check("1 & 2", "2"));
    assert!(check(r#"123 | "abc""#, "abc"));
    assert!(check(">=1 & <=10 & !5", "4"));
    assert!(!check(">=1 & <=10 & !5", "5"));
}

#[test]
fn test_operand_type_errors() {
    assert!(matches!(
        check_err(r#"123 + "hello""#, "1"),
        EvalError::TypeError(_)
    ));
    assert!(matches!(
        check_err(r#""test" * "test""#, "1"),
        EvalError::TypeError(_)
    ));
    assert!(matches!(check_err(r#">= "test""#, "1"), EvalError::TypeError(_)));
    assert!(matches!(check_err("- \"test\"", "1"), EvalError::TypeError(_)));
    let err = check_err("1 +", "1");
    assert_eq!(
        err.to_string(),
        "'+' requires a lhs and rhs that is a string/int/float"
    );
}

// ============================================================================
// Structure errors
// ============================================================================

#[test]
fn test_mismatched_parenthesis() {
    assert_eq!(check_err("(1", "1"), EvalError::MismatchedParenthesis);
    assert_eq!(check_err("((1+2)", "3"), EvalError::MismatchedParenthesis);
    assert_eq!(check_err("1)", "1"), EvalError::MismatchedParenthesis);
    assert_eq!(check_err(")", "1"), EvalError::MismatchedParenthesis);
}

#[test]
fn test_unbalanced_values() {
    let err = check_err("1 2", "1");
    assert_eq!(err, EvalError::Unbalanced(2));
    assert_eq!(
        err.to_string(),
        "got 2 values from evaluating the rule: expected only one"
    );

    assert_eq!(check_err("", "1"), EvalError::Unbalanced(0));
}

#[test]
fn test_literal_reparse_failures() {
    // these lex as single number tokens but do not survive decoding
    assert!(matches!(check_err("08", "1"), EvalError::Literal(_)));
    assert!(matches!(check_err("123e", "1"), EvalError::Literal(_)));
}

// ============================================================================
// Reuse
// ============================================================================

#[test]
fn test_rule_is_reusable() {
    let mut rule = Rule::parse(">=100/2 & <100").unwrap();
    assert!(rule.eval("50").unwrap());
    assert!(!rule.eval("49").unwrap());
    assert!(rule.eval("99").unwrap());
    assert!(!rule.eval("100").unwrap());
    assert!(!rule.eval("not a number at all").unwrap());
}

#[test]
fn test_rule_recovers_after_error() {
    let mut rule = Rule::parse(">=5").unwrap();
    assert!(rule.eval("12abc").is_err());
    assert!(rule.eval("7").unwrap());
    assert!(!rule.eval("3").unwrap());
}
