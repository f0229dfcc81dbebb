// tests/cli_tests.rs

use sloop::cli::{execute_check, token_listing, CheckOptions, CheckResult, CliError};

#[test]
fn test_execute_check_verdict() {
    let options = CheckOptions {
        rule: ">=100/2 & <100".to_string(),
        input: Some("50".to_string()),
        syntax_only: false,
    };
    assert!(matches!(
        execute_check(&options),
        Ok(CheckResult::Verdict(true))
    ));

    let options = CheckOptions {
        rule: ">=100/2 & <100".to_string(),
        input: Some("100".to_string()),
        syntax_only: false,
    };
    assert!(matches!(
        execute_check(&options),
        Ok(CheckResult::Verdict(false))
    ));
}

#[test]
fn test_execute_check_syntax_only() {
    let options = CheckOptions {
        rule: "<(1+2)*3".to_string(),
        input: None,
        syntax_only: true,
    };
    assert!(matches!(execute_check(&options), Ok(CheckResult::SyntaxValid)));
}

#[test]
fn test_execute_check_requires_input() {
    let options = CheckOptions {
        rule: ">=1".to_string(),
        input: None,
        syntax_only: false,
    };
    assert!(matches!(execute_check(&options), Err(CliError::NoInput)));
}

#[test]
fn test_execute_check_surfaces_errors() {
    let options = CheckOptions {
        rule: r#""hello world"#.to_string(),
        input: Some("x".to_string()),
        syntax_only: false,
    };
    let err = execute_check(&options).unwrap_err();
    assert!(matches!(err, CliError::Parse(_)));
    assert!(err.to_string().contains("unterminated string literal"));

    let options = CheckOptions {
        rule: "1/0".to_string(),
        input: Some("1".to_string()),
        syntax_only: false,
    };
    let err = execute_check(&options).unwrap_err();
    assert!(matches!(err, CliError::Eval(_)));
    assert!(err.to_string().contains("integer division by zero"));
}

#[test]
fn test_token_listing_plain() {
    let listing = token_listing(">=100", false).unwrap();
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains(">="));
    assert!(lines[1].contains("100"));
}

#[test]
fn test_token_listing_json() {
    let listing = token_listing(">=100 & <=200", true).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&listing).unwrap();
    let tokens = parsed.as_array().unwrap();
    assert_eq!(tokens.len(), 5);
    assert_eq!(tokens[0]["kind"], ">=");
    assert_eq!(tokens[1]["text"], "100");
    assert_eq!(tokens[1]["start"], 2);
    assert_eq!(tokens[1]["end"], 5);
}
