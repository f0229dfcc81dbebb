//! Compile a rule and evaluate it against an input.

use super::CliError;
use crate::Rule;

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The rule expression to compile
    pub rule: String,
    /// The input text to validate
    pub input: Option<String>,
    /// Only validate rule syntax, don't evaluate
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckResult {
    /// Rule syntax is valid
    SyntaxValid,
    /// The rule was evaluated against the input
    Verdict(bool),
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let mut rule = Rule::parse(options.rule.as_str())?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let input = options.input.as_ref().ok_or(CliError::NoInput)?;
    let matched = rule.eval(input)?;
    Ok(CheckResult::Verdict(matched))
}
