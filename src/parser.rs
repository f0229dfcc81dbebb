use std::fmt;

use crate::ast::{Token, TokenKind};
use crate::lexer::Lexer;
use crate::value::Value;

/// Error produced when a rule fails to compile.
///
/// Carries the byte range of the offending lexeme so a host can point at
/// it in the rule text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Byte offset of the first byte of the offending lexeme
    pub start: usize,
    /// Byte offset one past the last byte of the offending lexeme
    pub end: usize,
    pub message: &'static str,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} error parsing rule: {}",
            self.start, self.end, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// A compiled rule: the rule text plus its materialised token sequence.
///
/// Parsing happens once; each [`Rule::eval`](crate::Rule::eval) walks the
/// token sequence again, re-using two internal stacks. The `&mut self`
/// receiver is what keeps a single rule from being evaluated from two
/// threads at once; distinct rules are fully independent.
///
/// # Examples
///
/// ```
/// use sloop::Rule;
///
/// let mut rule = Rule::parse(">=100/2 & <100").unwrap();
/// assert!(rule.eval("50").unwrap());
/// assert!(!rule.eval("100").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Rule {
    pub(crate) text: String,
    pub(crate) tokens: Vec<Token>,
    pub(crate) ops: Vec<Token>,
    pub(crate) vals: Vec<Value>,
}

impl Rule {
    /// Compile `rule` into an evaluatable [`Rule`].
    ///
    /// The rule text is tokenised eagerly; the first lexing failure is
    /// returned as a [`ParseError`] spanning the offending lexeme.
    pub fn parse(rule: impl Into<String>) -> Result<Rule, ParseError> {
        let text = rule.into();
        let mut tokens = Vec::new();

        let mut lexer = Lexer::new(&text);
        loop {
            let tok = lexer.next_token();
            match tok.kind {
                TokenKind::Eof => break,
                TokenKind::Error => {
                    return Err(ParseError {
                        start: tok.start,
                        end: tok.end,
                        message: lexer.error_message().unwrap_or("invalid token"),
                    });
                }
                _ => tokens.push(tok),
            }
        }

        Ok(Rule {
            text,
            tokens,
            ops: Vec::with_capacity(16),
            vals: Vec::with_capacity(16),
        })
    }

    /// Compile a rule supplied as raw bytes.
    ///
    /// Equivalent to [`Rule::parse`] once the bytes check out as UTF-8;
    /// otherwise the error spans the first invalid byte onward.
    pub fn parse_bytes(rule: &[u8]) -> Result<Rule, ParseError> {
        match std::str::from_utf8(rule) {
            Ok(s) => Rule::parse(s),
            Err(e) => Err(ParseError {
                start: e.valid_up_to(),
                end: rule.len(),
                message: "rule is not valid utf-8",
            }),
        }
    }

    /// The original rule text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The materialised token sequence.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}
