//! Sloop is a small rule-expression engine for validating text input.
//!
//! A rule is a C-like expression over integer, float, and string
//! literals: arithmetic (`+ - * /`), unary minus and `!`, comparisons
//! against the input (`> >= < <=`), boolean combinators (`&`, `|`), and
//! parentheses. Compiling a rule tokenises it once; evaluating it reduces
//! the token stream against one input string and yields a match verdict.
//!
//! ```
//! use sloop::Rule;
//!
//! let mut rule = Rule::parse(r#"123 | "hello " + "world""#).unwrap();
//! assert!(rule.eval("hello world").unwrap());
//! assert!(rule.eval("123").unwrap());
//! assert!(!rule.eval("456").unwrap());
//! ```
//!
//! Comparisons take the input as their implicit left-hand side, so
//! `>=100 & <=200` means "the input is between 100 and 200".

pub mod ast;
pub mod cli;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod value;

pub use ast::{Token, TokenKind};
pub use evaluator::EvalError;
pub use lexer::Lexer;
pub use parser::{ParseError, Rule};
pub use value::Value;
