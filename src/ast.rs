//! Token and operator definitions for the rule language.
//!
//! A rule is a single expression over literals; there is no tree-shaped
//! AST. A parsed rule is the flat sequence of [`Token`]s the lexer
//! produced, and the evaluator reduces that sequence directly with an
//! operator stack and a value stack. This module defines the pieces both
//! sides agree on:
//!
//! - **[tokens]** - token kinds and the byte spans they cover
//! - **[operators]** - the precedence/associativity table driving the
//!   evaluator's stack discipline
//!
//! ## The shape of a rule
//!
//! ```text
//! >=100/2 & <100
//! ```
//!
//! lexes to `Gte Int Divide Int And Lt Int`, and the operator table makes
//! the comparisons bind their own literal before `&` combines the two
//! verdicts.

pub mod operators;
pub mod tokens;

pub use operators::OpInfo;
pub use tokens::{Token, TokenKind};
