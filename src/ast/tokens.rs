use std::fmt;

/// The kind of a lexical token.
///
/// Most kinds map one-to-one onto a rule-text glyph. Two are synthetic:
/// [`TokenKind::Eof`] terminates every token stream, and
/// [`TokenKind::Error`] marks the offending lexeme when lexing fails (the
/// lexer keeps the matching message alongside).
///
/// [`TokenKind::Negate`] is never produced by the lexer. The evaluator
/// retags a [`TokenKind::Minus`] in unary position to `Negate` so the
/// operator table can give the two meanings of `-` different precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Lexing failed at this lexeme
    Error,
    /// End of the rule text
    Eof,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `!`
    Bang,
    /// `&`
    And,
    /// `|`
    Or,
    /// `+`
    Plus,
    /// `-` in binary position
    Minus,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `-` in unary position (evaluator-internal, see [`TokenKind`])
    Negate,
    /// Quoted string literal; the span excludes the quotes
    Text,
    /// Integer literal, re-parsed from its span at evaluation time
    Int,
    /// Float literal, re-parsed from its span at evaluation time
    Float,
    /// `(`
    LParen,
    /// `)`
    RParen,
}

impl TokenKind {
    /// Whether this token carries a value (a literal).
    pub fn is_value(self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Float | TokenKind::Text)
    }

    /// Whether this token is an operator the evaluator applies.
    pub fn is_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Gt
                | TokenKind::Gte
                | TokenKind::Lt
                | TokenKind::Lte
                | TokenKind::Bang
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Multiply
                | TokenKind::Divide
                | TokenKind::Negate
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Error => "error",
            TokenKind::Eof => "eof",
            TokenKind::Gt => ">",
            TokenKind::Gte => ">=",
            TokenKind::Lt => "<",
            TokenKind::Lte => "<=",
            TokenKind::Bang => "!",
            TokenKind::And => "&",
            TokenKind::Or => "|",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Multiply => "*",
            TokenKind::Divide => "/",
            TokenKind::Negate => "-",
            TokenKind::Text => "text",
            TokenKind::Int => "int",
            TokenKind::Float => "float",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
        };
        f.write_str(s)
    }
}

/// A lexical token: a kind plus the byte range it spans in the rule text.
///
/// Tokens never own text. Numeric and string literals are re-parsed from
/// their span against the rule they were lexed from, so a `Token` is only
/// meaningful together with that rule text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first byte of the lexeme
    pub start: usize,
    /// Byte offset one past the last byte of the lexeme
    pub end: usize,
}

impl Token {
    pub fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Token { kind, start, end }
    }

    /// The slice of `input` this token spans.
    pub fn lexeme<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start..self.end]
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}..{}", self.kind, self.start, self.end)
    }
}
