use super::tokens::TokenKind;

/// Precedence and associativity of an operator token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpInfo {
    /// Binding strength; higher binds tighter
    pub prec: u8,
    /// Right-associative?
    pub rtl: bool,
}

impl TokenKind {
    /// Precedence table entry for this token.
    ///
    /// Comparison operators are right-associative so that chains such as
    /// `>=100 & <=200` group each comparison with its own literal. Tokens
    /// that are not operators get `(0, false)`, which makes the
    /// evaluator's pop loop treat them as binding weaker than everything.
    pub fn op_info(self) -> OpInfo {
        let (prec, rtl) = match self {
            TokenKind::Negate => (6, true),

            TokenKind::Multiply | TokenKind::Divide => (5, false),

            TokenKind::Plus | TokenKind::Minus => (4, false),

            TokenKind::Bang
            | TokenKind::Gt
            | TokenKind::Gte
            | TokenKind::Lt
            | TokenKind::Lte => (3, true),

            TokenKind::And => (2, false),
            TokenKind::Or => (1, false),

            _ => (0, false),
        };
        OpInfo { prec, rtl }
    }
}
