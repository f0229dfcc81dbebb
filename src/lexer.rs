use crate::ast::{Token, TokenKind};

// --- rune classifiers ---

pub(crate) fn is_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | ' ')
}

pub(crate) fn is_bin_digit(c: char) -> bool {
    c == '0' || c == '1'
}

pub(crate) fn is_octal_digit(c: char) -> bool {
    ('0'..='7').contains(&c)
}

pub(crate) fn is_decimal_digit(c: char) -> bool {
    c.is_ascii_digit()
}

pub(crate) fn is_hex_digit(c: char) -> bool {
    is_decimal_digit(c) || ('a'..='f').contains(&lower(c))
}

/// ASCII lower fold: force bit 0x20 on the scalar. Only used to
/// discriminate `[A-Za-z]` radix and exponent markers.
pub(crate) fn lower(c: char) -> char {
    char::from_u32(c as u32 | 0x20).unwrap_or(c)
}

/// A streaming tokenizer over a UTF-8 rule string.
///
/// `next_token` yields one [`Token`] at a time until it emits
/// [`TokenKind::Eof`] or [`TokenKind::Error`]; callers stop consuming at
/// either. Tokens carry byte ranges into the input rather than text, so
/// the lexer allocates nothing.
///
/// The lexer reads one Unicode scalar at a time and supports exactly one
/// scalar of backup. At end of input the recorded width is zero, which
/// makes a backup there a no-op and keeps the stream finite for rules
/// ending in `<` or `>`.
pub struct Lexer<'a> {
    input: &'a str,
    /// Byte offset where the current lexeme starts
    pos: usize,
    /// Byte offset of the next scalar to read
    cursor: usize,
    /// Width in bytes of the last scalar consumed; `None` right after a
    /// backup, when a second backup would be a lexer bug
    last_width: Option<usize>,
    /// Message for the last `Error` token emitted
    err: Option<&'static str>,
    /// Token queued out of band (backup misuse)
    pending: Option<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            pos: 0,
            cursor: 0,
            last_width: None,
            err: None,
            pending: None,
        }
    }

    /// Message for the last `Error` token, if any.
    pub fn error_message(&self) -> Option<&'static str> {
        self.err
    }

    fn bump(&mut self) -> Option<char> {
        match self.input[self.cursor..].chars().next() {
            Some(c) => {
                let width = c.len_utf8();
                self.cursor += width;
                self.last_width = Some(width);
                Some(c)
            }
            None => {
                self.last_width = Some(0);
                None
            }
        }
    }

    fn backup(&mut self) {
        match self.last_width.take() {
            Some(width) => self.cursor -= width,
            None => self.pending = Some(self.error_token("went back too far")),
        }
    }

    fn emit(&mut self, kind: TokenKind) -> Token {
        let tok = Token::new(kind, self.pos, self.cursor);
        self.pos = self.cursor;
        tok
    }

    fn error_token(&mut self, message: &'static str) -> Token {
        self.err = Some(message);
        Token::new(TokenKind::Error, self.pos, self.cursor)
    }

    /// Produce the next token.
    pub fn next_token(&mut self) -> Token {
        if let Some(tok) = self.pending.take() {
            return tok;
        }

        let mut r = self.bump();
        while let Some(c) = r {
            if !is_whitespace(c) {
                break;
            }
            self.pos = self.cursor;
            r = self.bump();
        }

        let c = match r {
            Some(c) => c,
            None => return self.emit(TokenKind::Eof),
        };

        if is_decimal_digit(c) || c == '.' {
            return self.lex_number(c);
        }

        match c {
            '\'' | '"' => self.lex_text(c),
            '>' => {
                if self.bump() == Some('=') {
                    self.emit(TokenKind::Gte)
                } else {
                    self.backup();
                    self.emit(TokenKind::Gt)
                }
            }
            '<' => {
                if self.bump() == Some('=') {
                    self.emit(TokenKind::Lte)
                } else {
                    self.backup();
                    self.emit(TokenKind::Lt)
                }
            }
            '!' => self.emit(TokenKind::Bang),
            '+' => self.emit(TokenKind::Plus),
            '-' => self.emit(TokenKind::Minus),
            '*' => self.emit(TokenKind::Multiply),
            '/' => self.emit(TokenKind::Divide),
            '(' => self.emit(TokenKind::LParen),
            ')' => self.emit(TokenKind::RParen),
            '&' => self.emit(TokenKind::And),
            '|' => self.emit(TokenKind::Or),
            _ => self.error_token("unexpected rune"),
        }
    }

    /// Consume `_` separators and digits matching `pred`, starting from
    /// the already-read scalar `r`. Leaves the cursor just before the
    /// first scalar matching neither and returns that scalar.
    fn scan_digits(
        &mut self,
        mut r: Option<char>,
        pred: fn(char) -> bool,
        digit: &mut bool,
        separator: &mut bool,
    ) -> Option<char> {
        loop {
            match r {
                Some('_') => {
                    *separator = true;
                    r = self.bump();
                }
                Some(c) if pred(c) => {
                    *digit = true;
                    r = self.bump();
                }
                None => break,
                Some(_) => {
                    self.backup();
                    break;
                }
            }
        }
        r
    }

    /// Lex a numeric literal starting at the already-consumed scalar
    /// `first`. The token span must re-parse with the evaluator's numeric
    /// parsers; classification (int vs float) happens here, value
    /// decoding happens at evaluation time.
    fn lex_number(&mut self, first: char) -> Token {
        let mut digit = false;
        let mut separator = false;
        let mut float = first == '.';
        let mut prefix: Option<char> = None;
        let mut r;

        if first == '0' {
            // the scalar after `0` is read as a radix-marker candidate;
            // without a marker, scanning restarts from the `0` itself
            prefix = self.bump().map(lower);
            match prefix {
                Some('x') => {
                    r = self.bump();
                    r = self.scan_digits(r, is_hex_digit, &mut digit, &mut separator);
                }
                Some('o') => {
                    r = self.bump();
                    r = self.scan_digits(r, is_octal_digit, &mut digit, &mut separator);
                }
                Some('b') => {
                    r = self.bump();
                    r = self.scan_digits(r, is_bin_digit, &mut digit, &mut separator);
                }
                _ => {
                    prefix = Some('0');
                    digit = true;
                    r = self.scan_digits(Some('0'), is_octal_digit, &mut digit, &mut separator);
                }
            }
        } else {
            r = self.scan_digits(Some(first), is_decimal_digit, &mut digit, &mut separator);
        }

        if !float {
            float = r == Some('.');
        }

        if float {
            if prefix == Some('o') || prefix == Some('b') {
                return self.error_token("invalid radix point");
            }

            self.bump(); // the radix point
            r = self.bump();

            r = match prefix {
                Some('x') => self.scan_digits(r, is_hex_digit, &mut digit, &mut separator),
                Some('0') => self.scan_digits(r, is_octal_digit, &mut digit, &mut separator),
                _ => self.scan_digits(r, is_decimal_digit, &mut digit, &mut separator),
            };
        }

        if !digit {
            return self.error_token("number has no digits");
        }

        let e = r.map(lower);

        if e == Some('e') || e == Some('p') {
            if e == Some('e') && prefix.is_some() && prefix != Some('0') {
                return self.error_token("'e' exponent requires decimal mantissa");
            }
            if e == Some('p') && prefix != Some('x') {
                return self.error_token("'p' exponent requires hexadecimal mantissa");
            }

            self.bump(); // the exponent marker
            r = self.bump();
            if r == Some('+') || r == Some('-') {
                r = self.bump();
            }

            float = true;

            self.scan_digits(r, is_decimal_digit, &mut digit, &mut separator);

            if !digit {
                return self.error_token("exponent has no digits");
            }
        } else if float && prefix == Some('x') {
            return self.error_token("hexadecimal mantissa requires a 'p' exponent");
        }

        if float {
            self.emit(TokenKind::Float)
        } else {
            self.emit(TokenKind::Int)
        }
    }

    /// Lex a quoted string literal; `quote` is the opening quote, which
    /// has already been consumed. The emitted span covers the interior
    /// bytes only. Escape sequences are validated here and decoded at
    /// evaluation time.
    fn lex_text(&mut self, quote: char) -> Token {
        self.pos = self.cursor; // drop the opening quote

        loop {
            match self.bump() {
                Some(c) if c == quote => {
                    self.backup();
                    let tok = self.emit(TokenKind::Text);
                    self.bump(); // the closing quote
                    self.pos = self.cursor;
                    return tok;
                }
                Some('\\') => {
                    if let Some(err) = self.lex_escape(quote) {
                        return err;
                    }
                }
                Some('\n') | None => {
                    return self.error_token("unterminated string literal");
                }
                Some(_) => {}
            }
        }
    }

    /// Validate one escape sequence; the backslash has been consumed.
    /// Returns the error token on failure.
    fn lex_escape(&mut self, quote: char) -> Option<Token> {
        let ok = match self.bump() {
            Some(c) if c == quote => true,
            Some('a' | 'b' | 'f' | 'n' | 'r' | 't' | 'v' | '\\') => true,
            Some('x') => self.scan_escape_digits(2, is_hex_digit),
            Some('u') => self.scan_escape_digits(4, is_hex_digit),
            Some('U') => self.scan_escape_digits(8, is_hex_digit),
            Some(c) if is_octal_digit(c) => self.scan_escape_digits(2, is_octal_digit),
            None => {
                return Some(self.error_token("reached eof while parsing escape sequence literal"))
            }
            Some(_) => false,
        };

        if ok {
            None
        } else {
            Some(self.error_token("got invalid escape sequence literal"))
        }
    }

    fn scan_escape_digits(&mut self, n: usize, pred: fn(char) -> bool) -> bool {
        for _ in 0..n {
            match self.bump() {
                Some(c) if pred(c) => {}
                _ => return false,
            }
        }
        true
    }
}

#[test]
fn test_operator_tokens() {
    let mut lexer = Lexer::new(">= <= > < ! & | + - * / ( )");
    let kinds = [
        TokenKind::Gte,
        TokenKind::Lte,
        TokenKind::Gt,
        TokenKind::Lt,
        TokenKind::Bang,
        TokenKind::And,
        TokenKind::Or,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Multiply,
        TokenKind::Divide,
        TokenKind::LParen,
        TokenKind::RParen,
    ];
    for kind in kinds {
        assert_eq!(lexer.next_token().kind, kind);
    }
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn test_number_classification() {
    let input = "0xff 0xfd 1234.0e5 .196 123";
    let mut lexer = Lexer::new(input);
    let kinds = [
        TokenKind::Int,
        TokenKind::Int,
        TokenKind::Float,
        TokenKind::Float,
        TokenKind::Int,
    ];
    for kind in kinds {
        let tok = lexer.next_token();
        assert_eq!(tok.kind, kind, "at {}", tok.lexeme(input));
    }
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn test_text_span_excludes_quotes() {
    let input = r#""hello" + 'world'"#;
    let mut lexer = Lexer::new(input);

    let tok = lexer.next_token();
    assert_eq!(tok.kind, TokenKind::Text);
    assert_eq!(tok.lexeme(input), "hello");

    assert_eq!(lexer.next_token().kind, TokenKind::Plus);

    let tok = lexer.next_token();
    assert_eq!(tok.kind, TokenKind::Text);
    assert_eq!(tok.lexeme(input), "world");
}

#[test]
fn test_trailing_comparison_terminates() {
    let mut lexer = Lexer::new("<");
    assert_eq!(lexer.next_token().kind, TokenKind::Lt);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn test_unterminated_string() {
    let mut lexer = Lexer::new("\"hello world");
    assert_eq!(lexer.next_token().kind, TokenKind::Error);
    assert_eq!(lexer.error_message(), Some("unterminated string literal"));
}
