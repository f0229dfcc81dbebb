//! Shunting-yard evaluation of a compiled rule.
//!
//! A rule is evaluated against one input string. The input is decoded
//! into a [`Value`] first; the token sequence is then reduced in a single
//! left-to-right pass over two stacks, applying each operator as the
//! precedence table pops it. Comparison operators (`> >= < <=` and `!`)
//! take the decoded input as their implicit left-hand side, which is what
//! lets `>=100 & <=200` read as "input between 100 and 200".

use std::cmp::Ordering;
use std::fmt;

use crate::ast::TokenKind;
use crate::parser::Rule;
use crate::value::{self, DecodeError, EscapeError, Value};

/// Cap on the byte length `*` may produce when repeating a string.
const MAX_REPEAT_BYTES: usize = 1 << 26;

/// Errors that can occur while evaluating a rule against an input.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// The input string failed to decode as a number
    Decode(DecodeError),
    /// A numeric literal in the rule failed to re-parse
    Literal(DecodeError),
    /// A string literal contained an invalid escape sequence
    Escape(EscapeError),
    /// An operator was applied to missing or mismatched operands
    TypeError(String),
    /// A parenthesis without a partner
    MismatchedParenthesis,
    /// Evaluation finished with this many values instead of one
    Unbalanced(usize),
    /// Integer division by zero
    DivisionByZero,
    /// `Text * Int` would produce an oversized string
    OversizedRepeat,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Decode(e) => write!(f, "{}", e),
            EvalError::Literal(e) => write!(f, "{}", e),
            EvalError::Escape(e) => write!(f, "failed to unescape string: {}", e),
            EvalError::TypeError(msg) => write!(f, "{}", msg),
            EvalError::MismatchedParenthesis => write!(f, "mismatched parenthesis"),
            EvalError::Unbalanced(n) => {
                write!(f, "got {} values from evaluating the rule: expected only one", n)
            }
            EvalError::DivisionByZero => write!(f, "integer division by zero"),
            EvalError::OversizedRepeat => write!(f, "'*' repeat result is too large"),
        }
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EvalError::Decode(e) | EvalError::Literal(e) => Some(e),
            EvalError::Escape(e) => Some(e),
            _ => None,
        }
    }
}

fn type_error(msg: impl Into<String>) -> EvalError {
    EvalError::TypeError(msg.into())
}

impl Rule {
    /// Evaluate the rule against `input` and return whether it matches.
    ///
    /// The input is decoded once ([`Value::decode`]) and compared against
    /// the single value the rule reduces to. Numeric and string literals
    /// are re-parsed from their token spans on every evaluation.
    pub fn eval(&mut self, input: &str) -> Result<bool, EvalError> {
        let input = Value::decode(input).map_err(EvalError::Decode)?;

        self.ops.clear();
        self.vals.clear();

        for i in 0..self.tokens.len() {
            let mut tok = self.tokens[i];
            match tok.kind {
                TokenKind::Int => {
                    let v = value::parse_int(tok.lexeme(&self.text)).map_err(EvalError::Literal)?;
                    self.vals.push(Value::Int(v));
                }
                TokenKind::Float => {
                    let v =
                        value::parse_float(tok.lexeme(&self.text)).map_err(EvalError::Literal)?;
                    self.vals.push(Value::Float(v));
                }
                TokenKind::Text => {
                    let s = value::unescape(tok.lexeme(&self.text)).map_err(EvalError::Escape)?;
                    self.vals.push(Value::Text(s));
                }
                TokenKind::LParen => self.ops.push(tok),
                TokenKind::RParen => loop {
                    let Some(op) = self.ops.pop() else {
                        return Err(EvalError::MismatchedParenthesis);
                    };
                    if op.kind == TokenKind::LParen {
                        break;
                    }
                    self.apply(&input, op.kind)?;
                },
                kind if kind.is_operator() => {
                    // `-` with no value to its left negates instead of
                    // subtracting
                    if kind == TokenKind::Minus
                        && (i == 0 || !self.tokens[i - 1].kind.is_value())
                    {
                        tok.kind = TokenKind::Negate;
                    }

                    while let Some(top) = self.ops.last().copied() {
                        if top.kind == TokenKind::LParen {
                            break;
                        }

                        let o1 = tok.kind.op_info();
                        let o2 = top.kind.op_info();
                        if o1.prec > o2.prec || (o1.prec == o2.prec && o1.rtl) {
                            break;
                        }

                        self.ops.pop();
                        self.apply(&input, top.kind)?;
                    }
                    self.ops.push(tok);
                }
                _ => {}
            }
        }

        while let Some(op) = self.ops.pop() {
            if op.kind == TokenKind::LParen {
                return Err(EvalError::MismatchedParenthesis);
            }
            self.apply(&input, op.kind)?;
        }

        if self.vals.len() != 1 {
            return Err(EvalError::Unbalanced(self.vals.len()));
        }

        Ok(input.matches(&self.vals[0]))
    }

    /// Apply one operator to the value stack.
    fn apply(&mut self, input: &Value, op: TokenKind) -> Result<(), EvalError> {
        match op {
            TokenKind::Negate => {
                let Some(rhs) = self.vals.last_mut() else {
                    return Err(type_error("unary '-' must have a rhs that is an int or float"));
                };
                match rhs {
                    Value::Int(v) => *v = v.wrapping_neg(),
                    Value::Float(v) => *v = -*v,
                    _ => return Err(type_error("unary '-' not paired with int or float")),
                }
            }

            TokenKind::Bang => {
                let Some(rhs) = self.vals.last_mut() else {
                    return Err(type_error(
                        "'!' requires a rhs that is a string/bool/int/float",
                    ));
                };
                let verdict = !input.matches(rhs);
                *rhs = Value::Bool(verdict);
            }

            TokenKind::Gt | TokenKind::Gte | TokenKind::Lt | TokenKind::Lte => {
                let Some(rhs) = self.vals.last_mut() else {
                    return Err(type_error(format!(
                        "'{}' must have a rhs that is an int or float",
                        op
                    )));
                };
                if !rhs.is_numeric() {
                    return Err(type_error(format!("'{}' not paired with int or float", op)));
                }
                let verdict = compare_input(input, rhs, op);
                *rhs = Value::Bool(verdict);
            }

            TokenKind::Plus => {
                let (lhs, rhs) =
                    self.pop_pair("'+' requires a lhs and rhs that is a string/int/float")?;
                let result = match (lhs, rhs) {
                    (Value::Int(l), Value::Int(r)) => Value::Int(l.wrapping_add(r)),
                    (Value::Int(l), Value::Float(r)) => Value::Float(l as f64 + r),
                    (Value::Float(l), Value::Int(r)) => Value::Float(l + r as f64),
                    (Value::Float(l), Value::Float(r)) => Value::Float(l + r),
                    (Value::Text(l), Value::Text(r)) => {
                        let mut s = String::with_capacity(l.len() + r.len());
                        s.push_str(&l);
                        s.push_str(&r);
                        Value::Text(s)
                    }
                    (Value::Int(_), _) => {
                        return Err(type_error("lhs is int, rhs for '+' must be an int or float"))
                    }
                    (Value::Float(_), _) => {
                        return Err(type_error(
                            "lhs is float, rhs for '+' must be an int or float",
                        ))
                    }
                    (Value::Text(_), _) => {
                        return Err(type_error("lhs is string, rhs for '+' must be a string"))
                    }
                    (Value::Bool(_), _) => {
                        return Err(type_error("lhs and rhs for '+' must be int or float"))
                    }
                };
                self.vals.push(result);
            }

            TokenKind::Minus => {
                let (lhs, rhs) =
                    self.pop_pair("'-' requires a lhs and rhs that is an int or float")?;
                let result = match (lhs, rhs) {
                    (Value::Int(l), Value::Int(r)) => Value::Int(l.wrapping_sub(r)),
                    (Value::Int(l), Value::Float(r)) => Value::Float(l as f64 - r),
                    (Value::Float(l), Value::Int(r)) => Value::Float(l - r as f64),
                    (Value::Float(l), Value::Float(r)) => Value::Float(l - r),
                    (Value::Int(_), _) => {
                        return Err(type_error("lhs is int, rhs for '-' must be an int or float"))
                    }
                    (Value::Float(_), _) => {
                        return Err(type_error(
                            "lhs is float, rhs for '-' must be an int or float",
                        ))
                    }
                    _ => return Err(type_error("lhs and rhs for '-' must be int or float")),
                };
                self.vals.push(result);
            }

            TokenKind::Multiply => {
                let (lhs, rhs) = self.pop_pair(
                    "'*' requires a lhs that is a string/int/float, and a rhs that is an int/float",
                )?;
                let result = match (lhs, rhs) {
                    (Value::Int(l), Value::Int(r)) => Value::Int(l.wrapping_mul(r)),
                    (Value::Int(l), Value::Float(r)) => Value::Float(l as f64 * r),
                    (Value::Float(l), Value::Int(r)) => Value::Float(l * r as f64),
                    (Value::Float(l), Value::Float(r)) => Value::Float(l * r),
                    (Value::Text(l), Value::Int(r)) => {
                        // negative counts produce the empty string
                        let count = if r <= 0 {
                            0
                        } else {
                            usize::try_from(r).map_err(|_| EvalError::OversizedRepeat)?
                        };
                        match l.len().checked_mul(count) {
                            Some(total) if total <= MAX_REPEAT_BYTES => Value::Text(l.repeat(count)),
                            _ => return Err(EvalError::OversizedRepeat),
                        }
                    }
                    (Value::Int(_), _) => {
                        return Err(type_error("lhs is int, rhs for '*' must be an int or float"))
                    }
                    (Value::Float(_), _) => {
                        return Err(type_error(
                            "lhs is float, rhs for '*' must be an int or float",
                        ))
                    }
                    (Value::Text(_), _) => {
                        return Err(type_error("lhs is string, rhs for '*' must be an int"))
                    }
                    (Value::Bool(_), _) => {
                        return Err(type_error("lhs and rhs for '*' must be int or float or string"))
                    }
                };
                self.vals.push(result);
            }

            TokenKind::Divide => {
                let (lhs, rhs) =
                    self.pop_pair("'/' requires a lhs and rhs that is an int or float")?;
                let result = match (lhs, rhs) {
                    (Value::Int(l), Value::Int(r)) => {
                        if r == 0 {
                            return Err(EvalError::DivisionByZero);
                        }
                        Value::Int(l.wrapping_div(r))
                    }
                    (Value::Int(l), Value::Float(r)) => Value::Float(l as f64 / r),
                    (Value::Float(l), Value::Int(r)) => Value::Float(l / r as f64),
                    (Value::Float(l), Value::Float(r)) => Value::Float(l / r),
                    (Value::Int(_), _) => {
                        return Err(type_error("lhs is int, rhs for '/' must be an int or float"))
                    }
                    (Value::Float(_), _) => {
                        return Err(type_error(
                            "lhs is float, rhs for '/' must be an int or float",
                        ))
                    }
                    _ => return Err(type_error("lhs and rhs for '/' must be int or float")),
                };
                self.vals.push(result);
            }

            TokenKind::And | TokenKind::Or => {
                let (lhs, rhs) = self.pop_pair(format!(
                    "'{}' requires a lhs and rhs that is a string/bool/int/float",
                    op
                ))?;
                let l = input.matches(&lhs);
                let r = input.matches(&rhs);
                let verdict = if op == TokenKind::And { l && r } else { l || r };
                self.vals.push(Value::Bool(verdict));
            }

            _ => {}
        }

        Ok(())
    }

    fn pop_pair(&mut self, missing: impl Into<String>) -> Result<(Value, Value), EvalError> {
        let rhs = self.vals.pop();
        let lhs = self.vals.pop();
        match (lhs, rhs) {
            (Some(lhs), Some(rhs)) => Ok((lhs, rhs)),
            _ => Err(EvalError::TypeError(missing.into())),
        }
    }
}

/// Compare the decoded input (lhs) against a rule value (rhs). Non-numeric
/// inputs and NaN never satisfy a comparison.
fn compare_input(input: &Value, rhs: &Value, op: TokenKind) -> bool {
    let ord = match (input, rhs) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
        (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        _ => None,
    };

    match ord {
        Some(ord) => match op {
            TokenKind::Gt => ord == Ordering::Greater,
            TokenKind::Gte => ord != Ordering::Less,
            TokenKind::Lt => ord == Ordering::Less,
            TokenKind::Lte => ord != Ordering::Greater,
            _ => false,
        },
        None => false,
    }
}
