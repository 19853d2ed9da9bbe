//! Typed evaluation of textual configuration values.
//!
//! chemcomp configurations store many options as Python-flavoured text: booleans
//! spelled `True`/`False`, `None`, plain numbers, and astropy quantities such as
//! `5.2 * u.au` or `5.5 * u.g / u.cm**3`. This module evaluates exactly that subset
//! and nothing more: there are no function calls, no attribute access other than
//! `u.<unit>`, and no names other than the three keywords.
//!
//! Quantities collapse to their cgs magnitude, matching how chemcomp consumes them.
//!
//! # Grammar
//!
//! ```text
//! expr    = term (('+' | '-') term)*
//! term    = unary (('*' | '/') unary)*
//! unary   = ('-' | '+') unary | power
//! power   = primary ('**' unary)?
//! primary = number | string | 'True' | 'False' | 'None'
//!         | 'u' '.' unit | '(' expr ')'
//! ```

use super::value::ConfigValue;
use crate::core::units;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExprError {
    #[error("Expression is empty")]
    Empty,
    #[error("Unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },
    #[error("Unterminated string literal starting at offset {offset}")]
    UnterminatedString { offset: usize },
    #[error("Invalid number literal '{0}'")]
    InvalidNumber(String),
    #[error("Unexpected {found} at offset {offset}")]
    UnexpectedToken { found: String, offset: usize },
    #[error("Unexpected end of expression")]
    UnexpectedEnd,
    #[error("Unknown name '{0}'")]
    UnknownName(String),
    #[error("Unknown unit 'u.{0}'")]
    UnknownUnit(String),
    #[error("Unsupported operand types for {op}: '{lhs}' and '{rhs}'")]
    TypeMismatch {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },
    #[error("Bad operand type for unary {op}: '{operand}'")]
    UnaryTypeMismatch {
        op: &'static str,
        operand: &'static str,
    },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Integer overflow in '{op}'")]
    Overflow { op: &'static str },
    #[error("Expected a scalar or an expression string, found a {kind}")]
    NotScalar { kind: &'static str },
}

/// Evaluates `input` to a typed value; `None` evaluates to `Ok(None)`.
///
/// # Errors
///
/// Returns an [`ExprError`] if the text is not a valid expression of the supported
/// subset, names an unknown unit, or applies an operator to unsupported operands.
pub fn evaluate(input: &str) -> Result<Option<ConfigValue>, ExprError> {
    let tokens = Lexer::new(input).tokenize()?;
    if tokens.is_empty() {
        return Err(ExprError::Empty);
    }
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.parse_expr()?;
    if let Some(extra) = parser.peek() {
        return Err(ExprError::UnexpectedToken {
            found: extra.token.to_string(),
            offset: extra.offset,
        });
    }
    Ok(value.into_config_value())
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Int(i64),
    Float(f64),
    Str(String),
    Ident(String),
    Dot,
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Int(i) => write!(f, "number '{i}'"),
            Token::Float(x) => write!(f, "number '{x}'"),
            Token::Str(s) => write!(f, "string '{s}'"),
            Token::Ident(name) => write!(f, "name '{name}'"),
            Token::Dot => f.write_str("'.'"),
            Token::Plus => f.write_str("'+'"),
            Token::Minus => f.write_str("'-'"),
            Token::Star => f.write_str("'*'"),
            Token::DoubleStar => f.write_str("'**'"),
            Token::Slash => f.write_str("'/'"),
            Token::LParen => f.write_str("'('"),
            Token::RParen => f.write_str("')'"),
        }
    }
}

#[derive(Debug, Clone)]
struct Spanned {
    token: Token,
    offset: usize,
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn tokenize(mut self) -> Result<Vec<Spanned>, ExprError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let offset = self.pos;
            let Some(c) = self.peek() else {
                return Ok(tokens);
            };
            let token = match c {
                '0'..='9' => self.lex_number()?,
                '.' if self.peek_nth(1).is_some_and(|d| d.is_ascii_digit()) => self.lex_number()?,
                '\'' | '"' => self.lex_string(c)?,
                c if c.is_ascii_alphabetic() || c == '_' => self.lex_ident(),
                _ => {
                    self.advance();
                    match c {
                        '.' => Token::Dot,
                        '+' => Token::Plus,
                        '-' => Token::Minus,
                        '/' => Token::Slash,
                        '(' => Token::LParen,
                        ')' => Token::RParen,
                        '*' if self.peek() == Some('*') => {
                            self.advance();
                            Token::DoubleStar
                        }
                        '*' => Token::Star,
                        _ => return Err(ExprError::UnexpectedChar { ch: c, offset }),
                    }
                }
            };
            tokens.push(Spanned { token, offset });
        }
    }

    fn lex_number(&mut self) -> Result<Token, ExprError> {
        let start = self.pos;
        let mut is_float = false;
        self.eat_digits();
        if self.peek() == Some('.') {
            is_float = true;
            self.advance();
            self.eat_digits();
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let exponent_digit_at = match self.peek_nth(1) {
                Some('+' | '-') => 2,
                _ => 1,
            };
            if self
                .peek_nth(exponent_digit_at)
                .is_some_and(|d| d.is_ascii_digit())
            {
                is_float = true;
                for _ in 0..exponent_digit_at {
                    self.advance();
                }
                self.eat_digits();
            }
        }

        let raw = &self.input[start..self.pos];
        let text: String = raw.chars().filter(|&c| c != '_').collect();
        if is_float {
            text.parse()
                .map(Token::Float)
                .map_err(|_| ExprError::InvalidNumber(raw.to_string()))
        } else {
            text.parse()
                .map(Token::Int)
                .map_err(|_| ExprError::InvalidNumber(raw.to_string()))
        }
    }

    fn lex_string(&mut self, quote: char) -> Result<Token, ExprError> {
        let offset = self.pos;
        self.advance();
        let mut content = String::new();
        loop {
            match self.peek() {
                None => return Err(ExprError::UnterminatedString { offset }),
                Some(c) if c == quote => {
                    self.advance();
                    return Ok(Token::Str(content));
                }
                Some('\\') => {
                    self.advance();
                    let escaped = self
                        .peek()
                        .ok_or(ExprError::UnterminatedString { offset })?;
                    self.advance();
                    content.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        other => other,
                    });
                }
                Some(c) => {
                    self.advance();
                    content.push(c);
                }
            }
        }
    }

    fn lex_ident(&mut self) -> Token {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }
        Token::Ident(self.input[start..self.pos].to_string())
    }

    fn eat_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '_') {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(n)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Literal {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Literal {
    fn type_name(&self) -> &'static str {
        match self {
            Literal::None => "NoneType",
            Literal::Bool(_) => "bool",
            Literal::Int(_) => "int",
            Literal::Float(_) => "float",
            Literal::Text(_) => "str",
        }
    }

    fn into_config_value(self) -> Option<ConfigValue> {
        match self {
            Literal::None => None,
            Literal::Bool(b) => Some(ConfigValue::Bool(b)),
            Literal::Int(i) => Some(ConfigValue::Int(i)),
            Literal::Float(x) => Some(ConfigValue::Float(x)),
            Literal::Text(s) => Some(ConfigValue::Text(s)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "**",
        }
    }
}

fn apply_binary(op: BinaryOp, lhs: Literal, rhs: Literal) -> Result<Literal, ExprError> {
    use Literal::{Float, Int, Text};

    let overflow = || ExprError::Overflow { op: op.symbol() };
    match (op, lhs, rhs) {
        (BinaryOp::Add, Text(a), Text(b)) => Ok(Text(a + &b)),
        (BinaryOp::Add, Int(a), Int(b)) => a.checked_add(b).map(Int).ok_or_else(overflow),
        (BinaryOp::Sub, Int(a), Int(b)) => a.checked_sub(b).map(Int).ok_or_else(overflow),
        (BinaryOp::Mul, Int(a), Int(b)) => a.checked_mul(b).map(Int).ok_or_else(overflow),
        (BinaryOp::Pow, Int(a), Int(b)) if b >= 0 => u32::try_from(b)
            .ok()
            .and_then(|exp| a.checked_pow(exp))
            .map(Int)
            .ok_or_else(overflow),
        (op, lhs, rhs) => {
            let (Some(a), Some(b)) = (as_number(&lhs), as_number(&rhs)) else {
                return Err(ExprError::TypeMismatch {
                    op: op.symbol(),
                    lhs: lhs.type_name(),
                    rhs: rhs.type_name(),
                });
            };
            let result = match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                BinaryOp::Div if b == 0.0 => return Err(ExprError::DivisionByZero),
                BinaryOp::Div => a / b,
                BinaryOp::Pow if a == 0.0 && b < 0.0 => return Err(ExprError::DivisionByZero),
                BinaryOp::Pow => a.powf(b),
            };
            Ok(Float(result))
        }
    }
}

fn as_number(literal: &Literal) -> Option<f64> {
    match literal {
        Literal::Int(i) => Some(*i as f64),
        Literal::Float(x) => Some(*x),
        _ => None,
    }
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    fn parse_expr(&mut self) -> Result<Literal, ExprError> {
        let mut value = self.parse_term()?;
        loop {
            let op = match self.peek().map(|s| &s.token) {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => return Ok(value),
            };
            self.pos += 1;
            let rhs = self.parse_term()?;
            value = apply_binary(op, value, rhs)?;
        }
    }

    fn parse_term(&mut self) -> Result<Literal, ExprError> {
        let mut value = self.parse_unary()?;
        loop {
            let op = match self.peek().map(|s| &s.token) {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => return Ok(value),
            };
            self.pos += 1;
            let rhs = self.parse_unary()?;
            value = apply_binary(op, value, rhs)?;
        }
    }

    fn parse_unary(&mut self) -> Result<Literal, ExprError> {
        let op = match self.peek().map(|s| &s.token) {
            Some(Token::Minus) => "-",
            Some(Token::Plus) => "+",
            _ => return self.parse_power(),
        };
        self.pos += 1;
        match (op, self.parse_unary()?) {
            ("-", Literal::Int(i)) => i
                .checked_neg()
                .map(Literal::Int)
                .ok_or(ExprError::Overflow { op: "-" }),
            ("-", Literal::Float(x)) => Ok(Literal::Float(-x)),
            (_, value @ (Literal::Int(_) | Literal::Float(_))) => Ok(value),
            (op, other) => Err(ExprError::UnaryTypeMismatch {
                op,
                operand: other.type_name(),
            }),
        }
    }

    fn parse_power(&mut self) -> Result<Literal, ExprError> {
        let base = self.parse_primary()?;
        if matches!(self.peek().map(|s| &s.token), Some(Token::DoubleStar)) {
            self.pos += 1;
            let exponent = self.parse_unary()?;
            return apply_binary(BinaryOp::Pow, base, exponent);
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Literal, ExprError> {
        let Spanned { token, offset } = self.next().ok_or(ExprError::UnexpectedEnd)?;
        match token {
            Token::Int(i) => Ok(Literal::Int(i)),
            Token::Float(x) => Ok(Literal::Float(x)),
            Token::Str(s) => Ok(Literal::Text(s)),
            Token::LParen => {
                let inner = self.parse_expr()?;
                match self.next() {
                    Some(Spanned {
                        token: Token::RParen,
                        ..
                    }) => Ok(inner),
                    Some(other) => Err(ExprError::UnexpectedToken {
                        found: other.token.to_string(),
                        offset: other.offset,
                    }),
                    None => Err(ExprError::UnexpectedEnd),
                }
            }
            Token::Ident(name) => match name.as_str() {
                "True" => Ok(Literal::Bool(true)),
                "False" => Ok(Literal::Bool(false)),
                "None" => Ok(Literal::None),
                "u" => self.parse_unit(),
                _ => Err(ExprError::UnknownName(name)),
            },
            other => Err(ExprError::UnexpectedToken {
                found: other.to_string(),
                offset,
            }),
        }
    }

    fn parse_unit(&mut self) -> Result<Literal, ExprError> {
        match self.next() {
            Some(Spanned {
                token: Token::Dot, ..
            }) => {}
            Some(other) => {
                return Err(ExprError::UnexpectedToken {
                    found: other.token.to_string(),
                    offset: other.offset,
                });
            }
            None => return Err(ExprError::UnexpectedEnd),
        }
        match self.next() {
            Some(Spanned {
                token: Token::Ident(unit),
                ..
            }) => units::cgs_factor(&unit)
                .map(Literal::Float)
                .ok_or(ExprError::UnknownUnit(unit)),
            Some(other) => Err(ExprError::UnexpectedToken {
                found: other.token.to_string(),
                offset: other.offset,
            }),
            None => Err(ExprError::UnexpectedEnd),
        }
    }

    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Spanned> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::units::{AU_IN_CGS, MYR_IN_CGS};

    fn eval(input: &str) -> Option<ConfigValue> {
        evaluate(input).unwrap()
    }

    fn eval_f64(input: &str) -> f64 {
        eval(input).and_then(|v| v.as_f64()).unwrap()
    }

    #[test]
    fn keywords_evaluate_to_typed_values() {
        assert_eq!(eval("True"), Some(ConfigValue::Bool(true)));
        assert_eq!(eval(" False "), Some(ConfigValue::Bool(false)));
        assert_eq!(eval("None"), None);
    }

    #[test]
    fn number_literals_keep_integer_and_float_apart() {
        assert_eq!(eval("42"), Some(ConfigValue::Int(42)));
        assert_eq!(eval("0.1"), Some(ConfigValue::Float(0.1)));
        assert_eq!(eval("1e-3"), Some(ConfigValue::Float(1e-3)));
        assert_eq!(eval("2.5E+2"), Some(ConfigValue::Float(250.0)));
        assert_eq!(eval(".5"), Some(ConfigValue::Float(0.5)));
        assert_eq!(eval("5."), Some(ConfigValue::Float(5.0)));
        assert_eq!(eval("1_000"), Some(ConfigValue::Int(1000)));
        assert_eq!(eval("-3"), Some(ConfigValue::Int(-3)));
    }

    #[test]
    fn string_literals_support_both_quotes_and_escapes() {
        assert_eq!(eval("'lin'"), Some(ConfigValue::Text("lin".into())));
        assert_eq!(eval(r#""it's""#), Some(ConfigValue::Text("it's".into())));
        assert_eq!(eval(r"'a\'b'"), Some(ConfigValue::Text("a'b".into())));
        assert_eq!(eval("'ab' + 'cd'"), Some(ConfigValue::Text("abcd".into())));
    }

    #[test]
    fn arithmetic_follows_python_precedence() {
        assert_eq!(eval("1 + 2 * 3"), Some(ConfigValue::Int(7)));
        assert_eq!(eval("(1 + 2) * 3"), Some(ConfigValue::Int(9)));
        assert_eq!(eval("2 ** 3 ** 2"), Some(ConfigValue::Int(512)));
        assert_eq!(eval("-2 ** 2"), Some(ConfigValue::Int(-4)));
        assert_eq!(eval("2 ** -1"), Some(ConfigValue::Float(0.5)));
        assert_eq!(eval("7 / 2"), Some(ConfigValue::Float(3.5)));
        assert_eq!(eval("10 - 4 - 3"), Some(ConfigValue::Int(3)));
    }

    #[test]
    fn unit_references_resolve_to_cgs_magnitudes() {
        assert_eq!(eval_f64("5.2 * u.au"), 5.2 * AU_IN_CGS);
        assert_eq!(eval_f64("0.05 * u.Myr"), 0.05 * MYR_IN_CGS);
        assert!((eval_f64("5.5 * u.g / u.cm**3") - 5.5).abs() < 1e-12);
        assert!((eval_f64("1 * u.km") - 1.0e5).abs() < 1e-9);
    }

    #[test]
    fn unknown_names_and_units_are_rejected() {
        assert_eq!(
            evaluate("__import__"),
            Err(ExprError::UnknownName("__import__".into()))
        );
        assert_eq!(evaluate("true"), Err(ExprError::UnknownName("true".into())));
        assert_eq!(
            evaluate("3 * u.parsec"),
            Err(ExprError::UnknownUnit("parsec".into()))
        );
    }

    #[test]
    fn malformed_input_reports_position() {
        assert_eq!(evaluate(""), Err(ExprError::Empty));
        assert_eq!(evaluate("1 +"), Err(ExprError::UnexpectedEnd));
        assert_eq!(
            evaluate("1 2"),
            Err(ExprError::UnexpectedToken {
                found: "number '2'".into(),
                offset: 2
            })
        );
        assert_eq!(
            evaluate("1 ; 2"),
            Err(ExprError::UnexpectedChar { ch: ';', offset: 2 })
        );
        assert_eq!(
            evaluate("'open"),
            Err(ExprError::UnterminatedString { offset: 0 })
        );
        assert!(matches!(evaluate("(1 + 2"), Err(ExprError::UnexpectedEnd)));
        assert!(matches!(
            evaluate("u.(au)"),
            Err(ExprError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn operand_types_are_checked() {
        assert_eq!(
            evaluate("True + 1"),
            Err(ExprError::TypeMismatch {
                op: "+",
                lhs: "bool",
                rhs: "int"
            })
        );
        assert_eq!(
            evaluate("-'x'"),
            Err(ExprError::UnaryTypeMismatch {
                op: "-",
                operand: "str"
            })
        );
        assert!(matches!(
            evaluate("None * 2"),
            Err(ExprError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn division_by_zero_and_overflow_are_errors() {
        assert_eq!(evaluate("1 / 0"), Err(ExprError::DivisionByZero));
        assert_eq!(evaluate("0 ** -1"), Err(ExprError::DivisionByZero));
        assert_eq!(
            evaluate("9223372036854775807 + 1"),
            Err(ExprError::Overflow { op: "+" })
        );
        assert!(matches!(
            evaluate("99999999999999999999"),
            Err(ExprError::InvalidNumber(_))
        ));
    }
}
