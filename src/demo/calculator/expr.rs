//! Integer arithmetic expressions: parsing, evaluation and a JSON view of the tree.
//!
//! Grammar (whitespace ignored everywhere):
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := factor (('*' | '/') factor)*
//! factor     := digit+ | '(' expression ')'
//! ```

use std::fmt;

use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Number(i64),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    /// A parenthesized sub-expression.
    Group(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// Input ended where a value or `)` was expected.
    Incomplete,
    /// A character that cannot appear here. `position` counts non-whitespace characters.
    UnexpectedChar { ch: char, position: usize },
    DivisionByZero,
    /// A literal or intermediate result left the 64-bit range.
    Overflow,
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::Incomplete => write!(f, "input wasn't complete"),
            CalcError::UnexpectedChar { ch, position } => {
                write!(f, "unexpected character '{ch}' at position {position}")
            }
            CalcError::DivisionByZero => write!(f, "division by zero"),
            CalcError::Overflow => write!(f, "arithmetic overflow"),
        }
    }
}

impl std::error::Error for CalcError {}

impl Expr {
    pub fn parse(input: &str) -> Result<Expr, CalcError> {
        let mut parser = Parser {
            chars: input.chars().filter(|c| !c.is_whitespace()).collect(),
            pos: 0,
        };
        let expr = parser.expression()?;
        match parser.peek() {
            None => Ok(expr),
            Some(ch) => Err(parser.unexpected(ch)),
        }
    }

    pub fn eval(&self) -> Result<i64, CalcError> {
        match self {
            Expr::Number(n) => Ok(*n),
            Expr::Add(l, r) => l.eval()?.checked_add(r.eval()?).ok_or(CalcError::Overflow),
            Expr::Sub(l, r) => l.eval()?.checked_sub(r.eval()?).ok_or(CalcError::Overflow),
            Expr::Mul(l, r) => l.eval()?.checked_mul(r.eval()?).ok_or(CalcError::Overflow),
            Expr::Div(l, r) => {
                let divisor = r.eval()?;
                if divisor == 0 {
                    return Err(CalcError::DivisionByZero);
                }
                l.eval()?.checked_div(divisor).ok_or(CalcError::Overflow)
            }
            Expr::Group(inner) => inner.eval(),
        }
    }

    /// Tree as JSON: numbers stay numbers, operators become
    /// `{"Operation", "Left", "Right"}` and groups `{"Parent"}`.
    pub fn to_json(&self) -> Value {
        let binary = |symbol: &str, l: &Expr, r: &Expr| {
            json!({ "Operation": symbol, "Left": l.to_json(), "Right": r.to_json() })
        };
        match self {
            Expr::Number(n) => json!(n),
            Expr::Add(l, r) => binary("+", l, r),
            Expr::Sub(l, r) => binary("-", l, r),
            Expr::Mul(l, r) => binary("*", l, r),
            Expr::Div(l, r) => binary("/", l, r),
            Expr::Group(inner) => json!({ "Parent": inner.to_json() }),
        }
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn unexpected(&self, ch: char) -> CalcError {
        CalcError::UnexpectedChar {
            ch,
            position: self.pos,
        }
    }

    fn expression(&mut self) -> Result<Expr, CalcError> {
        let mut left = self.term()?;
        while let Some(op @ ('+' | '-')) = self.peek() {
            self.pos += 1;
            let right = Box::new(self.term()?);
            left = if op == '+' {
                Expr::Add(Box::new(left), right)
            } else {
                Expr::Sub(Box::new(left), right)
            };
        }
        Ok(left)
    }

    fn term(&mut self) -> Result<Expr, CalcError> {
        let mut left = self.factor()?;
        while let Some(op @ ('*' | '/')) = self.peek() {
            self.pos += 1;
            let right = Box::new(self.factor()?);
            left = if op == '*' {
                Expr::Mul(Box::new(left), right)
            } else {
                Expr::Div(Box::new(left), right)
            };
        }
        Ok(left)
    }

    fn factor(&mut self) -> Result<Expr, CalcError> {
        match self.peek() {
            None => Err(CalcError::Incomplete),
            Some('(') => {
                self.pos += 1;
                let inner = self.expression()?;
                match self.peek() {
                    Some(')') => {
                        self.pos += 1;
                        Ok(Expr::Group(Box::new(inner)))
                    }
                    None => Err(CalcError::Incomplete),
                    Some(ch) => Err(self.unexpected(ch)),
                }
            }
            Some(ch) if ch.is_ascii_digit() => self.number(),
            Some(ch) => Err(self.unexpected(ch)),
        }
    }

    fn number(&mut self) -> Result<Expr, CalcError> {
        let mut value: i64 = 0;
        while let Some(digit) = self.peek().and_then(|c| c.to_digit(10)) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(i64::from(digit)))
                .ok_or(CalcError::Overflow)?;
            self.pos += 1;
        }
        Ok(Expr::Number(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc(input: &str) -> Result<i64, CalcError> {
        Expr::parse(input)?.eval()
    }

    #[test]
    fn basic_arithmetic() {
        assert_eq!(calc("2+2"), Ok(4));
        assert_eq!(calc(" 12 * 3 "), Ok(36));
        assert_eq!(calc("7/2"), Ok(3));
    }

    #[test]
    fn precedence_and_grouping() {
        assert_eq!(calc("2+3*4"), Ok(14));
        assert_eq!(calc("(2+3)*4"), Ok(20));
        assert_eq!(calc("((1))"), Ok(1));
    }

    #[test]
    fn operators_are_left_associative() {
        assert_eq!(calc("10-2-3"), Ok(5));
        assert_eq!(calc("100/10/5"), Ok(2));
    }

    #[test]
    fn incomplete_input() {
        assert_eq!(calc(""), Err(CalcError::Incomplete));
        assert_eq!(calc("2+"), Err(CalcError::Incomplete));
        assert_eq!(calc("(1+2"), Err(CalcError::Incomplete));
    }

    #[test]
    fn unexpected_characters_report_position() {
        assert_eq!(
            calc("2 + x"),
            Err(CalcError::UnexpectedChar { ch: 'x', position: 2 })
        );
        assert_eq!(calc("1)"), Err(CalcError::UnexpectedChar { ch: ')', position: 1 }));
        assert_eq!(calc("2 3"), Err(CalcError::UnexpectedChar { ch: '3', position: 1 }));
    }

    #[test]
    fn division_by_zero_and_overflow() {
        assert_eq!(calc("1/0"), Err(CalcError::DivisionByZero));
        assert_eq!(calc("1/(2-2)"), Err(CalcError::DivisionByZero));
        assert_eq!(calc("9223372036854775807+1"), Err(CalcError::Overflow));
        assert_eq!(calc("99999999999999999999"), Err(CalcError::Overflow));
    }

    #[test]
    fn tree_serializes_to_json() {
        let expr = Expr::parse("(1+2)*3").unwrap();
        assert_eq!(
            expr.to_json(),
            json!({
                "Operation": "*",
                "Left": { "Parent": { "Operation": "+", "Left": 1, "Right": 2 } },
                "Right": 3
            })
        );
    }
}
