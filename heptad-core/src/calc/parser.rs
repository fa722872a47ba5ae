//! Recursive-descent parser for the arithmetic grammar
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := number | '(' ')' | '(' expr ')'
//! number  := digits ['.' digits*] | '.' digits
//! ```
//!
//! Whitespace is skipped everywhere, including inside number literals.
//! `**` and `//` are not part of the grammar.

use core::iter::Peekable;
use core::str::Chars;

use super::error::EvalError;
use super::number::Number;

/// Deepest nesting of parentheses and unary signs accepted
pub const MAX_DEPTH: u8 = 64;

/// Parsed value; `()` is a value but not a number
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Num(Number),
    Empty,
}

impl Value {
    fn number(self) -> Result<Number, EvalError> {
        match self {
            Value::Num(n) => Ok(n),
            Value::Empty => Err(EvalError::MalformedExpression),
        }
    }
}

/// Parse and evaluate a whole expression
pub fn parse(input: &str) -> Result<Value, EvalError> {
    let mut parser = Parser {
        chars: input.chars().peekable(),
        depth: 0,
    };
    let value = parser.expr()?;
    match parser.peek() {
        None => Ok(value),
        Some(_) => Err(EvalError::MalformedExpression),
    }
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
    depth: u8,
}

impl Parser<'_> {
    fn peek(&mut self) -> Option<char> {
        while let Some(&c) = self.chars.peek() {
            if !c.is_whitespace() {
                return Some(c);
            }
            self.chars.next();
        }
        None
    }

    fn bump(&mut self) -> Option<char> {
        self.peek()?;
        self.chars.next()
    }

    fn descend(&mut self) -> Result<(), EvalError> {
        if self.depth >= MAX_DEPTH {
            return Err(EvalError::MalformedExpression);
        }
        self.depth += 1;
        Ok(())
    }

    fn expr(&mut self) -> Result<Value, EvalError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(c @ ('+' | '-')) => c,
                _ => return Ok(lhs),
            };
            self.bump();
            let rhs = self.term()?.number()?;
            let lhs_num = lhs.number()?;
            lhs = Value::Num(if op == '+' { lhs_num + rhs } else { lhs_num - rhs });
        }
    }

    fn term(&mut self) -> Result<Value, EvalError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(c @ ('*' | '/')) => c,
                _ => return Ok(lhs),
            };
            self.bump();
            if self.peek() == Some(op) {
                return Err(EvalError::MalformedExpression);
            }
            let rhs = self.unary()?.number()?;
            let lhs_num = lhs.number()?;
            lhs = Value::Num(if op == '*' {
                lhs_num * rhs
            } else {
                lhs_num.checked_div(rhs)?
            });
        }
    }

    fn unary(&mut self) -> Result<Value, EvalError> {
        match self.peek() {
            Some(c @ ('+' | '-')) => {
                self.bump();
                self.descend()?;
                let operand = self.unary()?.number()?;
                self.depth -= 1;
                Ok(Value::Num(if c == '-' { -operand } else { operand }))
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Value, EvalError> {
        match self.peek() {
            Some('(') => {
                self.bump();
                if self.peek() == Some(')') {
                    self.bump();
                    return Ok(Value::Empty);
                }
                self.descend()?;
                let inner = self.expr()?;
                self.depth -= 1;
                match self.bump() {
                    Some(')') => Ok(inner),
                    _ => Err(EvalError::MalformedExpression),
                }
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number().map(Value::Num),
            _ => Err(EvalError::MalformedExpression),
        }
    }

    /// Read a decimal literal
    ///
    /// Up to 19 significant digits are kept exactly; further integer
    /// digits only scale the value and further fraction digits are dropped.
    /// An integer with a leading zero (`007`) is rejected unless every
    /// digit is zero; `07.5` and `00` are fine.
    fn number(&mut self) -> Result<Number, EvalError> {
        let mut mantissa: u64 = 0;
        let mut scale: i32 = 0;
        let mut digits = 0usize;
        let mut point = false;
        let mut leading_zero = false;

        while let Some(c) = self.peek() {
            if let Some(d) = c.to_digit(10) {
                if digits == 0 && !point {
                    leading_zero = d == 0;
                }
                digits += 1;
                match mantissa.checked_mul(10).and_then(|m| m.checked_add(d as u64)) {
                    Some(m) => {
                        mantissa = m;
                        if point {
                            scale -= 1;
                        }
                    }
                    None if !point => scale = scale.saturating_add(1),
                    None => {}
                }
            } else if c == '.' && !point {
                point = true;
            } else {
                break;
            }
            self.bump();
        }

        if digits == 0 || (leading_zero && !point && mantissa != 0) {
            return Err(EvalError::MalformedExpression);
        }

        if !point && scale == 0 {
            if let Ok(i) = i64::try_from(mantissa) {
                return Ok(Number::Int(i));
            }
        }

        let value = if scale >= 0 {
            mantissa as f64 * pow10(scale)
        } else {
            mantissa as f64 / pow10(-scale)
        };
        Ok(Number::Real(value))
    }
}

fn pow10(exp: i32) -> f64 {
    let mut p = 1.0f64;
    for _ in 0..exp.min(400) {
        p *= 10.0;
    }
    p
}
