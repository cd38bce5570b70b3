//! Arithmetic evaluation: `{m:1+1}` -> `2`.

use super::Block;
use crate::error::EngineError;
use crate::interpreter::Context;
use crate::tag::Tag;

/// Evaluates the payload as an arithmetic expression. Supports `+ - * / % ^`,
/// parentheses and unary minus. Integral results render without a decimal
/// point.
pub struct MathBlock;

impl Block for MathBlock {
    fn will_accept(&self, tag: &Tag<'_>) -> bool {
        tag.declares_any(&["math", "m", "+", "calc"])
    }

    fn process(&self, tag: &Tag<'_>, _ctx: &mut Context) -> Result<Option<String>, EngineError> {
        let expr = tag.payload.unwrap_or("").trim();
        if expr.is_empty() {
            return Ok(None);
        }
        let result = evaluate(expr).map_err(|reason| EngineError::Math {
            expr: expr.to_string(),
            reason,
        })?;
        if !result.is_finite() {
            return Err(EngineError::Math {
                expr: expr.to_string(),
                reason: "non-finite result".to_string(),
            });
        }
        Ok(Some(format_number(result)))
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Recursive-descent expression evaluator over f64.
fn evaluate(expr: &str) -> Result<f64, String> {
    let mut parser = Parser {
        bytes: expr.as_bytes(),
        pos: 0,
    };
    let value = parser.expression()?;
    parser.skip_whitespace();
    if parser.pos != parser.bytes.len() {
        return Err(format!("unexpected input at byte {}", parser.pos));
    }
    Ok(value)
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_whitespace();
        self.bytes.get(self.pos).copied()
    }

    fn expression(&mut self) -> Result<f64, String> {
        let mut value = self.term()?;
        while let Some(op @ (b'+' | b'-')) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == b'+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, String> {
        let mut value = self.power()?;
        while let Some(op @ (b'*' | b'/' | b'%')) = self.peek() {
            self.pos += 1;
            let rhs = self.power()?;
            value = match op {
                b'*' => value * rhs,
                b'/' => value / rhs,
                _ => value % rhs,
            };
        }
        Ok(value)
    }

    // Right-associative exponentiation.
    fn power(&mut self) -> Result<f64, String> {
        let base = self.unary()?;
        if self.peek() == Some(b'^') {
            self.pos += 1;
            let exponent = self.power()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn unary(&mut self) -> Result<f64, String> {
        if self.peek() == Some(b'-') {
            self.pos += 1;
            return Ok(-self.unary()?);
        }
        self.atom()
    }

    fn atom(&mut self) -> Result<f64, String> {
        match self.peek() {
            Some(b'(') => {
                self.pos += 1;
                let value = self.expression()?;
                if self.peek() != Some(b')') {
                    return Err("missing closing parenthesis".to_string());
                }
                self.pos += 1;
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == b'.' => {
                let start = self.pos;
                while self
                    .bytes
                    .get(self.pos)
                    .is_some_and(|b| b.is_ascii_digit() || *b == b'.')
                {
                    self.pos += 1;
                }
                std::str::from_utf8(&self.bytes[start..self.pos])
                    .ok()
                    .and_then(|s| s.parse::<f64>().ok())
                    .ok_or_else(|| "invalid number".to_string())
            }
            Some(c) => Err(format!("unexpected character `{}`", c as char)),
            None => Err("unexpected end of expression".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_arithmetic() {
        assert_eq!(evaluate("1+1").unwrap(), 2.0);
        assert_eq!(evaluate("2*3+4").unwrap(), 10.0);
        assert_eq!(evaluate("2*(3+4)").unwrap(), 14.0);
        assert_eq!(evaluate("10%3").unwrap(), 1.0);
        assert_eq!(evaluate("2^10").unwrap(), 1024.0);
        assert_eq!(evaluate("-4+2").unwrap(), -2.0);
        assert_eq!(evaluate("7/2").unwrap(), 3.5);
    }

    #[test]
    fn rejects_garbage() {
        assert!(evaluate("1+").is_err());
        assert!(evaluate("hello").is_err());
        assert!(evaluate("(1").is_err());
    }

    #[test]
    fn integral_results_have_no_decimal_point() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(3.5), "3.5");
        assert_eq!(format_number(-7.0), "-7");
    }
}
