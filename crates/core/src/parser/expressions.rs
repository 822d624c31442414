//! The two single-token sub-grammars of a config line:
//!
//! - nominal set:     `{ ident (, ident)* }`
//! - transformation:  `ident op number ? ident : ident`, `op` one of `= < > <= >=`
//!
//! Neither grammar allows embedded whitespace; the tokenizer has already split
//! on it, so each literal arrives as one word.

use crate::error::ConvertError;
use crate::schema::{CompOp, Number, TransformRule};

/// Character scanner over one literal.
struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    fn new(src: &str) -> Self {
        Scanner {
            chars: src.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn expect(&mut self, c: char) -> Result<(), String> {
        match self.peek() {
            Some(x) if x == c => {
                self.pos += 1;
                Ok(())
            }
            Some(x) => Err(format!("expected '{}' at position {}, found '{}'", c, self.pos + 1, x)),
            None => Err(format!("expected '{}' at end of input", c)),
        }
    }

    /// `[a-zA-Z_]\w*`
    fn ident(&mut self) -> Result<String, String> {
        let start = self.pos;
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => self.pos += 1,
            Some(c) => {
                return Err(format!(
                    "expected identifier at position {}, found '{}'",
                    self.pos + 1,
                    c
                ))
            }
            None => return Err("expected identifier at end of input".to_owned()),
        }
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.pos += 1;
            } else {
                break;
            }
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    /// Two-character operators are tried first so `<=` never splits into `<`.
    fn comp_op(&mut self) -> Result<CompOp, String> {
        let (op, width) = match (self.peek(), self.peek_at(1)) {
            (Some('<'), Some('=')) => (CompOp::Lte, 2),
            (Some('>'), Some('=')) => (CompOp::Gte, 2),
            (Some('<'), _) => (CompOp::Lt, 1),
            (Some('>'), _) => (CompOp::Gt, 1),
            (Some('='), _) => (CompOp::Eq, 1),
            (Some(c), _) => {
                return Err(format!(
                    "expected comparison operator at position {}, found '{}'",
                    self.pos + 1,
                    c
                ))
            }
            (None, _) => return Err("expected comparison operator at end of input".to_owned()),
        };
        self.pos += width;
        Ok(op)
    }

    /// Everything up to `stop`, parsed as a number. The raw text comes back
    /// alongside it.
    fn number_until(&mut self, stop: char) -> Result<(Number, String), String> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == stop {
                break;
            }
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        match Number::parse(&text) {
            Some(n) => Ok((n, text)),
            None => Err(format!("'{}' is not a number", text)),
        }
    }
}

/// Parse a `{a,b,c}` literal into its labels, in declared order.
pub fn parse_nominal_set(literal: &str, line: u32) -> Result<Vec<String>, ConvertError> {
    nominal_set(literal).map_err(|reason| ConvertError::InvalidNominalSet {
        line,
        literal: literal.to_owned(),
        reason,
    })
}

fn nominal_set(literal: &str) -> Result<Vec<String>, String> {
    let mut sc = Scanner::new(literal);
    sc.expect('{')?;
    let mut labels: Vec<String> = Vec::new();
    loop {
        let label = sc.ident()?;
        if labels.contains(&label) {
            return Err(format!("duplicate nominal '{}'", label));
        }
        labels.push(label);
        match sc.peek() {
            Some(',') => sc.pos += 1,
            _ => break,
        }
    }
    sc.expect('}')?;
    if !sc.at_end() {
        return Err(format!("trailing input after '}}' at position {}", sc.pos + 1));
    }
    Ok(labels)
}

/// Parse an `attr<op>value?if_true:if_false` literal.
pub fn parse_transformation(expression: &str, line: u32) -> Result<TransformRule, ConvertError> {
    transformation(expression).map_err(|reason| ConvertError::InvalidTransformationExpression {
        line,
        expression: expression.to_owned(),
        reason,
    })
}

fn transformation(expression: &str) -> Result<TransformRule, String> {
    let mut sc = Scanner::new(expression);
    let source_attr = sc.ident()?;
    let op = sc.comp_op()?;
    let (value, value_text) = sc.number_until('?')?;
    sc.expect('?')?;
    let if_true = sc.ident()?;
    sc.expect(':')?;
    let if_false = sc.ident()?;
    if !sc.at_end() {
        return Err(format!("trailing input at position {}", sc.pos + 1));
    }
    if if_true == if_false {
        return Err(format!("both outcomes are '{}'", if_true));
    }
    Ok(TransformRule {
        source_attr,
        op,
        value,
        value_text,
        if_true,
        if_false,
    })
}
