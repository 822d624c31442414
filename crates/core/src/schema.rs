//! Attribute schema built by pass 1 and read by every later pass.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Read from a data column and exported unchanged.
    Keep,
    /// Read from a data column, never exported.
    Hide,
    /// Computed from another attribute; consumes no data column.
    Create,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrType {
    Numeric,
    Nominal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompOp {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = ">=")]
    Gte,
}

impl CompOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompOp::Eq => "=",
            CompOp::Lt => "<",
            CompOp::Gt => ">",
            CompOp::Lte => "<=",
            CompOp::Gte => ">=",
        }
    }

    pub fn holds(&self, lhs: &Number, rhs: &Number) -> bool {
        match lhs.partial_cmp(rhs) {
            Some(ord) => match self {
                CompOp::Eq => ord == Ordering::Equal,
                CompOp::Lt => ord == Ordering::Less,
                CompOp::Gt => ord == Ordering::Greater,
                CompOp::Lte => ord != Ordering::Greater,
                CompOp::Gte => ord != Ordering::Less,
            },
            None => false,
        }
    }
}

impl fmt::Display for CompOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed numeric literal. Integers and decimals stay distinct so they
/// print back the way they were read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    Integer(i128),
    /// Integer beyond `i128`, held as its digits without leading zeros.
    BigInteger(String),
    Decimal(f64),
}

impl Number {
    /// Parse `-?\d+` as an integer or `-?\d+\.\d+` as a decimal.
    /// Anything else, including exponents and bare dots, is rejected.
    pub fn parse(s: &str) -> Option<Number> {
        let digits = s.strip_prefix('-').unwrap_or(s);
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (digits, None),
        };
        let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(int_part) {
            return None;
        }
        match frac_part {
            None => match s.parse::<i128>() {
                Ok(n) => Some(Number::Integer(n)),
                Err(_) => {
                    let magnitude = int_part.trim_start_matches('0');
                    let sign = if s.starts_with('-') { "-" } else { "" };
                    Some(Number::BigInteger(format!("{}{}", sign, magnitude)))
                }
            },
            Some(f) if all_digits(f) => s.parse::<f64>().ok().map(Number::Decimal),
            Some(_) => None,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(n) => *n as f64,
            Number::BigInteger(digits) => digits.parse().unwrap_or(f64::NAN),
            Number::Decimal(x) => *x,
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => Some(a.cmp(b)),
            (Number::BigInteger(a), Number::BigInteger(b)) => Some(cmp_big(a, b)),
            // A big integer lies outside the i128 range, so its sign decides.
            (Number::BigInteger(a), Number::Integer(_)) => Some(if a.starts_with('-') {
                Ordering::Less
            } else {
                Ordering::Greater
            }),
            (Number::Integer(_), Number::BigInteger(b)) => Some(if b.starts_with('-') {
                Ordering::Greater
            } else {
                Ordering::Less
            }),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

/// Exact order of two canonical digit strings.
fn cmp_big(a: &str, b: &str) -> Ordering {
    let magnitude = |x: &str, y: &str| x.len().cmp(&y.len()).then_with(|| x.cmp(y));
    match (a.strip_prefix('-'), b.strip_prefix('-')) {
        (Some(x), Some(y)) => magnitude(y, x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => magnitude(a, b),
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{}", n),
            Number::BigInteger(digits) => f.write_str(digits),
            Number::Decimal(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            Number::Decimal(x) => write!(f, "{}", x),
        }
    }
}

/// `attr <op> value ? if_true : if_false`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformRule {
    pub source_attr: String,
    pub op: CompOp,
    pub value: Number,
    /// The threshold exactly as written in the expression.
    pub value_text: String,
    pub if_true: String,
    pub if_false: String,
}

impl TransformRule {
    pub fn labels(&self) -> [&str; 2] {
        [&self.if_true, &self.if_false]
    }

    pub fn apply(&self, source: &Number) -> &str {
        if self.op.holds(source, &self.value) {
            &self.if_true
        } else {
            &self.if_false
        }
    }
}

/// Payload whose shape depends on the attribute's visibility and type.
#[derive(Debug, Clone, PartialEq)]
pub enum Extra {
    None,
    NominalSet { labels: Vec<String> },
    Transform { rule: TransformRule },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSpec {
    pub name: String,
    pub visibility: Visibility,
    pub type_: AttrType,
    pub extra: Extra,
    /// Schema position of the attribute a `Create` rule reads; set by pass 3.
    pub target_index: Option<usize>,
    /// Config line that declared this attribute.
    pub line: u32,
}

impl AttributeSpec {
    /// Whether this attribute reads a column of the data file.
    pub fn has_column(&self) -> bool {
        self.visibility != Visibility::Create
    }

    /// The `@attribute` type field: `numeric` or a `{a,b,c}` literal.
    pub fn arff_type(&self) -> String {
        match &self.extra {
            Extra::NominalSet { labels } => nominal_literal(labels.iter().map(String::as_str)),
            Extra::Transform { rule } => nominal_literal(rule.labels().into_iter()),
            Extra::None => "numeric".to_owned(),
        }
    }

    /// Whether `label` is a member of this attribute's nominal set.
    pub fn accepts_label(&self, label: &str) -> bool {
        match &self.extra {
            Extra::NominalSet { labels } => labels.iter().any(|l| l == label),
            Extra::Transform { rule } => rule.labels().contains(&label),
            Extra::None => false,
        }
    }
}

fn nominal_literal<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    format!("{{{}}}", labels.collect::<Vec<_>>().join(","))
}

/// Ordered attribute list plus a name index built alongside it.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub relation: String,
    attributes: Vec<AttributeSpec>,
    by_name: HashMap<String, usize>,
}

impl Schema {
    pub fn new(relation: impl Into<String>) -> Self {
        Schema {
            relation: relation.into(),
            ..Default::default()
        }
    }

    /// Append an attribute. Returns the already declared one on a name clash.
    pub fn push(&mut self, attr: AttributeSpec) -> Result<usize, &AttributeSpec> {
        if let Some(&first) = self.by_name.get(&attr.name) {
            return Err(&self.attributes[first]);
        }
        let idx = self.attributes.len();
        self.by_name.insert(attr.name.clone(), idx);
        self.attributes.push(attr);
        Ok(idx)
    }

    pub fn attributes(&self) -> &[AttributeSpec] {
        &self.attributes
    }

    /// Record the resolved target of the `Create` attribute at `idx`.
    pub(crate) fn set_target_index(&mut self, idx: usize, target: usize) {
        self.attributes[idx].target_index = Some(target);
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Number of data-file columns each row must supply.
    pub fn column_count(&self) -> usize {
        self.attributes.iter().filter(|a| a.has_column()).count()
    }

    /// Row position of the attribute at schema position `idx`, if it has one.
    pub fn column_of(&self, idx: usize) -> Option<usize> {
        let attr = self.attributes.get(idx)?;
        if !attr.has_column() {
            return None;
        }
        Some(self.attributes[..idx].iter().filter(|a| a.has_column()).count())
    }

    /// Number of attributes that appear in the ARFF output.
    pub fn visible_count(&self) -> usize {
        self.attributes
            .iter()
            .filter(|a| a.visibility != Visibility::Hide)
            .count()
    }
}

/// A typed value read from one data column.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(Number),
    Nominal(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => n.fmt(f),
            Value::Nominal(s) => f.write_str(s),
        }
    }
}

/// One data row: a value per non-`Create` attribute, in schema order.
pub type Row = Vec<Value>;
