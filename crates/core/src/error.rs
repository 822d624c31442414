/// A conversion error. The first one raised ends the whole conversion.
///
/// Every variant names the pass that detects it (see [`ConvertError::pass`]):
/// pass 1 is the config parser, pass 2 the data parser, pass 3 the resolver.
/// Pass 0 is reserved for I/O failures around the passes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    /// Line 1 of the config must hold exactly one token, the relation name.
    #[error("line {line}: relation declaration must be a single name, found {found} tokens")]
    RelationDeclaration { line: u32, found: usize },

    #[error("line {line}: unknown attribute type '{type_name}', expected 'numeric' or 'nominals'")]
    UnknownAttributeType { line: u32, type_name: String },

    #[error("line {line}: invalid nominal set '{literal}': {reason}")]
    InvalidNominalSet {
        line: u32,
        literal: String,
        reason: String,
    },

    #[error("line {line}: invalid transformation expression '{expression}': {reason}")]
    InvalidTransformationExpression {
        line: u32,
        expression: String,
        reason: String,
    },

    #[error("line {line}: attribute '{name}' already declared at line {first_line}")]
    DuplicateAttribute {
        line: u32,
        name: String,
        first_line: u32,
    },

    #[error("line {line}: unexpected token '{token}'")]
    UnexpectedToken { pass: u8, line: u32, token: String },

    #[error("line {line}: unexpected end of line, expected {expected}")]
    UnexpectedEndOfLine {
        pass: u8,
        line: u32,
        expected: String,
    },

    #[error("line {line}, column {column}: '{value}' is not a numeric value for attribute '{attribute}'")]
    InvalidNumericValue {
        line: u32,
        column: usize,
        attribute: String,
        value: String,
    },

    #[error("line {line}, column {column}: '{value}' is not a declared nominal of attribute '{attribute}'")]
    InvalidNominalValue {
        line: u32,
        column: usize,
        attribute: String,
        value: String,
    },

    #[error("attribute '{attribute}' transforms '{target}', which is not declared")]
    UnresolvedTargetAttribute { attribute: String, target: String },

    #[error("attribute '{attribute}' transforms '{target}', which is not numeric")]
    NonNumericTransformationTarget { attribute: String, target: String },

    #[error("{path}: {message}")]
    Io { path: String, message: String },
}

impl ConvertError {
    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Stable taxonomy name of this error.
    pub fn kind(&self) -> &'static str {
        match self {
            ConvertError::RelationDeclaration { .. } => "RelationDeclarationError",
            ConvertError::UnknownAttributeType { .. } => "UnknownAttributeTypeError",
            ConvertError::InvalidNominalSet { .. } => "InvalidNominalSetError",
            ConvertError::InvalidTransformationExpression { .. } => {
                "InvalidTransformationExpressionError"
            }
            ConvertError::DuplicateAttribute { .. } => "DuplicateAttributeError",
            ConvertError::UnexpectedToken { .. } => "UnexpectedTokenError",
            ConvertError::UnexpectedEndOfLine { .. } => "UnexpectedEndOfLineError",
            ConvertError::InvalidNumericValue { .. } => "InvalidNumericValueError",
            ConvertError::InvalidNominalValue { .. } => "InvalidNominalValueError",
            ConvertError::UnresolvedTargetAttribute { .. } => "UnresolvedTargetAttributeError",
            ConvertError::NonNumericTransformationTarget { .. } => {
                "NonNumericTransformationTargetError"
            }
            ConvertError::Io { .. } => "IoError",
        }
    }

    pub fn pass(&self) -> u8 {
        match self {
            ConvertError::RelationDeclaration { .. }
            | ConvertError::UnknownAttributeType { .. }
            | ConvertError::InvalidNominalSet { .. }
            | ConvertError::InvalidTransformationExpression { .. }
            | ConvertError::DuplicateAttribute { .. } => 1,
            ConvertError::UnexpectedToken { pass, .. }
            | ConvertError::UnexpectedEndOfLine { pass, .. } => *pass,
            ConvertError::InvalidNumericValue { .. } | ConvertError::InvalidNominalValue { .. } => {
                2
            }
            ConvertError::UnresolvedTargetAttribute { .. }
            | ConvertError::NonNumericTransformationTarget { .. } => 3,
            ConvertError::Io { .. } => 0,
        }
    }

    /// 1-based source line, for errors raised while reading a file.
    pub fn line(&self) -> Option<u32> {
        match self {
            ConvertError::RelationDeclaration { line, .. }
            | ConvertError::UnknownAttributeType { line, .. }
            | ConvertError::InvalidNominalSet { line, .. }
            | ConvertError::InvalidTransformationExpression { line, .. }
            | ConvertError::DuplicateAttribute { line, .. }
            | ConvertError::UnexpectedToken { line, .. }
            | ConvertError::UnexpectedEndOfLine { line, .. }
            | ConvertError::InvalidNumericValue { line, .. }
            | ConvertError::InvalidNominalValue { line, .. } => Some(*line),
            _ => None,
        }
    }

    pub fn column(&self) -> Option<usize> {
        match self {
            ConvertError::InvalidNumericValue { column, .. }
            | ConvertError::InvalidNominalValue { column, .. } => Some(*column),
            _ => None,
        }
    }

    pub fn attribute(&self) -> Option<&str> {
        match self {
            ConvertError::InvalidNumericValue { attribute, .. }
            | ConvertError::InvalidNominalValue { attribute, .. }
            | ConvertError::UnresolvedTargetAttribute { attribute, .. }
            | ConvertError::NonNumericTransformationTarget { attribute, .. } => Some(attribute),
            ConvertError::DuplicateAttribute { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Serialize to the flat JSON shape used by `--error-format json` and the
    /// conformance suite's `expected-error.json` files. Missing fields are null.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "attribute": self.attribute(),
            "column":    self.column(),
            "kind":      self.kind(),
            "line":      self.line(),
            "message":   self.to_string(),
            "pass":      self.pass(),
        })
    }
}
