//! Pass 1: config parser.
//!
//! Consumes the config token stream one logical line at a time. Line 1 names
//! the relation; every later line declares one attribute:
//!
//! ```text
//! <[+|-]name> [numeric|nominals] [<extra>]
//! ```
//!
//! The ARFF header is accumulated while parsing, so a finished parser hands
//! back both the schema and the `@relation`/`@attribute` block.

use crate::error::ConvertError;
use crate::lexer::{Cursor, Spanned};
use crate::schema::{AttrType, AttributeSpec, Extra, Schema, Visibility};
use std::fmt::Write as _;

mod expressions;

pub use expressions::{parse_nominal_set, parse_transformation};

/// One parsed config line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Relation(String),
    /// Schema position of the attribute just declared.
    Attribute(usize),
}

pub struct ConfigParser<'a> {
    cursor: Cursor<'a>,
    line: u32,
    schema: Schema,
    header: String,
    failed: bool,
}

impl<'a> ConfigParser<'a> {
    pub fn new(tokens: &'a [Spanned]) -> Self {
        ConfigParser {
            cursor: Cursor::new(tokens, 1),
            line: 1,
            schema: Schema::default(),
            header: String::new(),
            failed: false,
        }
    }

    /// True while unread lines remain and no line has failed.
    pub fn has_more_commands(&self) -> bool {
        !self.failed && !self.cursor.is_at_end()
    }

    /// Parse the next config line. After an error the parser is spent.
    pub fn next_command(&mut self) -> Result<Command, ConvertError> {
        let result = if self.line == 1 {
            self.parse_relation()
        } else {
            self.parse_attribute()
        };
        match result {
            Ok(cmd) => {
                self.line += 1;
                Ok(cmd)
            }
            Err(e) => {
                self.failed = true;
                Err(e)
            }
        }
    }

    /// Close the header block and hand back the schema with its header text.
    pub fn finish(mut self) -> (Schema, String) {
        self.header.push('\n');
        (self.schema, self.header)
    }

    fn parse_relation(&mut self) -> Result<Command, ConvertError> {
        let found = self.cursor.words_until_break();
        if found != 1 {
            return Err(ConvertError::RelationDeclaration {
                line: self.line,
                found,
            });
        }
        let name = self.cursor.take_word("relation name")?.to_owned();
        self.cursor.expect_line_break()?;
        tracing::debug!(relation = %name, "relation declared");
        let _ = writeln!(self.header, "@relation {}\n", name);
        self.schema.relation = name.clone();
        Ok(Command::Relation(name))
    }

    fn parse_attribute(&mut self) -> Result<Command, ConvertError> {
        let line = self.line;
        let head = self.cursor.take_word("attribute name")?;
        let (visibility, name) = if let Some(rest) = head.strip_prefix('+') {
            (Visibility::Create, rest)
        } else if let Some(rest) = head.strip_prefix('-') {
            (Visibility::Hide, rest)
        } else {
            (Visibility::Keep, head)
        };

        let (type_, extra) = match visibility {
            Visibility::Create => {
                // The type word is optional on derived attributes; the
                // transformation defines a nominal set either way.
                if self.cursor.words_until_break() >= 2 {
                    let word = self.cursor.take_word("attribute type")?;
                    type_keyword(word).ok_or_else(|| ConvertError::UnknownAttributeType {
                        line,
                        type_name: word.to_owned(),
                    })?;
                }
                let expr = self.cursor.take_word("transformation expression")?;
                let rule = parse_transformation(expr, line)?;
                (AttrType::Nominal, Extra::Transform { rule })
            }
            _ => {
                let word = self.cursor.take_word("attribute type")?;
                let type_ = type_keyword(word).ok_or_else(|| ConvertError::UnknownAttributeType {
                    line,
                    type_name: word.to_owned(),
                })?;
                match type_ {
                    AttrType::Nominal => {
                        let literal = self.cursor.take_word("nominal set")?;
                        let labels = parse_nominal_set(literal, line)?;
                        (type_, Extra::NominalSet { labels })
                    }
                    AttrType::Numeric => (type_, Extra::None),
                }
            }
        };
        self.cursor.expect_line_break()?;

        let attr = AttributeSpec {
            name: name.to_owned(),
            visibility,
            type_,
            extra,
            target_index: None,
            line,
        };
        if visibility != Visibility::Hide {
            let _ = writeln!(self.header, "@attribute {} {}", attr.name, attr.arff_type());
        }
        tracing::debug!(attribute = name, ?visibility, ?type_, line, "attribute declared");
        let idx = self
            .schema
            .push(attr)
            .map_err(|first| ConvertError::DuplicateAttribute {
                line,
                name: name.to_owned(),
                first_line: first.line,
            })?;
        Ok(Command::Attribute(idx))
    }
}

fn type_keyword(word: &str) -> Option<AttrType> {
    match word.to_ascii_lowercase().as_str() {
        "numeric" => Some(AttrType::Numeric),
        "nominals" => Some(AttrType::Nominal),
        _ => None,
    }
}

/// Run pass 1 over a whole config token stream.
pub fn parse_config(tokens: &[Spanned]) -> Result<(Schema, String), ConvertError> {
    let mut parser = ConfigParser::new(tokens);
    if !parser.has_more_commands() {
        return Err(ConvertError::RelationDeclaration { line: 1, found: 0 });
    }
    while parser.has_more_commands() {
        parser.next_command()?;
    }
    let (schema, header) = parser.finish();
    tracing::info!(
        relation = %schema.relation,
        attributes = schema.attributes().len(),
        columns = schema.column_count(),
        "config parsed"
    );
    Ok((schema, header))
}
