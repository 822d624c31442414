//! Pass 2: data parser.
//!
//! Reads one row per source line, one token per schema attribute that owns a
//! data column, and validates each token against its attribute's type.

use crate::error::ConvertError;
use crate::lexer::{Cursor, Spanned};
use crate::schema::{AttrType, AttributeSpec, Number, Row, Schema, Value};

pub struct DataParser<'a> {
    cursor: Cursor<'a>,
    schema: &'a Schema,
    rows: Vec<Row>,
    failed: bool,
}

impl<'a> DataParser<'a> {
    pub fn new(tokens: &'a [Spanned], schema: &'a Schema) -> Self {
        DataParser {
            cursor: Cursor::new(tokens, 2),
            schema,
            rows: Vec::new(),
            failed: false,
        }
    }

    pub fn has_more_rows(&self) -> bool {
        !self.failed && !self.cursor.is_at_end()
    }

    /// Read and buffer the next row. After an error the parser is spent.
    pub fn next_row(&mut self) -> Result<(), ConvertError> {
        match self.read_row() {
            Ok(row) => {
                tracing::trace!(row = self.rows.len() + 1, "row accepted");
                self.rows.push(row);
                Ok(())
            }
            Err(e) => {
                self.failed = true;
                Err(e)
            }
        }
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    fn read_row(&mut self) -> Result<Row, ConvertError> {
        let line = self.cursor.line();
        let schema = self.schema;
        let mut row = Row::with_capacity(schema.column_count());
        for attr in schema.attributes().iter().filter(|a| a.has_column()) {
            let column = row.len() + 1;
            let token = self.cursor.take_word(&format!("a value for attribute '{}'", attr.name))?;
            row.push(read_value(attr, token, line, column)?);
        }
        self.cursor.expect_line_break()?;
        Ok(row)
    }
}

fn read_value(
    attr: &AttributeSpec,
    token: &str,
    line: u32,
    column: usize,
) -> Result<Value, ConvertError> {
    match attr.type_ {
        AttrType::Numeric => Number::parse(token).map(Value::Number).ok_or_else(|| {
            ConvertError::InvalidNumericValue {
                line,
                column,
                attribute: attr.name.clone(),
                value: token.to_owned(),
            }
        }),
        AttrType::Nominal if attr.accepts_label(token) => Ok(Value::Nominal(token.to_owned())),
        AttrType::Nominal => Err(ConvertError::InvalidNominalValue {
            line,
            column,
            attribute: attr.name.clone(),
            value: token.to_owned(),
        }),
    }
}

/// Run pass 2 over a whole data token stream.
pub fn parse_data(tokens: &[Spanned], schema: &Schema) -> Result<Vec<Row>, ConvertError> {
    tracing::info!(columns = schema.column_count(), "reading data rows");
    let mut parser = DataParser::new(tokens, schema);
    while parser.has_more_rows() {
        parser.next_row()?;
    }
    let rows = parser.into_rows();
    tracing::info!(rows = rows.len(), "data parsed");
    Ok(rows)
}
