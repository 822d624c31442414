//! Pass 4: write the ARFF document.
//!
//! The header comes ready-made from pass 1; this pass appends the `@data`
//! block. Hidden attributes contribute nothing to a row, derived ones are
//! evaluated against their resolved source column.

use crate::error::ConvertError;
use crate::schema::{Extra, Row, Schema, Value, Visibility};
use std::io::Write;

pub fn emit<W: Write>(
    out: &mut W,
    header: &str,
    schema: &Schema,
    rows: &[Row],
) -> Result<(), ConvertError> {
    let io_err = |e: std::io::Error| ConvertError::io("<output>", &e);

    out.write_all(header.as_bytes()).map_err(io_err)?;
    write!(out, "@data\n%\n% {} instances\n%\n", rows.len()).map_err(io_err)?;
    for row in rows {
        let line = render_row(schema, row)?;
        writeln!(out, "{}", line).map_err(io_err)?;
    }
    out.flush().map_err(io_err)?;

    tracing::info!(
        attributes = schema.visible_count(),
        rows = rows.len(),
        "ARFF document written"
    );
    Ok(())
}

fn render_row(schema: &Schema, row: &Row) -> Result<String, ConvertError> {
    let mut values: Vec<String> = Vec::with_capacity(schema.visible_count());
    let mut column = 0;
    for attr in schema.attributes() {
        match attr.visibility {
            Visibility::Hide => column += 1,
            Visibility::Keep => {
                values.push(row[column].to_string());
                column += 1;
            }
            Visibility::Create => {
                let Extra::Transform { rule } = &attr.extra else {
                    continue;
                };
                let unresolved = || ConvertError::UnresolvedTargetAttribute {
                    attribute: attr.name.clone(),
                    target: rule.source_attr.clone(),
                };
                let source = attr
                    .target_index
                    .and_then(|t| schema.column_of(t))
                    .and_then(|c| row.get(c))
                    .ok_or_else(unresolved)?;
                match source {
                    Value::Number(n) => values.push(rule.apply(n).to_owned()),
                    Value::Nominal(_) => {
                        return Err(ConvertError::NonNumericTransformationTarget {
                            attribute: attr.name.clone(),
                            target: rule.source_attr.clone(),
                        })
                    }
                }
            }
        }
    }
    Ok(values.join(", "))
}
