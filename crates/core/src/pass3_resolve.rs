//! Pass 3: resolve every `create` attribute's source attribute by name.
//!
//! Runs after pass 2, so a derived attribute may name an attribute declared
//! before or after it.

use crate::error::ConvertError;
use crate::schema::{AttrType, Extra, Schema};

pub fn resolve(schema: &mut Schema) -> Result<(), ConvertError> {
    let mut targets = Vec::new();
    for (idx, attr) in schema.attributes().iter().enumerate() {
        let Extra::Transform { rule } = &attr.extra else {
            continue;
        };
        let target = schema.index_of(&rule.source_attr).ok_or_else(|| {
            ConvertError::UnresolvedTargetAttribute {
                attribute: attr.name.clone(),
                target: rule.source_attr.clone(),
            }
        })?;
        if schema.attributes()[target].type_ != AttrType::Numeric {
            return Err(ConvertError::NonNumericTransformationTarget {
                attribute: attr.name.clone(),
                target: rule.source_attr.clone(),
            });
        }
        tracing::debug!(attribute = %attr.name, target = %rule.source_attr, index = target, "target resolved");
        targets.push((idx, target));
    }
    let resolved = targets.len();
    for (idx, target) in targets {
        schema.set_target_index(idx, target);
    }
    tracing::info!(resolved, "transformations resolved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use crate::parser::parse_config;

    fn resolved(config: &str) -> Result<Schema, ConvertError> {
        let (mut schema, _) = parse_config(&lex(config)).unwrap();
        resolve(&mut schema)?;
        Ok(schema)
    }

    #[test]
    fn target_index_points_at_source() {
        let schema = resolved("r\n-id numeric\nspeed numeric\n+fast speed>100?yes:no\n").unwrap();
        assert_eq!(schema.attributes()[2].target_index, Some(1));
        assert_eq!(schema.attributes()[1].target_index, None);
    }

    #[test]
    fn source_may_be_declared_later() {
        let schema = resolved("r\n+fast speed>100?yes:no\nspeed numeric\n").unwrap();
        assert_eq!(schema.attributes()[0].target_index, Some(1));
    }

    #[test]
    fn hidden_numeric_source_is_allowed() {
        let schema = resolved("r\n-speed numeric\n+fast speed>100?yes:no\n").unwrap();
        assert_eq!(schema.attributes()[1].target_index, Some(0));
    }

    #[test]
    fn unknown_source_names_both_attributes() {
        let err = resolved("r\nspeed numeric\n+fast velocity>100?yes:no\n").unwrap_err();
        assert_eq!(
            err,
            ConvertError::UnresolvedTargetAttribute {
                attribute: "fast".into(),
                target: "velocity".into()
            }
        );
        assert_eq!(err.pass(), 3);
    }

    #[test]
    fn nominal_source_is_rejected() {
        let err = resolved("r\ncolor nominals {red,blue}\n+hot color>1?yes:no\n").unwrap_err();
        assert_eq!(err.kind(), "NonNumericTransformationTargetError");
    }

    #[test]
    fn derived_attribute_cannot_feed_another() {
        let err = resolved("r\nx numeric\n+a x>1?yes:no\n+b a>1?yes:no\n").unwrap_err();
        assert_eq!(err.kind(), "NonNumericTransformationTargetError");
        assert_eq!(err.attribute(), Some("b"));
    }
}
