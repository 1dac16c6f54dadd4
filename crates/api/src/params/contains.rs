//! Substring filters.
//!
//! `contains[body]=rust,axum` compiles each value into a `%substring%`
//! pattern and OR-joins them: `%rust% || %axum%`. Field validation is the
//! same as for equality filters.

use std::collections::BTreeMap;

use strata_store::{ContentSchema, types::OR_SEPARATOR};

use super::CompileError;
use super::raw::RawParams;

fn patterns(value: &str) -> String {
    value
        .split(',')
        .map(|v| format!("%{v}%"))
        .collect::<Vec<_>>()
        .join(OR_SEPARATOR)
}

/// Compiles the `contains[...]` family.
pub fn compile(
    raw: &RawParams,
    content_type: &str,
    schema: &ContentSchema,
) -> Result<BTreeMap<String, String>, CompileError> {
    let mut contains = BTreeMap::new();

    for (field, value) in raw.family("contains") {
        if !schema.has_field(content_type, field) {
            return Err(CompileError::InvalidField {
                field: field.to_string(),
                content_type: content_type.to_string(),
            });
        }
        contains.insert(field.to_string(), patterns(value));
    }

    Ok(contains)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_store::ContentTypeDef;

    fn schema() -> ContentSchema {
        ContentSchema::new().with_type(
            "articles",
            ContentTypeDef {
                fields: vec!["body".to_string()],
                ..Default::default()
            },
        )
    }

    #[test]
    fn values_become_or_joined_patterns() {
        let raw = RawParams::parse("contains[body]=rust,axum");
        let contains = compile(&raw, "articles", &schema()).unwrap();
        assert_eq!(contains["body"], "%rust% || %axum%");
    }

    #[test]
    fn single_value_is_wrapped() {
        let raw = RawParams::parse("contains[body]=a");
        let contains = compile(&raw, "articles", &schema()).unwrap();
        assert_eq!(contains["body"], "%a%");
    }

    #[test]
    fn unknown_field_fails_compilation() {
        let raw = RawParams::parse("contains[wordcount]=10");
        assert!(matches!(
            compile(&raw, "articles", &schema()),
            Err(CompileError::InvalidField { .. })
        ));
    }
}
