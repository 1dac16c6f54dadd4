//! Equality filters.
//!
//! `filter[status]=published,pending` compiles to the OR-joined value string
//! `published || pending` the storage layer executes. Every filtered field
//! must exist on the content type; the configured where-clause of the type is
//! merged in afterwards and wins over request values on the same field.

use std::collections::BTreeMap;

use strata_store::{ContentSchema, types::OR_SEPARATOR};

use super::CompileError;
use super::raw::RawParams;

fn or_join(value: &str) -> String {
    value.split(',').collect::<Vec<_>>().join(OR_SEPARATOR)
}

/// Compiles the `filter[...]` family.
pub fn compile(
    raw: &RawParams,
    content_type: &str,
    schema: &ContentSchema,
    enforced: Option<&BTreeMap<String, String>>,
) -> Result<BTreeMap<String, String>, CompileError> {
    let mut filters = BTreeMap::new();

    for (field, value) in raw.family("filter") {
        if !schema.has_field(content_type, field) {
            return Err(CompileError::InvalidField {
                field: field.to_string(),
                content_type: content_type.to_string(),
            });
        }
        filters.insert(field.to_string(), or_join(value));
    }

    if let Some(enforced) = enforced {
        for (field, value) in enforced {
            filters.insert(field.clone(), value.clone());
        }
    }

    Ok(filters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_store::ContentTypeDef;

    fn schema() -> ContentSchema {
        ContentSchema::new().with_type(
            "articles",
            ContentTypeDef {
                fields: vec!["title".to_string(), "status".to_string()],
                ..Default::default()
            },
        )
    }

    #[test]
    fn values_are_or_joined() {
        let raw = RawParams::parse("filter[title]=a,b");
        let filters = compile(&raw, "articles", &schema(), None).unwrap();
        assert_eq!(filters["title"], "a || b");
    }

    #[test]
    fn single_value_stays_plain() {
        let raw = RawParams::parse("filter[status]=published");
        let filters = compile(&raw, "articles", &schema(), None).unwrap();
        assert_eq!(filters["status"], "published");
    }

    #[test]
    fn unknown_field_fails_compilation() {
        let raw = RawParams::parse("filter[wordcount]=100");
        let err = compile(&raw, "articles", &schema(), None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parameter [wordcount] does not exist for contenttype with name [articles]."
        );
    }

    #[test]
    fn enforced_clause_overrides_request() {
        let raw = RawParams::parse("filter[status]=draft");
        let enforced = BTreeMap::from([("status".to_string(), "published".to_string())]);
        let filters = compile(&raw, "articles", &schema(), Some(&enforced)).unwrap();
        assert_eq!(filters["status"], "published");
    }
}
