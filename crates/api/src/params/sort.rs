//! Sort parameter.
//!
//! `sort=title,-datepublish` parses into an ordered key list; a `-` prefix
//! requests descending order. Every referenced field must exist on the
//! content type. A configured default order for the type is prepended to
//! whatever the request asks for.

use strata_store::{ContentSchema, SortDirection};

use super::CompileError;

/// A validated, ordered sort specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    keys: Vec<(String, SortDirection)>,
}

fn parse_key(raw: &str) -> (String, SortDirection) {
    let raw = raw.trim();
    match raw.strip_prefix('-') {
        Some(field) => (field.to_string(), SortDirection::Desc),
        None => (raw.to_string(), SortDirection::Asc),
    }
}

impl SortSpec {
    /// Compiles the sort parameter.
    ///
    /// `requested` is the raw `sort` value; `configured` is the content
    /// type's default order from settings. When neither is present the spec
    /// falls back to ascending id.
    pub fn compile(
        requested: Option<&str>,
        configured: Option<&str>,
        content_type: &str,
        schema: &ContentSchema,
    ) -> Result<Self, CompileError> {
        let requested = requested.filter(|s| !s.trim().is_empty()).unwrap_or("id");
        let combined = match configured.filter(|s| !s.trim().is_empty()) {
            Some(configured) => format!("{configured},{requested}"),
            None => requested.to_string(),
        };

        let mut keys = Vec::new();
        for item in combined.split(',').filter(|s| !s.trim().is_empty()) {
            let (field, direction) = parse_key(item);
            if !schema.has_field(content_type, &field) {
                return Err(CompileError::InvalidField {
                    field,
                    content_type: content_type.to_string(),
                });
            }
            // Later occurrences of a field never override an earlier one.
            if !keys.iter().any(|(existing, _)| *existing == field) {
                keys.push((field, direction));
            }
        }
        Ok(Self { keys })
    }

    /// The ordered sort keys.
    pub fn keys(&self) -> &[(String, SortDirection)] {
        &self.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_store::ContentTypeDef;

    fn schema() -> ContentSchema {
        ContentSchema::new().with_type(
            "articles",
            ContentTypeDef {
                fields: vec!["title".to_string(), "teaser".to_string()],
                ..Default::default()
            },
        )
    }

    #[test]
    fn parses_directions() {
        let spec = SortSpec::compile(Some("title,-datepublish"), None, "articles", &schema())
            .unwrap();
        assert_eq!(
            spec.keys(),
            &[
                ("title".to_string(), SortDirection::Asc),
                ("datepublish".to_string(), SortDirection::Desc),
            ]
        );
    }

    #[test]
    fn defaults_to_ascending_id() {
        let spec = SortSpec::compile(None, None, "articles", &schema()).unwrap();
        assert_eq!(spec.keys(), &[("id".to_string(), SortDirection::Asc)]);
    }

    #[test]
    fn configured_order_is_prepended() {
        let spec =
            SortSpec::compile(Some("title"), Some("-datepublish"), "articles", &schema()).unwrap();
        assert_eq!(spec.keys()[0].0, "datepublish");
        assert_eq!(spec.keys()[1].0, "title");
    }

    #[test]
    fn configured_order_wins_on_duplicate_field() {
        let spec =
            SortSpec::compile(Some("-title"), Some("title"), "articles", &schema()).unwrap();
        assert_eq!(spec.keys(), &[("title".to_string(), SortDirection::Asc)]);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = SortSpec::compile(Some("wordcount"), None, "articles", &schema()).unwrap_err();
        assert!(matches!(err, CompileError::InvalidField { field, .. } if field == "wordcount"));
    }
}
