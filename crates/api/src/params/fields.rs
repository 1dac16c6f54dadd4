//! Sparse fieldsets.
//!
//! `fields[articles]=title,teaser` restricts which attributes a type exposes.
//! Unlike filter and include validation this is advisory: requested names
//! outside the allowed set are silently dropped. When nothing valid remains
//! the resolution falls back to the configured list fields, then to the full
//! allowed set.

use strata_store::ContentSchema;

use crate::settings::ApiSettings;

use super::raw::RawParams;

/// Every field a request may expose for the type: the configured
/// allowed-fields list when present, otherwise all known field names.
fn exposable(content_type: &str, schema: &ContentSchema, settings: &ApiSettings) -> Vec<String> {
    if let Some(allowed) = settings.allowed_fields(content_type) {
        return allowed.to_vec();
    }
    schema
        .field_names(content_type)
        .map(|names| {
            names
                .into_iter()
                .filter(|name| *name != "id")
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Resolves the effective field list for one content type.
pub fn resolve(
    raw: &RawParams,
    content_type: &str,
    schema: &ContentSchema,
    settings: &ApiSettings,
) -> Vec<String> {
    let exposable = exposable(content_type, schema, settings);

    let requested: Vec<String> = raw
        .family("fields")
        .filter(|(subscript, _)| *subscript == content_type)
        .flat_map(|(_, value)| value.split(','))
        .map(str::trim)
        .filter(|name| exposable.iter().any(|allowed| allowed == name))
        .map(str::to_string)
        .collect();

    if !requested.is_empty() {
        return requested;
    }

    let list_fields = settings.list_fields(content_type);
    if !list_fields.is_empty() {
        return list_fields.to_vec();
    }

    exposable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::TypeSettings;
    use strata_store::ContentTypeDef;

    fn schema() -> ContentSchema {
        ContentSchema::new().with_type(
            "articles",
            ContentTypeDef {
                fields: vec!["title".to_string(), "teaser".to_string(), "body".to_string()],
                ..Default::default()
            },
        )
    }

    fn settings(allowed: &[&str], list: &[&str]) -> ApiSettings {
        let mut settings = ApiSettings::default();
        settings.content_types.insert(
            "articles".to_string(),
            TypeSettings {
                allowed_fields: allowed.iter().map(|s| s.to_string()).collect(),
                list_fields: list.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            },
        );
        settings
    }

    #[test]
    fn requested_fields_filtered_by_allowed_set() {
        let raw = RawParams::parse("fields[articles]=title,body");
        let fields = resolve(&raw, "articles", &schema(), &settings(&["title"], &[]));
        assert_eq!(fields, vec!["title".to_string()]);
    }

    #[test]
    fn unknown_requested_fields_are_silently_dropped() {
        let raw = RawParams::parse("fields[articles]=title,wordcount");
        let fields = resolve(&raw, "articles", &schema(), &ApiSettings::default());
        assert_eq!(fields, vec!["title".to_string()]);
    }

    #[test]
    fn empty_request_falls_back_to_list_fields() {
        let raw = RawParams::parse("");
        let fields = resolve(&raw, "articles", &schema(), &settings(&[], &["title", "teaser"]));
        assert_eq!(fields, vec!["title".to_string(), "teaser".to_string()]);
    }

    #[test]
    fn no_configuration_exposes_all_known_fields() {
        let raw = RawParams::parse("");
        let fields = resolve(&raw, "articles", &schema(), &ApiSettings::default());
        assert!(fields.contains(&"title".to_string()));
        assert!(fields.contains(&"slug".to_string()));
        assert!(!fields.contains(&"id".to_string()));
    }

    #[test]
    fn foreign_type_subscripts_are_ignored() {
        let raw = RawParams::parse("fields[pages]=title");
        let fields = resolve(&raw, "articles", &schema(), &settings(&[], &["teaser"]));
        assert_eq!(fields, vec!["teaser".to_string()]);
    }
}
