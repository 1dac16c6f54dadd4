//! API settings loaded from the settings file.
//!
//! [`ApiSettings`] carries everything that is editorial rather than
//! operational: per-content-type field policies, string replacements,
//! thumbnail dimensions, the ISO-date switch, static response headers, and
//! the named menus and taxonomies served by their endpoints. Loaded once at
//! startup from YAML and treated as immutable afterwards.
//!
//! # Example settings file
//!
//! ```yaml
//! date-iso-8601: true
//! thumbnail:
//!   width: 320
//!   height: 240
//! replacements:
//!   - from: "{files}"
//!     to: "/files"
//! headers:
//!   Content-Type: application/vnd.api+json
//! content-types:
//!   articles:
//!     allowed-fields: [title, teaser, body, image, datepublish]
//!     list-fields: [title, teaser]
//!     order: "-datepublish"
//!     where-clause:
//!       status: published
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

/// Thumbnail dimensions for image-field rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Thumbnail {
    /// Thumbnail width in pixels.
    pub width: u32,
    /// Thumbnail height in pixels.
    pub height: u32,
}

/// One literal string replacement, applied to every rendered string leaf.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Replacement {
    /// The literal text to replace.
    pub from: String,
    /// The replacement text.
    pub to: String,
}

/// Per-content-type editorial policy.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TypeSettings {
    /// Fields a request may expose at all; empty means every known field.
    pub allowed_fields: Vec<String>,
    /// Default fields for list/projection when the request names none.
    pub list_fields: Vec<String>,
    /// Default sort order, prepended to any requested sort (e.g.
    /// `-datepublish`).
    pub order: Option<String>,
    /// Filters enforced on every query of this type; these override
    /// request-supplied filters on the same field.
    pub where_clause: BTreeMap<String, String>,
}

/// The full API settings document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ApiSettings {
    /// Render date fields as ISO-8601 strings.
    pub date_iso_8601: bool,
    /// Path prefix for uploaded files, appended to the base URL.
    pub files_path: String,
    /// Thumbnail dimensions; image fields get a thumbnail link when set.
    pub thumbnail: Option<Thumbnail>,
    /// Ordered literal string replacements applied to rendered attributes.
    pub replacements: Vec<Replacement>,
    /// Static headers applied to every response.
    pub headers: BTreeMap<String, String>,
    /// Named menu trees served by the menu endpoint.
    pub menus: BTreeMap<String, Value>,
    /// Named taxonomy definitions served by the taxonomy endpoint.
    pub taxonomies: BTreeMap<String, Value>,
    /// Per-content-type policy.
    pub content_types: BTreeMap<String, TypeSettings>,
    /// Expose version information on the root endpoint.
    pub debug: bool,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            date_iso_8601: true,
            files_path: "/files/".to_string(),
            thumbnail: None,
            replacements: Vec::new(),
            headers: BTreeMap::new(),
            menus: BTreeMap::new(),
            taxonomies: BTreeMap::new(),
            content_types: BTreeMap::new(),
            debug: false,
        }
    }
}

impl ApiSettings {
    /// Parses settings from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Loads settings from a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Ok(Self::from_yaml(&contents)?)
    }

    /// Returns the settings of a content type, or the empty default.
    pub fn type_settings(&self, content_type: &str) -> TypeSettings {
        self.content_types
            .get(content_type)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the allowed fields of a content type; `None` means no
    /// restriction is configured.
    pub fn allowed_fields(&self, content_type: &str) -> Option<&[String]> {
        self.content_types
            .get(content_type)
            .map(|t| t.allowed_fields.as_slice())
            .filter(|fields| !fields.is_empty())
    }

    /// Returns the configured default list fields of a content type.
    pub fn list_fields(&self, content_type: &str) -> &[String] {
        self.content_types
            .get(content_type)
            .map(|t| t.list_fields.as_slice())
            .unwrap_or(&[])
    }

    /// Returns the configured default sort order of a content type.
    pub fn default_order(&self, content_type: &str) -> Option<&str> {
        self.content_types
            .get(content_type)
            .and_then(|t| t.order.as_deref())
    }

    /// Returns the enforced where-clause filters of a content type.
    pub fn where_clause(&self, content_type: &str) -> Option<&BTreeMap<String, String>> {
        self.content_types
            .get(content_type)
            .map(|t| &t.where_clause)
            .filter(|clauses| !clauses.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS: &str = r#"
date-iso-8601: true
thumbnail:
  width: 320
  height: 240
replacements:
  - from: "old.example.com"
    to: "new.example.com"
headers:
  X-Powered-By: strata
content-types:
  articles:
    allowed-fields: [title, body]
    list-fields: [title]
    order: "-datepublish"
    where-clause:
      status: published
"#;

    #[test]
    fn parses_full_settings() {
        let settings = ApiSettings::from_yaml(SETTINGS).unwrap();
        assert!(settings.date_iso_8601);
        assert_eq!(settings.thumbnail.unwrap().width, 320);
        assert_eq!(settings.replacements[0].from, "old.example.com");
        assert_eq!(settings.headers["X-Powered-By"], "strata");
        assert_eq!(
            settings.allowed_fields("articles").unwrap(),
            &["title".to_string(), "body".to_string()]
        );
        assert_eq!(settings.default_order("articles"), Some("-datepublish"));
        assert_eq!(
            settings.where_clause("articles").unwrap()["status"],
            "published"
        );
    }

    #[test]
    fn missing_type_gets_empty_defaults() {
        let settings = ApiSettings::from_yaml(SETTINGS).unwrap();
        assert!(settings.allowed_fields("pages").is_none());
        assert!(settings.list_fields("pages").is_empty());
        assert!(settings.default_order("pages").is_none());
        assert!(settings.where_clause("pages").is_none());
    }

    #[test]
    fn defaults_are_sensible() {
        let settings = ApiSettings::default();
        assert!(settings.date_iso_8601);
        assert_eq!(settings.files_path, "/files/");
        assert!(settings.thumbnail.is_none());
    }
}
