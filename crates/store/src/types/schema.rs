//! Content-type schema.
//!
//! The schema is the validation oracle for the parameter compiler: it answers
//! "does this field exist on this content type" and "is this content type a
//! configured relation target of that one". It is loaded from configuration
//! and never changes at runtime.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Fields every content type carries regardless of its declared schema.
pub const BASE_FIELDS: &[&str] = &["id", "slug", "datepublish", "datecreated", "datechanged"];

/// Declared schema of one content type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeDef {
    /// Declared field names, in declaration order.
    #[serde(default)]
    pub fields: Vec<String>,
    /// Taxonomies attached to this type (their names are valid field names).
    #[serde(default)]
    pub taxonomies: Vec<String>,
    /// Content types this type may relate to.
    #[serde(default)]
    pub relations: Vec<String>,
}

/// The full content schema: content-type name to definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentSchema {
    types: BTreeMap<String, ContentTypeDef>,
}

impl ContentSchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a content type (builder style).
    pub fn with_type(mut self, name: impl Into<String>, def: ContentTypeDef) -> Self {
        self.types.insert(name.into(), def);
        self
    }

    /// Returns true when the content type is known.
    pub fn contains(&self, content_type: &str) -> bool {
        self.types.contains_key(content_type)
    }

    /// Returns the definition of a content type.
    pub fn get(&self, content_type: &str) -> Option<&ContentTypeDef> {
        self.types.get(content_type)
    }

    /// Iterates over all content-type names, in deterministic order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// The field oracle: all valid field names of a content type.
    ///
    /// This is the union of the base fields, the declared fields, and the
    /// taxonomy names. Returns `None` for unknown content types.
    pub fn field_names(&self, content_type: &str) -> Option<BTreeSet<&str>> {
        let def = self.types.get(content_type)?;
        let mut names: BTreeSet<&str> = BASE_FIELDS.iter().copied().collect();
        names.extend(def.fields.iter().map(String::as_str));
        names.extend(def.taxonomies.iter().map(String::as_str));
        Some(names)
    }

    /// Returns true when `field` is a valid field of `content_type`.
    pub fn has_field(&self, content_type: &str, field: &str) -> bool {
        self.field_names(content_type)
            .is_some_and(|names| names.contains(field))
    }

    /// The relation oracle: returns true when `target` is a configured
    /// relation of `content_type`.
    pub fn is_relation(&self, content_type: &str, target: &str) -> bool {
        self.types
            .get(content_type)
            .is_some_and(|def| def.relations.iter().any(|r| r == target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> ContentSchema {
        ContentSchema::new().with_type(
            "articles",
            ContentTypeDef {
                fields: vec!["title".to_string(), "body".to_string()],
                taxonomies: vec!["categories".to_string()],
                relations: vec!["authors".to_string()],
            },
        )
    }

    #[test]
    fn field_oracle_unions_base_declared_and_taxonomy() {
        let schema = schema();
        assert!(schema.has_field("articles", "title"));
        assert!(schema.has_field("articles", "categories"));
        assert!(schema.has_field("articles", "datepublish"));
        assert!(!schema.has_field("articles", "nonexistent"));
    }

    #[test]
    fn field_oracle_is_none_for_unknown_type() {
        assert!(schema().field_names("gadgets").is_none());
    }

    #[test]
    fn relation_oracle() {
        let schema = schema();
        assert!(schema.is_relation("articles", "authors"));
        assert!(!schema.is_relation("articles", "comments"));
    }
}
