//! Content records and typed field values.
//!
//! A [`ContentRecord`] is one stored content item. Its fields carry a
//! [`FieldValue`], a closed union over every field kind the projection layer
//! knows how to render. Rendering dispatches on the variant, so adding a new
//! field kind is a compile-time concern, not a runtime type probe.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single image or file reference as stored by the backend.
///
/// Only `file` is mandatory; editors may attach a title or alt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    /// The stored filename, relative to the files area.
    pub file: String,
    /// Optional display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional alt text (images).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl FileRef {
    /// Creates a reference with just a filename.
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            title: None,
            alt: None,
        }
    }
}

/// One taxonomy assignment on a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyTerm {
    /// The taxonomy this term belongs to (e.g. "categories").
    pub taxonomy: String,
    /// URL-safe slug of the term.
    pub slug: String,
    /// Display name of the term.
    pub name: String,
}

/// A directed relation between two content records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Content type of the owning record.
    pub from_type: String,
    /// Id of the owning record.
    pub from_id: String,
    /// Content type of the related record.
    pub to_type: String,
    /// Id of the related record.
    pub to_id: String,
}

/// A typed field value.
///
/// The variant set is closed on purpose: the projection layer matches
/// exhaustively over it, so every stored value has exactly one rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    /// Any plain JSON scalar (or pre-rendered structure) passed through as-is.
    Scalar(Value),
    /// A date/time value with offset.
    Date(DateTime<FixedOffset>),
    /// Rich-text markup; coerced to a plain string when rendered.
    Markup(String),
    /// A single file reference.
    File(FileRef),
    /// A list of file references.
    FileList(Vec<FileRef>),
    /// A single image reference (gets a thumbnail link when configured).
    Image(FileRef),
    /// A list of image references.
    ImageList(Vec<FileRef>),
    /// Taxonomy assignments; grouped under `attributes.taxonomy` on render.
    Taxonomy(Vec<TaxonomyTerm>),
    /// Relations held in a field; never rendered into `attributes`.
    Relations(Vec<Relation>),
    /// A repeating field group: an ordered list of field sets.
    Group(Vec<BTreeMap<String, FieldValue>>),
}

/// One stored content item, read-only from the API layer's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Backend-assigned id, unique within the content type.
    pub id: String,
    /// The content type this record belongs to.
    pub content_type: String,
    /// URL-safe slug, unique within the content type.
    pub slug: String,
    /// Field name to typed value.
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
    /// Relations owned by this record.
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl ContentRecord {
    /// Creates an empty record.
    pub fn new(
        id: impl Into<String>,
        content_type: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            content_type: content_type.into(),
            slug: slug.into(),
            fields: BTreeMap::new(),
            relations: Vec::new(),
        }
    }

    /// Adds a field value (builder style).
    pub fn with_field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Adds a relation to another record (builder style).
    pub fn with_relation(mut self, to_type: impl Into<String>, to_id: impl Into<String>) -> Self {
        let relation = Relation {
            from_type: self.content_type.clone(),
            from_id: self.id.clone(),
            to_type: to_type.into(),
            to_id: to_id.into(),
        };
        self.relations.push(relation);
        self
    }

    /// Returns the value of a field, if present on this record.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Returns the relations targeting the given content type.
    pub fn relations_to(&self, to_type: &str) -> impl Iterator<Item = &Relation> {
        self.relations.iter().filter(move |r| r.to_type == to_type)
    }

    /// Returns the distinct content types this record relates to, in
    /// deterministic order.
    pub fn related_types(&self) -> BTreeSet<&str> {
        self.relations.iter().map(|r| r.to_type.as_str()).collect()
    }
}
