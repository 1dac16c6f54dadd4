//! Shared types for the storage layer.
//!
//! These types cross the boundary between the API layer and storage backends:
//! records and field values flow out of a backend, compiled queries flow in.

mod query;
mod record;
mod schema;

pub use query::{OR_SEPARATOR, PageResult, SortDirection, StoreQuery, or_values, strip_pattern};
pub use record::{ContentRecord, FieldValue, FileRef, Relation, TaxonomyTerm};
pub use schema::{BASE_FIELDS, ContentSchema, ContentTypeDef};
