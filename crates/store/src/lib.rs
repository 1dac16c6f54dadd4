//! # strata-store - Content Data Model and Storage Interface
//!
//! This crate defines the data model consumed by the Strata content API and
//! the narrow interface a storage backend has to expose to serve it:
//!
//! - [`types::ContentRecord`] - a single stored content item with typed field
//!   values and relations to other records
//! - [`types::ContentSchema`] - the per-content-type schema used to validate
//!   request parameters (field oracle, relation oracle)
//! - [`types::StoreQuery`] / [`types::PageResult`] - the compiled query a
//!   backend executes and the paged result set it returns
//! - [`core::ContentStore`] - the async storage trait
//! - [`backends::memory::MemoryStore`] - an in-memory reference backend used
//!   by tests and the demo server
//!
//! The API layer never mutates records: backends own the data, the API only
//! projects it. All query execution (filtering, sorting, pagination, search)
//! happens behind the [`core::ContentStore`] boundary.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod types;

pub use core::ContentStore;
pub use error::{StoreError, StoreResult};
pub use types::{
    ContentRecord, ContentSchema, ContentTypeDef, FieldValue, FileRef, PageResult, Relation,
    SortDirection, StoreQuery, TaxonomyTerm,
};
