//! The parameter compiler.
//!
//! [`QueryDescription::compile`] turns the raw query-parameter snapshot into
//! a validated, typed query description. Compilation is a pure function of
//! the snapshot, the content schema and the settings: no side effects, no
//! ordering dependency between parameter keys, and fail-fast — an invalid
//! field or include aborts the whole request before any fetch happens.
//!
//! One module per parameter family:
//!
//! - [`page`] - `page[number]` / `page[size]` (+ legacy `page` / `limit`)
//! - [`sort`] - `sort=a,-b`
//! - [`filter`] - `filter[field]=v1,v2` (OR of exact matches)
//! - [`contains`] - `contains[field]=v1,v2` (OR of substring matches)
//! - [`include`] - `include=typeA,typeB`
//! - [`fields`] - `fields[type]=f1,f2` (sparse fieldsets, advisory)

pub mod contains;
pub mod fields;
pub mod filter;
pub mod include;
pub mod page;
pub mod raw;
pub mod sort;

use std::collections::BTreeMap;

use strata_store::{ContentSchema, StoreQuery};
use thiserror::Error;

use crate::settings::ApiSettings;

pub use page::Page;
pub use raw::RawParams;
pub use sort::SortSpec;

/// A compile-time parameter failure.
///
/// Returned, never thrown: handlers convert these into the error envelope
/// before any storage call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A filter, contains or sort key references a field the content type
    /// does not have.
    #[error("Parameter [{field}] does not exist for contenttype with name [{content_type}].")]
    InvalidField {
        /// The offending field name.
        field: String,
        /// The content type it was checked against.
        content_type: String,
    },

    /// An include names a content type that is not a configured relation of
    /// the primary type.
    #[error(
        "Content type [{include}] requested in include is not a configured relation of [{content_type}]."
    )]
    InvalidInclude {
        /// The offending include name.
        include: String,
        /// The primary content type.
        content_type: String,
    },

    /// The primary content type itself is unknown.
    #[error("Contenttype with name [{content_type}] not found.")]
    UnknownContentType {
        /// The unknown content type.
        content_type: String,
    },
}

/// A validated, immutable description of one request's query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDescription {
    content_type: String,
    page: Page,
    sort: SortSpec,
    filters: BTreeMap<String, String>,
    contains: BTreeMap<String, String>,
    includes: Vec<String>,
    fields: BTreeMap<String, Vec<String>>,
    raw: RawParams,
}

impl QueryDescription {
    /// Compiles the raw parameters for one content type.
    ///
    /// Field lists are resolved for the primary type, every include type, and
    /// every type named in the `fields[...]` family, so downstream projection
    /// never has to consult the settings again.
    pub fn compile(
        raw: RawParams,
        content_type: &str,
        schema: &ContentSchema,
        settings: &ApiSettings,
        default_page_size: u64,
        max_page_size: u64,
    ) -> Result<Self, CompileError> {
        if !schema.contains(content_type) {
            return Err(CompileError::UnknownContentType {
                content_type: content_type.to_string(),
            });
        }

        let page = Page::compile(&raw, default_page_size, max_page_size);
        let sort = SortSpec::compile(
            raw.get("sort"),
            settings.default_order(content_type),
            content_type,
            schema,
        )?;
        let filters = filter::compile(
            &raw,
            content_type,
            schema,
            settings.where_clause(content_type),
        )?;
        let contains = contains::compile(&raw, content_type, schema)?;
        let includes = include::compile(raw.get("include"), content_type, schema)?;

        let mut fields = BTreeMap::new();
        let mut field_types: Vec<&str> = vec![content_type];
        field_types.extend(includes.iter().map(String::as_str));
        field_types.extend(
            raw.family("fields")
                .map(|(subscript, _)| subscript)
                .filter(|subscript| schema.contains(subscript)),
        );
        for field_type in field_types {
            fields
                .entry(field_type.to_string())
                .or_insert_with(|| fields::resolve(&raw, field_type, schema, settings));
        }

        Ok(Self {
            content_type: content_type.to_string(),
            page,
            sort,
            filters,
            contains,
            includes,
            fields,
            raw,
        })
    }

    /// The primary content type of the request.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// The validated pagination request.
    pub fn page(&self) -> Page {
        self.page
    }

    /// The validated sort specification.
    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    /// Compiled equality filters (field to OR-joined values).
    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    /// Compiled substring filters (field to OR-joined patterns).
    pub fn contains(&self) -> &BTreeMap<String, String> {
        &self.contains
    }

    /// The validated include list, in request order.
    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    /// The resolved field list for a content type; empty when the type was
    /// not part of this request (projection then defaults to the record's
    /// own fields).
    pub fn fields_for(&self, content_type: &str) -> &[String] {
        self.fields
            .get(content_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The raw parameter snapshot this description was compiled from.
    pub fn raw(&self) -> &RawParams {
        &self.raw
    }

    /// Lowers the description into the query a storage backend executes.
    pub fn to_store_query(&self) -> StoreQuery {
        StoreQuery {
            filters: self.filters.clone(),
            contains: self.contains.clone(),
            order: self.sort.keys().to_vec(),
            search: None,
            offset: Some(self.page.offset()),
            limit: Some(self.page.size()),
        }
    }
}
