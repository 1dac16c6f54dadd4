//! Compiled storage queries and paged results.
//!
//! A [`StoreQuery`] is what the API layer hands to a backend after parameter
//! compilation. Filter and contains values are pre-joined OR strings
//! (`a || b`, `%a% || %b%`); the backend splits them with [`or_values`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Separator between OR-combined filter values.
pub const OR_SEPARATOR: &str = " || ";

/// Splits an OR-joined filter value into its alternatives.
pub fn or_values(joined: &str) -> impl Iterator<Item = &str> {
    joined.split(OR_SEPARATOR)
}

/// Strips the `%...%` substring-pattern wrapping from a contains value.
pub fn strip_pattern(pattern: &str) -> &str {
    pattern
        .strip_prefix('%')
        .and_then(|p| p.strip_suffix('%'))
        .unwrap_or(pattern)
}

/// Sort direction for one order key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Ascending (the default).
    Asc,
    /// Descending (requested with a `-` prefix).
    Desc,
}

/// A compiled query, ready for execution by a backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreQuery {
    /// Field name to OR-joined equality values.
    pub filters: BTreeMap<String, String>,
    /// Field name to OR-joined `%substring%` patterns.
    pub contains: BTreeMap<String, String>,
    /// Sort keys, applied in order.
    pub order: Vec<(String, SortDirection)>,
    /// Free-text search term; when set, `filters` is bypassed.
    pub search: Option<String>,
    /// Number of records to skip.
    pub offset: Option<u64>,
    /// Page size; `None` fetches the full result set.
    pub limit: Option<u64>,
}

/// One page of results plus the totals needed for pagination links.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    /// The records on this page.
    pub items: Vec<crate::types::ContentRecord>,
    /// Total matching records across all pages.
    pub total_results: u64,
    /// Total pages; at least 1, even for an empty result set.
    pub total_pages: u64,
}

impl PageResult {
    /// Builds a page result, deriving `total_pages` from the page size.
    pub fn new(items: Vec<crate::types::ContentRecord>, total_results: u64, size: u64) -> Self {
        Self {
            items,
            total_results,
            total_pages: total_pages_for(total_results, size),
        }
    }
}

/// `max(1, ceil(total / size))`. A size of zero counts as one page.
pub(crate) fn total_pages_for(total_results: u64, size: u64) -> u64 {
    if size == 0 {
        return 1;
    }
    total_results.div_ceil(size).max(1)
}
