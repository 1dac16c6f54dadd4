//! Pagination parameters.
//!
//! Parses `page[number]` / `page[size]`, plus the legacy flat `page` / `limit`
//! aliases. Out-of-range or unparsable values fall back to the defaults
//! rather than failing the request.

use super::raw::RawParams;

/// Default page number when none (or an invalid one) is requested.
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

/// Default page size when none (or an invalid one) is requested.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// A validated pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u64,
    size: u64,
}

fn positive(value: Option<&str>) -> Option<u64> {
    value.and_then(|v| v.parse::<u64>().ok()).filter(|v| *v >= 1)
}

impl Page {
    /// Compiles the page parameters out of the raw snapshot.
    ///
    /// The bracketed form wins over the legacy flat aliases when both are
    /// present; the size is capped at `max_size`.
    pub fn compile(raw: &RawParams, default_size: u64, max_size: u64) -> Self {
        let number = positive(raw.get("page[number]"))
            .or_else(|| positive(raw.get("page")))
            .unwrap_or(DEFAULT_PAGE_NUMBER);
        let size = positive(raw.get("page[size]"))
            .or_else(|| positive(raw.get("limit")))
            .unwrap_or(default_size)
            .min(max_size);
        Self { number, size }
    }

    /// The requested page number (1-based).
    pub fn number(&self) -> u64 {
        self.number
    }

    /// The requested page size.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// The record offset of this page.
    pub fn offset(&self) -> u64 {
        (self.number - 1) * self.size
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: DEFAULT_PAGE_NUMBER,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}
