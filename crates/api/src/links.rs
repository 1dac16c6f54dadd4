//! Pagination and relationship link building.
//!
//! The link set of a listing response carries `self` plus, when more than one
//! page exists, `first`/`last`/`prev`/`next` — each absent when it would
//! point at the current page. Re-serialized query strings preserve every
//! parameter of the request; only the page-number key is overridden.

use std::collections::BTreeMap;

use serde_json::{Value, json};
use strata_store::ContentRecord;
use url::form_urlencoded;

use crate::params::RawParams;

/// The canonical page-number parameter key.
pub const PAGE_NUMBER_KEY: &str = "page[number]";

/// Serializes parameter pairs into a query string.
///
/// Encoding is applied and then undone so bracketed keys and comma lists stay
/// human-readable (`page[number]=2`, not `page%5Bnumber%5D=2`).
fn serialize_pairs<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    let encoded = serializer.finish();
    form_urlencoded::parse(encoded.as_bytes())
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Re-serializes the raw parameters as-is (`?...`, or empty).
pub fn query_string(raw: &RawParams) -> String {
    let serialized = serialize_pairs(raw.pairs().iter().map(|(k, v)| (k.as_str(), v.as_str())));
    if serialized.is_empty() {
        String::new()
    } else {
        format!("?{serialized}")
    }
}

/// Re-serializes the raw parameters with the page number forced to `page`.
///
/// Both the bracketed key and the legacy flat `page` alias are replaced by a
/// single canonical `page[number]` entry; every other parameter is preserved
/// in wire order.
pub fn query_string_with_page(raw: &RawParams, page: u64) -> String {
    let page_value = page.to_string();
    let mut pairs: Vec<(&str, &str)> = Vec::with_capacity(raw.pairs().len() + 1);
    let mut replaced = false;
    for (key, value) in raw.pairs() {
        if key == PAGE_NUMBER_KEY || key == "page" {
            if !replaced {
                pairs.push((PAGE_NUMBER_KEY, &page_value));
                replaced = true;
            }
        } else {
            pairs.push((key, value));
        }
    }
    if !replaced {
        pairs.push((PAGE_NUMBER_KEY, &page_value));
    }
    format!("?{}", serialize_pairs(pairs.into_iter()))
}

/// Builds the pagination link set for a listing response.
///
/// `label` is the path segment under the base: a content-type name, or a
/// search label like `articles/search`.
pub fn page_links(
    base_path: &str,
    label: &str,
    current_page: u64,
    total_pages: u64,
    raw: &RawParams,
) -> BTreeMap<String, String> {
    let path = format!("{base_path}/{label}");
    let mut links = BTreeMap::new();

    links.insert(
        "self".to_string(),
        format!("{path}{}", query_string_with_page(raw, current_page)),
    );

    if total_pages <= 1 {
        return links;
    }

    let first_page = 1;
    let prev_page = current_page.saturating_sub(1).max(first_page);
    let next_page = (current_page + 1).min(total_pages);

    if current_page != first_page {
        links.insert(
            "first".to_string(),
            format!("{path}{}", query_string_with_page(raw, first_page)),
        );
    }
    if current_page != total_pages {
        links.insert(
            "last".to_string(),
            format!("{path}{}", query_string_with_page(raw, total_pages)),
        );
    }
    if current_page != prev_page {
        links.insert(
            "prev".to_string(),
            format!("{path}{}", query_string_with_page(raw, prev_page)),
        );
    }
    if current_page != next_page {
        links.insert(
            "next".to_string(),
            format!("{path}{}", query_string_with_page(raw, next_page)),
        );
    }

    links
}

/// Builds the relationship summary rendered next to a single resource:
/// one `{href, meta: {count}}` entry per related type.
pub fn related_links(record: &ContentRecord, base_path: &str) -> BTreeMap<String, Value> {
    let mut related = BTreeMap::new();
    for related_type in record.related_types() {
        let count = record.relations_to(related_type).count();
        related.insert(
            related_type.to_string(),
            json!({
                "href": format!(
                    "{}/{}/{}/{}",
                    base_path, record.content_type, record.id, related_type
                ),
                "meta": {"count": count},
            }),
        );
    }
    related
}
