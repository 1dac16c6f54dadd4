//! Raw request parameters.
//!
//! [`RawParams`] is the ordered snapshot of the query string as received:
//! pairs are kept in wire order, duplicates included, values undecoded beyond
//! standard form decoding. The compiler reads families out of it (`filter[x]`,
//! `fields[t]`) and the link builder re-serializes it when it rewrites the
//! page number.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use url::form_urlencoded;

/// An ordered, immutable snapshot of the raw query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams {
    pairs: Vec<(String, String)>,
}

/// Splits `family[subscript]` into its parts.
pub(crate) fn split_subscript(key: &str) -> Option<(&str, &str)> {
    let open = key.find('[')?;
    let inner = &key[open + 1..];
    let close = inner.find(']')?;
    Some((&key[..open], &inner[..close]))
}

impl RawParams {
    /// Creates a snapshot from pre-parsed pairs.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Parses a query string into a snapshot.
    pub fn parse(query: &str) -> Self {
        let pairs = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    /// Returns the first value for an exact key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the `(subscript, value)` entries of a bracketed family, in
    /// wire order (e.g. `filter[title]=x` yields `("title", "x")` for the
    /// family `filter`).
    pub fn family<'a>(&'a self, name: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.pairs.iter().filter_map(move |(k, v)| {
            split_subscript(k)
                .filter(|(family, _)| *family == name)
                .map(|(_, subscript)| (subscript, v.as_str()))
        })
    }

    /// Returns all pairs in wire order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Returns true when no parameters were supplied.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<S> FromRequestParts<S> for RawParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RawParams::parse(parts.uri.query().unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_wire_order_and_duplicates() {
        let raw = RawParams::parse("b=2&a=1&b=3");
        assert_eq!(
            raw.pairs(),
            &[
                ("b".to_string(), "2".to_string()),
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "3".to_string()),
            ]
        );
        assert_eq!(raw.get("b"), Some("2"));
    }

    #[test]
    fn bracketed_keys_survive_form_decoding() {
        let raw = RawParams::parse("page%5Bnumber%5D=2&filter[title]=a,b");
        assert_eq!(raw.get("page[number]"), Some("2"));
        let filters: Vec<_> = raw.family("filter").collect();
        assert_eq!(filters, vec![("title", "a,b")]);
    }

    #[test]
    fn family_ignores_flat_and_foreign_keys() {
        let raw = RawParams::parse("filter[title]=x&fields[articles]=title&filter=flat");
        let filters: Vec<_> = raw.family("filter").collect();
        assert_eq!(filters, vec![("title", "x")]);
    }

    #[test]
    fn split_subscript_rejects_malformed_keys() {
        assert_eq!(split_subscript("filter[title]"), Some(("filter", "title")));
        assert_eq!(split_subscript("filter"), None);
        assert_eq!(split_subscript("filter[title"), None);
    }
}
