//! In-memory storage backend.
//!
//! Reference implementation of [`ContentStore`] over a guarded map. It
//! executes the full compiled-query contract: OR-joined equality filters,
//! `%substring%` contains patterns, multi-key ordering, free-text search and
//! offset/limit pagination. Used by the test suites and the demo server;
//! production deployments are expected to bring their own backend.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::core::ContentStore;
use crate::error::{StoreError, StoreResult};
use crate::types::{
    ContentRecord, ContentSchema, FieldValue, PageResult, SortDirection, StoreQuery, or_values,
    strip_pattern,
};

/// An in-memory content store.
pub struct MemoryStore {
    schema: ContentSchema,
    records: RwLock<BTreeMap<String, Vec<ContentRecord>>>,
}

impl MemoryStore {
    /// Creates an empty store for the given schema.
    pub fn new(schema: ContentSchema) -> Self {
        Self {
            schema,
            records: RwLock::new(BTreeMap::new()),
        }
    }

    /// Inserts a record under its content type.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnknownContentType` when the record's type is not
    /// part of the schema.
    pub fn insert(&self, record: ContentRecord) -> StoreResult<()> {
        if !self.schema.contains(&record.content_type) {
            return Err(StoreError::UnknownContentType {
                content_type: record.content_type.clone(),
            });
        }
        self.records
            .write()
            .entry(record.content_type.clone())
            .or_default()
            .push(record);
        Ok(())
    }

    /// Inserts many records (builder style, for tests and seed loading).
    pub fn with_records(
        self,
        records: impl IntoIterator<Item = ContentRecord>,
    ) -> StoreResult<Self> {
        for record in records {
            self.insert(record)?;
        }
        Ok(self)
    }

    fn guard_type(&self, content_type: &str) -> StoreResult<()> {
        if self.schema.contains(content_type) {
            Ok(())
        } else {
            Err(StoreError::UnknownContentType {
                content_type: content_type.to_string(),
            })
        }
    }
}

/// Renders a field to comparable text, for filtering and sorting.
///
/// Structured values (files, groups, relations) have no text form and are
/// not filterable here.
fn field_text(record: &ContentRecord, field: &str) -> Option<String> {
    match field {
        "id" => return Some(record.id.clone()),
        "slug" => return Some(record.slug.clone()),
        _ => {}
    }
    match record.get(field)? {
        FieldValue::Scalar(Value::String(s)) => Some(s.clone()),
        FieldValue::Scalar(Value::Number(n)) => Some(n.to_string()),
        FieldValue::Scalar(Value::Bool(b)) => Some(b.to_string()),
        FieldValue::Scalar(_) => None,
        FieldValue::Date(d) => Some(d.to_rfc3339()),
        FieldValue::Markup(m) => Some(m.clone()),
        _ => None,
    }
}

fn matches_equality(record: &ContentRecord, field: &str, wanted: &str) -> bool {
    if let Some(FieldValue::Taxonomy(terms)) = record.get(field) {
        return terms.iter().any(|t| t.slug == wanted || t.name == wanted);
    }
    field_text(record, field).is_some_and(|text| text == wanted)
}

fn matches_substring(record: &ContentRecord, field: &str, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    if let Some(FieldValue::Taxonomy(terms)) = record.get(field) {
        return terms
            .iter()
            .any(|t| t.name.to_lowercase().contains(&needle));
    }
    field_text(record, field).is_some_and(|text| text.to_lowercase().contains(&needle))
}

/// Free-text search over every textual leaf of a record, groups included.
fn matches_search(record: &ContentRecord, term: &str) -> bool {
    let term = term.to_lowercase();
    fn value_matches(value: &FieldValue, term: &str) -> bool {
        match value {
            FieldValue::Scalar(Value::String(s)) => s.to_lowercase().contains(term),
            FieldValue::Markup(m) => m.to_lowercase().contains(term),
            FieldValue::Taxonomy(terms) => {
                terms.iter().any(|t| t.name.to_lowercase().contains(term))
            }
            FieldValue::Group(groups) => groups
                .iter()
                .any(|set| set.values().any(|v| value_matches(v, term))),
            _ => false,
        }
    }
    record.slug.to_lowercase().contains(&term)
        || record.fields.values().any(|v| value_matches(v, &term))
}

fn matches(record: &ContentRecord, query: &StoreQuery) -> bool {
    if let Some(term) = &query.search {
        return matches_search(record, term);
    }
    let filters_ok = query.filters.iter().all(|(field, joined)| {
        or_values(joined).any(|wanted| matches_equality(record, field, wanted))
    });
    let contains_ok = query.contains.iter().all(|(field, joined)| {
        or_values(joined).any(|pattern| matches_substring(record, field, strip_pattern(pattern)))
    });
    filters_ok && contains_ok
}

/// Id-aware comparison: numeric when both sides parse, lexicographic
/// otherwise.
fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

fn compare_records(a: &ContentRecord, b: &ContentRecord, field: &str) -> Ordering {
    if field == "id" {
        return compare_ids(&a.id, &b.id);
    }
    // Records missing the sort field order last.
    match (field_text(a, field), field_text(b, field)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn sort_records(records: &mut [ContentRecord], order: &[(String, SortDirection)]) {
    records.sort_by(|a, b| {
        for (field, direction) in order {
            let ordering = match direction {
                SortDirection::Asc => compare_records(a, b, field),
                SortDirection::Desc => compare_records(a, b, field).reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        compare_ids(&a.id, &b.id)
    });
}

#[async_trait]
impl ContentStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn schema(&self) -> &ContentSchema {
        &self.schema
    }

    async fn fetch_page(
        &self,
        content_type: &str,
        query: &StoreQuery,
    ) -> StoreResult<PageResult> {
        self.guard_type(content_type)?;
        let records = self.records.read();
        let mut matched: Vec<ContentRecord> = records
            .get(content_type)
            .map(|list| list.iter().filter(|r| matches(r, query)).cloned().collect())
            .unwrap_or_default();
        sort_records(&mut matched, &query.order);

        let total = matched.len() as u64;
        let offset = query.offset.unwrap_or(0) as usize;
        let items: Vec<ContentRecord> = match query.limit {
            Some(limit) => matched.into_iter().skip(offset).take(limit as usize).collect(),
            None => matched.into_iter().skip(offset).collect(),
        };
        debug!(
            content_type,
            total,
            returned = items.len(),
            "memory store fetch_page"
        );
        Ok(PageResult::new(items, total, query.limit.unwrap_or(0)))
    }

    async fn fetch_one(
        &self,
        content_type: &str,
        id_or_slug: &str,
    ) -> StoreResult<Option<ContentRecord>> {
        self.guard_type(content_type)?;
        let records = self.records.read();
        Ok(records.get(content_type).and_then(|list| {
            list.iter()
                .find(|r| r.id == id_or_slug || r.slug == id_or_slug)
                .cloned()
        }))
    }

    async fn fetch_by_ids(
        &self,
        content_type: &str,
        ids: &[String],
    ) -> StoreResult<Vec<ContentRecord>> {
        self.guard_type(content_type)?;
        let records = self.records.read();
        let list = records.get(content_type);
        Ok(ids
            .iter()
            .filter_map(|id| list.and_then(|l| l.iter().find(|r| &r.id == id)).cloned())
            .collect())
    }

    async fn neighbors(
        &self,
        content_type: &str,
        id: &str,
    ) -> StoreResult<(Option<String>, Option<String>)> {
        self.guard_type(content_type)?;
        let records = self.records.read();
        let mut ids: Vec<&str> = records
            .get(content_type)
            .map(|list| list.iter().map(|r| r.id.as_str()).collect())
            .unwrap_or_default();
        ids.sort_by(|a, b| compare_ids(a, b));
        let position = match ids.iter().position(|candidate| *candidate == id) {
            Some(position) => position,
            None => return Ok((None, None)),
        };
        let prev = position.checked_sub(1).map(|p| ids[p].to_string());
        let next = ids.get(position + 1).map(|n| n.to_string());
        Ok((prev, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContentTypeDef;

    fn schema() -> ContentSchema {
        ContentSchema::new().with_type(
            "articles",
            ContentTypeDef {
                fields: vec!["title".to_string(), "status".to_string()],
                taxonomies: vec![],
                relations: vec![],
            },
        )
    }

    fn article(id: &str, title: &str, status: &str) -> ContentRecord {
        ContentRecord::new(id, "articles", format!("article-{id}"))
            .with_field("title", FieldValue::Scalar(Value::String(title.into())))
            .with_field("status", FieldValue::Scalar(Value::String(status.into())))
    }

    fn store() -> MemoryStore {
        MemoryStore::new(schema())
            .with_records([
                article("1", "Alpha", "published"),
                article("2", "Beta", "draft"),
                article("3", "Gamma", "published"),
                article("10", "Delta", "published"),
            ])
            .unwrap()
    }

    #[tokio::test]
    async fn filter_values_are_or_combined() {
        let query = StoreQuery {
            filters: BTreeMap::from([("title".to_string(), "Alpha || Beta".to_string())]),
            ..Default::default()
        };
        let page = store().fetch_page("articles", &query).await.unwrap();
        assert_eq!(page.total_results, 2);
    }

    #[tokio::test]
    async fn contains_matches_substrings_case_insensitively() {
        let query = StoreQuery {
            contains: BTreeMap::from([("title".to_string(), "%alph% || %GAMM%".to_string())]),
            ..Default::default()
        };
        let page = store().fetch_page("articles", &query).await.unwrap();
        assert_eq!(page.total_results, 2);
    }

    #[tokio::test]
    async fn pagination_reports_totals_over_full_match_set() {
        let query = StoreQuery {
            filters: BTreeMap::from([("status".to_string(), "published".to_string())]),
            order: vec![("id".to_string(), SortDirection::Asc)],
            offset: Some(2),
            limit: Some(2),
            ..Default::default()
        };
        let page = store().fetch_page("articles", &query).await.unwrap();
        assert_eq!(page.total_results, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "10");
    }

    #[tokio::test]
    async fn sort_descending_with_numeric_ids() {
        let query = StoreQuery {
            order: vec![("id".to_string(), SortDirection::Desc)],
            ..Default::default()
        };
        let page = store().fetch_page("articles", &query).await.unwrap();
        let ids: Vec<_> = page.items.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["10", "3", "2", "1"]);
    }

    #[tokio::test]
    async fn search_bypasses_filters() {
        let query = StoreQuery {
            filters: BTreeMap::from([("status".to_string(), "draft".to_string())]),
            search: Some("gamma".to_string()),
            ..Default::default()
        };
        let page = store().fetch_page("articles", &query).await.unwrap();
        assert_eq!(page.total_results, 1);
        assert_eq!(page.items[0].id, "3");
    }

    #[tokio::test]
    async fn fetch_one_accepts_id_or_slug() {
        let store = store();
        let by_id = store.fetch_one("articles", "2").await.unwrap().unwrap();
        let by_slug = store
            .fetch_one("articles", "article-2")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_id, by_slug);
    }

    #[tokio::test]
    async fn fetch_by_ids_preserves_requested_order_and_skips_unknown() {
        let records = store()
            .fetch_by_ids(
                "articles",
                &["3".to_string(), "99".to_string(), "1".to_string()],
            )
            .await
            .unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1"]);
    }

    #[tokio::test]
    async fn neighbors_follow_numeric_id_order() {
        let store = store();
        let (prev, next) = store.neighbors("articles", "3").await.unwrap();
        assert_eq!(prev.as_deref(), Some("2"));
        assert_eq!(next.as_deref(), Some("10"));

        let (prev, next) = store.neighbors("articles", "1").await.unwrap();
        assert_eq!(prev, None);
        assert_eq!(next.as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn unknown_content_type_is_an_error() {
        let err = store()
            .fetch_page("gadgets", &StoreQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownContentType { .. }));
    }
}
