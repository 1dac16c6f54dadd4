//! The include resolver.
//!
//! Resolves the validated include list of a request into the compound
//! `included` resources: ids are collected across every primary record first,
//! then fetched in one batched call per include type, so the number of
//! storage round trips is bounded by the number of include types, not by the
//! number of records.

use std::collections::BTreeSet;

use serde_json::Value;
use strata_store::{ContentRecord, ContentStore};
use tracing::debug;

use crate::error::ApiResult;
use crate::params::QueryDescription;
use crate::project::{ProjectionContext, project};

/// Fetches and projects the requested include types for a set of primary
/// records.
///
/// A related resource referenced by several primary records appears exactly
/// once, keyed by `(type, id)`, in first-seen order.
pub async fn resolve<S>(
    store: &S,
    query: &QueryDescription,
    primary: &[ContentRecord],
    ctx: &ProjectionContext<'_>,
) -> ApiResult<Vec<Value>>
where
    S: ContentStore,
{
    let mut included = Vec::new();
    let mut seen: BTreeSet<(String, String)> = BTreeSet::new();

    for include in query.includes() {
        let mut ids: Vec<String> = Vec::new();
        for record in primary {
            for relation in record.relations_to(include) {
                if !ids.contains(&relation.to_id) {
                    ids.push(relation.to_id.clone());
                }
            }
        }
        if ids.is_empty() {
            continue;
        }

        debug!(include = %include, ids = ids.len(), "resolving include type");
        let records = store.fetch_by_ids(include, &ids).await?;
        let fields = query.fields_for(include);
        for related in &records {
            if seen.insert((related.content_type.clone(), related.id.clone())) {
                included.push(project(related, fields, ctx));
            }
        }
    }

    Ok(included)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::RawParams;
    use crate::settings::ApiSettings;
    use serde_json::json;
    use strata_store::backends::memory::MemoryStore;
    use strata_store::{ContentSchema, ContentTypeDef, FieldValue};

    fn schema() -> ContentSchema {
        ContentSchema::new()
            .with_type(
                "articles",
                ContentTypeDef {
                    fields: vec!["title".to_string()],
                    relations: vec!["authors".to_string()],
                    ..Default::default()
                },
            )
            .with_type(
                "authors",
                ContentTypeDef {
                    fields: vec!["name".to_string()],
                    ..Default::default()
                },
            )
    }

    fn author(id: &str, name: &str) -> ContentRecord {
        ContentRecord::new(id, "authors", format!("author-{id}"))
            .with_field("name", FieldValue::Scalar(json!(name)))
    }

    #[tokio::test]
    async fn shared_related_records_are_included_once() {
        let store = MemoryStore::new(schema())
            .with_records([author("7", "Ada"), author("8", "Grace")])
            .unwrap();
        let primary = vec![
            ContentRecord::new("1", "articles", "a").with_relation("authors", "7"),
            ContentRecord::new("2", "articles", "b")
                .with_relation("authors", "7")
                .with_relation("authors", "8"),
        ];
        let query = QueryDescription::compile(
            RawParams::parse("include=authors"),
            "articles",
            store.schema(),
            &ApiSettings::default(),
            10,
            100,
        )
        .unwrap();
        let ctx = ProjectionContext {
            base_path: "http://x",
            files_path: "/files/",
            thumbnail: None,
            iso_dates: true,
            replacements: &[],
        };

        let included = resolve(&store, &query, &primary, &ctx).await.unwrap();
        assert_eq!(included.len(), 2);
        assert_eq!(included[0]["id"], "7");
        assert_eq!(included[1]["id"], "8");
    }

    #[tokio::test]
    async fn no_relations_means_no_included() {
        let store = MemoryStore::new(schema());
        let primary = vec![ContentRecord::new("1", "articles", "a")];
        let query = QueryDescription::compile(
            RawParams::parse("include=authors"),
            "articles",
            store.schema(),
            &ApiSettings::default(),
            10,
            100,
        )
        .unwrap();
        let ctx = ProjectionContext {
            base_path: "http://x",
            files_path: "/files/",
            thumbnail: None,
            iso_dates: true,
            replacements: &[],
        };

        let included = resolve(&store, &query, &primary, &ctx).await.unwrap();
        assert!(included.is_empty());
    }
}
