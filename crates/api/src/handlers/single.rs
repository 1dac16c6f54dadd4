//! Single-resource and related-listing handlers.
//!
//! `GET /{content_type}/{id_or_slug}` renders one resource with its sibling
//! prev/next links (natural store order, independent of list pagination) and
//! a relationship summary in the top-level `links`.
//!
//! `GET /{content_type}/{id_or_slug}/{related_type}` lists the records
//! related to one resource.

use axum::extract::{Path, State};
use serde_json::{Map, Value, json};
use strata_store::{ContentRecord, ContentStore};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::include;
use crate::links;
use crate::params::{QueryDescription, RawParams};
use crate::project::project;
use crate::response::{ApiResponse, Document};
use crate::state::AppState;

async fn fetch_record<S>(
    state: &AppState<S>,
    content_type: &str,
    slug: &str,
) -> ApiResult<ContentRecord>
where
    S: ContentStore,
{
    state
        .store()
        .fetch_one(content_type, slug)
        .await?
        .ok_or_else(|| {
            ApiError::not_found(format!(
                "No [{content_type}] found with id/slug: [{slug}]."
            ))
        })
}

/// Handler for a single resource.
///
/// # Response
///
/// `{links, data, included?}`; `links` carries `self`, one summary entry per
/// related type, and `prev`/`next` sibling links when neighbors exist.
pub async fn single_handler<S>(
    State(state): State<AppState<S>>,
    Path((content_type, slug)): Path<(String, String)>,
    raw: RawParams,
) -> ApiResult<ApiResponse>
where
    S: ContentStore,
{
    debug!(content_type = %content_type, slug = %slug, "processing single request");

    let query = QueryDescription::compile(
        raw,
        &content_type,
        state.schema(),
        state.settings(),
        state.default_page_size(),
        state.max_page_size(),
    )?;

    let record = fetch_record(&state, &content_type, &slug).await?;
    let ctx = state.projection_context();
    let resource = project(&record, query.fields_for(&content_type), &ctx);

    let base = state.base_path();
    let query_string = links::query_string(query.raw());

    let mut link_map = Map::new();
    link_map.insert(
        "self".to_string(),
        json!(format!(
            "{base}/{content_type}/{}{query_string}",
            record.id
        )),
    );
    for (related_type, link) in links::related_links(&record, base) {
        link_map.insert(related_type, link);
    }

    let (prev, next) = state.store().neighbors(&content_type, &record.id).await?;
    if let Some(prev) = prev {
        link_map.insert(
            "prev".to_string(),
            json!(format!("{base}/{content_type}/{prev}{query_string}")),
        );
    }
    if let Some(next) = next {
        link_map.insert(
            "next".to_string(),
            json!(format!("{base}/{content_type}/{next}{query_string}")),
        );
    }

    let included = include::resolve(
        state.store(),
        &query,
        std::slice::from_ref(&record),
        &ctx,
    )
    .await?;

    let document = Document::new()
        .links_value(link_map)
        .data(resource)
        .included(included)
        .build();

    Ok(ApiResponse::ok(document).with_callback(query.raw().get("callback")))
}

/// Handler for the related-items listing of one resource.
pub async fn related_handler<S>(
    State(state): State<AppState<S>>,
    Path((content_type, slug, related_type)): Path<(String, String, String)>,
    raw: RawParams,
) -> ApiResult<ApiResponse>
where
    S: ContentStore,
{
    debug!(
        content_type = %content_type,
        slug = %slug,
        related_type = %related_type,
        "processing related listing request"
    );

    let query = QueryDescription::compile(
        raw,
        &content_type,
        state.schema(),
        state.settings(),
        state.default_page_size(),
        state.max_page_size(),
    )?;

    let record = fetch_record(&state, &content_type, &slug).await?;

    let mut ids: Vec<String> = Vec::new();
    for relation in record.relations_to(&related_type) {
        if !ids.contains(&relation.to_id) {
            ids.push(relation.to_id.clone());
        }
    }
    if ids.is_empty() {
        return Err(ApiError::not_found(format!(
            "No related items of type [{related_type}] found for [{content_type}] with id/slug: [{slug}]."
        )));
    }

    let related = state.store().fetch_by_ids(&related_type, &ids).await?;
    let ctx = state.projection_context();
    let fields = query.fields_for(&related_type);
    let data: Vec<Value> = related
        .iter()
        .map(|record| project(record, fields, &ctx))
        .collect();

    let self_link = format!(
        "{}/{content_type}/{slug}/{related_type}{}",
        state.base_path(),
        links::query_string(query.raw())
    );

    let document = Document::new()
        .links(std::collections::BTreeMap::from([(
            "self".to_string(),
            self_link,
        )]))
        .meta(data.len(), data.len() as u64)
        .data(Value::Array(data))
        .build();

    Ok(ApiResponse::ok(document).with_callback(query.raw().get("callback")))
}
