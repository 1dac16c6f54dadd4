//! Response assembly.
//!
//! [`Document`] builds the JSON:API envelope (`links`, `meta`, `data`,
//! `included`); [`ApiResponse`] carries a finished document to the wire,
//! switching to JSONP when the request asked for a callback.

use std::collections::BTreeMap;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};

/// JSON:API media type for regular responses.
const JSONAPI_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Builder for response documents.
///
/// The `included` key is only present when at least one compound resource
/// was resolved.
#[derive(Debug, Default)]
pub struct Document {
    links: Option<Value>,
    meta: Option<Value>,
    data: Option<Value>,
    included: Vec<Value>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `links` object from a name-to-URL map.
    pub fn links(mut self, links: BTreeMap<String, String>) -> Self {
        self.links = Some(json!(links));
        self
    }

    /// Sets the `links` object from already-built values (used when link
    /// entries carry structure, e.g. related-link summaries).
    pub fn links_value(mut self, links: Map<String, Value>) -> Self {
        self.links = Some(Value::Object(links));
        self
    }

    /// Sets `meta.count` / `meta.total`.
    pub fn meta(mut self, count: usize, total: u64) -> Self {
        self.meta = Some(json!({"count": count, "total": total}));
        self
    }

    /// Sets the primary data.
    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Adds the compound resources.
    pub fn included(mut self, included: Vec<Value>) -> Self {
        self.included = included;
        self
    }

    /// Builds the envelope.
    pub fn build(self) -> Value {
        let mut envelope = Map::new();
        if let Some(links) = self.links {
            envelope.insert("links".to_string(), links);
        }
        if let Some(meta) = self.meta {
            envelope.insert("meta".to_string(), meta);
        }
        if let Some(data) = self.data {
            envelope.insert("data".to_string(), data);
        }
        if !self.included.is_empty() {
            envelope.insert("included".to_string(), Value::Array(self.included));
        }
        Value::Object(envelope)
    }
}

/// Builds the JSON:API error envelope.
pub fn error_envelope(status: u16, title: &str, detail: &str) -> Value {
    json!({
        "errors": {
            "status": status.to_string(),
            "title": title,
            "detail": detail,
        }
    })
}

/// A finished API response.
///
/// Wraps the document as JSONP (`callback(...)`) when the request supplied a
/// `callback` parameter; plain JSON:API otherwise. Static headers from the
/// settings are applied by the response-header layer, not here.
#[derive(Debug)]
pub struct ApiResponse {
    document: Value,
    callback: Option<String>,
}

impl ApiResponse {
    /// Creates a successful response for a document.
    pub fn ok(document: Value) -> Self {
        Self {
            document,
            callback: None,
        }
    }

    /// Requests JSONP wrapping with the given callback name.
    pub fn with_callback(mut self, callback: Option<&str>) -> Self {
        self.callback = callback
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        self
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        match self.callback {
            Some(callback) => {
                let body = format!("{}({})", callback, self.document);
                (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, mime::TEXT_JAVASCRIPT.as_ref())],
                    body,
                )
                    .into_response()
            }
            None => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, JSONAPI_MEDIA_TYPE)],
                self.document.to_string(),
            )
                .into_response(),
        }
    }
}
