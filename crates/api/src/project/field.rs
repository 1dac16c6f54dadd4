//! Field rendering.
//!
//! One typed field value in, one JSON-safe representation out. Dispatch is a
//! closed match over [`FieldValue`], so a new field kind fails to compile
//! until it has a rendering.

use serde_json::{Map, Value, json};
use strata_store::{FieldValue, FileRef, TaxonomyTerm};

use super::ProjectionContext;

/// The outcome of rendering one field.
#[derive(Debug)]
pub(crate) enum Rendered {
    /// A plain attribute value, stored under the field's own key.
    Value(Value),
    /// Taxonomy terms; the projector groups these under `attributes.taxonomy`
    /// instead of the field key.
    Taxonomy(Vec<TaxonomyTerm>),
    /// Not an attribute at all (relations live in `relationships`).
    Skipped,
}

/// Renders a date: RFC3339 at second precision in ISO mode, the raw storage
/// format otherwise.
fn render_date(date: &chrono::DateTime<chrono::FixedOffset>, ctx: &ProjectionContext) -> Value {
    if ctx.iso_dates {
        Value::String(date.to_rfc3339_opts(chrono::SecondsFormat::Secs, false))
    } else {
        Value::String(date.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}

/// Rewrites a file reference to `{file, url, thumbnail?}`.
///
/// The thumbnail link is only present for image fields and only when
/// thumbnail dimensions are configured.
fn render_file(file: &FileRef, ctx: &ProjectionContext, with_thumbnail: bool) -> Value {
    let mut object = Map::new();
    object.insert("file".to_string(), json!(file.file));
    if let Some(title) = &file.title {
        object.insert("title".to_string(), json!(title));
    }
    if let Some(alt) = &file.alt {
        object.insert("alt".to_string(), json!(alt));
    }
    object.insert(
        "url".to_string(),
        json!(format!("{}{}{}", ctx.base_path, ctx.files_path, file.file)),
    );
    if with_thumbnail && let Some((width, height)) = ctx.thumbnail {
        object.insert(
            "thumbnail".to_string(),
            json!(format!(
                "{}/thumbs/{}x{}/{}",
                ctx.base_path, width, height, file.file
            )),
        );
    }
    Value::Object(object)
}

/// Groups taxonomy terms into `{taxonomy_type: {"/type/slug": name}}`.
pub(crate) fn taxonomy_map(terms: &[TaxonomyTerm]) -> Map<String, Value> {
    let mut grouped: std::collections::BTreeMap<String, Map<String, Value>> = Default::default();
    for term in terms {
        let route = format!("/{}/{}", term.taxonomy, term.slug);
        grouped
            .entry(term.taxonomy.clone())
            .or_default()
            .insert(route, json!(term.name));
    }
    grouped
        .into_iter()
        .map(|(taxonomy_type, routes)| (taxonomy_type, Value::Object(routes)))
        .collect()
}

/// Renders one field value.
pub(crate) fn render(value: &FieldValue, ctx: &ProjectionContext) -> Rendered {
    match value {
        FieldValue::Scalar(scalar) => Rendered::Value(scalar.clone()),
        FieldValue::Date(date) => Rendered::Value(render_date(date, ctx)),
        // Rich-text wrappers are coerced to plain strings.
        FieldValue::Markup(markup) => Rendered::Value(Value::String(markup.clone())),
        FieldValue::File(file) => Rendered::Value(render_file(file, ctx, false)),
        FieldValue::Image(image) => Rendered::Value(render_file(image, ctx, true)),
        FieldValue::FileList(files) => Rendered::Value(Value::Array(
            files.iter().map(|f| render_file(f, ctx, false)).collect(),
        )),
        FieldValue::ImageList(images) => Rendered::Value(Value::Array(
            images.iter().map(|f| render_file(f, ctx, true)).collect(),
        )),
        FieldValue::Taxonomy(terms) => Rendered::Taxonomy(terms.clone()),
        FieldValue::Relations(_) => Rendered::Skipped,
        FieldValue::Group(groups) => {
            let rendered: Vec<Value> = groups
                .iter()
                .map(|set| {
                    let mut object = Map::new();
                    for (name, member) in set {
                        match render(member, ctx) {
                            Rendered::Value(v) => {
                                object.insert(name.clone(), v);
                            }
                            Rendered::Taxonomy(terms) => {
                                object.insert(name.clone(), Value::Object(taxonomy_map(&terms)));
                            }
                            Rendered::Skipped => {}
                        }
                    }
                    Value::Object(object)
                })
                .collect();
            Rendered::Value(Value::Array(rendered))
        }
    }
}
