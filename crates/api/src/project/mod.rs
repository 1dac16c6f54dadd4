//! The resource projector.
//!
//! [`project`] turns one content record into a JSON:API resource object:
//! `{id, type, attributes, relationships, links}`. Field values render
//! through [`field`] (a closed match over the typed union), taxonomy terms
//! are grouped under `attributes.taxonomy`, relations become one
//! relationship block per distinct related type, and a final recursive pass
//! applies the configured string replacements to the attribute tree.
//!
//! Everything the projector needs arrives through [`ProjectionContext`];
//! there is no request-global state.

mod field;
mod replace;

use serde_json::{Map, Value, json};
use strata_store::ContentRecord;

use crate::settings::{ApiSettings, Replacement};

pub(crate) use field::taxonomy_map;

/// Everything field rendering and resource assembly depend on.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionContext<'a> {
    /// Absolute base of every generated link (no trailing slash).
    pub base_path: &'a str,
    /// Path prefix of the files area, appended to `base_path`.
    pub files_path: &'a str,
    /// Thumbnail dimensions; image fields link a thumbnail when set.
    pub thumbnail: Option<(u32, u32)>,
    /// Render dates as ISO-8601 strings.
    pub iso_dates: bool,
    /// Ordered literal replacements for rendered string leaves.
    pub replacements: &'a [Replacement],
}

impl<'a> ProjectionContext<'a> {
    /// Builds a context from the settings and the link base.
    pub fn new(base_path: &'a str, settings: &'a ApiSettings) -> Self {
        Self {
            base_path,
            files_path: &settings.files_path,
            thumbnail: settings.thumbnail.map(|t| (t.width, t.height)),
            iso_dates: settings.date_iso_8601,
            replacements: &settings.replacements,
        }
    }
}

/// Projects one record into a resource object.
///
/// `field_names` is the resolved sparse fieldset; when empty, every field
/// present on the record is rendered. `id` and `type` never appear inside
/// `attributes`. A declared field with no value on the record is simply
/// absent rather than an error.
pub fn project(record: &ContentRecord, field_names: &[String], ctx: &ProjectionContext) -> Value {
    let names: Vec<&str> = if field_names.is_empty() {
        record.fields.keys().map(String::as_str).collect()
    } else {
        let mut names: Vec<&str> = Vec::new();
        for name in field_names {
            if name != "id" && name != "type" && !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
        names
    };

    let mut attributes = Map::new();
    let mut taxonomy = Map::new();

    for name in names {
        if name == "slug" {
            attributes.insert("slug".to_string(), json!(record.slug));
            continue;
        }
        let Some(value) = record.get(name) else {
            // Tolerant read: heterogeneous upstream content may miss fields.
            continue;
        };
        match field::render(value, ctx) {
            field::Rendered::Value(rendered) => {
                attributes.insert(name.to_string(), rendered);
            }
            field::Rendered::Taxonomy(terms) => {
                for (taxonomy_type, routes) in taxonomy_map(&terms) {
                    taxonomy.insert(taxonomy_type, routes);
                }
            }
            field::Rendered::Skipped => {}
        }
    }

    if !taxonomy.is_empty() {
        attributes.insert("taxonomy".to_string(), Value::Object(taxonomy));
    }

    let mut resource = Map::new();
    resource.insert("id".to_string(), json!(record.id));
    resource.insert("type".to_string(), json!(record.content_type));

    if !attributes.is_empty() {
        let mut attributes = Value::Object(attributes);
        replace::apply(&mut attributes, ctx.replacements);
        resource.insert("attributes".to_string(), attributes);
    }

    let relationships = relationship_blocks(record, ctx);
    if !relationships.is_empty() {
        resource.insert("relationships".to_string(), Value::Object(relationships));
    }

    resource.insert(
        "links".to_string(),
        json!({
            "self": format!("{}/{}/{}", ctx.base_path, record.content_type, record.id),
        }),
    );

    Value::Object(resource)
}

/// One relationship block per distinct related type, each listing every
/// related `{type, id}` pair.
fn relationship_blocks(record: &ContentRecord, ctx: &ProjectionContext) -> Map<String, Value> {
    let mut relationships = Map::new();
    for related_type in record.related_types() {
        let data: Vec<Value> = record
            .relations_to(related_type)
            .map(|relation| json!({"type": relation.to_type, "id": relation.to_id}))
            .collect();
        relationships.insert(
            related_type.to_string(),
            json!({
                "links": {
                    "related": format!(
                        "{}/{}/{}/{}",
                        ctx.base_path, record.content_type, record.id, related_type
                    ),
                },
                "data": data,
            }),
        );
    }
    relationships
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_store::{FieldValue, FileRef, TaxonomyTerm};

    fn ctx() -> ProjectionContext<'static> {
        ProjectionContext {
            base_path: "http://cms.example.com",
            files_path: "/files/",
            thumbnail: None,
            iso_dates: true,
            replacements: &[],
        }
    }

    fn article() -> ContentRecord {
        ContentRecord::new("1", "articles", "first-post")
            .with_field("title", FieldValue::Scalar(json!("First post")))
            .with_field("body", FieldValue::Markup("<p>Hello</p>".to_string()))
            .with_field(
                "categories",
                FieldValue::Taxonomy(vec![TaxonomyTerm {
                    taxonomy: "categories".to_string(),
                    slug: "news".to_string(),
                    name: "News".to_string(),
                }]),
            )
            .with_relation("authors", "7")
            .with_relation("authors", "8")
    }

    #[test]
    fn id_and_type_never_land_in_attributes() {
        let resource = project(
            &article(),
            &["id".to_string(), "type".to_string(), "title".to_string()],
            &ctx(),
        );
        assert_eq!(resource["id"], "1");
        assert_eq!(resource["type"], "articles");
        let attributes = resource["attributes"].as_object().unwrap();
        assert!(!attributes.contains_key("id"));
        assert!(!attributes.contains_key("type"));
        assert!(attributes.contains_key("title"));
    }

    #[test]
    fn empty_fieldset_renders_every_record_field() {
        let resource = project(&article(), &[], &ctx());
        let attributes = resource["attributes"].as_object().unwrap();
        assert!(attributes.contains_key("title"));
        assert!(attributes.contains_key("body"));
        assert!(attributes.contains_key("taxonomy"));
    }

    #[test]
    fn taxonomy_never_appears_under_its_field_key() {
        let resource = project(&article(), &[], &ctx());
        let attributes = resource["attributes"].as_object().unwrap();
        assert!(!attributes.contains_key("categories"));
        assert_eq!(
            attributes["taxonomy"]["categories"]["/categories/news"],
            "News"
        );
    }

    #[test]
    fn missing_fields_are_tolerated() {
        let resource = project(&article(), &["title".to_string(), "teaser".to_string()], &ctx());
        let attributes = resource["attributes"].as_object().unwrap();
        assert!(attributes.contains_key("title"));
        assert!(!attributes.contains_key("teaser"));
    }

    #[test]
    fn relationships_group_by_related_type() {
        let resource = project(&article(), &[], &ctx());
        let authors = &resource["relationships"]["authors"];
        assert_eq!(
            authors["links"]["related"],
            "http://cms.example.com/articles/1/authors"
        );
        assert_eq!(authors["data"].as_array().unwrap().len(), 2);
        assert_eq!(authors["data"][0], json!({"type": "authors", "id": "7"}));
    }

    #[test]
    fn self_link_uses_type_and_id() {
        let resource = project(&article(), &[], &ctx());
        assert_eq!(
            resource["links"]["self"],
            "http://cms.example.com/articles/1"
        );
    }

    #[test]
    fn markup_is_coerced_and_replacements_run() {
        let replacements = vec![Replacement {
            from: "Hello".to_string(),
            to: "Hi".to_string(),
        }];
        let context = ProjectionContext {
            replacements: &replacements,
            ..ctx()
        };
        let resource = project(&article(), &["body".to_string()], &context);
        assert_eq!(resource["attributes"]["body"], "<p>Hi</p>");
    }

    #[test]
    fn markup_of_image_fields_is_reachable_by_replacements() {
        let replacements = vec![Replacement {
            from: "/files/".to_string(),
            to: "/media/".to_string(),
        }];
        let context = ProjectionContext {
            replacements: &replacements,
            ..ctx()
        };
        let record = ContentRecord::new("2", "articles", "with-image")
            .with_field("cover", FieldValue::Image(FileRef::new("c.jpg")));
        let resource = project(&record, &[], &context);
        // The post-pass visits nested objects, so rewritten URLs are covered.
        assert_eq!(
            resource["attributes"]["cover"]["url"],
            "http://cms.example.com/media/c.jpg"
        );
    }

    #[test]
    fn slug_is_projectable_as_a_base_field() {
        let resource = project(&article(), &["slug".to_string()], &ctx());
        assert_eq!(resource["attributes"]["slug"], "first-post");
    }
}
