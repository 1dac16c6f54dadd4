//! Content API test harness.
//!
//! Provides a seeded in-memory store and a configured test server.

use axum_test::TestServer;
use chrono::DateTime;
use serde_json::json;

use strata_api::{ApiSettings, ServerConfig, create_app};
use strata_store::backends::memory::MemoryStore;
use strata_store::{ContentRecord, ContentSchema, ContentTypeDef, FieldValue, FileRef, TaxonomyTerm};

/// Schema with an `articles` type related to `authors`.
pub fn test_schema() -> ContentSchema {
    ContentSchema::new()
        .with_type(
            "articles",
            ContentTypeDef {
                fields: vec![
                    "title".to_string(),
                    "teaser".to_string(),
                    "body".to_string(),
                    "image".to_string(),
                    "status".to_string(),
                ],
                taxonomies: vec!["categories".to_string()],
                relations: vec!["authors".to_string()],
            },
        )
        .with_type(
            "authors",
            ContentTypeDef {
                fields: vec!["name".to_string(), "bio".to_string()],
                ..Default::default()
            },
        )
}

/// Settings with a static header, a menu, a taxonomy and thumbnails.
pub fn test_settings() -> ApiSettings {
    ApiSettings::from_yaml(
        r#"
date-iso-8601: true
thumbnail:
  width: 320
  height: 240
headers:
  X-Powered-By: strata
menus:
  main:
    - label: Home
      path: /
    - label: Articles
      path: /articles
taxonomies:
  categories:
    behaves_like: categories
    options: [news, events]
"#,
    )
    .expect("test settings parse")
}

fn author(id: &str, name: &str) -> ContentRecord {
    ContentRecord::new(id, "authors", name.to_lowercase())
        .with_field("name", FieldValue::Scalar(json!(name)))
        .with_field(
            "bio",
            FieldValue::Markup(format!("<p>{name} writes here.</p>")),
        )
}

fn article(id: u32, status: &str, author_id: &str) -> ContentRecord {
    let date = DateTime::parse_from_rfc3339(&format!(
        "2024-03-{:02}T08:00:00+00:00",
        (id % 27) + 1
    ))
    .expect("fixture date");
    let mut record = ContentRecord::new(id.to_string(), "articles", format!("article-{id}"))
        .with_field("title", FieldValue::Scalar(json!(format!("Article {id}"))))
        .with_field(
            "teaser",
            FieldValue::Scalar(json!(format!("Teaser for article {id}"))),
        )
        .with_field(
            "body",
            FieldValue::Markup(format!("<p>Body of article {id}</p>")),
        )
        .with_field("status", FieldValue::Scalar(json!(status)))
        .with_field("datepublish", FieldValue::Date(date))
        .with_relation("authors", author_id);
    if id == 1 {
        record = record
            .with_field("image", FieldValue::Image(FileRef::new("cover-1.jpg")))
            .with_field(
                "categories",
                FieldValue::Taxonomy(vec![TaxonomyTerm {
                    taxonomy: "categories".to_string(),
                    slug: "news".to_string(),
                    name: "News".to_string(),
                }]),
            );
    }
    record
}

/// Twelve published articles, two drafts, three authors. Authors rotate over
/// the articles so several articles share one author.
pub fn seeded_store() -> MemoryStore {
    let authors = ["7", "8", "9"];
    let mut records: Vec<ContentRecord> = (1..=12)
        .map(|id| article(id, "published", authors[(id as usize - 1) % 3]))
        .collect();
    records.push(article(13, "draft", "7"));
    records.push(article(14, "draft", "8"));
    records.extend([author("7", "Ada"), author("8", "Grace"), author("9", "Edsger")]);

    MemoryStore::new(test_schema())
        .with_records(records)
        .expect("seed records")
}

/// Creates a test server over the seeded store.
pub fn create_test_server() -> TestServer {
    let config = ServerConfig::for_testing();
    let app = create_app(seeded_store(), config, test_settings());
    TestServer::new(app).expect("Failed to create test server")
}
