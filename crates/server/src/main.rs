//! Strata content API server.
//!
//! Serves a content file (schema plus records, YAML) through the JSON:API
//! projection layer, using the in-memory backend. Deployments with real
//! storage implement [`strata_store::ContentStore`] and wire their backend
//! into [`strata_api::create_app`] the same way.

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;
use strata_api::{ApiSettings, ServerConfig, create_app, init_logging};
use strata_store::backends::memory::MemoryStore;
use strata_store::{ContentRecord, ContentSchema};
use tracing::info;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "strata", about = "Strata content API server", version)]
struct Args {
    /// Path to the content file: the schema and the records to serve.
    #[arg(long, env = "STRATA_CONTENT")]
    content: PathBuf,

    /// Path to the API settings file; defaults apply when omitted.
    #[arg(long, env = "STRATA_SETTINGS")]
    settings: Option<PathBuf>,

    #[command(flatten)]
    server: ServerConfig,
}

/// The content file: schema plus seed records.
#[derive(Debug, Deserialize)]
struct ContentFile {
    schema: ContentSchema,
    #[serde(default)]
    records: Vec<ContentRecord>,
}

/// Loads the content file into a fresh in-memory store.
fn load_store(path: &Path) -> anyhow::Result<MemoryStore> {
    let contents = std::fs::read_to_string(path)?;
    let file: ContentFile = serde_yaml::from_str(&contents)?;
    let record_count = file.records.len();

    let store = MemoryStore::new(file.schema).with_records(file.records)?;
    info!(
        content = %path.display(),
        records = record_count,
        "Content loaded"
    );
    Ok(store)
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.server.log_level);

    if let Err(errors) = args.server.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    let settings = match &args.settings {
        Some(path) => ApiSettings::from_path(path)?,
        None => ApiSettings::default(),
    };

    let store = load_store(&args.content)?;

    info!(
        port = args.server.port,
        host = %args.server.host,
        backend = "memory",
        "Starting Strata content API server"
    );

    let app = create_app(store, args.server.clone(), settings);
    serve(app, &args.server).await
}
