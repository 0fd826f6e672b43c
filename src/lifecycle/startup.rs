//! Startup orchestration.
//!
//! # Responsibilities
//! - Open the record store and the document directory
//! - Assemble the model and the HTTP server around it
//! - Bind the listener last, so traffic arrives only when ready
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::http::HttpServer;
use crate::model::Model;
use crate::store::{DocumentStore, RecordStore};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to open store: {0}")]
    Store(#[from] SiteError),

    #[error("documents directory {0} does not exist")]
    MissingDocuments(String),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Open both stores named by `config`.
pub fn open_model(config: &SiteConfig) -> Result<Model, StartupError> {
    let documents_dir = &config.site.documents_dir;
    if !documents_dir.is_dir() {
        return Err(StartupError::MissingDocuments(
            documents_dir.display().to_string(),
        ));
    }

    let records = RecordStore::open(&config.store.path, config.store.statement_cache_capacity)?;
    tracing::info!(
        path = %config.store.path.display(),
        documents = %documents_dir.display(),
        "stores opened"
    );
    Ok(Model::new(DocumentStore::new(documents_dir.clone()), records))
}

/// Build the server and bind its listener.
pub async fn start(config: SiteConfig) -> Result<(HttpServer, TcpListener), StartupError> {
    let model = open_model(&config)?;
    let address = config.listener.bind_address.clone();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;
    Ok((HttpServer::new(config, model), listener))
}
