use actix_web::{web, App, HttpServer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub mod cli;
pub mod config;
pub mod db;
pub mod generators;
pub mod orchestrator;
pub mod partner;
pub mod routes;
pub mod storage;

use crate::config::AppConfig;
use crate::db::{PgPartnerStore, QueryError};
use crate::generators::{AuthorizationGenerator, TypstRenderEngine};
use crate::orchestrator::BatchRunner;
use crate::storage::FileSystemSink;

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

/// Shared state for the HTTP surface.
pub struct AppState {
    pub runner: Arc<BatchRunner>,
}

/// Wire the production store, engine and sink from configuration.
pub fn build_runner(config: &AppConfig) -> Result<BatchRunner, QueryError> {
    let store = PgPartnerStore::connect_lazy(&config.database_url, config.db_acquire_timeout)?;
    let generator = AuthorizationGenerator::new(
        Arc::new(config.counterparty.clone()),
        Arc::new(TypstRenderEngine::new(&config.typst_bin)),
        Arc::new(FileSystemSink::new(&config.output_dir)),
        &config.logo_path,
    );
    Ok(BatchRunner::new(
        Arc::new(store),
        generator,
        config.failure_policy,
    ))
}

/// Run a single batch and return its status string.
pub async fn generate_once() -> anyhow::Result<String> {
    let config = AppConfig::from_env()?;
    let runner = build_runner(&config)?;
    Ok(runner.run().await)
}

/// Serve the HTTP trigger until shutdown.
pub async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let runner = match build_runner(&config) {
        Ok(runner) => Arc::new(runner),
        Err(e) => {
            log::error!("Invalid database configuration. Please check your DATABASE_URL in .env. Error: {}", e);
            return Err(e.into());
        }
    };

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(AppState {
                runner: runner.clone(),
            }))
            .service(web::scope("/api").configure(routes::config))
    })
    .bind(config.bind_addr.as_str())?
    .run()
    .await?;

    Ok(())
}
