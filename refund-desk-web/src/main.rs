//! Refund desk server entry point

mod logging;

use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};
use anyhow::Context;
use refund_desk_app::adapters::{
    FileValidationCache, LogNotifier, MemoryRefundRepository, MemoryUserDirectory,
    MemoryValidationCache,
};
use refund_desk_app::{AppState, AppStateBuilder};
use refund_desk_core::traits::ValidationCache;
use refund_desk_web::config::{CacheBackend, CacheConfig, Config};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config_path = Config::path_from_env();
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;

    let _log_guard = logging::init(&config.logging)?;
    tracing::info!("Configuration loaded from {}", config_path.display());

    let state = web::Data::new(build_state(&config)?);

    let addr = config.server.addr();
    tracing::info!("Refund desk listening on {addr}");

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(refund_desk_web::configure)
    });
    if let Some(workers) = config.server.workers {
        server = server.workers(workers);
    }

    server
        .bind(&addr)
        .with_context(|| format!("Failed to bind {addr}"))?
        .run()
        .await
        .context("Server terminated with an error")
}

fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let client_config = config.iban_validation.client_config();
    if client_config.api_key.is_empty() {
        tracing::warn!(
            "No IBAN lookup API key configured; every lookup will report the service as unavailable"
        );
    }
    let iban_client = refund_desk_client::create_client(client_config)
        .context("Failed to create IBAN lookup client")?;

    if config.users.is_empty() {
        tracing::warn!("No users configured; every API request will be rejected");
    }

    AppStateBuilder::new()
        .iban_client(iban_client)
        .validation_cache(build_cache(&config.cache))
        .refund_repository(Arc::new(MemoryRefundRepository::new()))
        .status_notifier(Arc::new(LogNotifier))
        .user_directory(Arc::new(MemoryUserDirectory::new(config.users.clone())))
        .build()
        .context("Failed to build application state")
}

fn build_cache(config: &CacheConfig) -> Arc<dyn ValidationCache> {
    match config.backend {
        CacheBackend::Memory => {
            tracing::info!("IBAN validation cache: memory (ttl: {:?})", config.ttl());
            match config.ttl() {
                Some(ttl) => Arc::new(MemoryValidationCache::with_ttl(ttl)),
                None => Arc::new(MemoryValidationCache::new()),
            }
        }
        CacheBackend::File => {
            tracing::info!("IBAN validation cache: files under {}", config.dir.display());
            Arc::new(FileValidationCache::new(&config.dir))
        }
    }
}
