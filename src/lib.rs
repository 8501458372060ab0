pub mod adapters;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod ledger;
pub mod middleware;
pub mod ports;
pub mod services;
pub mod validation;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::adapters::{MemoryRecordStore, PostgresRecordStore};
use crate::config::{Config, StoreBackend};
use crate::ports::RecordStore;
use crate::services::TransactionService;

#[derive(Clone)]
pub struct AppState {
    pub service: TransactionService,
}

impl AppState {
    pub fn new(service: TransactionService) -> Self {
        Self { service }
    }
}

pub fn create_app(state: AppState) -> Router {
    let blockchain = Router::new()
        .route("/trade", post(handlers::blockchain::trade))
        .route("/pay", post(handlers::blockchain::pay))
        .route("/anchor-receipt", post(handlers::blockchain::anchor_receipt))
        .route("/status", get(handlers::blockchain::get_status));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/blockchain", blockchain)
        .layer(axum::middleware::from_fn(
            middleware::request_logger_middleware,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Connects the configured record store. Postgres schemas are migrated when
/// `migrate` is set.
pub async fn connect_store(config: &Config, migrate: bool) -> anyhow::Result<Arc<dyn RecordStore>> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let pool = db::create_pool(config).await?;
            if migrate {
                db::run_migrations(&pool).await?;
            }
            tracing::info!("Record store: postgres");
            Ok(Arc::new(PostgresRecordStore::new(pool)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Record store: memory; records are lost on restart");
            Ok(Arc::new(MemoryRecordStore::new()))
        }
    }
}
