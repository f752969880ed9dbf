//! Application assembly.
//!
//! Picks the storage backend from configuration, wires the DI module,
//! builds the router and serves it.

use crate::di::{build_in_memory_module, build_postgres_module, DatabaseResolver};
use axum::Router;
use roster_config::{AppConfig, DatabaseBackend};
use roster_core::{RosterError, RosterResult};
use roster_repository::DatabasePoolInterface;
use roster_rest::{create_router, AppState};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// A wired application ready to serve.
pub struct Application {
    config: AppConfig,
    state: AppState,
    pool: Option<Arc<dyn DatabasePoolInterface>>,
}

impl Application {
    /// Builds the application for the configured backend.
    ///
    /// For PostgreSQL this connects the pool and, when enabled, applies
    /// pending migrations.
    pub async fn build(config: AppConfig) -> RosterResult<Self> {
        let (state, pool) = match config.database.backend {
            DatabaseBackend::Postgres => {
                let module = build_postgres_module(&config.database).await?;
                let pool = module.database_pool();
                if config.database.run_migrations {
                    pool.run_migrations().await?;
                }
                let state = AppState::from_module(module.as_ref()).with_database(Arc::clone(&pool));
                (state, Some(pool))
            }
            DatabaseBackend::Memory => {
                let module = build_in_memory_module();
                (AppState::from_module(module.as_ref()), None)
            }
        };

        info!("Application built with {} storage", config.database.backend);

        Ok(Self { config, state, pool })
    }

    /// The configuration the application was built from.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Builds the HTTP router.
    pub fn router(&self) -> Router {
        create_router(self.state.clone(), &self.config.server)
    }

    /// Serves on `listener` until `shutdown` resolves, then closes the pool.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> RosterResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.router();

        let result = axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| RosterError::Internal(format!("Server error: {}", e)));

        if let Some(pool) = &self.pool {
            pool.close().await;
        }

        result
    }
}
