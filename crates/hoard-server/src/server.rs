use std::sync::Arc;

use hoard_ingest::IngestCoordinator;
use hoard_store::{BlobBackend, FsBackend, InMemoryBackend};
use tokio::net::TcpListener;

use crate::auth::{IdentityResolver, StaticTokenResolver, TrustingResolver};
use crate::config::{BackendKind, HoardConfig};
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Hoard asset server.
pub struct HoardServer {
    config: HoardConfig,
}

impl HoardServer {
    pub fn new(config: HoardConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HoardConfig {
        &self.config
    }

    /// Open the configured backend and wire the ingest and retrieval paths.
    pub fn build_state(&self) -> ServerResult<AppState> {
        let backend: Arc<dyn BlobBackend> = match self.config.storage.backend {
            BackendKind::Fs => Arc::new(FsBackend::open(self.config.storage.root.clone())?),
            BackendKind::Memory => Arc::new(InMemoryBackend::new()),
        };
        let identity: Arc<dyn IdentityResolver> = if self.config.auth.tokens.is_empty() {
            Arc::new(TrustingResolver)
        } else {
            Arc::new(StaticTokenResolver::new(self.config.auth.tokens.clone()))
        };
        let coordinator = IngestCoordinator::from_config(backend, &self.config.validator);
        Ok(AppState::new(coordinator, identity)
            .allow_anonymous_upload(self.config.auth.allow_anonymous_upload)
            .with_body_limit(self.config.server.body_limit))
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> ServerResult<axum::Router> {
        Ok(build_router(self.build_state()?))
    }

    /// Start serving requests until ctrl-c.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router()?;
        let listener = TcpListener::bind(&self.config.server.bind_addr).await?;
        tracing::info!(
            addr = %self.config.server.bind_addr,
            backend = ?self.config.storage.backend,
            max_asset_size = self.config.validator.max_asset_size,
            "hoard server listening"
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_construction() {
        let server = HoardServer::new(HoardConfig::default());
        assert_eq!(server.config().server.bind_addr, "127.0.0.1:10061".parse().unwrap());
    }

    #[test]
    fn router_builds_over_memory_backend() {
        let mut config = HoardConfig::default();
        config.storage.backend = BackendKind::Memory;
        let _router = HoardServer::new(config).router().unwrap();
    }

    #[test]
    fn fs_backend_creates_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = HoardConfig::default();
        config.storage.root = dir.path().join("assets");
        let state = HoardServer::new(config).build_state().unwrap();
        assert!(dir.path().join("assets").is_dir());
        assert!(!state.allow_anonymous_upload);
    }
}
