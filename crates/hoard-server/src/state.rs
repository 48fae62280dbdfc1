use std::sync::Arc;

use hoard_ingest::{IngestCoordinator, RetrievalGateway};

use crate::auth::IdentityResolver;
use crate::config::ServerConfig;

/// Shared handler state. Cheap to clone; everything behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<IngestCoordinator>,
    pub gateway: Arc<RetrievalGateway>,
    pub identity: Arc<dyn IdentityResolver>,
    pub allow_anonymous_upload: bool,
    /// Largest upload body read from the wire.
    pub body_limit: usize,
}

impl AppState {
    /// State whose gateway reads what `coordinator` writes.
    pub fn new(coordinator: IngestCoordinator, identity: Arc<dyn IdentityResolver>) -> Self {
        let gateway = RetrievalGateway::for_coordinator(&coordinator);
        Self {
            coordinator: Arc::new(coordinator),
            gateway: Arc::new(gateway),
            identity,
            allow_anonymous_upload: false,
            body_limit: ServerConfig::default().body_limit,
        }
    }

    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }

    pub fn allow_anonymous_upload(mut self, allow: bool) -> Self {
        self.allow_anonymous_upload = allow;
        self
    }
}
