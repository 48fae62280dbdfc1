//! HTTP surface for the hoard asset store.
//!
//! Exposes the ingest pipeline at `POST /lbp/upload/:hash` and retrieval at
//! `GET /lbp/r/:hash`. The pipeline itself is synchronous and runs on the
//! blocking pool; handlers only translate outcomes to status codes.

pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use auth::{Credentials, IdentityResolver, StaticTokenResolver, TrustingResolver};
pub use config::{AuthConfig, BackendKind, HoardConfig, ServerConfig, StorageConfig};
pub use error::{ServerError, ServerResult};
pub use server::HoardServer;
pub use state::AppState;
