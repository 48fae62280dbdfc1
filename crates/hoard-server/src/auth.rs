use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::header::{AUTHORIZATION, USER_AGENT};
use axum::http::HeaderMap;
use hoard_types::{CallerIdentity, Platform};

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    Bearer(String),
    Anonymous,
}

impl Credentials {
    /// Read `Authorization: Bearer <token>`; anything else is anonymous.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|token| token.trim())
            .filter(|token| !token.is_empty())
            .map(|token| Self::Bearer(token.to_string()))
            .unwrap_or(Self::Anonymous)
    }
}

/// Platform named by the `User-Agent` header.
pub fn platform_from_headers(headers: &HeaderMap) -> Platform {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(Platform::from_user_agent)
        .unwrap_or_default()
}

/// Seam to the external authentication layer.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, credentials: &Credentials) -> ServerResult<CallerIdentity>;
}

/// Trusts the bearer token as the user name. For tests and local use.
pub struct TrustingResolver;

#[async_trait]
impl IdentityResolver for TrustingResolver {
    async fn resolve(&self, credentials: &Credentials) -> ServerResult<CallerIdentity> {
        match credentials {
            Credentials::Bearer(token) => Ok(CallerIdentity::user(token.clone())),
            Credentials::Anonymous => Ok(CallerIdentity::anonymous()),
        }
    }
}

/// Resolves bearer tokens through a fixed token table.
pub struct StaticTokenResolver {
    tokens: HashMap<String, String>,
}

impl StaticTokenResolver {
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl IdentityResolver for StaticTokenResolver {
    async fn resolve(&self, credentials: &Credentials) -> ServerResult<CallerIdentity> {
        match credentials {
            Credentials::Bearer(token) => self
                .tokens
                .get(token)
                .map(CallerIdentity::user)
                .ok_or_else(|| ServerError::AuthFailed("unknown token".into())),
            Credentials::Anonymous => Ok(CallerIdentity::anonymous()),
        }
    }
}
