use axum::body::{to_bytes, Body};
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use hoard_ingest::{AssetRecord, IngestOutcome, IngestRequest, RetrieveError};
use hoard_types::AssetId;
use serde::Serialize;
use serde_json::json;

use crate::auth::{platform_from_headers, Credentials};
use crate::error::ServerError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// HTTP status reported for an ingest outcome.
pub fn outcome_status(outcome: &IngestOutcome) -> StatusCode {
    match outcome {
        IngestOutcome::Stored { .. } => StatusCode::OK,
        IngestOutcome::AlreadyExists { .. } => StatusCode::CONFLICT,
        IngestOutcome::BadIdentifier { .. } | IngestOutcome::HashMismatch { .. } => {
            StatusCode::BAD_REQUEST
        }
        // Game clients treat 401 on upload as "not allowed", which is what a
        // blocked format is.
        IngestOutcome::FormatBlocked { .. } => StatusCode::UNAUTHORIZED,
        IngestOutcome::SizeExceeded { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        IngestOutcome::StorageFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `POST /lbp/upload/:hash`
///
/// The path identifier is checked before the body is read, so a malformed id
/// is reported as such whatever the body size.
pub async fn upload_asset(
    State(state): State<AppState>,
    Path(hash): Path<String>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let credentials = Credentials::from_headers(&headers);
    if credentials == Credentials::Anonymous && !state.allow_anonymous_upload {
        return ServerError::Unauthenticated.into_response();
    }

    if let Err(e) = AssetId::parse(&hash) {
        tracing::info!(
            asset = %hash.escape_debug(),
            error = %e,
            "asset upload refused before reading body"
        );
        return outcome_response(IngestOutcome::BadIdentifier {
            reason: e.to_string(),
        });
    }

    let limit = state.body_limit;
    let declared = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    if let Some(size) = declared.filter(|&size| size > limit) {
        return outcome_response(IngestOutcome::SizeExceeded { size, limit });
    }
    let payload = match to_bytes(body, limit).await {
        Ok(payload) => payload,
        Err(e) => {
            // Either the stream ran past the limit or the client went away;
            // only the former can still receive this response.
            tracing::debug!(asset = %hash, error = %e, "upload body not read");
            return outcome_response(IngestOutcome::SizeExceeded {
                size: declared.unwrap_or(limit.saturating_add(1)),
                limit,
            });
        }
    };

    let caller = match state.identity.resolve(&credentials).await {
        Ok(caller) => caller.on(platform_from_headers(&headers)),
        Err(e) => return e.into_response(),
    };

    let request = IngestRequest::new(caller, hash, payload);
    let coordinator = state.coordinator.clone();
    // The pipeline runs to completion on the blocking pool even if the client
    // disconnects, so no request can leave a half-written blob.
    match tokio::task::spawn_blocking(move || coordinator.ingest(&request)).await {
        Ok(outcome) => outcome_response(outcome),
        Err(e) => ServerError::Internal(e.to_string()).into_response(),
    }
}

fn outcome_response(outcome: IngestOutcome) -> Response {
    (
        outcome_status(&outcome),
        Json(json!({
            "outcome": outcome.name(),
            "class": outcome.class(),
            "message": outcome.to_string(),
        })),
    )
        .into_response()
}

fn retrieve_error_response(err: RetrieveError) -> Response {
    match err {
        RetrieveError::BadIdentifier(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        RetrieveError::NotFound(id) => {
            (StatusCode::NOT_FOUND, format!("asset not found: {id}")).into_response()
        }
        RetrieveError::Storage(e) => ServerError::Store(e).into_response(),
    }
}

/// `GET /lbp/r/:hash`
pub async fn retrieve_asset(State(state): State<AppState>, Path(hash): Path<String>) -> Response {
    let gateway = state.gateway.clone();
    match tokio::task::spawn_blocking(move || gateway.retrieve(&hash)).await {
        Ok(Ok(data)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/octet-stream")],
            data,
        )
            .into_response(),
        Ok(Err(e)) => retrieve_error_response(e),
        Err(e) => ServerError::Internal(e.to_string()).into_response(),
    }
}

/// `GET /api/v3/assets/:hash`
pub async fn describe_asset(State(state): State<AppState>, Path(hash): Path<String>) -> Response {
    let gateway = state.gateway.clone();
    let described: Result<Result<AssetRecord, RetrieveError>, _> =
        tokio::task::spawn_blocking(move || gateway.describe(&hash)).await;
    match described {
        Ok(Ok(record)) => Json(record).into_response(),
        Ok(Err(e)) => retrieve_error_response(e),
        Err(e) => ServerError::Internal(e.to_string()).into_response(),
    }
}
