//! Signature middleware.
//!
//! Buffers the body (body-mode signatures cover it byte for byte), hands the
//! headers and bytes to the gate, and only on admission rebuilds the request
//! and passes it on. Rejections are recorded (on the blocking pool, since
//! that appends to the log file) and answered here; the wrapped handler
//! never sees them.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use log::warn;
use tokio::task::spawn_blocking;

use super::response::ApiError;
use super::state::AppState;
use crate::app::events::AppEvent;
use crate::auth::{AuthDecision, RawCommand};

pub const SIGNATURE_HEADER: &str = "signature";
pub const TIMESTAMP_HEADER: &str = "timestamp";

/// Commands are tiny; anything larger is not a client of ours.
pub const MAX_BODY_BYTES: usize = 4 * 1024;

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

pub async fn require_signature(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return ApiError::status(StatusCode::FORBIDDEN, e.to_string()).into_response();
        }
    };

    let outcome = state.gate.check(&RawCommand {
        signature: header(&parts.headers, SIGNATURE_HEADER),
        timestamp: header(&parts.headers, TIMESTAMP_HEADER),
        body: &bytes,
    });

    let decision = AuthDecision::from(&outcome);
    if let Err(e) = outcome {
        let service = state.service.clone();
        let event = AppEvent::Rejected(decision.reason);
        if let Err(join) = spawn_blocking(move || service.record(&event)).await {
            warn!("rejection not recorded: {join}");
        }
        return ApiError::from(e).into_response();
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}
