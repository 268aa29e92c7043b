//! Route handlers. Anything that touches GPIO or the log file runs on the
//! blocking pool; a relay hold must not stall the async workers.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};
use tokio::task::spawn_blocking;

use super::response::ApiError;
use super::state::AppState;
use crate::audit::AuditLog;

pub async fn toggle(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let service = state.service.clone();
    spawn_blocking(move || service.toggle()).await??;
    Ok(Json(json!({ "status": "signal received" })))
}

pub async fn status(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let service = state.service.clone();
    let door = spawn_blocking(move || service.status()).await??;
    Ok(Json(json!({ "door_status": door })))
}

pub async fn version(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let service = state.service.clone();
    let version = spawn_blocking(move || service.version()).await?;
    Ok(Json(json!({ "version": version })))
}

pub async fn logs(State(state): State<Arc<AppState>>) -> Result<Json<AuditLog>, ApiError> {
    let service = state.service.clone();
    let entries = spawn_blocking(move || service.history()).await??;
    Ok(Json(AuditLog { entries }))
}
