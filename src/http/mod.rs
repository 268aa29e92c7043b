//! HTTP surface.
//!
//! | Route          | Method | Auth | Handler               |
//! |----------------|--------|------|-----------------------|
//! | `/`            | POST   | yes  | [`handlers::toggle`]  |
//! | `/toggle`      | POST   | yes  | [`handlers::toggle`]  |
//! | `/logs`        | GET    | yes  | [`handlers::logs`]    |
//! | `/status`      | GET    | no   | [`handlers::status`]  |
//! | `/version`     | GET    | no   | [`handlers::version`] |
//!
//! Authenticated routes sit behind [`middleware::require_signature`], which
//! runs the [`AuthGate`](crate::auth::AuthGate) before the handler is ever
//! polled.

pub mod handlers;
pub mod middleware;
pub mod response;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

pub use response::ApiError;
pub use state::AppState;

/// Build the full router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let guarded = Router::new()
        .route("/", post(handlers::toggle))
        .route("/toggle", post(handlers::toggle))
        .route("/logs", get(handlers::logs))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_signature,
        ));

    Router::new()
        .route("/status", get(handlers::status))
        .route("/version", get(handlers::version))
        .merge(guarded)
        .with_state(state)
}
