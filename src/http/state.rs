use std::sync::Arc;

use crate::app::service::DoorService;
use crate::auth::AuthGate;

/// Shared by every request. Both halves are immutable after startup.
pub struct AppState {
    pub service: Arc<DoorService>,
    pub gate: AuthGate,
}

impl AppState {
    pub fn new(service: Arc<DoorService>, gate: AuthGate) -> Self {
        Self { service, gate }
    }
}
