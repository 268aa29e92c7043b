//! Application service: the hexagonal core.
//!
//! [`DoorService`] holds the configured pulse and sensor line plus the three
//! driven ports. It knows nothing about HTTP or signatures; by the time a
//! call lands here the [`AuthGate`](crate::auth::AuthGate) has already
//! admitted it.
//!
//! ```text
//!  ActuatorPort ◀── ┌──────────────────┐ ──▶ LoggerPort
//!                   │   DoorService    │
//!    StatusPort ──▶ │ toggle · status  │ ◀── audit log file
//!                   └──────────────────┘
//! ```
//!
//! Every method blocks (relay hold, GPIO file I/O); async callers run them on
//! the blocking pool.

use std::path::PathBuf;
use std::sync::Arc;

use log::error;

use crate::audit::{self, AuditEntry};
use crate::config::ServerConfig;
use crate::door::{DoorState, PulseSpec};
use crate::error::Error;

use super::events::AppEvent;
use super::ports::{ActuatorPort, LoggerPort, StatusPort};

// ───────────────────────────────────────────────────────────────
// DoorService
// ───────────────────────────────────────────────────────────────

pub struct DoorService {
    pulse: PulseSpec,
    status_pin: u32,
    audit_log: PathBuf,
    actuator: Arc<dyn ActuatorPort>,
    status: Arc<dyn StatusPort>,
    logger: Arc<dyn LoggerPort>,
}

impl DoorService {
    pub fn new(
        config: &ServerConfig,
        actuator: Arc<dyn ActuatorPort>,
        status: Arc<dyn StatusPort>,
        logger: Arc<dyn LoggerPort>,
    ) -> Self {
        Self {
            pulse: config.pulse(),
            status_pin: config.status_pin,
            audit_log: config.audit_log.clone(),
            actuator,
            status,
            logger,
        }
    }

    // ── Commands ──────────────────────────────────────────────

    /// Pulse the relay once.
    ///
    /// The toggle is recorded before the relay moves, so the audit trail
    /// shows the attempt even when the pulse itself fails.
    pub fn toggle(&self) -> Result<(), Error> {
        self.logger.record(&AppEvent::ToggleDoor);
        if let Err(e) = self.actuator.actuate(&self.pulse) {
            error!("relay pulse on gpio{} failed: {e}", self.pulse.pin);
            self.logger.record(&AppEvent::ActuationFailed(e.to_string()));
            return Err(e.into());
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    /// Sample the door sensor now.
    pub fn status(&self) -> Result<DoorState, Error> {
        match self.status.read_status(self.status_pin) {
            Ok(state) => {
                self.logger.record(&AppEvent::StatusRead(state));
                Ok(state)
            }
            Err(e) => {
                self.logger.record(&AppEvent::StatusFailed(e.to_string()));
                Err(e.into())
            }
        }
    }

    pub fn version(&self) -> &'static str {
        self.logger.record(&AppEvent::Version);
        crate::VERSION
    }

    /// Toggle history, newest first. Recomputed from the log file each call.
    pub fn history(&self) -> Result<Vec<AuditEntry>, Error> {
        audit::read_audit_file(&self.audit_log).map_err(|e| {
            Error::AuditLog(format!("read {}: {e}", self.audit_log.display()))
        })
    }

    /// Forward an event that originated outside the service (listener
    /// start, auth rejections).
    pub fn record(&self, event: &AppEvent) {
        self.logger.record(event);
    }
}
