//! Port traits: the hexagonal boundary between the command logic and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ DoorService (domain)
//! ```
//!
//! Driven adapters (relay, reed switch, event log, wall clock, GPIO lines)
//! implement these traits. The [`DoorService`](super::service::DoorService)
//! and the [`AuthGate`](crate::auth::AuthGate) hold them as trait objects,
//! so the domain core never touches hardware or the system clock directly.
//!
//! Unlike a single-threaded control loop, requests are served concurrently,
//! so every port takes `&self` and is `Send + Sync`. Implementations own
//! whatever interior locking they need.

use thiserror::Error;

use crate::app::events::AppEvent;
use crate::door::{DoorState, PulseSpec};
use crate::error::{ActuatorError, SensorError};

// ───────────────────────────────────────────────────────────────
// Actuator port (domain → relay)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to pulse the relay.
pub trait ActuatorPort: Send + Sync {
    /// Perform one full pulse. Blocks for `spec.hold_ms`.
    ///
    /// At most one pulse is in flight at a time; a second caller waits for
    /// the first to finish rather than interleaving with it.
    fn actuate(&self, spec: &PulseSpec) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Status port (reed switch → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: samples the door sensor. Never cached.
pub trait StatusPort: Send + Sync {
    fn read_status(&self, pin: u32) -> Result<DoorState, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Logger port (domain → operational log / audit file)
// ───────────────────────────────────────────────────────────────

/// The domain reports structured [`AppEvent`]s through this port. Adapters
/// decide where they go (console, append-only audit file, memory for tests).
pub trait LoggerPort: Send + Sync {
    fn record(&self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock port (wall time for the freshness check)
// ───────────────────────────────────────────────────────────────

pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch.
    fn now_unix(&self) -> i64;
}

// ───────────────────────────────────────────────────────────────
// Pin driver (host platform GPIO primitives)
// ───────────────────────────────────────────────────────────────

/// Logic level on a GPIO line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Any non-zero raw sample reads as HIGH.
    pub const fn from_raw(raw: u8) -> Self {
        if raw == 0 { Self::Low } else { Self::High }
    }
}

/// Per-line primitives supplied by the host platform.
///
/// Callers go through [`AcquiredPin`](crate::drivers::gpio::AcquiredPin),
/// which pairs every successful `open` with exactly one `close`.
pub trait PinDriver: Send + Sync {
    /// Claim the numbered line.
    fn open(&self, pin: u32) -> Result<(), PinError>;

    /// Switch the line to output, starting at `initial` without a glitch.
    fn configure_output(&self, pin: u32, initial: Level) -> Result<(), PinError>;

    fn write_level(&self, pin: u32, level: Level) -> Result<(), PinError>;

    fn read_level(&self, pin: u32) -> Result<Level, PinError>;

    /// Release the line. Infallible from the caller's point of view;
    /// implementations log what they cannot undo.
    fn close(&self, pin: u32);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Failure reported by a [`PinDriver`]. The message is surfaced to HTTP
/// clients unchanged, so it should read like the underlying OS error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct PinError(pub String);

impl PinError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl From<PinError> for ActuatorError {
    fn from(e: PinError) -> Self {
        Self::Io(e.0)
    }
}

impl From<PinError> for SensorError {
    fn from(e: PinError) -> Self {
        Self::Io(e.0)
    }
}
