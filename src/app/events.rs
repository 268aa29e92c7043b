//! Outbound application events.
//!
//! The [`DoorService`](super::service::DoorService) and the auth middleware
//! emit these through the [`LoggerPort`](super::ports::LoggerPort). The
//! production sink writes each one as `"<label> - <datetime>"`, which is the
//! line format the [`audit`](crate::audit) parser reads back.

use crate::audit::TOGGLE_MARKER;
use crate::auth::Rejection;
use crate::door::DoorState;

/// Structured events emitted by the command path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The listener is up.
    Started { addr: String },

    /// An authorised toggle is about to pulse the relay.
    ToggleDoor,

    /// The relay pulse failed; carries the driver message.
    ActuationFailed(String),

    /// A status query sampled the sensor.
    StatusRead(DoorState),

    /// The sensor could not be sampled.
    StatusFailed(String),

    /// The version endpoint was hit.
    Version,

    /// The auth gate turned a command away.
    Rejected(Rejection),
}

impl AppEvent {
    /// Leading text of the audit line. Only [`AppEvent::ToggleDoor`] starts
    /// with the toggle marker, so it is the only event `/logs` surfaces.
    pub fn label(&self) -> String {
        match self {
            Self::Started { addr } => format!("Started on {addr}"),
            Self::ToggleDoor => TOGGLE_MARKER.to_owned(),
            Self::ActuationFailed(msg) => format!("Toggle failed: {msg}"),
            Self::StatusRead(state) => format!("Status {state}"),
            Self::StatusFailed(msg) => format!("Status failed: {msg}"),
            Self::Version => "Version".to_owned(),
            Self::Rejected(reason) => format!("Rejected: {}", reason.as_str()),
        }
    }
}
