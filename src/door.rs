//! Door domain types shared by the drivers, the ports and the HTTP layer.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::app::ports::Level;

/// Logical door position derived from one reed-switch sample.
///
/// Never cached: every status query re-samples the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorState {
    Open,
    Closed,
}

impl DoorState {
    /// A LOW line means the magnet is present and the door is shut.
    pub const fn from_level(level: Level) -> Self {
        match level {
            Level::Low => Self::Closed,
            Level::High => Self::Open,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One relay actuation. Fixed at startup from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PulseSpec {
    /// Output line driving the relay.
    pub pin: u32,
    /// Time the relay is held asserted.
    pub hold_ms: u64,
    /// Assert by driving LOW instead of HIGH.
    pub active_low: bool,
}

impl PulseSpec {
    /// `(active, idle)` levels for this relay.
    pub const fn levels(&self) -> (Level, Level) {
        if self.active_low {
            (Level::Low, Level::High)
        } else {
            (Level::High, Level::Low)
        }
    }
}
