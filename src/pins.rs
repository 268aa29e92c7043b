//! GPIO assignments and pulse timing defaults for the relay board.
//!
//! Single source of truth for the out-of-the-box wiring. Every value here can
//! be overridden from the environment (see [`crate::config`]).

/// BCM line driving the relay coil.
pub const RELAY_GPIO: u32 = 25;

/// BCM line wired to the reed switch on the door frame.
/// LOW = magnet present (door closed), HIGH = door open.
pub const STATUS_GPIO: u32 = 10;

/// How long the relay is held asserted for a single press.
pub const PULSE_HOLD_MS: u64 = 100;

/// Upper bound accepted for `GARAGE_HOLD_MS`. Longer holds keep a request
/// worker blocked for no benefit to the opener.
pub const PULSE_HOLD_MAX_MS: u64 = 5_000;

/// The relay board is active-low: driving the line LOW energises the coil.
pub const RELAY_ACTIVE_LOW: bool = true;

/// Linux GPIO sysfs root.
pub const SYSFS_GPIO_ROOT: &str = "/sys/class/gpio";
