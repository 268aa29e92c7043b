//! Application core: door command logic, zero direct I/O.
//!
//! All interaction with GPIO, the clock and the event log happens through
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! without a Pi.

pub mod events;
pub mod ports;
pub mod service;
