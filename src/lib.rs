//! Garage server library.
//!
//! Exposes the command protocol (signature + freshness gate), the relay and
//! reed-switch drivers, the audit log parser and the HTTP surface so that the
//! binary stays a thin wiring layer and everything else is testable on a host
//! with no GPIO attached.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod audit;
pub mod auth;
pub mod config;
pub mod door;
pub mod drivers;
pub mod error;
pub mod http;
pub mod pins;

pub use error::{Error, Result};

/// Version reported by `GET /version` and the startup banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
