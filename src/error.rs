//! Unified error types for the garage server.
//!
//! Every subsystem has a small error enum of its own; all of them convert into
//! the top-level [`Error`] so the HTTP layer can turn a failed command into a
//! status code in exactly one place. None of these are fatal to the process
//! except [`ConfigError`], which can only occur before the listener is bound.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible command path funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The command could not be authenticated.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// The command was authentic but too old.
    #[error(transparent)]
    Freshness(#[from] FreshnessError),
    /// The relay pulse failed.
    #[error(transparent)]
    Actuator(#[from] ActuatorError),
    /// The door sensor could not be sampled.
    #[error(transparent)]
    Sensor(#[from] SensorError),
    /// The audit log could not be read.
    #[error("{0}")]
    AuditLog(String),
    /// Startup configuration is missing or invalid.
    #[error("config: {0}")]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The HMAC did not match the canonical bytes under the shared secret.
    #[error("Invalid signature")]
    SignatureInvalid,
    /// A header or body field could not be decoded from its transport form.
    #[error("{0}")]
    Decode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FreshnessError {
    /// The embedded timestamp is older than the freshness window.
    #[error("Timestamp is too far in the past")]
    Stale,
}

// ---------------------------------------------------------------------------
// Hardware
// ---------------------------------------------------------------------------

/// Relay failures carry the pin driver's message verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActuatorError {
    #[error("{0}")]
    Io(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SensorError {
    #[error("{0}")]
    Io(String),
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `GARAGE_SECRET` is unset or empty.
    #[error("You did not set GARAGE_SECRET env var")]
    MissingSecret,
    /// An environment value could not be parsed.
    #[error("invalid {key}: {reason}")]
    Invalid {
        key: &'static str,
        reason: String,
    },
    /// Parsed values are individually fine but unusable together.
    #[error("validation failed: {0}")]
    ValidationFailed(&'static str),
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
