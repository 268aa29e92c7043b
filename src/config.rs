//! Server configuration.
//!
//! All tunable parameters for the garage server. Values come from the
//! environment at startup and are immutable afterwards; components receive
//! what they need by injection and never read the environment themselves.

use core::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::door::PulseSpec;
use crate::error::ConfigError;
use crate::pins;

/// What the client signs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SigningMode {
    /// The ASCII decimal `timestamp` header. No body needed.
    #[default]
    Header,
    /// The raw request body, which carries `{"timestamp": <secs>}`.
    Body,
}

impl FromStr for SigningMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "header" => Ok(Self::Header),
            "body" => Ok(Self::Body),
            other => Err(ConfigError::Invalid {
                key: "GARAGE_SIGNING",
                reason: format!("expected `header` or `body`, got `{other}`"),
            }),
        }
    }
}

/// Core server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    // --- HTTP ---
    /// Listen address, e.g. `127.0.0.1:8225`
    pub listen_addr: String,
    /// Which bytes the HMAC covers
    pub signing: SigningMode,

    // --- Relay ---
    /// Output line wired to the relay
    pub relay_pin: u32,
    /// Relay hold time in milliseconds
    pub hold_ms: u64,
    /// Relay board asserts on LOW
    pub active_low: bool,

    // --- Sensor ---
    /// Input line wired to the reed switch
    pub status_pin: u32,

    // --- Storage ---
    /// Append-only event log read back by `/logs`
    pub audit_log: PathBuf,
    /// GPIO sysfs root
    pub gpio_root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8225".to_owned(),
            signing: SigningMode::Header,

            relay_pin: pins::RELAY_GPIO,
            hold_ms: pins::PULSE_HOLD_MS,
            active_low: pins::RELAY_ACTIVE_LOW,

            status_pin: pins::STATUS_GPIO,

            audit_log: PathBuf::from("garage-server.log"),
            gpio_root: PathBuf::from(pins::SYSFS_GPIO_ROOT),
        }
    }
}

impl ServerConfig {
    /// The pulse every authorised toggle performs.
    pub fn pulse(&self) -> PulseSpec {
        PulseSpec {
            pin: self.relay_pin,
            hold_ms: self.hold_ms,
            active_low: self.active_low,
        }
    }

    /// Reject combinations that would make the relay misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hold_ms == 0 || self.hold_ms > pins::PULSE_HOLD_MAX_MS {
            return Err(ConfigError::ValidationFailed(
                "hold_ms must be between 1 and 5000",
            ));
        }
        if self.relay_pin == self.status_pin {
            return Err(ConfigError::ValidationFailed(
                "relay_pin and status_pin must differ",
            ));
        }
        if self.listen_addr.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("listen_addr is empty"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Shared secret
// ---------------------------------------------------------------------------

/// HMAC key shared with every client. Wiped from memory on drop and never
/// printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret(Vec<u8>);

impl SharedSecret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(<redacted>)")
    }
}

// ---------------------------------------------------------------------------
// Startup loading
// ---------------------------------------------------------------------------

/// Everything the process needs before it can accept a command.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: ServerConfig,
    pub secret: SharedSecret,
}

impl Settings {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup so tests never touch the real
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret = lookup("GARAGE_SECRET").ok_or(ConfigError::MissingSecret)?;
        let secret = SharedSecret::new(secret.into_bytes())?;

        let mut config = ServerConfig::default();
        if let Some(addr) = lookup("GARAGE_HTTP") {
            config.listen_addr = addr;
        }
        if let Some(pin) = lookup("GARAGE_PIN") {
            config.relay_pin = parse("GARAGE_PIN", &pin)?;
        }
        if let Some(pin) = lookup("GARAGE_STATUS_PIN") {
            config.status_pin = parse("GARAGE_STATUS_PIN", &pin)?;
        }
        if let Some(ms) = lookup("GARAGE_HOLD_MS") {
            config.hold_ms = parse("GARAGE_HOLD_MS", &ms)?;
        }
        if let Some(flag) = lookup("GARAGE_ACTIVE_LOW") {
            config.active_low = parse("GARAGE_ACTIVE_LOW", &flag)?;
        }
        if let Some(mode) = lookup("GARAGE_SIGNING") {
            config.signing = mode.parse()?;
        }
        if let Some(path) = lookup("GARAGE_LOG_FILE") {
            config.audit_log = PathBuf::from(path);
        }
        if let Some(path) = lookup("GARAGE_GPIO_ROOT") {
            config.gpio_root = PathBuf::from(path);
        }

        config.validate()?;
        Ok(Self { config, secret })
    }
}

fn parse<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}
