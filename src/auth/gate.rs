//! Single admission point for every state-changing or sensitive command.
//!
//! The gate is transport-agnostic: it sees the two header values and the raw
//! body as a [`RawCommand`] and either hands back the verified
//! [`SignedCommand`] or the first reason it failed. The HTTP middleware is a
//! thin shell around [`AuthGate::check`]; [`AuthGate::guard`] offers the same
//! contract to non-HTTP callers.

use std::sync::Arc;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use log::warn;
use serde::Deserialize;

use super::freshness::check_freshness;
use super::signature;
use crate::app::ports::Clock;
use crate::config::{SharedSecret, SigningMode};
use crate::error::{AuthError, Error, FreshnessError};

/// URL-safe alphabet, padding optional. Stock clients pad; hand-rolled ones
/// often do not.
const SIGNATURE_B64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

// ── Data model ───────────────────────────────────────────────

/// Untrusted inputs as they arrived on the wire.
#[derive(Debug, Clone, Copy)]
pub struct RawCommand<'a> {
    pub signature: Option<&'a str>,
    pub timestamp: Option<&'a str>,
    pub body: &'a [u8],
}

/// A command that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedCommand {
    /// Exactly the bytes the client signed.
    pub canonical_bytes: Vec<u8>,
    /// Hex tag after transport decoding.
    pub signature: Vec<u8>,
    pub timestamp: i64,
}

/// Why a command was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    SignatureInvalid,
    Stale,
    DecodeError,
    None,
}

impl Rejection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SignatureInvalid => "invalid signature",
            Self::Stale => "stale timestamp",
            Self::DecodeError => "undecodable request",
            Self::None => "none",
        }
    }
}

/// Outcome of one admission check. Built once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthDecision {
    pub accepted: bool,
    pub reason: Rejection,
}

impl AuthDecision {
    pub const ACCEPTED: Self = Self {
        accepted: true,
        reason: Rejection::None,
    };

    pub const fn rejected(reason: Rejection) -> Self {
        Self {
            accepted: false,
            reason,
        }
    }
}

impl<T> From<&Result<T, Error>> for AuthDecision {
    fn from(outcome: &Result<T, Error>) -> Self {
        match outcome {
            Ok(_) => Self::ACCEPTED,
            Err(Error::Auth(AuthError::SignatureInvalid)) => {
                Self::rejected(Rejection::SignatureInvalid)
            }
            Err(Error::Freshness(FreshnessError::Stale)) => Self::rejected(Rejection::Stale),
            Err(_) => Self::rejected(Rejection::DecodeError),
        }
    }
}

/// Body shape in [`SigningMode::Body`].
#[derive(Deserialize)]
struct ClientRequest {
    timestamp: i64,
}

// ── Gate ─────────────────────────────────────────────────────

pub struct AuthGate {
    secret: Arc<SharedSecret>,
    mode: SigningMode,
    clock: Arc<dyn Clock>,
}

impl AuthGate {
    pub fn new(secret: Arc<SharedSecret>, mode: SigningMode, clock: Arc<dyn Clock>) -> Self {
        Self {
            secret,
            mode,
            clock,
        }
    }

    /// Run the checks in order, stopping at the first failure:
    /// decode signature, verify tag, decode timestamp, check freshness.
    pub fn check(&self, raw: &RawCommand<'_>) -> Result<SignedCommand, Error> {
        let header = raw
            .signature
            .ok_or_else(|| AuthError::Decode("missing signature header".to_owned()))?;
        let signature = SIGNATURE_B64
            .decode(header.trim())
            .map_err(|e| AuthError::Decode(e.to_string()))?;

        let canonical_bytes = match self.mode {
            SigningMode::Header => raw
                .timestamp
                .ok_or_else(|| AuthError::Decode("missing timestamp header".to_owned()))?
                .as_bytes()
                .to_vec(),
            SigningMode::Body => raw.body.to_vec(),
        };

        if !signature::verify(&canonical_bytes, &signature, &self.secret) {
            warn!("auth: signature verification failed");
            return Err(AuthError::SignatureInvalid.into());
        }

        let timestamp = match self.mode {
            SigningMode::Header => parse_timestamp(&canonical_bytes)?,
            SigningMode::Body => body_timestamp(&canonical_bytes)?,
        };

        let now = self.clock.now_unix();
        if let Err(e) = check_freshness(timestamp, now) {
            warn!("auth: stale command (timestamp {timestamp}, now {now})");
            return Err(e.into());
        }

        Ok(SignedCommand {
            canonical_bytes,
            signature,
            timestamp,
        })
    }

    /// Boolean view of [`check`](Self::check).
    pub fn decide(&self, raw: &RawCommand<'_>) -> AuthDecision {
        AuthDecision::from(&self.check(raw))
    }

    /// Run `op` only if `raw` is admitted. A rejected command never reaches
    /// `op`.
    pub fn guard<T>(
        &self,
        raw: &RawCommand<'_>,
        op: impl FnOnce(SignedCommand) -> T,
    ) -> Result<T, Error> {
        let command = self.check(raw)?;
        Ok(op(command))
    }
}

fn parse_timestamp(bytes: &[u8]) -> Result<i64, AuthError> {
    core::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .ok_or_else(|| AuthError::Decode("timestamp is not an integer".to_owned()))
}

fn body_timestamp(body: &[u8]) -> Result<i64, AuthError> {
    serde_json::from_slice::<ClientRequest>(body)
        .map(|req| req.timestamp)
        .map_err(|e| AuthError::Decode(e.to_string()))
}
