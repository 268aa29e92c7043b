//! Command authentication: HMAC-SHA512 signature plus timestamp freshness.
//!
//! 1. Client takes the current Unix time `t` and builds the canonical bytes
//!    (`t` as ASCII decimal, or the raw JSON body in body mode)
//! 2. Client sends `signature: base64url(hex(HMAC-SHA512(secret, canonical)))`
//!    and `timestamp: t`
//! 3. [`AuthGate`] decodes, verifies the tag, then checks `t` is no more than
//!    [`FRESHNESS_WINDOW_SECS`] old
//! 4. Only then does the wrapped operation run

pub mod freshness;
pub mod gate;
pub mod signature;

pub use freshness::{FRESHNESS_WINDOW_SECS, check_freshness};
pub use gate::{AuthDecision, AuthGate, RawCommand, Rejection, SignedCommand};
