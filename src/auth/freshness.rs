//! Replay protection by timestamp age.
//!
//! The window is the only replay defence: a captured signature/timestamp
//! pair stops working once it is older than [`FRESHNESS_WINDOW_SECS`].
//! Timestamps from the future are accepted; only the lower bound is
//! enforced.

use crate::error::FreshnessError;

/// Maximum accepted age of a command, in seconds.
pub const FRESHNESS_WINDOW_SECS: i64 = 10;

/// Accept `timestamp` unless it is more than the window behind `now`.
pub fn check_freshness(timestamp: i64, now: i64) -> Result<i64, FreshnessError> {
    let drift = now.saturating_sub(timestamp);
    if drift > FRESHNESS_WINDOW_SECS {
        return Err(FreshnessError::Stale);
    }
    Ok(timestamp)
}
