//! Wall-clock adapter.
//!
//! Freshness is judged against the host's real-time clock, so the Pi must
//! keep NTP sync. A clock that has drifted by more than the freshness window
//! rejects every command.

use chrono::Utc;

use crate::app::ports::Clock;

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        Utc::now().timestamp()
    }
}
