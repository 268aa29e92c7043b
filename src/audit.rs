//! Audit trail derived from the append-only event log.
//!
//! The command path appends one line per event:
//!
//! ```text
//! TOGGLE DOOR - 2016-05-26 22:42:44.000000000 -0500 CDT
//! ```
//!
//! `/logs` reads the file back, keeps the toggle lines, and renders each as a
//! human-readable date and 12-hour time, newest first. Nothing here is
//! persisted; the history is recomputed on every query.

use std::io;
use std::path::Path;

use chrono::{DateTime, FixedOffset};
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix of the only lines surfaced through `/logs`.
pub const TOGGLE_MARKER: &str = "TOGGLE DOOR";

/// Separates the event label from its datetime.
pub const FIELD_SEPARATOR: &str = " - ";

/// Layout used when appending. Nanoseconds, numeric offset, then a zone
/// name that the parser ignores.
pub const WRITE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.9f %z %Z";

/// Layout of the first three whitespace-separated datetime fields.
const READ_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f %z";

const DATE_FORMAT: &str = "%a %b %-d %Y";
const TIME_FORMAT: &str = "%-I:%M %p";

// ── Types ────────────────────────────────────────────────────

/// One structured, human-readable actuation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub date: String,
    pub time: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// `/logs` response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLog {
    pub entries: Vec<AuditEntry>,
}

/// A single raw line of the event log.
#[derive(Debug, Clone, Copy)]
pub struct LogEvent<'a> {
    pub raw_text: &'a str,
}

/// Why a toggle line could not become an [`AuditEntry`]. Never surfaced to
/// callers; such lines are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditParseError {
    #[error("no ` - ` separator")]
    MissingSeparator,
    #[error("bad datetime: {0}")]
    BadDateTime(String),
}

impl<'a> LogEvent<'a> {
    pub const fn new(raw_text: &'a str) -> Self {
        Self { raw_text }
    }

    pub fn is_toggle(&self) -> bool {
        self.raw_text.starts_with(TOGGLE_MARKER)
    }

    pub fn to_entry(&self) -> Result<AuditEntry, AuditParseError> {
        let (label, datetime) = self
            .raw_text
            .split_once(FIELD_SEPARATOR)
            .ok_or(AuditParseError::MissingSeparator)?;
        let (date, time) = parse_date_time(datetime)?;
        Ok(AuditEntry {
            date,
            time,
            kind: parse_log_type(label),
        })
    }
}

// ── Parsing ──────────────────────────────────────────────────

/// First word of the label, title-cased: `"TOGGLE DOOR"` → `"Toggle"`.
pub fn parse_log_type(label: &str) -> String {
    let word = label.split_whitespace().next().unwrap_or_default();
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// `"2016-05-26 22:42:44.000000000 -0500 CDT"` → `("Thu May 26 2016", "10:42 PM")`.
///
/// The wall time is rendered in the offset recorded on the line, not the
/// server's current zone.
pub fn parse_date_time(datetime: &str) -> Result<(String, String), AuditParseError> {
    let fields: Vec<&str> = datetime.split_whitespace().take(3).collect();
    let stamp = fields.join(" ");
    let parsed: DateTime<FixedOffset> = DateTime::parse_from_str(&stamp, READ_FORMAT)
        .map_err(|e| AuditParseError::BadDateTime(e.to_string()))?;
    Ok((
        parsed.format(DATE_FORMAT).to_string(),
        parsed.format(TIME_FORMAT).to_string(),
    ))
}

/// Turn the whole log into the audit history, most recent first.
///
/// Non-toggle lines are filtered out. Toggle lines that fail to parse are
/// skipped with a warning.
pub fn parse_audit(log_text: &str) -> Vec<AuditEntry> {
    let mut entries: Vec<AuditEntry> = log_text
        .lines()
        .map(LogEvent::new)
        .filter(LogEvent::is_toggle)
        .filter_map(|event| match event.to_entry() {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("audit: skipping `{}`: {e}", event.raw_text);
                None
            }
        })
        .collect();
    entries.reverse();
    entries
}

/// Read and parse the log file. A log that does not exist yet is an empty
/// history, not an error.
pub fn read_audit_file(path: &Path) -> io::Result<Vec<AuditEntry>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(parse_audit(&String::from_utf8_lossy(&bytes))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}
