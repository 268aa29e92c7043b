//! Event log sink adapter.
//!
//! Implements [`LoggerPort`] twice over: every [`AppEvent`] goes to the
//! process logger, and the ones worth auditing are appended to the event log
//! file as `"<label> - <local datetime>"`. That file is what `/logs` parses.
//!
//! Appends are serialised behind a mutex so concurrent requests never
//! interleave partial lines.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use log::{debug, info, warn};
use parking_lot::Mutex;

use crate::app::events::AppEvent;
use crate::app::ports::LoggerPort;
use crate::audit::{FIELD_SEPARATOR, WRITE_FORMAT};

/// Adapter that logs every [`AppEvent`] and appends audit lines to a file.
pub struct FileLogSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileLogSink {
    /// Open (creating if needed) the event log for appending.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, label: &str) {
        let line = format!(
            "{label}{FIELD_SEPARATOR}{}\n",
            Local::now().format(WRITE_FORMAT)
        );
        let mut file = self.file.lock();
        if let Err(e) = file.write_all(line.as_bytes()) {
            warn!("LOG | append to {} failed: {e}", self.path.display());
        }
    }
}

/// Status reads are frequent and carry no audit value; they stay in the
/// process log only.
fn is_audited(event: &AppEvent) -> bool {
    !matches!(event, AppEvent::StatusRead(_))
}

impl LoggerPort for FileLogSink {
    fn record(&self, event: &AppEvent) {
        match event {
            AppEvent::Started { addr } => info!("START | listening on {addr}"),
            AppEvent::ToggleDoor => info!("RELAY | toggle door"),
            AppEvent::ActuationFailed(msg) => warn!("RELAY | failed: {msg}"),
            AppEvent::StatusRead(state) => debug!("DOOR  | {state}"),
            AppEvent::StatusFailed(msg) => warn!("DOOR  | read failed: {msg}"),
            AppEvent::Version => debug!("HTTP  | version"),
            AppEvent::Rejected(reason) => warn!("AUTH  | rejected: {}", reason.as_str()),
        }
        if is_audited(event) {
            self.append(&event.label());
        }
    }
}
