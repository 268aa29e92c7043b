//! Linux sysfs GPIO adapter.
//!
//! Implements [`PinDriver`] over `/sys/class/gpio`:
//!
//! | Operation          | File written                     | Value            |
//! |--------------------|----------------------------------|------------------|
//! | `open`             | `export` (first user only)       | `<pin>`          |
//! | `configure_output` | `gpio<pin>/direction`            | `high` / `low`   |
//! | `write_level`      | `gpio<pin>/value`                | `1` / `0`        |
//! | `read_level`       | `gpio<pin>/value` (read)         |                  |
//! | `close`            | `unexport` (last user only)      | `<pin>`          |
//!
//! Writing `high`/`low` to `direction` switches the line to output already
//! at that level, so an active-low relay never glitches on while being
//! configured.
//!
//! Lines are reference-counted. Concurrent status reads share one export,
//! and a line is only unexported when its last user closes it. A line that
//! was already exported before this driver touched it (by another tool, or
//! a previous run) is used as-is and never unexported.
//!
//! After an export the kernel creates `gpio<pin>/` asynchronously, and udev
//! fixes its group permissions later still. `open` waits a bounded time for
//! `direction` to become writable so a non-root `gpio`-group process does
//! not race udev.
//!
//! The root is configurable so tests can point it at a temp directory.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use log::{debug, warn};
use parking_lot::Mutex;

use crate::app::ports::{Level, PinDriver, PinError};

/// Polls of `direction` after an export before giving up on udev.
const EXPORT_SETTLE_POLLS: u32 = 20;
const EXPORT_SETTLE_INTERVAL: Duration = Duration::from_millis(5);

#[derive(Debug, Clone, Copy)]
struct LineUse {
    users: usize,
    /// This driver wrote `export`, so it owns the `unexport`.
    exported: bool,
}

pub struct SysfsPinDriver {
    root: PathBuf,
    lines: Mutex<HashMap<u32, LineUse>>,
}

impl SysfsPinDriver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            lines: Mutex::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn line_dir(&self, pin: u32) -> PathBuf {
        self.root.join(format!("gpio{pin}"))
    }

    fn line_file(&self, pin: u32, name: &str) -> PathBuf {
        self.line_dir(pin).join(name)
    }

    /// Claim a line nobody in this process holds yet. Returns whether it
    /// had to be exported.
    fn export(&self, pin: u32) -> Result<bool, PinError> {
        if self.line_dir(pin).is_dir() {
            debug!("gpio{pin}: already exported, not taking ownership");
            return Ok(false);
        }
        write_attr(&self.root.join("export"), &pin.to_string())?;
        debug!("gpio{pin}: exported");
        self.wait_until_writable(pin);
        Ok(true)
    }

    fn wait_until_writable(&self, pin: u32) {
        let direction = self.line_file(pin, "direction");
        for _ in 0..EXPORT_SETTLE_POLLS {
            if OpenOptions::new().write(true).open(&direction).is_ok() {
                return;
            }
            thread::sleep(EXPORT_SETTLE_INTERVAL);
        }
        warn!("gpio{pin}: {} not writable after export", direction.display());
    }
}

fn write_attr(path: &Path, value: &str) -> Result<(), PinError> {
    fs::write(path, value).map_err(|e| io_error("write", path, &e))
}

/// `open /sys/class/gpio/gpio25/value: no such file or directory`
fn io_error(op: &str, path: &Path, e: &io::Error) -> PinError {
    let reason = match e.kind() {
        io::ErrorKind::NotFound => "no such file or directory".to_owned(),
        io::ErrorKind::PermissionDenied => "permission denied".to_owned(),
        _ => e.to_string(),
    };
    PinError::new(format!("{op} {}: {reason}", path.display()))
}

impl PinDriver for SysfsPinDriver {
    fn open(&self, pin: u32) -> Result<(), PinError> {
        let mut lines = self.lines.lock();
        if let Some(line) = lines.get_mut(&pin) {
            line.users += 1;
            return Ok(());
        }
        let exported = self.export(pin)?;
        lines.insert(pin, LineUse { users: 1, exported });
        Ok(())
    }

    fn configure_output(&self, pin: u32, initial: Level) -> Result<(), PinError> {
        let direction = match initial {
            Level::Low => "low",
            Level::High => "high",
        };
        write_attr(&self.line_file(pin, "direction"), direction)
    }

    fn write_level(&self, pin: u32, level: Level) -> Result<(), PinError> {
        let value = match level {
            Level::Low => "0",
            Level::High => "1",
        };
        write_attr(&self.line_file(pin, "value"), value)
    }

    fn read_level(&self, pin: u32) -> Result<Level, PinError> {
        let path = self.line_file(pin, "value");
        let raw = fs::read_to_string(&path).map_err(|e| io_error("open", &path, &e))?;
        raw.trim().parse::<u8>().map(Level::from_raw).map_err(|_| {
            PinError::new(format!(
                "read {}: unexpected value `{}`",
                path.display(),
                raw.trim()
            ))
        })
    }

    fn close(&self, pin: u32) {
        let mut lines = self.lines.lock();
        let Some(line) = lines.get_mut(&pin) else {
            warn!("gpio{pin}: close without open");
            return;
        };
        line.users -= 1;
        if line.users > 0 {
            return;
        }
        let exported = line.exported;
        lines.remove(&pin);
        if !exported {
            return;
        }
        let path = self.root.join("unexport");
        if let Err(e) = fs::write(&path, pin.to_string()) {
            warn!("gpio{pin}: unexport failed: {e}");
        }
    }
}
