//! Fuzz target: audit log parser
//!
//! Feeds arbitrary bytes through the same lossy decode the server applies
//! to the log file and checks:
//! - No panics
//! - Never more entries than lines carrying the toggle marker
//! - Every entry's kind is `Toggle`
//!
//! cargo fuzz run fuzz_audit_log

#![no_main]

use garage::audit::{TOGGLE_MARKER, parse_audit};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let entries = parse_audit(&text);

    let markers = text.lines().filter(|l| l.starts_with(TOGGLE_MARKER)).count();
    assert!(entries.len() <= markers);
    assert!(entries.iter().all(|e| e.kind == "Toggle"));
});
