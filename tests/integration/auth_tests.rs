//! AuthGate behaviour as seen by a non-HTTP caller.

use std::sync::atomic::{AtomicUsize, Ordering};

use garage::auth::{AuthDecision, RawCommand, Rejection};
use garage::config::SigningMode;

use crate::mock_hw::{NOW, SECRET, gate, sign_headers};

fn decide(secret: &str, ts: i64) -> AuthDecision {
    let (sig, ts) = sign_headers(secret, ts);
    gate(SigningMode::Header).decide(&RawCommand {
        signature: Some(&sig),
        timestamp: Some(&ts),
        body: b"",
    })
}

#[test]
fn window_edges() {
    assert!(decide(SECRET, NOW).accepted);
    assert!(decide(SECRET, NOW - 10).accepted);
    assert_eq!(decide(SECRET, NOW - 11).reason, Rejection::Stale);
    assert!(decide(SECRET, NOW + 60).accepted, "future timestamps pass");
}

#[test]
fn wrong_secret_rejected_at_any_age() {
    for ts in [NOW, NOW - 5, NOW - 100, NOW + 100] {
        assert_eq!(decide("not it", ts).reason, Rejection::SignatureInvalid);
    }
}

#[test]
fn replay_stops_working_after_the_window() {
    let (sig, ts) = sign_headers(SECRET, NOW);
    let raw = RawCommand {
        signature: Some(&sig),
        timestamp: Some(&ts),
        body: b"",
    };

    assert!(gate(SigningMode::Header).decide(&raw).accepted);

    let later = garage::auth::AuthGate::new(
        std::sync::Arc::new(garage::config::SharedSecret::new(SECRET).unwrap()),
        SigningMode::Header,
        std::sync::Arc::new(crate::mock_hw::FixedClock::at(NOW + 11)),
    );
    assert_eq!(later.decide(&raw).reason, Rejection::Stale);
}

#[test]
fn guard_runs_the_operation_once_on_acceptance_only() {
    let runs = AtomicUsize::new(0);
    let g = gate(SigningMode::Header);

    let (sig, ts) = sign_headers(SECRET, NOW);
    let ok = RawCommand {
        signature: Some(&sig),
        timestamp: Some(&ts),
        body: b"",
    };
    g.guard(&ok, |_| runs.fetch_add(1, Ordering::SeqCst)).unwrap();

    let (bad, ts) = sign_headers("forged", NOW);
    let forged = RawCommand {
        signature: Some(&bad),
        timestamp: Some(&ts),
        body: b"",
    };
    assert!(g.guard(&forged, |_| runs.fetch_add(1, Ordering::SeqCst)).is_err());

    assert_eq!(runs.load(Ordering::SeqCst), 1);
}
