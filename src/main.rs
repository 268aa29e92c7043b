//! Garage Server: Main Entry Point
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                     │
//! │                                                               │
//! │  HardwareAdapter<SysfsPinDriver>   FileLogSink   SystemClock  │
//! │  (Actuator + Status)               (Logger)      (Clock)      │
//! │                                                               │
//! │  ──────────────── Port Trait Boundary ──────────────────      │
//! │                                                               │
//! │  ┌──────────────────────┐     ┌────────────────────────┐      │
//! │  │  AuthGate            │ ──▶ │  DoorService           │      │
//! │  │  HMAC · freshness    │     │  toggle · status · log │      │
//! │  └──────────────────────┘     └────────────────────────┘      │
//! │                                                               │
//! │  axum router (http::router)                                   │
//! └───────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::sync::Arc;

use anyhow::{Context, Result};
use log::{info, warn};
use tokio::net::TcpListener;

use garage::adapters::hardware::HardwareAdapter;
use garage::adapters::log_sink::FileLogSink;
use garage::adapters::sysfs_gpio::SysfsPinDriver;
use garage::adapters::time::SystemClock;
use garage::app::events::AppEvent;
use garage::app::service::DoorService;
use garage::auth::AuthGate;
use garage::config::Settings;
use garage::http::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("╔══════════════════════════════════════╗");
    info!("║  Garage Server v{}                ║", garage::VERSION);
    info!("╚══════════════════════════════════════╝");

    // ── Configuration ─────────────────────────────────────────
    let settings = Settings::from_env().context("loading configuration")?;
    let config = settings.config;
    info!(
        "Relay gpio{} ({} ms, active-{}), sensor gpio{}, signing={:?}",
        config.relay_pin,
        config.hold_ms,
        if config.active_low { "low" } else { "high" },
        config.status_pin,
        config.signing,
    );

    // ── Adapters ──────────────────────────────────────────────
    let pins = Arc::new(SysfsPinDriver::new(&config.gpio_root));
    if !pins.root().is_dir() {
        warn!("GPIO root {} not found; actuation will fail", pins.root().display());
    }
    let hardware = Arc::new(HardwareAdapter::new(pins));
    let sink = Arc::new(
        FileLogSink::open(&config.audit_log)
            .with_context(|| format!("opening event log {}", config.audit_log.display()))?,
    );

    // ── Core ──────────────────────────────────────────────────
    let service = Arc::new(DoorService::new(&config, hardware.clone(), hardware, sink));
    let gate = AuthGate::new(Arc::new(settings.secret), config.signing, Arc::new(SystemClock));
    let state = Arc::new(AppState::new(service.clone(), gate));

    // ── Listener ──────────────────────────────────────────────
    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    service.record(&AppEvent::Started {
        addr: config.listen_addr.clone(),
    });

    axum::serve(listener, http::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server")?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("ctrl-c handler failed: {e}");
        return;
    }
    info!("Shutdown signal received");
}
