//! Mock adapters for integration tests.
//!
//! Record every port call so tests can assert on what reached the hardware
//! without touching real GPIO lines.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use garage::app::events::AppEvent;
use garage::app::ports::{
    ActuatorPort, Clock, Level, LoggerPort, PinDriver, PinError, StatusPort,
};
use garage::app::service::DoorService;
use garage::auth::{AuthGate, signature};
use garage::config::{ServerConfig, SharedSecret, SigningMode};
use garage::door::{DoorState, PulseSpec};
use garage::error::{ActuatorError, SensorError};
use garage::http::AppState;
use parking_lot::Mutex;

pub const SECRET: &str = "correct horse battery staple";
pub const NOW: i64 = 1_464_320_564;

// ── Actuator ──────────────────────────────────────────────────

#[derive(Default)]
pub struct MockActuator {
    pub pulses: Mutex<Vec<PulseSpec>>,
    pub failure: Mutex<Option<String>>,
}

#[allow(dead_code)]
impl MockActuator {
    pub fn failing(msg: &str) -> Self {
        Self {
            failure: Mutex::new(Some(msg.to_owned())),
            ..Self::default()
        }
    }

    pub fn count(&self) -> usize {
        self.pulses.lock().len()
    }
}

impl ActuatorPort for MockActuator {
    fn actuate(&self, spec: &PulseSpec) -> Result<(), ActuatorError> {
        self.pulses.lock().push(*spec);
        match self.failure.lock().clone() {
            Some(msg) => Err(ActuatorError::Io(msg)),
            None => Ok(()),
        }
    }
}

// ── Status ────────────────────────────────────────────────────

pub struct MockStatus {
    pub reading: Mutex<Result<DoorState, String>>,
    pub reads: AtomicUsize,
}

#[allow(dead_code)]
impl MockStatus {
    pub fn new(state: DoorState) -> Self {
        Self {
            reading: Mutex::new(Ok(state)),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn set(&self, reading: Result<DoorState, String>) {
        *self.reading.lock() = reading;
    }
}

impl StatusPort for MockStatus {
    fn read_status(&self, _pin: u32) -> Result<DoorState, SensorError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.reading.lock().clone().map_err(SensorError::Io)
    }
}

// ── Logger ────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryLog {
    pub events: Mutex<Vec<AppEvent>>,
}

#[allow(dead_code)]
impl MemoryLog {
    pub fn events(&self) -> Vec<AppEvent> {
        self.events.lock().clone()
    }
}

impl LoggerPort for MemoryLog {
    fn record(&self, event: &AppEvent) {
        self.events.lock().push(event.clone());
    }
}

// ── Clock ─────────────────────────────────────────────────────

pub struct FixedClock(pub AtomicI64);

impl FixedClock {
    pub fn at(now: i64) -> Self {
        Self(AtomicI64::new(now))
    }
}

impl Clock for FixedClock {
    fn now_unix(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

// ── Pin driver ────────────────────────────────────────────────

/// Tracks open lines so tests can prove every acquisition was released.
#[derive(Default)]
pub struct MockPinDriver {
    pub open_lines: Mutex<HashMap<u32, usize>>,
    pub writes: Mutex<Vec<(u32, Level)>>,
    pub inputs: Mutex<HashMap<u32, u8>>,
    pub fail_open: Mutex<Option<String>>,
    pub fail_write: Mutex<Option<String>>,
}

#[allow(dead_code)]
impl MockPinDriver {
    pub fn held(&self) -> usize {
        self.open_lines.lock().values().sum()
    }
}

impl PinDriver for MockPinDriver {
    fn open(&self, pin: u32) -> Result<(), PinError> {
        if let Some(msg) = self.fail_open.lock().clone() {
            return Err(PinError(msg));
        }
        *self.open_lines.lock().entry(pin).or_default() += 1;
        Ok(())
    }

    fn configure_output(&self, pin: u32, initial: Level) -> Result<(), PinError> {
        self.writes.lock().push((pin, initial));
        Ok(())
    }

    fn write_level(&self, pin: u32, level: Level) -> Result<(), PinError> {
        if let Some(msg) = self.fail_write.lock().clone() {
            return Err(PinError(msg));
        }
        self.writes.lock().push((pin, level));
        Ok(())
    }

    fn read_level(&self, pin: u32) -> Result<Level, PinError> {
        self.inputs
            .lock()
            .get(&pin)
            .map(|raw| Level::from_raw(*raw))
            .ok_or_else(|| PinError::new("open /dev/mem: no such file or directory"))
    }

    fn close(&self, pin: u32) {
        if let Some(n) = self.open_lines.lock().get_mut(&pin) {
            *n = n.saturating_sub(1);
        }
    }
}

// ── Harness ───────────────────────────────────────────────────

/// A fully wired server over mocks.
pub struct Harness {
    pub actuator: Arc<MockActuator>,
    pub status: Arc<MockStatus>,
    pub log: Arc<MemoryLog>,
    pub service: Arc<DoorService>,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl Harness {
    pub fn new() -> Self {
        Self::with(MockActuator::default(), ServerConfig::default())
    }

    pub fn with(actuator: MockActuator, config: ServerConfig) -> Self {
        let actuator = Arc::new(actuator);
        let status = Arc::new(MockStatus::new(DoorState::Closed));
        let log = Arc::new(MemoryLog::default());
        let service = Arc::new(DoorService::new(
            &config,
            actuator.clone(),
            status.clone(),
            log.clone(),
        ));
        let gate = gate(config.signing);
        let state = Arc::new(AppState::new(service.clone(), gate));
        Self {
            actuator,
            status,
            log,
            service,
            state,
        }
    }

    pub fn with_audit_log(path: &Path) -> Self {
        let config = ServerConfig {
            audit_log: path.to_path_buf(),
            ..ServerConfig::default()
        };
        Self::with(MockActuator::default(), config)
    }
}

pub fn gate(mode: SigningMode) -> AuthGate {
    AuthGate::new(
        Arc::new(SharedSecret::new(SECRET).unwrap()),
        mode,
        Arc::new(FixedClock::at(NOW)),
    )
}

/// `(signature, timestamp)` header values for `ts` under `secret`.
pub fn sign_headers(secret: &str, ts: i64) -> (String, String) {
    let ts = ts.to_string();
    let sig = signature::sign(ts.as_bytes(), &SharedSecret::new(secret).unwrap());
    (sig, ts)
}
