//! DoorService and HardwareAdapter behaviour against mock ports and a mock
//! pin driver.

use std::sync::Arc;
use std::thread;

use garage::adapters::hardware::HardwareAdapter;
use garage::app::events::AppEvent;
use garage::app::ports::{ActuatorPort, Level, StatusPort};
use garage::config::ServerConfig;
use garage::door::{DoorState, PulseSpec};
use garage::error::{ActuatorError, Error, SensorError};

use crate::mock_hw::{Harness, MockActuator, MockPinDriver};

const PULSE: PulseSpec = PulseSpec {
    pin: 25,
    hold_ms: 5,
    active_low: true,
};

// ── DoorService ───────────────────────────────────────────────

#[test]
fn toggle_records_before_actuating() {
    let h = Harness::new();
    h.service.toggle().unwrap();
    assert_eq!(h.log.events(), vec![AppEvent::ToggleDoor]);
    assert_eq!(*h.actuator.pulses.lock(), vec![ServerConfig::default().pulse()]);
}

#[test]
fn toggle_failure_is_recorded_and_returned() {
    let h = Harness::with(MockActuator::failing("device busy"), ServerConfig::default());
    let err = h.service.toggle().unwrap_err();

    assert_eq!(err, Error::Actuator(ActuatorError::Io("device busy".into())));
    assert_eq!(
        h.log.events(),
        vec![
            AppEvent::ToggleDoor,
            AppEvent::ActuationFailed("device busy".into()),
        ]
    );
}

#[test]
fn status_samples_every_time() {
    let h = Harness::new();
    assert_eq!(h.service.status().unwrap(), DoorState::Closed);
    h.status.set(Ok(DoorState::Open));
    assert_eq!(h.service.status().unwrap(), DoorState::Open);
    assert_eq!(h.status.reads.load(std::sync::atomic::Ordering::SeqCst), 2);
}

#[test]
fn version_matches_crate() {
    let h = Harness::new();
    assert_eq!(h.service.version(), garage::VERSION);
    assert_eq!(h.log.events(), vec![AppEvent::Version]);
}

// ── HardwareAdapter over a pin driver ─────────────────────────

#[test]
fn pulse_releases_line_on_success() {
    let pins = Arc::new(MockPinDriver::default());
    let hw = HardwareAdapter::new(pins.clone());

    hw.actuate(&PULSE).unwrap();

    assert_eq!(pins.held(), 0);
    assert_eq!(
        *pins.writes.lock(),
        vec![(25, Level::High), (25, Level::Low), (25, Level::High)]
    );
}

#[test]
fn pulse_releases_line_on_write_failure() {
    let pins = Arc::new(MockPinDriver::default());
    *pins.fail_write.lock() = Some("device busy".into());
    let hw = HardwareAdapter::new(pins.clone());

    let err = hw.actuate(&PULSE).unwrap_err();
    assert_eq!(err, ActuatorError::Io("device busy".into()));
    assert_eq!(pins.held(), 0);
}

#[test]
fn acquisition_failure_never_starts_the_pulse() {
    let pins = Arc::new(MockPinDriver::default());
    *pins.fail_open.lock() = Some("open /dev/mem: no such file or directory".into());
    let hw = HardwareAdapter::new(pins.clone());

    let err = hw.actuate(&PULSE).unwrap_err();
    assert_eq!(err.to_string(), "open /dev/mem: no such file or directory");
    assert!(pins.writes.lock().is_empty());
}

#[test]
fn concurrent_toggles_each_get_a_full_pulse() {
    let pins = Arc::new(MockPinDriver::default());
    let hw = Arc::new(HardwareAdapter::new(pins.clone()));

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let hw = hw.clone();
            thread::spawn(move || hw.actuate(&PULSE))
        })
        .collect();
    for w in workers {
        w.join().unwrap().unwrap();
    }

    // Configure, assert, release per pulse, never interleaved.
    let writes = pins.writes.lock().clone();
    assert_eq!(writes.len(), 12);
    for pulse in writes.chunks(3) {
        assert_eq!(pulse, [(25, Level::High), (25, Level::Low), (25, Level::High)]);
    }
    assert_eq!(pins.held(), 0);
}

#[test]
fn reed_switch_zero_is_closed() {
    let pins = Arc::new(MockPinDriver::default());
    let hw = HardwareAdapter::new(pins.clone());

    pins.inputs.lock().insert(10, 0);
    assert_eq!(hw.read_status(10).unwrap(), DoorState::Closed);
    for raw in [1u8, 2, 255] {
        pins.inputs.lock().insert(10, raw);
        assert_eq!(hw.read_status(10).unwrap(), DoorState::Open);
    }
    assert_eq!(pins.held(), 0);
}

#[test]
fn reed_switch_failure_carries_driver_message() {
    let pins = Arc::new(MockPinDriver::default());
    let hw = HardwareAdapter::new(pins.clone());
    let err = hw.read_status(10).unwrap_err();
    assert_eq!(
        err,
        SensorError::Io("open /dev/mem: no such file or directory".into())
    );
    assert_eq!(pins.held(), 0);
}
