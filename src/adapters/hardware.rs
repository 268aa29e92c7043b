//! Hardware adapter: bridges the relay and reed-switch drivers to the
//! domain port traits.
//!
//! Generic over the [`PinDriver`] so the same wiring runs against sysfs on
//! the Pi and against an in-memory driver in tests. This is the only place
//! driver-level [`PinError`](crate::app::ports::PinError)s become domain
//! errors.

use std::sync::Arc;

use crate::app::ports::{ActuatorPort, PinDriver, StatusPort};
use crate::door::{DoorState, PulseSpec};
use crate::drivers::reed_switch::ReedSwitch;
use crate::drivers::relay::RelayDriver;
use crate::error::{ActuatorError, SensorError};

/// Relay and door sensor behind one set of GPIO primitives.
pub struct HardwareAdapter<D: PinDriver + ?Sized> {
    relay: RelayDriver<D>,
    reed: ReedSwitch<D>,
}

impl<D: PinDriver + ?Sized> HardwareAdapter<D> {
    pub fn new(driver: Arc<D>) -> Self {
        Self {
            relay: RelayDriver::new(driver.clone()),
            reed: ReedSwitch::new(driver),
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<D: PinDriver + ?Sized> ActuatorPort for HardwareAdapter<D> {
    fn actuate(&self, spec: &PulseSpec) -> Result<(), ActuatorError> {
        Ok(self.relay.pulse(spec)?)
    }
}

// ── StatusPort implementation ─────────────────────────────────

impl<D: PinDriver + ?Sized> StatusPort for HardwareAdapter<D> {
    fn read_status(&self, pin: u32) -> Result<DoorState, SensorError> {
        Ok(self.reed.read(pin)?)
    }
}
