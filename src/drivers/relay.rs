//! Relay pulse driver.
//!
//! One pulse = claim the line, park it at idle, assert for `hold_ms`, return
//! to idle, release. The opener sees a momentary button press.
//!
//! ## Concurrency
//!
//! Pulses are serialised. A request that arrives mid-pulse blocks until the
//! running pulse has fully returned the line to idle, then performs its own.
//! Two overlapping presses would otherwise merge into one long press.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use embedded_hal::digital::OutputPin;
use log::{debug, warn};
use parking_lot::Mutex;

use crate::app::ports::{Level, PinDriver, PinError};
use crate::door::PulseSpec;
use crate::drivers::gpio::AcquiredPin;

pub struct RelayDriver<D: PinDriver + ?Sized> {
    driver: Arc<D>,
    in_flight: Mutex<()>,
}

impl<D: PinDriver + ?Sized> RelayDriver<D> {
    pub fn new(driver: Arc<D>) -> Self {
        Self {
            driver,
            in_flight: Mutex::new(()),
        }
    }

    /// Blocks for at least `spec.hold_ms`.
    pub fn pulse(&self, spec: &PulseSpec) -> Result<(), PinError> {
        let _serial = self.in_flight.lock();
        let (active, idle) = spec.levels();

        let mut line = AcquiredPin::acquire(&*self.driver, spec.pin)?;
        line.configure_output(idle)?;

        debug!("relay: gpio{} asserted for {} ms", spec.pin, spec.hold_ms);
        drive(&mut line, active)?;
        thread::sleep(Duration::from_millis(spec.hold_ms));

        if let Err(e) = drive(&mut line, idle) {
            warn!("relay: gpio{} stuck asserted: {e}", spec.pin);
            return Err(e);
        }
        Ok(())
    }
}

fn drive<P: OutputPin>(line: &mut P, level: Level) -> Result<(), P::Error> {
    match level {
        Level::Low => line.set_low(),
        Level::High => line.set_high(),
    }
}
