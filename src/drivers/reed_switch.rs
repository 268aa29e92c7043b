//! Reed switch door sensor.
//!
//! Magnet present pulls the line LOW (door closed); anything else reads as
//! open. Each call samples the line fresh.

use std::sync::Arc;

use embedded_hal::digital::InputPin;

use crate::app::ports::{Level, PinDriver, PinError};
use crate::door::DoorState;
use crate::drivers::gpio::AcquiredPin;

pub struct ReedSwitch<D: PinDriver + ?Sized> {
    driver: Arc<D>,
}

impl<D: PinDriver + ?Sized> ReedSwitch<D> {
    pub fn new(driver: Arc<D>) -> Self {
        Self { driver }
    }

    pub fn read(&self, pin: u32) -> Result<DoorState, PinError> {
        let mut line = AcquiredPin::acquire(&*self.driver, pin)?;
        let level = if line.is_low()? { Level::Low } else { Level::High };
        Ok(DoorState::from_level(level))
    }
}
