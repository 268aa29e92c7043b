//! Scoped GPIO line ownership.
//!
//! [`AcquiredPin`] claims a line on construction and releases it on drop, so
//! every exit path of a pulse or a sensor read (including early `?` returns)
//! leaves the line unexported. While held it speaks the `embedded-hal`
//! digital traits, which is what the relay and reed-switch drivers are
//! written against.

use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin, OutputPin};
use log::trace;

use crate::app::ports::{Level, PinDriver, PinError};

impl digital::Error for PinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// A claimed line. Released exactly once, when dropped.
pub struct AcquiredPin<'a, D: PinDriver + ?Sized> {
    driver: &'a D,
    pin: u32,
}

impl<'a, D: PinDriver + ?Sized> AcquiredPin<'a, D> {
    /// Claim `pin`. A failed claim holds nothing and releases nothing.
    pub fn acquire(driver: &'a D, pin: u32) -> Result<Self, PinError> {
        driver.open(pin)?;
        trace!("gpio{pin}: acquired");
        Ok(Self { driver, pin })
    }

    /// Make the line an output, parked at `idle`.
    pub fn configure_output(&mut self, idle: Level) -> Result<(), PinError> {
        self.driver.configure_output(self.pin, idle)
    }

    pub fn level(&mut self) -> Result<Level, PinError> {
        self.driver.read_level(self.pin)
    }

    pub fn drive(&mut self, level: Level) -> Result<(), PinError> {
        self.driver.write_level(self.pin, level)
    }
}

impl<D: PinDriver + ?Sized> Drop for AcquiredPin<'_, D> {
    fn drop(&mut self) {
        self.driver.close(self.pin);
        trace!("gpio{}: released", self.pin);
    }
}

// ── embedded-hal ──────────────────────────────────────────────

impl<D: PinDriver + ?Sized> ErrorType for AcquiredPin<'_, D> {
    type Error = PinError;
}

impl<D: PinDriver + ?Sized> OutputPin for AcquiredPin<'_, D> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(Level::Low)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(Level::High)
    }
}

impl<D: PinDriver + ?Sized> InputPin for AcquiredPin<'_, D> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level()? == Level::High)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level()? == Level::Low)
    }
}
