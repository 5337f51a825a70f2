//! Indicator LED driver.
//!
//! A single digital output, active HIGH.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes the GPIO level via hw_init.
//! On host/test: tracks the level in-memory only.
//!
//! Implements the `embedded-hal` [`OutputPin`] traits so the driver can
//! be handed to generic embedded code; [`set`]/[`level`] are the
//! domain-facing API.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};

use crate::app::ports::Level;
use crate::drivers::hw_init;

pub struct IndicatorLed {
    gpio: i32,
    level: Level,
}

impl IndicatorLed {
    /// Driver over the given GPIO.  The pin must already be configured
    /// as an output (see [`hw_init::init_peripherals`]).
    pub fn new(gpio: i32) -> Self {
        Self {
            gpio,
            level: Level::Low,
        }
    }

    /// GPIO pin this LED is attached to.
    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    /// Drive the output to the given logical level.
    pub fn set(&mut self, level: Level) {
        hw_init::gpio_write(self.gpio, level == Level::High);
        self.level = level;
    }

    /// Last driven logical level.
    pub fn level(&self) -> Level {
        self.level
    }
}

impl ErrorType for IndicatorLed {
    type Error = Infallible;
}

impl OutputPin for IndicatorLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(Level::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(Level::High);
        Ok(())
    }
}
