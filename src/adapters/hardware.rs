//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the indicator LED driver and exposes it through [`LedPort`].
//! This is the only module in the system that touches actual hardware.
//! On non-espidf targets, the underlying driver uses cfg-gated
//! simulation stubs.

use crate::app::ports::{LedPort, Level};
use crate::drivers::led::IndicatorLed;

/// Concrete adapter that puts the board's actuators behind port traits.
pub struct HardwareAdapter {
    led: IndicatorLed,
}

impl HardwareAdapter {
    pub fn new(led: IndicatorLed) -> Self {
        Self { led }
    }

    /// Last level driven onto the indicator output.
    pub fn led_level(&self) -> Level {
        self.led.level()
    }
}

// ── LedPort implementation ────────────────────────────────────

impl LedPort for HardwareAdapter {
    fn set_level(&mut self, level: Level) {
        self.led.set(level);
    }
}
