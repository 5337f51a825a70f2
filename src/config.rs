//! System configuration parameters
//!
//! All tunable parameters for the Beacon indicator.
//! Values can be overridden via NVS (non-volatile storage).

use serde::{Deserialize, Serialize};

use crate::app::ports::{StorageError, StoragePort};

const CONFIG_NAMESPACE: &str = "beacon";
const CONFIG_KEY: &str = "syscfg";

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Blinking ---
    /// Default ticks per full on/off blink cycle (seeds the BLINK_INTERVAL
    /// parameter on first boot).
    pub blink_interval_ticks: u32,
    /// Start the duty cycle automatically at boot.
    pub arm_on_boot: bool,

    // --- Timing ---
    /// Control loop interval (milliseconds) — one base rate tick.
    pub control_loop_interval_ms: u32,
    /// Telemetry report interval (seconds).
    pub telemetry_interval_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Blinking: 10 ticks at 100ms = 1s full cycle, 0.5s on
            blink_interval_ticks: 10,
            arm_on_boot: true,

            // Timing
            control_loop_interval_ms: 100, // 10 Hz
            telemetry_interval_secs: 60,   // 1/min
        }
    }
}

impl SystemConfig {
    /// Load configuration from persistent storage.
    /// Falls back to defaults when nothing is stored or the blob is corrupt.
    pub fn from_storage(storage: &impl StoragePort) -> Self {
        let mut buf = [0u8; 64];
        match storage.read(CONFIG_NAMESPACE, CONFIG_KEY, &mut buf) {
            Ok(n) => match postcard::from_bytes(&buf[..n]) {
                Ok(cfg) => cfg,
                Err(_) => {
                    log::warn!("config: stored blob corrupt, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Persist the configuration as a postcard blob.
    pub fn persist(&self, storage: &mut impl StoragePort) -> Result<(), StorageError> {
        let bytes = postcard::to_allocvec(self).map_err(|_| StorageError::IoError)?;
        storage.write(CONFIG_NAMESPACE, CONFIG_KEY, &bytes)
    }

    /// Base ticks between telemetry reports, never below one.
    pub fn telemetry_divider_ticks(&self) -> u32 {
        (self
            .telemetry_interval_secs
            .saturating_mul(1000)
            / self.control_loop_interval_ms.max(1))
        .max(1)
    }
}
