//! Outbound application events.
//!
//! The [`BlinkService`](super::service::BlinkService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them — log to serial, publish over
//! a future uplink, record in a test.

use super::commands::ArmRequest;
use super::ports::IntervalReading;
use super::service::LedState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum BlinkEvent {
    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),

    /// The indicator output toggled; carries the new state.
    LedStateChanged(LedState),

    /// Running total of output transitions (telemetry channel,
    /// emitted on every toggle).
    TransitionsRecorded(u64),

    /// An arm command was accepted; carries the requested value.
    ArmingChanged(ArmRequest),

    /// An arm command carried a value outside `{ON, OFF}` (warning).
    InvalidArmRequest(u8),

    /// A new blink interval was validated and applied.
    BlinkIntervalChanged(u32),

    /// The controller has started (carries initial output state).
    Started(LedState),
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone)]
pub struct TelemetryData {
    pub armed: bool,
    pub led: LedState,
    pub transitions: u64,
    pub interval: IntervalReading,
}
