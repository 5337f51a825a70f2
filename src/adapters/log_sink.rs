//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC in production).  A future uplink adapter
//! would implement the same trait.

use log::{info, warn};

use crate::app::events::BlinkEvent;
use crate::app::ports::{EventSink, ParamValidity};

/// Adapter that logs every [`BlinkEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &BlinkEvent) {
        match event {
            BlinkEvent::Telemetry(t) => {
                let validity = match t.interval.validity {
                    ParamValidity::Valid => "valid",
                    ParamValidity::Invalid => "invalid",
                    ParamValidity::Uninit => "uninit",
                };
                info!(
                    "TELEM | armed={} | led={:?} | transitions={} | interval={} ({})",
                    t.armed, t.led, t.transitions, t.interval.ticks, validity,
                );
            }
            BlinkEvent::LedStateChanged(state) => {
                info!("LED   | -> {:?}", state);
            }
            BlinkEvent::TransitionsRecorded(n) => {
                info!("LED   | transitions={}", n);
            }
            BlinkEvent::ArmingChanged(request) => {
                info!("ARM   | -> {:?}", request);
            }
            BlinkEvent::InvalidArmRequest(raw) => {
                warn!("ARM   | rejected request value {}", raw);
            }
            BlinkEvent::BlinkIntervalChanged(ticks) => {
                info!("PARAM | blink interval set to {} ticks", ticks);
            }
            BlinkEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
        }
    }
}
