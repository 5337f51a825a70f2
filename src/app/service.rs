//! Blink controller — the application core.
//!
//! [`BlinkService`] owns the duty-cycle state machine that drives the
//! indicator LED.  It is invoked by two external triggers — a periodic
//! control tick and an asynchronous arm/disarm command — and exposes a
//! clean, hardware-agnostic API.  All I/O flows through port traits
//! injected at call sites, making the whole service testable with mock
//! adapters.
//!
//! ```text
//!  IntervalSource ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                     │      BlinkService       │
//!        LedPort ◀────│  duty-cycle state machine│
//!                     └────────────────────────┘
//! ```
//!
//! ## Toggle policy
//!
//! Edge-triggered: the output turns on when the cycle counter is 0
//! while deasserted, and off when the counter reaches `interval / 2`
//! while asserted.  The counter advances on every armed tick and wraps
//! to 0 at `interval`.  Exactly zero or one transition per tick, never
//! more, regardless of the interval value.
//!
//! An interval of 0 (or any non-valid parameter read) is the degenerate
//! duty cycle: the output holds its last level and the counter stays
//! parked at 0.  Not an error.

use super::commands::{ArmRequest, CommandError};
use super::events::{BlinkEvent, TelemetryData};
use super::ports::{EventSink, IntervalSource, LedPort, Level};

// ───────────────────────────────────────────────────────────────
// Output state
// ───────────────────────────────────────────────────────────────

/// The logical state of the indicator output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedState {
    Off,
    On,
}

impl LedState {
    /// The electrical level that asserts this state.
    pub const fn level(self) -> Level {
        match self {
            Self::On => Level::High,
            Self::Off => Level::Low,
        }
    }

    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

// ───────────────────────────────────────────────────────────────
// BlinkService
// ───────────────────────────────────────────────────────────────

/// The blink duty-cycle controller.
///
/// One instance is constructed at startup, owned explicitly by the
/// topology (no hidden statics), and lives for the process lifetime.
/// For cross-thread use wrap it in
/// [`SharedBlinker`](super::shared::SharedBlinker).
pub struct BlinkService {
    /// Last reported output state.  Tick-context only.
    state: LedState,
    /// Total output toggles since construction.  Never resets.
    transitions: u64,
    /// Ticks since the last toggle (or since arming).  Reset to 0 by
    /// every accepted arm command; wraps at the configured interval.
    count: u32,
    /// Whether the duty cycle is active.  Shared with the command path.
    armed: bool,
}

impl BlinkService {
    /// Construct a controller: disarmed, output off, no transitions.
    pub const fn new() -> Self {
        Self {
            state: LedState::Off,
            transitions: 0,
            count: 0,
            armed: false,
        }
    }

    // ── Per-tick operation ────────────────────────────────────

    /// Run one duty-cycle step.  Called once per control tick.
    ///
    /// The blink interval is read fresh from `intervals` on every call;
    /// a parameter change takes effect on the next tick.  `led` may be
    /// `None` (unconnected output) — the level forward is then skipped.
    pub fn on_tick(
        &mut self,
        intervals: &impl IntervalSource,
        led: Option<&mut dyn LedPort>,
        sink: &mut impl EventSink,
    ) {
        let interval = intervals.blink_interval().effective_ticks();

        // Only perform actions while armed.
        if !self.armed {
            return;
        }

        if interval == 0 {
            // Degenerate duty cycle: hold the output, park the phase.
            self.count = 0;
            return;
        }

        let next = match self.state {
            LedState::Off if self.count == 0 => LedState::On,
            LedState::On if self.count == interval / 2 => LedState::Off,
            current => current,
        };

        if next != self.state {
            self.state = next;
            self.transitions += 1;
            sink.emit(&BlinkEvent::TransitionsRecorded(self.transitions));

            // The output may be unconnected; skip rather than fail.
            if let Some(port) = led {
                port.set_level(next.level());
            }
            sink.emit(&BlinkEvent::LedStateChanged(next));
        }

        self.count = if self.count + 1 >= interval {
            0
        } else {
            self.count + 1
        };
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an arm/disarm request from the command path.
    ///
    /// `raw` is the wire-level request value.  Out-of-set values mutate
    /// nothing, emit one warning event, and yield the validation
    /// failure.  Accepted requests always restart the cycle phase at 0,
    /// including re-issuing ON while already armed.
    pub fn set_armed(
        &mut self,
        raw: u8,
        sink: &mut impl EventSink,
    ) -> Result<(), CommandError> {
        let Some(request) = ArmRequest::from_wire(raw) else {
            sink.emit(&BlinkEvent::InvalidArmRequest(raw));
            return Err(CommandError::InvalidArgument(raw));
        };

        self.count = 0; // Restart the phase on any accepted command.
        self.armed = request.is_on();
        sink.emit(&BlinkEvent::ArmingChanged(request));
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    /// Last reported output state.
    pub fn led_state(&self) -> LedState {
        self.state
    }

    /// Total output toggles since construction.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Whether the duty cycle is active.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Current cycle phase (ticks since the last toggle or arm).
    pub fn cycle_count(&self) -> u32 {
        self.count
    }

    /// Build a telemetry snapshot, pairing controller state with the
    /// current parameter reading.
    pub fn telemetry(&self, intervals: &impl IntervalSource) -> TelemetryData {
        TelemetryData {
            armed: self.armed,
            led: self.state,
            transitions: self.transitions,
            interval: intervals.blink_interval(),
        }
    }
}

impl Default for BlinkService {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
