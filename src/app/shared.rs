//! Cross-context handle for the blink controller.
//!
//! The controller is invoked from two independent execution contexts:
//! the periodic tick (timer/main loop) and command delivery (button
//! ISR path, future RPC task).  [`SharedBlinker`] wraps the service in
//! a `critical-section` backed blocking mutex so both contexts see a
//! consistent arm/phase state — a tick can never observe a half-updated
//! arm flag.
//!
//! The critical section is kept minimal: events produced inside it are
//! buffered into a fixed-capacity [`heapless::Vec`] and replayed to the
//! real sink only after the lock is released, so no sink I/O ever runs
//! under the lock.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use super::commands::CommandError;
use super::events::{BlinkEvent, TelemetryData};
use super::ports::{EventSink, IntervalSource, LedPort};
use super::service::BlinkService;

/// Worst case per operation is two events (transition count + state
/// change), so a small buffer suffices.
const EVENT_BUFFER_CAP: usize = 4;

/// Fixed-capacity event staging buffer used inside the critical section.
struct EventBuffer {
    events: heapless::Vec<BlinkEvent, EVENT_BUFFER_CAP>,
}

impl EventBuffer {
    const fn new() -> Self {
        Self {
            events: heapless::Vec::new(),
        }
    }

    fn drain_into(self, sink: &mut impl EventSink) {
        for event in &self.events {
            sink.emit(event);
        }
    }
}

impl EventSink for EventBuffer {
    fn emit(&mut self, event: &BlinkEvent) {
        // Capacity covers the worst case per operation; a push can only
        // fail if that assumption is broken, and dropping is preferable
        // to blocking inside the critical section.
        self.events.push(event.clone()).ok();
    }
}

/// Mutex-guarded blink controller, shareable by reference between the
/// tick context and the command context.
pub struct SharedBlinker {
    inner: Mutex<CriticalSectionRawMutex, RefCell<BlinkService>>,
}

impl SharedBlinker {
    pub const fn new(service: BlinkService) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(service)),
        }
    }

    /// Run one duty-cycle step under the lock; events are emitted to
    /// `sink` after the lock is released.
    pub fn on_tick(
        &self,
        intervals: &impl IntervalSource,
        led: Option<&mut dyn LedPort>,
        sink: &mut impl EventSink,
    ) {
        let mut buffer = EventBuffer::new();
        self.inner
            .lock(|svc| svc.borrow_mut().on_tick(intervals, led, &mut buffer));
        buffer.drain_into(sink);
    }

    /// Process an arm/disarm request under the lock; events are emitted
    /// to `sink` after the lock is released.
    pub fn set_armed(&self, raw: u8, sink: &mut impl EventSink) -> Result<(), CommandError> {
        let mut buffer = EventBuffer::new();
        let result = self
            .inner
            .lock(|svc| svc.borrow_mut().set_armed(raw, &mut buffer));
        buffer.drain_into(sink);
        result
    }

    /// Whether the duty cycle is currently active.
    pub fn is_armed(&self) -> bool {
        self.inner.lock(|svc| svc.borrow().is_armed())
    }

    /// Last reported output state.
    pub fn led_state(&self) -> super::service::LedState {
        self.inner.lock(|svc| svc.borrow().led_state())
    }

    /// Build a telemetry snapshot.
    pub fn telemetry(&self, intervals: &impl IntervalSource) -> TelemetryData {
        self.inner.lock(|svc| svc.borrow().telemetry(intervals))
    }
}
