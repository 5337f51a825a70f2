//! Interrupt-driven event system.
//!
//! Events are produced by:
//! - Timer callbacks (periodic base rate ticks)
//! - GPIO ISRs (button presses)
//! - Software (rate group slot fires)
//!
//! Events are consumed by the main control loop, which processes them
//! one at a time in FIFO order.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Timer ISR   │────▶│              │     │              │
//! │ GPIO ISR    │────▶│  Event Queue │────▶│  Main Loop   │
//! │ Software    │────▶│  (lock-free) │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```

use core::sync::atomic::{AtomicU8, Ordering};

/// Maximum number of pending events.
/// Power of 2 for efficient ring buffer modulo.
const EVENT_QUEUE_CAP: usize = 32;

/// System event types. Discriminants are spaced so related
/// events group together and new ones can slot in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Event {
    // ── Scheduling ────────────────────────────────────────
    /// Base rate timer fired — advance the rate group.
    RateTick = 10,
    /// Control slot fired — run one blink controller cycle.
    ControlTick = 20,

    // ── Communication ─────────────────────────────────────
    /// Telemetry slot fired — publish a snapshot.
    TelemetryTick = 30,

    // ── User input ────────────────────────────────────────
    /// Debounced short button press.
    ButtonShortPress = 40,
    /// Long button press (>5s hold).
    ButtonLongPress = 41,
}

// ── Lock-free SPSC ring buffer ────────────────────────────────
//
// Timer/GPIO callbacks write (produce), the main loop reads (consume).
// Head/tail are atomic indices; each cell is written by the single
// producer before the head is published and read by the single
// consumer before the tail advances.

static EVENT_HEAD: AtomicU8 = AtomicU8::new(0);
static EVENT_TAIL: AtomicU8 = AtomicU8::new(0);
// SAFETY: cell `head` is written only by the producer between reserving
// the slot and the Release store of EVENT_HEAD; cell `tail` is read only
// by the consumer after the Acquire load of EVENT_HEAD. Producer and
// consumer never touch the same cell concurrently.
static mut EVENT_BUFFER: [u8; EVENT_QUEUE_CAP] = [0; EVENT_QUEUE_CAP];

/// Push an event into the queue.
/// Safe to call from ISR context (lock-free).
/// Returns `false` if the queue is full (event dropped).
pub fn push_event(event: Event) -> bool {
    let head = EVENT_HEAD.load(Ordering::Relaxed);
    let tail = EVENT_TAIL.load(Ordering::Acquire);
    let next_head = (head + 1) % EVENT_QUEUE_CAP as u8;

    if next_head == tail {
        return false; // Queue full — drop event.
    }

    // SAFETY: single producer; the cell at `head` is not visible to the
    // consumer until the Release store below.
    unsafe {
        EVENT_BUFFER[head as usize] = event as u8;
    }

    EVENT_HEAD.store(next_head, Ordering::Release);
    true
}

/// Pop the next event from the queue.
/// Called from the main loop (single consumer).
/// Returns `None` if the queue is empty.
pub fn pop_event() -> Option<Event> {
    let tail = EVENT_TAIL.load(Ordering::Relaxed);
    let head = EVENT_HEAD.load(Ordering::Acquire);

    if tail == head {
        return None; // Empty.
    }

    // SAFETY: single consumer; the producer published this cell before
    // the Acquire-observed head advance.
    let raw = unsafe { EVENT_BUFFER[tail as usize] };
    EVENT_TAIL.store((tail + 1) % EVENT_QUEUE_CAP as u8, Ordering::Release);

    event_from_u8(raw)
}

/// Drain all pending events into a callback.
/// Processes events in FIFO order.
pub fn drain_events(mut handler: impl FnMut(Event)) {
    while let Some(event) = pop_event() {
        handler(event);
    }
}

/// Check if the event queue is empty.
pub fn queue_is_empty() -> bool {
    let tail = EVENT_TAIL.load(Ordering::Relaxed);
    let head = EVENT_HEAD.load(Ordering::Acquire);
    tail == head
}

/// Number of pending events.
pub fn queue_len() -> usize {
    let head = EVENT_HEAD.load(Ordering::Relaxed) as usize;
    let tail = EVENT_TAIL.load(Ordering::Relaxed) as usize;
    (head + EVENT_QUEUE_CAP - tail) % EVENT_QUEUE_CAP
}

// ── Internal ──────────────────────────────────────────────────

fn event_from_u8(raw: u8) -> Option<Event> {
    match raw {
        10 => Some(Event::RateTick),
        20 => Some(Event::ControlTick),
        30 => Some(Event::TelemetryTick),
        40 => Some(Event::ButtonShortPress),
        41 => Some(Event::ButtonLongPress),
        _ => None,
    }
}
