//! Rate group engine.
//!
//! Divides the base timer tick into the sub-rates the system runs at.
//! The rate group notifies a [`RateGroupDelegate`] when a slot fires;
//! the main loop implements the delegate to push events into the ISR
//! queue.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Base Tick Source                        │
//! │              (esp_timer, 1 tick per interval)                │
//! │                          │                                   │
//! │                          ▼                                   │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │  RateGroup    slot "control"    divider 1              │  │
//! │  │               slot "telemetry"  divider N              │  │
//! │  └───────────────────────┬────────────────────────────────┘  │
//! │                          │ RateGroupDelegate                 │
//! │                          ▼                                   │
//! │              (main loop pushes into Event Queue)             │
//! │                          │                                   │
//! │                          ▼                                   │
//! │                 SharedBlinker.on_tick()                      │
//! │                 telemetry snapshot emit                      │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use crate::app::ports::{RateGroupDelegate, RateSlotKind};
use log::info;

// ═══════════════════════════════════════════════════════════════
//  Slot types
// ═══════════════════════════════════════════════════════════════

/// A single rate slot.
#[derive(Debug, Clone)]
pub struct RateSlot {
    /// Human-readable label (e.g., "control").
    pub label: &'static str,
    /// Which sub-rate this slot drives.
    pub kind: RateSlotKind,
    /// Fire every `divider` base ticks (1 = every tick).
    pub divider: u32,
    /// Whether this slot is currently enabled.
    pub enabled: bool,
}

// ═══════════════════════════════════════════════════════════════
//  Rate group engine
// ═══════════════════════════════════════════════════════════════

/// Maximum number of slots (stack-allocated).
const MAX_RATE_SLOTS: usize = 4;

/// The rate group engine.
///
/// This struct is intentionally decoupled from the event system.
/// When a slot fires it invokes the [`RateGroupDelegate`] callback
/// rather than directly pushing events.  This makes the rate group
/// independently testable and reusable across different execution
/// contexts.
pub struct RateGroup {
    /// Registered slots.
    slots: [Option<SlotEntry>; MAX_RATE_SLOTS],
    /// Global enable flag.
    enabled: bool,
}

/// Internal bookkeeping for a live slot.
#[derive(Debug, Clone)]
struct SlotEntry {
    slot: RateSlot,
    /// Base ticks elapsed since the last fire.
    elapsed_ticks: u32,
}

impl RateGroup {
    pub fn new() -> Self {
        Self {
            slots: [None, None, None, None],
            enabled: true,
        }
    }

    /// Add a slot.  Returns the slot index, or `None` if full.
    pub fn add(&mut self, slot: RateSlot) -> Option<usize> {
        for (i, entry) in self.slots.iter_mut().enumerate() {
            if entry.is_none() {
                info!("rate group: added '{}' at slot {}", slot.label, i);
                *entry = Some(SlotEntry {
                    slot,
                    elapsed_ticks: 0,
                });
                return Some(i);
            }
        }
        None // All slots full.
    }

    /// Remove a slot by index.
    pub fn remove(&mut self, index: usize) {
        if index < MAX_RATE_SLOTS {
            if let Some(entry) = &self.slots[index] {
                info!("rate group: removed '{}' from slot {}", entry.slot.label, index);
            }
            self.slots[index] = None;
        }
    }

    /// Enable or disable the entire rate group.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Advance the rate group by one base tick.
    ///
    /// Every enabled slot whose divider has elapsed fires through
    /// `delegate.on_rate_slot_fired()`.  The caller decides what to do
    /// with the notification (push an event, log, etc.).
    pub fn tick(&mut self, delegate: &mut dyn RateGroupDelegate) {
        if !self.enabled {
            return;
        }

        for entry in self.slots.iter_mut().flatten() {
            if !entry.slot.enabled {
                continue;
            }

            entry.elapsed_ticks += 1;
            if entry.elapsed_ticks >= entry.slot.divider.max(1) {
                entry.elapsed_ticks = 0;
                delegate.on_rate_slot_fired(entry.slot.label, entry.slot.kind);
            }
        }
    }

    /// Number of active (enabled) slots.
    pub fn active_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.as_ref().is_some_and(|e| e.slot.enabled))
            .count()
    }
}

impl Default for RateGroup {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
