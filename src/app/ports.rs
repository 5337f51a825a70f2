//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ BlinkService (domain)
//! ```
//!
//! Driven adapters (LED hardware, parameter storage, event sinks)
//! implement these traits.  The [`BlinkService`](super::service::BlinkService)
//! consumes them at call sites, so the domain core never touches
//! hardware directly.

// ───────────────────────────────────────────────────────────────
// LED port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Logical output level forwarded to the LED driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    High,
    Low,
}

/// Write-side port: the domain calls this to drive the indicator LED.
///
/// The controller receives `Option<&mut dyn LedPort>` on every tick —
/// `None` is the valid "unconnected" configuration and is silently
/// skipped, never an error.
pub trait LedPort {
    /// Drive the indicator output to the given logical level.
    fn set_level(&mut self, level: Level);
}

// ───────────────────────────────────────────────────────────────
// Interval source (driven adapter: parameter store → domain)
// ───────────────────────────────────────────────────────────────

/// Validity tag attached to every parameter read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamValidity {
    /// The value was set (or loaded) and is usable.
    Valid,
    /// A stored value exists but could not be decoded.
    Invalid,
    /// No value has ever been set.
    Uninit,
}

/// A point-in-time read of the blink interval parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalReading {
    /// Ticks per full on/off cycle.
    pub ticks: u32,
    pub validity: ParamValidity,
}

impl IntervalReading {
    pub const fn valid(ticks: u32) -> Self {
        Self {
            ticks,
            validity: ParamValidity::Valid,
        }
    }

    pub const fn invalid() -> Self {
        Self {
            ticks: 0,
            validity: ParamValidity::Invalid,
        }
    }

    pub const fn uninit() -> Self {
        Self {
            ticks: 0,
            validity: ParamValidity::Uninit,
        }
    }

    /// The interval the controller acts on: any non-valid read degrades
    /// to 0 (the "no toggling" duty cycle).
    pub const fn effective_ticks(self) -> u32 {
        match self.validity {
            ParamValidity::Valid => self.ticks,
            ParamValidity::Invalid | ParamValidity::Uninit => 0,
        }
    }
}

/// Read-side port: the domain queries the current blink interval on
/// every tick.  No caching — a configuration change takes effect on
/// the next tick without a restart.
pub trait IntervalSource {
    fn blink_interval(&self) -> IntervalReading;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`BlinkEvent`](super::events::BlinkEvent)s
/// through this port.  Adapters decide where they go (serial log, test
/// recorder, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::BlinkEvent);
}

// ───────────────────────────────────────────────────────────────
// Storage port (driven adapter: domain ↔ NVS / flash)
// ───────────────────────────────────────────────────────────────

/// Persistent key-value storage for parameters and configuration.
///
/// - Keys are namespaced to prevent collisions between subsystems.
/// - Write operations MUST be atomic — no partial writes on power loss.
///   The ESP-IDF NVS API guarantees this natively; in-memory simulation
///   achieves it trivially.
pub trait StoragePort {
    /// Read a value.  Returns the number of bytes written to `buf`.
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Write a value atomically.
    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Delete a key.  Returns `Ok(())` even if the key didn't exist.
    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError>;

    /// Check whether a key exists without reading it.
    fn exists(&self, namespace: &str, key: &str) -> bool;
}

/// Errors from [`StoragePort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Requested key does not exist.
    NotFound,
    /// Storage partition is full.
    Full,
    /// Generic I/O error.
    IoError,
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "key not found"),
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Rate group delegate (decouples the rate group from the event system)
// ───────────────────────────────────────────────────────────────

/// Callback trait that the rate group invokes when a slot fires.
///
/// This decouples the [`RateGroup`](crate::scheduler::RateGroup) from the
/// ISR event queue.  The main loop implements this by forwarding to
/// [`push_event`](crate::events::push_event), but the rate group itself
/// knows nothing about events, queues, or ISRs.
pub trait RateGroupDelegate {
    /// Called when a rate slot fires.
    ///
    /// * `label` — the human-readable label of the slot that fired.
    /// * `kind`  — which sub-rate it belongs to.
    fn on_rate_slot_fired(&mut self, label: &str, kind: RateSlotKind);
}

/// Discriminant passed to [`RateGroupDelegate::on_rate_slot_fired`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSlotKind {
    /// The blink controller's cycle.
    Control,
    /// The telemetry reporting cycle.
    Telemetry,
}
