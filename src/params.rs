//! Runtime parameter store.
//!
//! Owns the BLINK_INTERVAL parameter: the number of base ticks per full
//! on/off cycle of the indicator.  The live value sits behind the same
//! `critical-section` mutex discipline as the controller — the command
//! context applies updates while the tick context reads fresh on every
//! cycle, so a change takes effect on the next tick without a restart.
//!
//! Persistence is a postcard blob in NVS.  Every read carries a
//! validity tag: `Uninit` until a value is first applied, `Invalid`
//! when a stored blob fails to decode.  The controller degrades either
//! to the "no toggling" duty cycle; neither is an error here.

use core::cell::Cell;
use core::fmt;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use log::{info, warn};

use crate::app::events::BlinkEvent;
use crate::app::ports::{EventSink, IntervalReading, IntervalSource, StoragePort};

pub const PARAM_NAMESPACE: &str = "beacon";
pub const BLINK_INTERVAL_KEY: &str = "blink_iv";

/// Errors from parameter operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamError {
    /// The parameter has never been set.
    Uninit,
    /// The stored blob failed to decode.
    Invalid,
    /// The live value was applied but could not be persisted.
    StorageFailed,
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninit => write!(f, "parameter not initialised"),
            Self::Invalid => write!(f, "stored parameter invalid"),
            Self::StorageFailed => write!(f, "parameter persistence failed"),
        }
    }
}

/// The parameter store.  One instance, owned by the topology, shared by
/// reference with whoever needs interval reads.
pub struct ParamStore {
    interval: Mutex<CriticalSectionRawMutex, Cell<IntervalReading>>,
}

impl ParamStore {
    /// A store with no value yet — reads report `Uninit`.
    pub const fn new() -> Self {
        Self {
            interval: Mutex::new(Cell::new(IntervalReading::uninit())),
        }
    }

    /// Build a store from whatever is persisted.  A missing key reports
    /// `Uninit`, a corrupt blob `Invalid`; both leave the controller in
    /// the degenerate no-blink cycle until a value is applied.
    pub fn load(storage: &impl StoragePort) -> Self {
        let store = Self::new();
        let mut buf = [0u8; 8];
        match storage.read(PARAM_NAMESPACE, BLINK_INTERVAL_KEY, &mut buf) {
            Ok(n) => match postcard::from_bytes::<u32>(&buf[..n]) {
                Ok(ticks) => {
                    info!("params: blink interval {} ticks (persisted)", ticks);
                    store.set_reading(IntervalReading::valid(ticks));
                }
                Err(_) => {
                    warn!("params: stored blink interval corrupt");
                    store.set_reading(IntervalReading::invalid());
                }
            },
            Err(_) => {
                info!("params: no stored blink interval");
            }
        }
        store
    }

    /// Validate, apply, and persist a new blink interval.
    ///
    /// The live value always takes effect (read back by the next tick);
    /// the applied-interval event fires exactly once per call.  A
    /// persistence failure is reported but does not roll back the live
    /// value — the device keeps blinking at the requested rate and
    /// reverts on reboot.
    pub fn apply(
        &self,
        ticks: u32,
        storage: &mut impl StoragePort,
        sink: &mut impl EventSink,
    ) -> Result<(), ParamError> {
        self.set_reading(IntervalReading::valid(ticks));
        sink.emit(&BlinkEvent::BlinkIntervalChanged(ticks));

        let bytes = postcard::to_allocvec(&ticks).map_err(|_| ParamError::StorageFailed)?;
        match storage.write(PARAM_NAMESPACE, BLINK_INTERVAL_KEY, &bytes) {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("params: persist failed ({}), value applied volatile", e);
                Err(ParamError::StorageFailed)
            }
        }
    }

    /// Factory reset: delete the persisted value and return the live
    /// reading to `Uninit` (the indicator goes dark on the next tick).
    pub fn reset(&self, storage: &mut impl StoragePort) -> Result<(), ParamError> {
        self.set_reading(IntervalReading::uninit());
        storage
            .delete(PARAM_NAMESPACE, BLINK_INTERVAL_KEY)
            .map_err(|_| ParamError::StorageFailed)
    }

    fn set_reading(&self, reading: IntervalReading) {
        self.interval.lock(|cell| cell.set(reading));
    }
}

impl IntervalSource for ParamStore {
    fn blink_interval(&self) -> IntervalReading {
        self.interval.lock(Cell::get)
    }
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::new()
    }
}
