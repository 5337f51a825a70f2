//! Mock hardware adapters for integration tests.
//!
//! Record every port call so tests can assert on the full history
//! without touching real GPIO registers or NVS flash.

use std::collections::HashMap;

use beacon::app::events::BlinkEvent;
use beacon::app::ports::{EventSink, LedPort, Level, StorageError, StoragePort};

// ── LED port recorder ─────────────────────────────────────────

pub struct MockLed {
    pub levels: Vec<Level>,
}

#[allow(dead_code)]
impl MockLed {
    pub fn new() -> Self {
        Self { levels: Vec::new() }
    }

    pub fn last_level(&self) -> Option<Level> {
        self.levels.last().copied()
    }

    pub fn is_lit(&self) -> bool {
        self.last_level() == Some(Level::High)
    }
}

impl Default for MockLed {
    fn default() -> Self {
        Self::new()
    }
}

impl LedPort for MockLed {
    fn set_level(&mut self, level: Level) {
        self.levels.push(level);
    }
}

// ── MockNvs ───────────────────────────────────────────────────

pub struct MockNvs {
    store: HashMap<String, Vec<u8>>,
}

impl MockNvs {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
        }
    }
}

impl Default for MockNvs {
    fn default() -> Self {
        Self::new()
    }
}

impl StoragePort for MockNvs {
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        let k = format!("{}::{}", namespace, key);
        match self.store.get(&k) {
            Some(v) => {
                let n = v.len().min(buf.len());
                buf[..n].copy_from_slice(&v[..n]);
                Ok(n)
            }
            None => Err(StorageError::NotFound),
        }
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let k = format!("{}::{}", namespace, key);
        self.store.insert(k, data.to_vec());
        Ok(())
    }

    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError> {
        self.store.remove(&format!("{}::{}", namespace, key));
        Ok(())
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        self.store.contains_key(&format!("{}::{}", namespace, key))
    }
}

// ── Recording event sink ──────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<BlinkEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &BlinkEvent) {
        self.events.push(event.clone());
    }
}
