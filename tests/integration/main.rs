//! Host-side integration test harness.
//!
//! Mirrors production wiring with mock adapters in place of real
//! peripherals; no ESP-IDF required.

mod blink_service_tests;
mod mock_hw;
mod param_tests;
