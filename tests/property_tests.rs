//! Property and fuzz-style tests for the blink controller.
//!
//! Runs on host (x86_64) only — proptest is not available for ESP32
//! targets. On ESP32, these tests are compiled out.

#![cfg(not(target_os = "espidf"))]

use std::cell::Cell;

use beacon::app::events::BlinkEvent;
use beacon::app::ports::{EventSink, IntervalReading, IntervalSource};
use beacon::app::service::{BlinkService, LedState};
use proptest::prelude::*;

// ── Harness ───────────────────────────────────────────────────

struct VarIntervals(Cell<IntervalReading>);

impl IntervalSource for VarIntervals {
    fn blink_interval(&self) -> IntervalReading {
        self.0.get()
    }
}

#[derive(Default)]
struct CountingSink {
    events: usize,
    warnings: usize,
}

impl EventSink for CountingSink {
    fn emit(&mut self, event: &BlinkEvent) {
        self.events += 1;
        if matches!(event, BlinkEvent::InvalidArmRequest(_)) {
            self.warnings += 1;
        }
    }
}

/// One step of an arbitrary controller workload.
#[derive(Debug, Clone)]
enum Op {
    Tick,
    Arm(u8),
    SetInterval(u32),
    DegradeInterval,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        5 => Just(Op::Tick),
        1 => (0u8..=255).prop_map(Op::Arm),
        1 => (0u32..=30).prop_map(Op::SetInterval),
        1 => Just(Op::DegradeInterval),
    ]
}

// ── Invariants under arbitrary workloads ──────────────────────

proptest! {
    /// Whatever the interleaving of ticks, commands, and parameter
    /// changes: at most one toggle per tick, no toggles outside ticks,
    /// the counter stays inside the current interval window, and
    /// out-of-set arm values are the only source of warnings.
    #[test]
    fn controller_invariants_hold(ops in proptest::collection::vec(arb_op(), 1..300)) {
        let source = VarIntervals(Cell::new(IntervalReading::uninit()));
        let mut sink = CountingSink::default();
        let mut svc = BlinkService::new();
        let mut expected_warnings = 0usize;

        for op in ops {
            let before = svc.transitions();
            match op {
                Op::Tick => {
                    let interval = source.blink_interval().effective_ticks();
                    svc.on_tick(&source, None, &mut sink);
                    prop_assert!(svc.transitions() - before <= 1);
                    prop_assert!(
                        u64::from(svc.cycle_count()) < u64::from(interval.max(1))
                    );
                }
                Op::Arm(raw) => {
                    let armed_before = svc.is_armed();
                    let result = svc.set_armed(raw, &mut sink);
                    if raw > 1 {
                        expected_warnings += 1;
                        prop_assert!(result.is_err());
                        prop_assert_eq!(svc.is_armed(), armed_before);
                    } else {
                        prop_assert!(result.is_ok());
                        prop_assert_eq!(svc.cycle_count(), 0);
                    }
                    prop_assert_eq!(svc.transitions(), before, "commands never toggle");
                }
                Op::SetInterval(ticks) => {
                    source.0.set(IntervalReading::valid(ticks));
                }
                Op::DegradeInterval => {
                    source.0.set(IntervalReading::invalid());
                }
            }
        }

        prop_assert_eq!(sink.warnings, expected_warnings);
    }

    /// A disarmed controller is inert: led state and transition count
    /// are bit-identical before and after any tick storm.
    #[test]
    fn disarmed_controller_is_inert(
        interval in 0u32..=50,
        ticks in 1usize..200,
    ) {
        let source = VarIntervals(Cell::new(IntervalReading::valid(interval)));
        let mut sink = CountingSink::default();
        let mut svc = BlinkService::new();

        for _ in 0..ticks {
            svc.on_tick(&source, None, &mut sink);
        }

        prop_assert_eq!(svc.led_state(), LedState::Off);
        prop_assert_eq!(svc.transitions(), 0);
        prop_assert_eq!(sink.events, 0);
    }

    /// Blinking is periodic: with a fixed interval n >= 2, any two
    /// windows of n consecutive ticks contain the same number of
    /// toggles (2) once the cycle has started.
    #[test]
    fn steady_state_is_periodic(interval in 2u32..=25, windows in 1u32..=5) {
        let source = VarIntervals(Cell::new(IntervalReading::valid(interval)));
        let mut sink = CountingSink::default();
        let mut svc = BlinkService::new();
        svc.set_armed(1, &mut sink).unwrap();

        let mut per_window = Vec::new();
        for _ in 0..windows {
            let before = svc.transitions();
            for _ in 0..interval {
                svc.on_tick(&source, None, &mut sink);
            }
            per_window.push(svc.transitions() - before);
        }

        prop_assert!(per_window.iter().all(|&w| w == 2));
    }
}
