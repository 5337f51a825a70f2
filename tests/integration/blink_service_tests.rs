//! Integration tests for the controller → ports → adapters pipeline.
//!
//! These run on the host (x86_64) and verify the full chain from an
//! arm command down to the LED port and event sink, without any real
//! hardware.

use crate::mock_hw::{MockLed, MockNvs, RecordingSink};

use beacon::app::commands::{ArmRequest, CommandError};
use beacon::app::events::BlinkEvent;
use beacon::app::ports::{IntervalSource, Level, RateGroupDelegate, RateSlotKind};
use beacon::app::service::{BlinkService, LedState};
use beacon::app::shared::SharedBlinker;
use beacon::params::ParamStore;
use beacon::scheduler::{RateGroup, RateSlot};

fn armed_blinker(sink: &mut RecordingSink) -> SharedBlinker {
    let blinker = SharedBlinker::new(BlinkService::new());
    blinker
        .set_armed(ArmRequest::On.to_wire(), sink)
        .expect("arm request is valid");
    blinker
}

fn params_with_interval(nvs: &mut MockNvs, sink: &mut RecordingSink, ticks: u32) -> ParamStore {
    let params = ParamStore::new();
    params.apply(ticks, nvs, sink).expect("mock storage accepts");
    params
}

// ── Arm → tick → LED chain ───────────────────────────────────

#[test]
fn arm_then_tick_drives_the_led() {
    let mut nvs = MockNvs::new();
    let mut sink = RecordingSink::new();
    let mut led = MockLed::new();
    let params = params_with_interval(&mut nvs, &mut sink, 4);
    let blinker = armed_blinker(&mut sink);

    blinker.on_tick(&params, Some(&mut led), &mut sink);

    assert!(led.is_lit(), "first armed tick turns the LED on");
    assert_eq!(blinker.led_state(), LedState::On);
    assert!(sink
        .events
        .iter()
        .any(|e| matches!(e, BlinkEvent::LedStateChanged(LedState::On))));
    assert!(sink
        .events
        .iter()
        .any(|e| matches!(e, BlinkEvent::TransitionsRecorded(1))));
}

#[test]
fn eight_ticks_at_interval_four_record_four_transitions() {
    let mut nvs = MockNvs::new();
    let mut sink = RecordingSink::new();
    let mut led = MockLed::new();
    let params = params_with_interval(&mut nvs, &mut sink, 4);
    let blinker = armed_blinker(&mut sink);

    for _ in 0..8 {
        blinker.on_tick(&params, Some(&mut led), &mut sink);
    }

    let t = blinker.telemetry(&params);
    assert_eq!(t.transitions, 4);
    assert_eq!(led.levels, vec![Level::High, Level::Low, Level::High, Level::Low]);
}

#[test]
fn disarm_freezes_the_output() {
    let mut nvs = MockNvs::new();
    let mut sink = RecordingSink::new();
    let mut led = MockLed::new();
    let params = params_with_interval(&mut nvs, &mut sink, 4);
    let blinker = armed_blinker(&mut sink);

    blinker.on_tick(&params, Some(&mut led), &mut sink);
    assert!(led.is_lit());

    blinker
        .set_armed(ArmRequest::Off.to_wire(), &mut sink)
        .unwrap();
    let writes_before = led.levels.len();
    for _ in 0..10 {
        blinker.on_tick(&params, Some(&mut led), &mut sink);
    }

    assert_eq!(led.levels.len(), writes_before, "no writes while disarmed");
    assert!(led.is_lit(), "output frozen at its last level");
}

// ── Command validation ────────────────────────────────────────

#[test]
fn invalid_arm_request_yields_failure_and_one_warning() {
    let mut nvs = MockNvs::new();
    let mut sink = RecordingSink::new();
    let mut led = MockLed::new();
    let params = params_with_interval(&mut nvs, &mut sink, 4);
    let blinker = armed_blinker(&mut sink);
    blinker.on_tick(&params, Some(&mut led), &mut sink);

    let before = blinker.telemetry(&params);
    sink.events.clear();

    let result = blinker.set_armed(42, &mut sink);
    assert_eq!(result, Err(CommandError::InvalidArgument(42)));

    let after = blinker.telemetry(&params);
    assert_eq!(after.armed, before.armed);
    assert_eq!(after.led, before.led);
    assert_eq!(after.transitions, before.transitions);
    assert!(
        matches!(sink.events.as_slice(), [BlinkEvent::InvalidArmRequest(42)]),
        "exactly one warning event, nothing else"
    );
}

// ── Parameter flow ────────────────────────────────────────────

#[test]
fn parameter_change_takes_effect_on_the_next_tick() {
    let mut nvs = MockNvs::new();
    let mut sink = RecordingSink::new();
    let mut led = MockLed::new();
    let params = params_with_interval(&mut nvs, &mut sink, 100);
    let blinker = armed_blinker(&mut sink);

    blinker.on_tick(&params, Some(&mut led), &mut sink);
    assert_eq!(blinker.telemetry(&params).transitions, 1);

    // Shrink the interval at runtime; no restart required.
    params.apply(2, &mut nvs, &mut sink).unwrap();
    blinker.on_tick(&params, Some(&mut led), &mut sink);
    assert_eq!(blinker.telemetry(&params).transitions, 2);
    assert_eq!(led.last_level(), Some(Level::Low));
}

#[test]
fn factory_reset_stops_the_duty_cycle() {
    let mut nvs = MockNvs::new();
    let mut sink = RecordingSink::new();
    let mut led = MockLed::new();
    let params = params_with_interval(&mut nvs, &mut sink, 2);
    let blinker = armed_blinker(&mut sink);

    blinker.on_tick(&params, Some(&mut led), &mut sink);
    let transitions = blinker.telemetry(&params).transitions;

    params.reset(&mut nvs).unwrap();
    for _ in 0..10 {
        blinker.on_tick(&params, Some(&mut led), &mut sink);
    }

    assert_eq!(
        blinker.telemetry(&params).transitions,
        transitions,
        "uninitialised interval degrades to the no-toggle cycle"
    );
}

#[test]
fn persisted_interval_survives_a_reload() {
    let mut nvs = MockNvs::new();
    let mut sink = RecordingSink::new();
    let params = params_with_interval(&mut nvs, &mut sink, 25);
    drop(params);

    let reloaded = ParamStore::load(&nvs);
    assert_eq!(reloaded.blink_interval().effective_ticks(), 25);
}

// ── Rate group → controller wiring ───────────────────────────

#[test]
fn rate_group_drives_control_and_telemetry_cadence() {
    struct CountingDelegate {
        control: u32,
        telemetry: u32,
    }

    impl RateGroupDelegate for CountingDelegate {
        fn on_rate_slot_fired(&mut self, _label: &str, kind: RateSlotKind) {
            match kind {
                RateSlotKind::Control => self.control += 1,
                RateSlotKind::Telemetry => self.telemetry += 1,
            }
        }
    }

    let mut group = RateGroup::new();
    group.add(RateSlot {
        label: "control",
        kind: RateSlotKind::Control,
        divider: 1,
        enabled: true,
    });
    group.add(RateSlot {
        label: "telemetry",
        kind: RateSlotKind::Telemetry,
        divider: 5,
        enabled: true,
    });

    let mut delegate = CountingDelegate {
        control: 0,
        telemetry: 0,
    };
    for _ in 0..10 {
        group.tick(&mut delegate);
    }

    assert_eq!(delegate.control, 10);
    assert_eq!(delegate.telemetry, 2);
}
