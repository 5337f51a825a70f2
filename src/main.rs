//! Beacon Firmware — Main Entry Point
//!
//! Hexagonal architecture with event-driven execution.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter    LogEventSink     NvsAdapter    UptimeClock │
//! │  (LedPort)          (EventSink)      (StoragePort) (time)      │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │          SharedBlinker (duty-cycle controller)         │    │
//! │  │          ParamStore (BLINK_INTERVAL)                   │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  RateGroup (delegate-driven) · ButtonDriver (arm/disarm)       │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod config;
mod events;
mod pins;
mod scheduler;

pub mod app;
mod adapters;
mod drivers;
mod esp_link_shims;
mod params;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{info, warn};

use adapters::hardware::HardwareAdapter;
use adapters::log_sink::LogEventSink;
use adapters::nvs::NvsAdapter;
use adapters::time::UptimeClock;
use app::commands::ArmRequest;
use app::events::BlinkEvent;
use app::ports::{EventSink, RateGroupDelegate, RateSlotKind};
use app::service::BlinkService;
use app::shared::SharedBlinker;
use config::SystemConfig;
use drivers::button::{ButtonDriver, ButtonEvent};
use drivers::led::IndicatorLed;
use events::{push_event, Event};
use params::ParamStore;
use scheduler::{RateGroup, RateSlot};

// ── Rate group delegate ───────────────────────────────────────
//
// Bridges the rate group (which knows nothing about the event system)
// to the ISR event queue.  This is the hexagonal adapter pattern: the
// rate group calls `on_rate_slot_fired`, and this impl translates that
// into the matching event pushed to the lock-free queue.

struct EventQueueDelegate;

impl RateGroupDelegate for EventQueueDelegate {
    fn on_rate_slot_fired(&mut self, _label: &str, kind: RateSlotKind) {
        match kind {
            RateSlotKind::Control => {
                push_event(Event::ControlTick);
            }
            RateSlotKind::Telemetry => {
                push_event(Event::TelemetryTick);
            }
        }
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Beacon v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    if let Err(e) = drivers::hw_init::init_isr_service() {
        log::error!("ISR service init failed: {} — continuing without button", e);
    }
    let watchdog = drivers::watchdog::Watchdog::new();

    // ── 3. Load config and parameters from NVS (or defaults) ──
    let mut nvs = match NvsAdapter::new() {
        Ok(n) => n,
        Err(e) => {
            warn!("NVS init failed ({}), running with defaults and no persistence", e);
            // Continue without NVS — nothing is persisted this session.
            // On next reboot, NVS should self-heal.
            NvsAdapter::default()
        }
    };
    let config = SystemConfig::from_storage(&nvs);
    info!(
        "Config: interval={}t loop={}ms telemetry={}s arm_on_boot={}",
        config.blink_interval_ticks,
        config.control_loop_interval_ms,
        config.telemetry_interval_secs,
        config.arm_on_boot,
    );

    let mut log_sink = LogEventSink::new();

    let params = ParamStore::load(&nvs);
    if params.blink_interval().effective_ticks() == 0
        && !nvs.exists(params::PARAM_NAMESPACE, params::BLINK_INTERVAL_KEY)
    {
        // First boot: seed the parameter from the configured default.
        if let Err(e) = params.apply(config.blink_interval_ticks, &mut nvs, &mut log_sink) {
            warn!("Param seed not persisted ({}), continuing volatile", e);
        }
    }

    // ── 4. Construct adapters and the controller ──────────────
    let mut hw = HardwareAdapter::new(IndicatorLed::new(pins::LED_GPIO));
    let blinker = SharedBlinker::new(BlinkService::new());
    log_sink.emit(&BlinkEvent::Started(blinker.led_state()));

    let mut rate_group = RateGroup::new();
    rate_group.add(RateSlot {
        label: "control",
        kind: RateSlotKind::Control,
        divider: 1,
        enabled: true,
    });
    rate_group.add(RateSlot {
        label: "telemetry",
        kind: RateSlotKind::Telemetry,
        divider: config.telemetry_divider_ticks(),
        enabled: true,
    });
    let mut rate_delegate = EventQueueDelegate;

    // ── 5. Button + clock ─────────────────────────────────────
    let mut button = ButtonDriver::new(pins::BUTTON_GPIO);
    let clock = UptimeClock::new();

    // ── 6. Arm via the command path ───────────────────────────
    if config.arm_on_boot
        && blinker
            .set_armed(ArmRequest::On.to_wire(), &mut log_sink)
            .is_err()
    {
        warn!("Boot arm request rejected");
    }

    // ── 7. Start the base rate timer ──────────────────────────
    drivers::hw_timer::start_base_timer(config.control_loop_interval_ms);

    info!("System ready. Entering event loop.");

    // ── 8. Event loop ─────────────────────────────────────────
    loop {
        // Simulate timer interrupts via sleep on non-espidf targets.
        // On real hardware, the CPU waits for the esp_timer callback to
        // push the next base tick.
        #[cfg(not(target_os = "espidf"))]
        {
            std::thread::sleep(std::time::Duration::from_millis(u64::from(
                config.control_loop_interval_ms,
            )));
            push_event(Event::RateTick);
        }

        // Yield to FreeRTOS between drains; esp_timer callbacks fill the
        // queue independently of this task.
        #[cfg(target_os = "espidf")]
        std::thread::sleep(std::time::Duration::from_millis(10));

        // Process all pending events.
        events::drain_events(|event| match event {
            Event::RateTick => {
                rate_group.tick(&mut rate_delegate);
            }

            Event::ControlTick => {
                blinker.on_tick(&params, Some(&mut hw), &mut log_sink);
            }

            Event::TelemetryTick => {
                let t = blinker.telemetry(&params);
                log_sink.emit(&BlinkEvent::Telemetry(t));
            }

            Event::ButtonShortPress => {
                // Toggle the duty cycle through the validated command path.
                let request = if blinker.is_armed() {
                    ArmRequest::Off
                } else {
                    ArmRequest::On
                };
                info!("Button: short press → blinking {:?}", request);
                if blinker.set_armed(request.to_wire(), &mut log_sink).is_err() {
                    warn!("Button arm request rejected");
                }
            }

            Event::ButtonLongPress => {
                info!("Button: long press → factory reset blink parameter");
                if let Err(e) = params.reset(&mut nvs) {
                    warn!("Parameter reset failed: {}", e);
                }
            }
        });

        // Button gesture detection (runs outside drain_events since it
        // uses its own atomic).
        if let Some(gesture) = button.tick(clock.uptime_ms()) {
            match gesture {
                ButtonEvent::ShortPress => {
                    push_event(Event::ButtonShortPress);
                }
                ButtonEvent::LongPress => {
                    push_event(Event::ButtonLongPress);
                }
            }
        }

        // Feed watchdog on every iteration.
        watchdog.feed();
    }
}
