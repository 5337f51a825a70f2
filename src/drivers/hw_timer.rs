//! Hardware timer module using ESP-IDF's esp_timer API.
//!
//! Creates the periodic base rate timer that pushes [`Event::RateTick`]
//! into the lock-free SPSC queue.  On simulation targets the main loop
//! approximates the base rate with thread::sleep instead.
//!
//! Timer callbacks execute in the ESP timer task context (not ISR), so
//! they can safely call push_event() which uses atomics only.

#[cfg(target_os = "espidf")]
use crate::events::{push_event, Event};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
static mut RATE_TIMER: esp_timer_handle_t = core::ptr::null_mut();

#[cfg(target_os = "espidf")]
unsafe extern "C" fn rate_tick_cb(_arg: *mut core::ffi::c_void) {
    push_event(Event::RateTick);
}

/// Start the base rate timer at `period_ms`.
#[cfg(target_os = "espidf")]
pub fn start_base_timer(period_ms: u32) {
    // SAFETY: RATE_TIMER is written here once at boot from the single
    // main-task context before any timer callbacks fire. The callback
    // itself only calls push_event(), which is ISR-safe.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(rate_tick_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: b"rate\0".as_ptr() as *const _,
            skip_unhandled_events: false,
        };
        let ret = esp_timer_create(&args, &raw mut RATE_TIMER);
        if ret != ESP_OK {
            log::error!(
                "hw_timer: rate timer create failed (rc={}) — continuing without ticks",
                ret
            );
            return;
        }
        let ret = esp_timer_start_periodic(RATE_TIMER, u64::from(period_ms) * 1000);
        if ret != ESP_OK {
            log::error!("hw_timer: rate timer start failed (rc={})", ret);
            return;
        }
    }
    info!("hw_timer: base rate timer running at {}ms", period_ms);
}

/// On the host the main loop sleeps and pushes the tick itself.
#[cfg(not(target_os = "espidf"))]
pub fn start_base_timer(period_ms: u32) {
    log::info!("hw_timer(sim): main loop will emulate {}ms base ticks", period_ms);
}
