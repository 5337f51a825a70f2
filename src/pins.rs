//! GPIO pin assignments for the Beacon indicator board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Indicator LED
// ---------------------------------------------------------------------------

/// Digital output driving the indicator LED (active HIGH).
pub const LED_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// User input
// ---------------------------------------------------------------------------

/// BOOT button — active-low momentary switch, internal pull-up.
/// Falling edge fires the button ISR.
pub const BUTTON_GPIO: i32 = 0;
