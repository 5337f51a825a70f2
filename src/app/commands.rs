//! Inbound commands to the blink controller.
//!
//! These represent actions requested by the outside world (button,
//! serial, future RPC) that the
//! [`BlinkService`](super::service::BlinkService) interprets and acts
//! upon.  Command payloads arrive as raw wire values; decoding failures
//! are reported to the caller, never panicked on.

use core::fmt;

/// Recognised arm request values.  Everything else is rejected with
/// [`CommandError::InvalidArgument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ArmRequest {
    /// Stop the duty cycle; the output freezes at its last level.
    Off = 0,
    /// Start (or restart) the duty cycle from a fresh phase.
    On = 1,
}

impl ArmRequest {
    /// Decode a raw wire value.  Returns `None` outside `{0, 1}`.
    pub const fn from_wire(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Off),
            1 => Some(Self::On),
            _ => None,
        }
    }

    /// The wire encoding of this request.
    pub const fn to_wire(self) -> u8 {
        self as u8
    }

    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

/// Errors from command handling.  Each command call yields exactly one
/// result: `Ok(())` or one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// The arm request value was outside the recognised set.
    /// Carries the offending raw value for the warning event.
    InvalidArgument(u8),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(raw) => write!(f, "invalid arm request value: {raw}"),
        }
    }
}
