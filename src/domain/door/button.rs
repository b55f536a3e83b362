//! Interpretation of the actuator's return code.

use std::fmt;

/// What the device reported after a button press request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonPressOutcome {
    /// Relay fired (return value 1).
    Pressed,
    /// Relay was still active from an earlier press (return value 0).
    AlreadyActive,
    /// Any other return value.
    Rejected(i32),
}

impl ButtonPressOutcome {
    pub fn from_return_value(value: i32) -> Self {
        match value {
            1 => ButtonPressOutcome::Pressed,
            0 => ButtonPressOutcome::AlreadyActive,
            other => ButtonPressOutcome::Rejected(other),
        }
    }
}

impl fmt::Display for ButtonPressOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonPressOutcome::Pressed => write!(f, "pressed"),
            ButtonPressOutcome::AlreadyActive => write!(f, "already_active"),
            ButtonPressOutcome::Rejected(code) => write!(f, "rejected({})", code),
        }
    }
}
