//! Enable/Disable settings.

use super::vocabulary::{DISABLED, ENABLED, INCONSISTENT};
use crate::{SettingError, SettingResult, SettingType};
use std::sync::Arc;

/// Native byte meaning "no single value represents the current state".
pub const INCONSISTENT_SENTINEL: u8 = 0xFE;

/// Native state of an Enable setting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnableState {
    /// Feature off.
    Disabled,
    /// Feature on.
    Enabled,
    /// Backing state diverges, e.g. across several identical devices.
    Inconsistent,
}

impl EnableState {
    /// Interpret a native byte. Any non-zero byte other than the sentinel is
    /// treated as enabled.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            0 => Self::Disabled,
            INCONSISTENT_SENTINEL => Self::Inconsistent,
            _ => Self::Enabled,
        }
    }

    /// Native byte for this state.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        match self {
            Self::Disabled => 0,
            Self::Enabled => 1,
            Self::Inconsistent => INCONSISTENT_SENTINEL,
        }
    }
}

impl From<bool> for EnableState {
    fn from(value: bool) -> Self {
        if value { Self::Enabled } else { Self::Disabled }
    }
}

/// Parse an Enable wire value. `Inconsistent` is never accepted.
///
/// # Errors
///
/// Returns [`SettingError::InvalidValue`] for anything other than `Enabled`
/// or `Disabled`.
pub fn decode(wire: &str) -> SettingResult<EnableState> {
    match wire {
        ENABLED => Ok(EnableState::Enabled),
        DISABLED => Ok(EnableState::Disabled),
        other => Err(Arc::new(SettingError::invalid_value(
            SettingType::Enable,
            format!("'{other}' is not {ENABLED} or {DISABLED}"),
        ))),
    }
}

/// Render an Enable state.
#[must_use]
pub const fn encode(state: EnableState) -> &'static str {
    match state {
        EnableState::Enabled => ENABLED,
        EnableState::Disabled => DISABLED,
        EnableState::Inconsistent => INCONSISTENT,
    }
}
