//! USB port state settings.

use super::enable::INCONSISTENT_SENTINEL;
use super::vocabulary::{
    INCONSISTENT, UNSUPPORTED_VALUE, USB_PORT_AUTHENTICATED, USB_PORT_DATA_DISABLED,
    USB_PORT_ENABLED, USB_PORT_HW_DISABLED,
};
use crate::{SettingError, SettingResult, SettingType};
use std::sync::Arc;

/// Native USB port state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UsbPortState {
    /// Port disabled in hardware.
    HwDisabled,
    /// Port fully enabled.
    Enabled,
    /// Power only; data lines disabled.
    DataDisabled,
    /// Only authenticated devices may connect.
    Authenticated,
    /// Several ports behind one setting disagree.
    Inconsistent,
}

impl UsbPortState {
    /// Interpret a native byte.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::HwDisabled),
            1 => Some(Self::Enabled),
            2 => Some(Self::DataDisabled),
            3 => Some(Self::Authenticated),
            INCONSISTENT_SENTINEL => Some(Self::Inconsistent),
            _ => None,
        }
    }

    /// Native byte for this state.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        match self {
            Self::HwDisabled => 0,
            Self::Enabled => 1,
            Self::DataDisabled => 2,
            Self::Authenticated => 3,
            Self::Inconsistent => INCONSISTENT_SENTINEL,
        }
    }
}

/// Parse a USB port wire value.
///
/// # Errors
///
/// Returns [`SettingError::InvalidValue`] for `Inconsistent` and for anything
/// outside the four port states.
pub fn decode(wire: &str) -> SettingResult<UsbPortState> {
    match wire {
        USB_PORT_ENABLED => Ok(UsbPortState::Enabled),
        USB_PORT_HW_DISABLED => Ok(UsbPortState::HwDisabled),
        USB_PORT_DATA_DISABLED => Ok(UsbPortState::DataDisabled),
        USB_PORT_AUTHENTICATED => Ok(UsbPortState::Authenticated),
        other => Err(Arc::new(SettingError::invalid_value(
            SettingType::UsbPortEnum,
            format!("'{other}' is not a USB port state"),
        ))),
    }
}

/// Render a USB port state.
#[must_use]
pub const fn encode(state: UsbPortState) -> &'static str {
    match state {
        UsbPortState::HwDisabled => USB_PORT_HW_DISABLED,
        UsbPortState::Enabled => USB_PORT_ENABLED,
        UsbPortState::DataDisabled => USB_PORT_DATA_DISABLED,
        UsbPortState::Authenticated => USB_PORT_AUTHENTICATED,
        UsbPortState::Inconsistent => INCONSISTENT,
    }
}

/// Render a raw native byte; unknown bytes yield `UnsupportedValue`.
#[must_use]
pub const fn encode_byte(byte: u8) -> &'static str {
    match UsbPortState::from_byte(byte) {
        Some(state) => encode(state),
        None => UNSUPPORTED_VALUE,
    }
}
