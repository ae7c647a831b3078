//! Secure boot key policy settings.

use super::vocabulary::{
    SECURE_BOOT_CUSTOM, SECURE_BOOT_MS_ONLY, SECURE_BOOT_MS_PLUS_3RD_PARTY, SECURE_BOOT_NONE,
};
use crate::{SettingError, SettingResult, SettingType};
use std::sync::Arc;

/// Native secure boot key selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum SecureBootKeys {
    /// Microsoft keys only.
    MsOnly = 0,
    /// Microsoft plus third-party keys.
    MsPlus3rdParty = 1,
    /// Secure boot keys removed.
    None = 2,
    /// Keys provisioned by the platform; only ever reported, never written.
    Custom = 3,
}

impl SecureBootKeys {
    /// Interpret a native byte.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::MsOnly),
            1 => Some(Self::MsPlus3rdParty),
            2 => Some(Self::None),
            3 => Some(Self::Custom),
            _ => None,
        }
    }

    /// Native byte for this selection.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        self as u8
    }
}

/// Parse a secure boot key wire value.
///
/// # Errors
///
/// Returns [`SettingError::InvalidValue`] for `Custom` and for anything
/// outside the vocabulary.
pub fn decode(wire: &str) -> SettingResult<SecureBootKeys> {
    match wire {
        SECURE_BOOT_MS_ONLY => Ok(SecureBootKeys::MsOnly),
        SECURE_BOOT_MS_PLUS_3RD_PARTY => Ok(SecureBootKeys::MsPlus3rdParty),
        SECURE_BOOT_NONE => Ok(SecureBootKeys::None),
        other => Err(Arc::new(SettingError::invalid_value(
            SettingType::SecureBootKeyEnum,
            format!("'{other}' is not a settable secure boot key selection"),
        ))),
    }
}

/// Render a secure boot key selection.
#[must_use]
pub const fn encode(keys: SecureBootKeys) -> &'static str {
    match keys {
        SecureBootKeys::MsOnly => SECURE_BOOT_MS_ONLY,
        SecureBootKeys::MsPlus3rdParty => SECURE_BOOT_MS_PLUS_3RD_PARTY,
        SecureBootKeys::None => SECURE_BOOT_NONE,
        SecureBootKeys::Custom => SECURE_BOOT_CUSTOM,
    }
}

/// Render a raw native byte; bytes outside the enum read as `None`.
#[must_use]
pub const fn encode_byte(byte: u8) -> &'static str {
    match SecureBootKeys::from_byte(byte) {
        Some(keys) => encode(keys),
        Option::None => SECURE_BOOT_NONE,
    }
}
