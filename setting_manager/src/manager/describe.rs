//! Diagnostic snapshot of a registered provider.

use std::fmt;

use crate::codec::vocabulary::UNKNOWN;
use crate::registry::ProviderRecord;
use crate::{SettingFlags, SettingId, SettingType};

/// A provider's metadata with its current and default wire values.
///
/// Values that could not be read or rendered are `None` and display as
/// `Unknown`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderDescription {
    id: SettingId,
    setting_type: SettingType,
    flags: SettingFlags,
    current: Option<String>,
    default: Option<String>,
}

impl ProviderDescription {
    pub(super) fn new(
        record: &ProviderRecord,
        current: Option<String>,
        default: Option<String>,
    ) -> Self {
        Self {
            id: record.id().clone(),
            setting_type: record.setting_type(),
            flags: record.flags(),
            current,
            default,
        }
    }

    /// Identifier of the provider.
    #[must_use]
    pub const fn id(&self) -> &SettingId {
        &self.id
    }

    /// Type of the provider.
    #[must_use]
    pub const fn setting_type(&self) -> SettingType {
        self.setting_type
    }

    /// Flags recorded at registration.
    #[must_use]
    pub const fn flags(&self) -> SettingFlags {
        self.flags
    }

    /// Current value as a wire string.
    #[must_use]
    pub fn current_value(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Default value as a wire string.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }
}

impl fmt::Display for ProviderDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Id:            {}", self.id)?;
        writeln!(f, "Type:          {}", self.setting_type)?;
        writeln!(f, "Flags:         {:#x}", self.flags)?;
        writeln!(f, "Current Value: {}", self.current_value().unwrap_or(UNKNOWN))?;
        write!(f, "Default Value: {}", self.default_value().unwrap_or(UNKNOWN))
    }
}
