//! The closed set of setting value types.

use std::fmt;

/// Type tag of a setting provider.
///
/// A provider keeps the same type for its whole lifetime; the tag selects the
/// codec used for its wire values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SettingType {
    /// Boolean rendered as `Enabled` / `Disabled`.
    Enable,
    /// Secure boot key policy.
    SecureBootKeyEnum,
    /// System password; written as a hex store, read as a presence flag.
    Password,
    /// USB port state.
    UsbPortEnum,
    /// Bounded ASCII string.
    String,
    /// Raw bytes carried as Base64.
    Binary,
    /// Certificate bytes; read back as a thumbprint.
    Cert,
}

impl SettingType {
    /// Every type, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Enable,
        Self::SecureBootKeyEnum,
        Self::Password,
        Self::UsbPortEnum,
        Self::String,
        Self::Binary,
        Self::Cert,
    ];

    /// Diagnostic name used in logs and provider dumps.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Enable => "ENABLE/DISABLE TYPE",
            Self::SecureBootKeyEnum => "SECURE BOOT KEY ENUM TYPE",
            Self::Password => "PASSWORD TYPE",
            Self::UsbPortEnum => "USB PORT STATE TYPE",
            Self::String => "STRING TYPE",
            Self::Binary => "BINARY TYPE",
            Self::Cert => "CERT TYPE",
        }
    }

    /// Whether an absent wire value means "clear the setting".
    #[must_use]
    pub const fn accepts_empty(self) -> bool {
        matches!(self, Self::String | Self::Cert)
    }

    /// Whether reads must use the two-phase size query.
    #[must_use]
    pub const fn is_variable_length(self) -> bool {
        matches!(self, Self::String | Self::Binary | Self::Cert)
    }
}

impl fmt::Display for SettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
