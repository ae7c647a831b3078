//! Wire strings exchanged with external configuration tooling.
//!
//! Tooling parses these exact strings out of XML configuration documents;
//! changing any of them breaks the protocol.

/// Enable type, true.
pub const ENABLED: &str = "Enabled";
/// Enable type, false.
pub const DISABLED: &str = "Disabled";

/// Secure boot keys: Microsoft keys only.
pub const SECURE_BOOT_MS_ONLY: &str = "MsOnly";
/// Secure boot keys: Microsoft and third-party keys.
pub const SECURE_BOOT_MS_PLUS_3RD_PARTY: &str = "MsPlus3rdParty";
/// Secure boot keys: no keys.
pub const SECURE_BOOT_NONE: &str = "None";
/// Secure boot keys: platform-provisioned custom keys. Read-only.
pub const SECURE_BOOT_CUSTOM: &str = "Custom";

/// Password type, a password is set.
pub const SYSTEM_PASSWORD_SET: &str = "System Password Set";
/// Password type, no password is set.
pub const SYSTEM_PASSWORD_NOT_SET: &str = "No System Password";
/// Case-insensitive suffix terminating a password store.
pub const PASSWORD_STORE_SUFFIX: &str = "eb";

/// USB port fully enabled.
pub const USB_PORT_ENABLED: &str = "UsbPortEnabled";
/// USB port disabled in hardware.
pub const USB_PORT_HW_DISABLED: &str = "UsbPortHwDisabled";
/// USB port with data lines disabled.
pub const USB_PORT_DATA_DISABLED: &str = "UsbPortDataDisabled";
/// USB port limited to authenticated devices.
pub const USB_PORT_AUTHENTICATED: &str = "UsbPortAuthenticated";

/// State that no single value can represent.
pub const INCONSISTENT: &str = "Inconsistent";
/// Placeholder for a value that could not be read.
pub const UNKNOWN: &str = "Unknown";
/// Native value outside the vocabulary of its type.
pub const UNSUPPORTED_VALUE: &str = "UnsupportedValue";
/// Certificate whose thumbprint cannot be rendered.
pub const CERT_NOT_AVAILABLE: &str = "No Cert information available";
