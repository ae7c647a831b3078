//! Conversion between wire strings and native setting values.
//!
//! Each [`SettingType`] has a deterministic mapping between the printable
//! value carried in a configuration document and the bytes a provider
//! stores. Decoding is strict: input outside a type's vocabulary is rejected
//! rather than coerced. Encoding is total over native values and renders
//! states that can only be reported (the inconsistent sentinel, custom
//! secure boot keys) with their own stable strings.

pub mod binary;
pub mod cert;
pub mod enable;
pub mod password;
pub mod secure_boot;
pub mod string;
pub mod usb_port;
pub mod vocabulary;

pub use enable::{EnableState, INCONSISTENT_SENTINEL};
pub use secure_boot::SecureBootKeys;
pub use usb_port::UsbPortState;

use std::sync::Arc;

use crate::{CertificateRenderer, SettingError, SettingResult, SettingType};

/// Default limit on the size of a decoded wire value, in bytes.
pub const DEFAULT_MAX_WIRE_SIZE: usize = 128 * 1024;

/// Size bounds applied while decoding and encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodecLimits {
    max_wire_size: usize,
}

impl CodecLimits {
    /// Limits with the given maximum wire size.
    #[must_use]
    pub const fn new(max_wire_size: usize) -> Self {
        Self { max_wire_size }
    }

    /// Largest accepted wire value, in bytes.
    #[must_use]
    pub const fn max_wire_size(self) -> usize {
        self.max_wire_size
    }
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WIRE_SIZE)
    }
}

/// Reserve a zero-filled buffer, reporting allocation failure as an error.
pub(crate) fn alloc_zeroed(len: usize) -> SettingResult<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| Arc::new(SettingError::OutOfResources { requested: len }))?;
    buffer.resize(len, 0);
    Ok(buffer)
}

/// Decode a wire value into the native bytes committed for `setting_type`.
///
/// An absent value is only legal for String and Cert settings, where it
/// clears the setting. Every other type rejects it with
/// [`SettingError::Unsupported`].
///
/// # Errors
///
/// Returns [`SettingError::Unsupported`] for a missing value,
/// [`SettingError::InvalidValue`] for malformed or oversize input,
/// [`SettingError::TooLong`] for an oversize string, and
/// [`SettingError::OutOfResources`] if a buffer cannot be allocated.
///
/// # Examples
///
/// ```
/// use setting_manager::codec::{self, CodecLimits};
/// use setting_manager::SettingType;
///
/// let limits = CodecLimits::default();
/// assert_eq!(codec::decode(SettingType::Enable, Some("Enabled"), limits)?, vec![1]);
/// assert_eq!(codec::decode(SettingType::String, None, limits)?, vec![0]);
/// assert!(codec::decode(SettingType::Binary, None, limits).is_err());
/// # Ok::<_, std::sync::Arc<setting_manager::SettingError>>(())
/// ```
pub fn decode(
    setting_type: SettingType,
    wire: Option<&str>,
    limits: CodecLimits,
) -> SettingResult<Vec<u8>> {
    let text = match wire {
        Some(value) => value,
        None if setting_type.accepts_empty() => "",
        None => {
            return Err(Arc::new(SettingError::unsupported(format!(
                "a value is required for {setting_type}"
            ))));
        }
    };
    if setting_type == SettingType::String {
        return string::decode(text, limits);
    }
    if text.len() > limits.max_wire_size() {
        return Err(Arc::new(SettingError::invalid_value(
            setting_type,
            format!(
                "{} bytes exceeds the maximum wire size of {}",
                text.len(),
                limits.max_wire_size()
            ),
        )));
    }
    match setting_type {
        SettingType::Enable => Ok(vec![enable::decode(text)?.to_byte()]),
        SettingType::SecureBootKeyEnum => Ok(vec![secure_boot::decode(text)?.to_byte()]),
        SettingType::Password => password::decode(text),
        SettingType::UsbPortEnum => Ok(vec![usb_port::decode(text)?.to_byte()]),
        SettingType::String => string::decode(text, limits),
        SettingType::Binary | SettingType::Cert => binary::decode(setting_type, text),
    }
}

/// Render native bytes read from a provider as a wire value.
///
/// Cert settings are rendered through `renderer`; every other type ignores
/// it.
///
/// # Errors
///
/// Returns [`SettingError::InvalidValue`] when a fixed-size type receives no
/// bytes, [`SettingError::TooLong`] for an unterminated string, and
/// [`SettingError::Aborted`] if Base64 encoding fails.
pub fn encode(
    setting_type: SettingType,
    native: &[u8],
    renderer: Option<&dyn CertificateRenderer>,
) -> SettingResult<String> {
    let first_byte = || {
        native.first().copied().ok_or_else(|| {
            Arc::new(SettingError::invalid_value(
                setting_type,
                "provider returned no bytes",
            ))
        })
    };
    match setting_type {
        SettingType::Enable => Ok(enable::encode(EnableState::from_byte(first_byte()?)).to_owned()),
        SettingType::SecureBootKeyEnum => Ok(secure_boot::encode_byte(first_byte()?).to_owned()),
        SettingType::Password => Ok(password::encode(first_byte()? != 0).to_owned()),
        SettingType::UsbPortEnum => Ok(usb_port::encode_byte(first_byte()?).to_owned()),
        SettingType::String => string::encode(native),
        SettingType::Binary => binary::encode(native),
        SettingType::Cert => Ok(cert::encode(native, renderer)),
    }
}

#[cfg(test)]
mod tests;
