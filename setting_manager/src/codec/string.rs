//! Bounded string settings.
//!
//! The native form is the string bytes followed by a NUL terminator; the
//! terminator counts towards the committed size.

use super::{CodecLimits, alloc_zeroed};
use crate::{SettingError, SettingResult, SettingType};
use std::sync::Arc;

/// Decode a string wire value. An embedded NUL ends the string.
///
/// # Errors
///
/// Returns [`SettingError::TooLong`] when no terminator occurs within the
/// maximum wire size.
pub fn decode(wire: &str, limits: CodecLimits) -> SettingResult<Vec<u8>> {
    let bytes = wire.as_bytes();
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    if end > limits.max_wire_size() {
        return Err(Arc::new(SettingError::TooLong {
            limit: limits.max_wire_size(),
        }));
    }
    let text = bytes.get(..end).unwrap_or_default();
    let mut native = alloc_zeroed(end + 1)?;
    if let Some(target) = native.get_mut(..end) {
        target.copy_from_slice(text);
    }
    Ok(native)
}

/// Render a native string value.
///
/// # Errors
///
/// Returns [`SettingError::TooLong`] when `native` holds no terminator and
/// [`SettingError::InvalidValue`] when the text is not UTF-8.
pub fn encode(native: &[u8]) -> SettingResult<String> {
    let end = native
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| Arc::new(SettingError::TooLong {
            limit: native.len(),
        }))?;
    let text = native.get(..end).unwrap_or_default();
    String::from_utf8(text.to_vec()).map_err(|err| {
        Arc::new(SettingError::invalid_value(
            SettingType::String,
            format!("stored string is not UTF-8: {err}"),
        ))
    })
}
