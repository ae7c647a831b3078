//! Base64 transport for binary and certificate settings.
//!
//! Both directions run in two phases: the first sizes the destination, the
//! second fills it.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::sync::Arc;

use super::alloc_zeroed;
use crate::{SettingError, SettingResult, SettingType};

/// Decode a Base64 wire value. ASCII whitespace is ignored so values wrapped
/// across lines in a configuration document still decode.
///
/// # Errors
///
/// Returns [`SettingError::InvalidValue`] for malformed Base64 and
/// [`SettingError::OutOfResources`] if the buffer cannot be allocated.
pub fn decode(setting_type: SettingType, wire: &str) -> SettingResult<Vec<u8>> {
    let compact: Vec<u8> = wire
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let mut native = alloc_zeroed(base64::decoded_len_estimate(compact.len()))?;
    let written = STANDARD
        .decode_slice(&compact, &mut native)
        .map_err(|err| match err {
            base64::DecodeSliceError::DecodeError(inner) => Arc::new(
                SettingError::invalid_value(setting_type, format!("malformed Base64: {inner}")),
            ),
            base64::DecodeSliceError::OutputSliceTooSmall => {
                Arc::new(SettingError::aborted("Base64 size query underestimated the output"))
            }
        })?;
    native.truncate(written);
    Ok(native)
}

/// Encode native bytes as Base64.
///
/// # Errors
///
/// Returns [`SettingError::Aborted`] if sizing or encoding fails and
/// [`SettingError::OutOfResources`] if the buffer cannot be allocated.
pub fn encode(native: &[u8]) -> SettingResult<String> {
    let size = base64::encoded_len(native.len(), true)
        .ok_or_else(|| Arc::new(SettingError::aborted("Base64 output size overflows")))?;
    let mut wire = alloc_zeroed(size)?;
    let written = STANDARD
        .encode_slice(native, &mut wire)
        .map_err(|err| Arc::new(SettingError::aborted(format!("Base64 encoding failed: {err}"))))?;
    wire.truncate(written);
    String::from_utf8(wire)
        .map_err(|err| Arc::new(SettingError::aborted(format!("Base64 output is not ASCII: {err}"))))
}
