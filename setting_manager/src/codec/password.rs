//! System password settings.
//!
//! A password is written as a hex-encoded store followed by the literal
//! suffix `eb`. Reads never return the store; they only report whether a
//! password is set.

use super::alloc_zeroed;
use super::vocabulary::{PASSWORD_STORE_SUFFIX, SYSTEM_PASSWORD_NOT_SET, SYSTEM_PASSWORD_SET};
use crate::{SettingError, SettingResult, SettingType};
use std::sync::Arc;

/// Shortest accepted wire value: one hex byte plus the suffix.
const MIN_WIRE_LEN: usize = 4;

fn invalid(reason: impl Into<String>) -> Arc<SettingError> {
    Arc::new(SettingError::invalid_value(SettingType::Password, reason))
}

/// Decode a password store into its native bytes.
///
/// # Errors
///
/// Returns [`SettingError::InvalidValue`] when the input is shorter than four
/// characters, has odd length, lacks the `eb` suffix or contains non-hex
/// characters, and [`SettingError::OutOfResources`] if the buffer cannot be
/// allocated.
///
/// # Examples
///
/// ```
/// use setting_manager::codec::password;
/// assert_eq!(password::decode("ABeb")?, vec![0xAB]);
/// assert!(password::decode("ABE").is_err());
/// # Ok::<_, std::sync::Arc<setting_manager::SettingError>>(())
/// ```
pub fn decode(wire: &str) -> SettingResult<Vec<u8>> {
    if wire.len() < MIN_WIRE_LEN || !wire.len().is_multiple_of(2) {
        return Err(invalid(
            "a password store needs an even number of characters, at least four",
        ));
    }
    let split = wire.len() - PASSWORD_STORE_SUFFIX.len();
    let (store, suffix) = wire
        .split_at_checked(split)
        .ok_or_else(|| invalid("password store contains non-ASCII characters"))?;
    if !suffix.eq_ignore_ascii_case(PASSWORD_STORE_SUFFIX) {
        return Err(invalid("end byte 'eb' is missing"));
    }
    let mut native = alloc_zeroed(store.len().div_euclid(2))?;
    hex::decode_to_slice(store, &mut native)
        .map_err(|err| invalid(format!("invalid character in password store: {err}")))?;
    Ok(native)
}

/// Render the presence of a password.
#[must_use]
pub const fn encode(is_set: bool) -> &'static str {
    if is_set {
        SYSTEM_PASSWORD_SET
    } else {
        SYSTEM_PASSWORD_NOT_SET
    }
}
