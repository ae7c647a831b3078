//! Validated setting identifiers.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use crate::{SettingError, SettingResult};

/// Longest identifier accepted at registration.
pub const MAX_ID_LEN: usize = 100;

/// A validated setting or group identifier.
///
/// Identifiers are case-sensitive, printable ASCII and never begin with a
/// decimal digit; digit-leading strings are reserved for the legacy numeric
/// identifiers handled by [`crate::LegacyIdTable`].
///
/// # Examples
///
/// ```
/// use setting_manager::SettingId;
/// let id = SettingId::new("Dfci.OnboardCameras.Enable")?;
/// assert_eq!(id.as_str(), "Dfci.OnboardCameras.Enable");
/// assert!(SettingId::new("7").is_err());
/// # Ok::<_, std::sync::Arc<setting_manager::SettingError>>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SettingId(String);

impl SettingId {
    /// Validate `id` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::InvalidId`] if the identifier is empty, longer
    /// than [`MAX_ID_LEN`], contains non-printable characters or starts with a
    /// decimal digit.
    pub fn new(id: impl Into<String>) -> SettingResult<Self> {
        let raw = id.into();
        if let Some(reason) = rejection_reason(&raw) {
            return Err(Arc::new(SettingError::invalid_id(raw, reason)));
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier text.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Returns `true` when `id` starts with an ASCII decimal digit.
#[must_use]
pub fn is_digit_leading(id: &str) -> bool {
    id.as_bytes().first().is_some_and(u8::is_ascii_digit)
}

fn rejection_reason(id: &str) -> Option<&'static str> {
    if id.is_empty() {
        Some("identifier is empty")
    } else if is_digit_leading(id) {
        Some("digit-leading identifiers are reserved for legacy ids")
    } else if id.len() > MAX_ID_LEN {
        Some("identifier is too long")
    } else if !id.bytes().all(|b| b.is_ascii_graphic()) {
        Some("identifier must be printable ASCII without spaces")
    } else {
        None
    }
}

impl fmt::Display for SettingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SettingId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SettingId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SettingId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests panic to surface unexpected failures"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("1Legacy")]
    #[case("9")]
    #[case("Has Space")]
    #[case("Tab\tInside")]
    fn rejects_invalid_identifiers(#[case] raw: &str) {
        let err = SettingId::new(raw).expect_err("identifier should be rejected");
        assert!(matches!(err.as_ref(), SettingError::InvalidId { .. }));
    }

    #[test]
    fn rejects_overlong_identifier() {
        let raw = "A".repeat(MAX_ID_LEN + 1);
        assert!(SettingId::new(raw).is_err());
        assert!(SettingId::new("A".repeat(MAX_ID_LEN)).is_ok());
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let id = SettingId::new("Device.Password.Password").expect("valid id");
        assert!(id == *"Device.Password.Password");
        assert!(id != *"device.password.password");
    }
}
