//! Collaborators consulted by the apply and read pipeline.
//!
//! The manager never decides whether a write is permitted. It decodes the
//! wire value and hands the result to an [`AccessControl`] implementation,
//! which either rejects the request or commits it, usually by calling
//! [`CommitRequest::write_through`].

use std::fmt;

use crate::{SettingFlags, SettingId, SettingProvider, SettingResult, SettingType};

/// Opaque capability proving the caller's permission level.
///
/// The manager forwards the token unchanged and never inspects it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AuthToken(u64);

impl AuthToken {
    /// Wrap a raw token value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw token value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for AuthToken {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// A decoded write awaiting a permission decision.
pub struct CommitRequest<'a> {
    id: &'a SettingId,
    auth_token: AuthToken,
    value: &'a [u8],
    provider: &'a dyn SettingProvider,
}

impl<'a> CommitRequest<'a> {
    pub(crate) fn new(
        provider: &'a dyn SettingProvider,
        auth_token: AuthToken,
        value: &'a [u8],
    ) -> Self {
        Self {
            id: provider.id(),
            auth_token,
            value,
            provider,
        }
    }

    /// Identifier of the target setting.
    #[must_use]
    pub const fn id(&self) -> &'a SettingId {
        self.id
    }

    /// Token supplied with the request.
    #[must_use]
    pub const fn auth_token(&self) -> AuthToken {
        self.auth_token
    }

    /// Type of the target setting.
    #[must_use]
    pub fn setting_type(&self) -> SettingType {
        self.provider.setting_type()
    }

    /// Decoded native value.
    #[must_use]
    pub const fn value(&self) -> &'a [u8] {
        self.value
    }

    /// Size of the native value in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.value.len()
    }

    /// Provider that owns the setting.
    #[must_use]
    pub const fn provider(&self) -> &'a dyn SettingProvider {
        self.provider
    }

    /// Store the value through the provider.
    ///
    /// # Errors
    ///
    /// Returns whatever the provider's `set_value` reports.
    pub fn write_through(&self, flags: &mut SettingFlags) -> SettingResult<()> {
        self.provider.set_value(self.value, flags)
    }
}

impl fmt::Debug for CommitRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommitRequest")
            .field("id", &self.id)
            .field("auth_token", &self.auth_token)
            .field("setting_type", &self.setting_type())
            .field("size", &self.size())
            .finish_non_exhaustive()
    }
}

/// Sole authority over whether a decoded write may be committed.
pub trait AccessControl: Send + Sync {
    /// Decide on `request` and, if permitted, commit it.
    ///
    /// Implementations report side effects by setting bits in `flags` and
    /// must leave bits they do not own untouched.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SettingError::AccessDenied`] when the token does not
    /// permit the write, or the provider's error when the commit fails.
    fn commit(&self, request: CommitRequest<'_>, flags: &mut SettingFlags) -> SettingResult<()>;
}

/// Renders certificates stored in Cert settings for display.
pub trait CertificateRenderer: Send + Sync {
    /// Produce a printable thumbprint for a raw certificate.
    ///
    /// # Errors
    ///
    /// Returns an error when the bytes cannot be parsed as a certificate.
    fn render_thumbprint(&self, certificate: &[u8]) -> SettingResult<String>;
}

/// Commits every request by writing straight through to the provider.
///
/// Useful where permission checks happen elsewhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct PermitAll;

impl AccessControl for PermitAll {
    fn commit(&self, request: CommitRequest<'_>, flags: &mut SettingFlags) -> SettingResult<()> {
        request.write_through(flags)
    }
}
