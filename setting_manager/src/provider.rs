//! The capability interface every setting implements.
//!
//! A provider owns one setting: it reports its identifier, type and flags,
//! answers reads through the two-phase size protocol, and applies writes that
//! the access-control collaborator has already approved.

use std::fmt;
use std::sync::Arc;

use crate::{SettingError, SettingFlags, SettingId, SettingResult, SettingType};

/// Selects which value a read returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// The value currently in effect.
    Current,
    /// The value the setting returns to on reset.
    Default,
}

/// Operations a setting provider must implement.
///
/// The getters follow the two-phase protocol: callers pass a buffer, and when
/// it is too small the provider returns [`SettingError::BufferTooSmall`]
/// carrying the required size. A caller that only wants the size passes an
/// empty slice. On success the getter returns the number of bytes written.
/// [`fill_buffer`] implements the protocol for providers that hold their value
/// in memory.
pub trait SettingProvider: Send + Sync {
    /// Identifier of the setting.
    fn id(&self) -> &SettingId;

    /// Value type of the setting.
    fn setting_type(&self) -> SettingType;

    /// Capability flags, consulted by reset passes.
    fn flags(&self) -> SettingFlags;

    /// Copy the current native value into `buffer`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::BufferTooSmall`] when `buffer` cannot hold the
    /// value, or any error raised while reading the backing store.
    fn current_value(&self, buffer: &mut [u8]) -> SettingResult<usize>;

    /// Copy the default native value into `buffer`.
    ///
    /// # Errors
    ///
    /// As for [`SettingProvider::current_value`].
    fn default_value(&self, buffer: &mut [u8]) -> SettingResult<usize>;

    /// Store a native value. Side effects are reported by setting bits in
    /// `flags`; bits already present must be left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is rejected or cannot be stored.
    fn set_value(&self, value: &[u8], flags: &mut SettingFlags) -> SettingResult<()>;

    /// Restore the default value.
    ///
    /// # Errors
    ///
    /// Returns an error if the default cannot be stored.
    fn set_to_default(&self) -> SettingResult<()>;
}

/// Dispatch a read to the getter selected by `kind`.
pub(crate) fn read_native(
    provider: &dyn SettingProvider,
    kind: ValueKind,
    buffer: &mut [u8],
) -> SettingResult<usize> {
    match kind {
        ValueKind::Current => provider.current_value(buffer),
        ValueKind::Default => provider.default_value(buffer),
    }
}

/// Copy `value` into `buffer` following the two-phase protocol.
///
/// # Errors
///
/// Returns [`SettingError::BufferTooSmall`] when `buffer` is shorter than
/// `value`.
///
/// # Examples
///
/// ```
/// use setting_manager::fill_buffer;
/// let err = fill_buffer(&mut [], b"abc").expect_err("size query");
/// assert_eq!(err.required_size(), Some(3));
///
/// let mut buffer = [0_u8; 4];
/// assert_eq!(fill_buffer(&mut buffer, b"abc")?, 3);
/// # Ok::<_, std::sync::Arc<setting_manager::SettingError>>(())
/// ```
pub fn fill_buffer(buffer: &mut [u8], value: &[u8]) -> SettingResult<usize> {
    let Some(target) = buffer.get_mut(..value.len()) else {
        return Err(Arc::new(SettingError::BufferTooSmall {
            required: value.len(),
        }));
    };
    target.copy_from_slice(value);
    Ok(value.len())
}

type GetFn = Box<dyn Fn(&mut [u8]) -> SettingResult<usize> + Send + Sync>;
type SetFn = Box<dyn Fn(&[u8], &mut SettingFlags) -> SettingResult<()> + Send + Sync>;
type ResetFn = Box<dyn Fn() -> SettingResult<()> + Send + Sync>;

/// Builder assembling a provider from closures.
///
/// Useful for settings whose storage lives elsewhere (a firmware variable, a
/// hardware register) and which do not warrant a dedicated type. All four
/// operations must be supplied; [`ProviderBuilder::build`] reports the first
/// one that is missing.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::{AtomicU8, Ordering};
/// use std::sync::Arc;
/// use setting_manager::{fill_buffer, ProviderBuilder, SettingProvider, SettingType};
///
/// let state = Arc::new(AtomicU8::new(1));
/// let (get, set, reset) = (Arc::clone(&state), Arc::clone(&state), Arc::clone(&state));
/// let provider = ProviderBuilder::new("Dfci.OnboardAudio.Enable", SettingType::Enable)
///     .current_value(move |buf| fill_buffer(buf, &[get.load(Ordering::SeqCst)]))
///     .default_value(|buf| fill_buffer(buf, &[1]))
///     .set_value(move |value, _flags| {
///         set.store(value.first().copied().unwrap_or_default(), Ordering::SeqCst);
///         Ok(())
///     })
///     .set_to_default(move || {
///         reset.store(1, Ordering::SeqCst);
///         Ok(())
///     })
///     .build()?;
/// assert_eq!(provider.setting_type(), SettingType::Enable);
/// # Ok::<_, std::sync::Arc<setting_manager::SettingError>>(())
/// ```
pub struct ProviderBuilder {
    id: String,
    setting_type: SettingType,
    flags: SettingFlags,
    current: Option<GetFn>,
    default: Option<GetFn>,
    set: Option<SetFn>,
    reset: Option<ResetFn>,
}

impl ProviderBuilder {
    /// Start a provider for `id` of type `setting_type`.
    #[must_use]
    pub fn new(id: impl Into<String>, setting_type: SettingType) -> Self {
        Self {
            id: id.into(),
            setting_type,
            flags: SettingFlags::EMPTY,
            current: None,
            default: None,
            set: None,
            reset: None,
        }
    }

    /// Set the capability flags.
    #[must_use]
    pub const fn flags(mut self, flags: SettingFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Supply the current-value getter.
    #[must_use]
    pub fn current_value<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut [u8]) -> SettingResult<usize> + Send + Sync + 'static,
    {
        self.current = Some(Box::new(f));
        self
    }

    /// Supply the default-value getter.
    #[must_use]
    pub fn default_value<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut [u8]) -> SettingResult<usize> + Send + Sync + 'static,
    {
        self.default = Some(Box::new(f));
        self
    }

    /// Supply the setter.
    #[must_use]
    pub fn set_value<F>(mut self, f: F) -> Self
    where
        F: Fn(&[u8], &mut SettingFlags) -> SettingResult<()> + Send + Sync + 'static,
    {
        self.set = Some(Box::new(f));
        self
    }

    /// Supply the reset-to-default operation.
    #[must_use]
    pub fn set_to_default<F>(mut self, f: F) -> Self
    where
        F: Fn() -> SettingResult<()> + Send + Sync + 'static,
    {
        self.reset = Some(Box::new(f));
        self
    }

    /// Validate the identifier and check that every operation is present.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::InvalidId`] for a malformed identifier and
    /// [`SettingError::IncompleteCapability`] naming the first missing
    /// operation.
    pub fn build(self) -> SettingResult<ClosureProvider> {
        let id = SettingId::new(self.id)?;
        let missing = |op: &'static str| {
            Arc::new(SettingError::IncompleteCapability {
                id: id.to_string(),
                missing: op,
            })
        };
        let current = self.current.ok_or_else(|| missing("current_value"))?;
        let default = self.default.ok_or_else(|| missing("default_value"))?;
        let set = self.set.ok_or_else(|| missing("set_value"))?;
        let reset = self.reset.ok_or_else(|| missing("set_to_default"))?;
        Ok(ClosureProvider {
            id,
            setting_type: self.setting_type,
            flags: self.flags,
            current,
            default,
            set,
            reset,
        })
    }
}

/// Provider produced by [`ProviderBuilder`].
pub struct ClosureProvider {
    id: SettingId,
    setting_type: SettingType,
    flags: SettingFlags,
    current: GetFn,
    default: GetFn,
    set: SetFn,
    reset: ResetFn,
}

impl fmt::Debug for ClosureProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureProvider")
            .field("id", &self.id)
            .field("setting_type", &self.setting_type)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl SettingProvider for ClosureProvider {
    fn id(&self) -> &SettingId {
        &self.id
    }

    fn setting_type(&self) -> SettingType {
        self.setting_type
    }

    fn flags(&self) -> SettingFlags {
        self.flags
    }

    fn current_value(&self, buffer: &mut [u8]) -> SettingResult<usize> {
        (self.current)(buffer)
    }

    fn default_value(&self, buffer: &mut [u8]) -> SettingResult<usize> {
        (self.default)(buffer)
    }

    fn set_value(&self, value: &[u8], flags: &mut SettingFlags) -> SettingResult<()> {
        (self.set)(value, flags)
    }

    fn set_to_default(&self) -> SettingResult<()> {
        (self.reset)()
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests panic to surface unexpected failures"
)]
mod tests {
    use super::*;

    fn complete(id: &str) -> ProviderBuilder {
        ProviderBuilder::new(id, SettingType::Enable)
            .current_value(|buf| fill_buffer(buf, &[1]))
            .default_value(|buf| fill_buffer(buf, &[0]))
            .set_value(|_, _| Ok(()))
            .set_to_default(|| Ok(()))
    }

    #[test]
    fn builds_complete_provider() {
        let provider = complete("Dfci.OnboardWpbt.Enable")
            .flags(SettingFlags::NO_PREBOOT_UI)
            .build()
            .expect("complete provider builds");
        assert_eq!(provider.id().as_str(), "Dfci.OnboardWpbt.Enable");
        assert!(provider.flags().contains(SettingFlags::NO_PREBOOT_UI));
        let mut buffer = [0_u8; 1];
        assert_eq!(provider.current_value(&mut buffer).expect("read"), 1);
        assert_eq!(buffer, [1]);
    }

    #[test]
    fn reports_first_missing_operation() {
        let err = ProviderBuilder::new("Dfci.OnboardWpbt.Enable", SettingType::Enable)
            .current_value(|buf| fill_buffer(buf, &[1]))
            .set_to_default(|| Ok(()))
            .build()
            .expect_err("incomplete provider must be rejected");
        match err.as_ref() {
            SettingError::IncompleteCapability { missing, .. } => {
                assert_eq!(*missing, "default_value");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_digit_leading_identifier_before_capabilities() {
        let err = complete("42").build().expect_err("digit-leading id");
        assert!(matches!(err.as_ref(), SettingError::InvalidId { .. }));
    }

    #[test]
    fn fill_buffer_reports_required_size() {
        let err = fill_buffer(&mut [0_u8; 2], b"four").expect_err("too small");
        assert_eq!(err.required_size(), Some(4));
    }
}
