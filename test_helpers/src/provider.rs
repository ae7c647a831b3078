//! In-memory setting provider with call accounting.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use setting_manager::{
    SettingError, SettingFlags, SettingId, SettingProvider, SettingResult, SettingType,
    fill_buffer,
};

#[derive(Default)]
struct State {
    current: Vec<u8>,
    default: Vec<u8>,
    set_calls: usize,
    reset_calls: usize,
    writes: Vec<Vec<u8>>,
    set_failure: Option<Arc<SettingError>>,
    reset_failure: Option<Arc<SettingError>>,
    read_failure: Option<Arc<SettingError>>,
    reported: SettingFlags,
}

/// Provider that keeps its value in memory.
///
/// The provider is usually handed to a manager as `Arc<dyn SettingProvider>`;
/// tests keep the [`MockHandle`] returned by [`MockProvider::handle`] to
/// inspect calls and inject failures afterwards.
///
/// # Examples
///
/// ```
/// use setting_manager::{SettingProvider, SettingType};
/// use setting_manager_test_helpers::MockProvider;
///
/// let provider = MockProvider::new("Dfci.OnboardAudio.Enable", SettingType::Enable)?
///     .with_current(&[1]);
/// let handle = provider.handle();
/// provider.set_to_default()?;
/// assert_eq!(handle.reset_calls(), 1);
/// # Ok::<_, std::sync::Arc<setting_manager::SettingError>>(())
/// ```
pub struct MockProvider {
    id: SettingId,
    setting_type: SettingType,
    flags: SettingFlags,
    state: Arc<Mutex<State>>,
}

impl MockProvider {
    /// Creates a provider with empty current and default values.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::InvalidId`] for a malformed identifier.
    pub fn new(id: &str, setting_type: SettingType) -> SettingResult<Self> {
        Ok(Self {
            id: SettingId::new(id)?,
            setting_type,
            flags: SettingFlags::EMPTY,
            state: Arc::new(Mutex::new(State::default())),
        })
    }

    /// Sets the capability flags.
    #[must_use]
    pub const fn with_flags(mut self, flags: SettingFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the current native value.
    #[must_use]
    pub fn with_current(self, value: &[u8]) -> Self {
        value.clone_into(&mut self.state.lock().current);
        self
    }

    /// Sets the default native value.
    #[must_use]
    pub fn with_default(self, value: &[u8]) -> Self {
        value.clone_into(&mut self.state.lock().default);
        self
    }

    /// Flags reported on every successful write.
    #[must_use]
    pub fn reporting(self, flags: SettingFlags) -> Self {
        self.state.lock().reported = flags;
        self
    }

    /// Makes every write fail with `error`.
    #[must_use]
    pub fn failing_writes(self, error: SettingError) -> Self {
        self.handle().fail_writes(error);
        self
    }

    /// Shared handle onto the provider's state.
    #[must_use]
    pub fn handle(&self) -> MockHandle {
        MockHandle {
            state: Arc::clone(&self.state),
        }
    }

    /// Boxes the provider for registration.
    #[must_use]
    pub fn shared(self) -> Arc<dyn SettingProvider> {
        Arc::new(self)
    }

    fn read(&self, buffer: &mut [u8], select: fn(&State) -> &[u8]) -> SettingResult<usize> {
        let state = self.state.lock();
        if let Some(err) = &state.read_failure {
            return Err(Arc::clone(err));
        }
        fill_buffer(buffer, select(&state))
    }
}

impl SettingProvider for MockProvider {
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
        self.read(buffer, |state| state.current.as_slice())
    }

    fn default_value(&self, buffer: &mut [u8]) -> SettingResult<usize> {
        self.read(buffer, |state| state.default.as_slice())
    }

    fn set_value(&self, value: &[u8], flags: &mut SettingFlags) -> SettingResult<()> {
        let mut state = self.state.lock();
        state.set_calls += 1;
        state.writes.push(value.to_vec());
        if let Some(err) = &state.set_failure {
            return Err(Arc::clone(err));
        }
        value.clone_into(&mut state.current);
        flags.insert(state.reported);
        Ok(())
    }

    fn set_to_default(&self) -> SettingResult<()> {
        let mut state = self.state.lock();
        state.reset_calls += 1;
        if let Some(err) = &state.reset_failure {
            return Err(Arc::clone(err));
        }
        state.current = state.default.clone();
        Ok(())
    }
}

impl fmt::Debug for MockProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockProvider")
            .field("id", &self.id)
            .field("setting_type", &self.setting_type)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

/// Inspection and fault-injection handle for a [`MockProvider`].
#[derive(Clone)]
pub struct MockHandle {
    state: Arc<Mutex<State>>,
}

impl MockHandle {
    /// Number of `set_value` calls, failed ones included.
    #[must_use]
    pub fn set_calls(&self) -> usize {
        self.state.lock().set_calls
    }

    /// Number of `set_to_default` calls, failed ones included.
    #[must_use]
    pub fn reset_calls(&self) -> usize {
        self.state.lock().reset_calls
    }

    /// Every value passed to `set_value`, in call order.
    #[must_use]
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.state.lock().writes.clone()
    }

    /// Current native value.
    #[must_use]
    pub fn current(&self) -> Vec<u8> {
        self.state.lock().current.clone()
    }

    /// Makes subsequent writes fail with `error`.
    pub fn fail_writes(&self, error: SettingError) {
        self.state.lock().set_failure = Some(Arc::new(error));
    }

    /// Makes subsequent resets fail with `error`.
    pub fn fail_resets(&self, error: SettingError) {
        self.state.lock().reset_failure = Some(Arc::new(error));
    }

    /// Makes subsequent reads fail with `error`.
    pub fn fail_reads(&self, error: SettingError) {
        self.state.lock().read_failure = Some(Arc::new(error));
    }
}

impl fmt::Debug for MockHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MockHandle")
            .field("set_calls", &state.set_calls)
            .field("reset_calls", &state.reset_calls)
            .finish_non_exhaustive()
    }
}
