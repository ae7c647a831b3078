//! Access-control double that records every decision.

use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::Mutex;
use setting_manager::{
    AccessControl, AuthToken, CommitRequest, SettingError, SettingFlags, SettingId, SettingResult,
    SettingType,
};

/// One commit seen by [`RecordingAccess`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitRecord {
    /// Target setting.
    pub id: SettingId,
    /// Token supplied with the request.
    pub token: AuthToken,
    /// Type of the target setting.
    pub setting_type: SettingType,
    /// Decoded native value.
    pub value: Vec<u8>,
    /// Whether the commit was permitted.
    pub permitted: bool,
}

/// Permits writes unless the setting is denied or the token is wrong, and
/// writes permitted values through to the provider.
#[derive(Debug, Default)]
pub struct RecordingAccess {
    denied: BTreeSet<String>,
    required_token: Option<AuthToken>,
    commits: Mutex<Vec<CommitRecord>>,
}

impl RecordingAccess {
    /// Creates a gate that permits everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuses writes to `id`.
    #[must_use]
    pub fn deny(mut self, id: &str) -> Self {
        self.denied.insert(id.to_owned());
        self
    }

    /// Refuses writes carrying any token other than `token`.
    #[must_use]
    pub const fn require_token(mut self, token: AuthToken) -> Self {
        self.required_token = Some(token);
        self
    }

    /// Wraps the gate for a manager while keeping a handle for assertions.
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Every commit in arrival order.
    #[must_use]
    pub fn commits(&self) -> Vec<CommitRecord> {
        self.commits.lock().clone()
    }

    /// Identifiers of permitted commits in arrival order.
    #[must_use]
    pub fn permitted_ids(&self) -> Vec<String> {
        self.commits
            .lock()
            .iter()
            .filter(|record| record.permitted)
            .map(|record| record.id.to_string())
            .collect()
    }

    fn permits(&self, request: &CommitRequest<'_>) -> bool {
        let token_ok = self
            .required_token
            .is_none_or(|required| required == request.auth_token());
        token_ok && !self.denied.contains(request.id().as_str())
    }
}

impl AccessControl for RecordingAccess {
    fn commit(&self, request: CommitRequest<'_>, flags: &mut SettingFlags) -> SettingResult<()> {
        let permitted = self.permits(&request);
        self.commits.lock().push(CommitRecord {
            id: request.id().clone(),
            token: request.auth_token(),
            setting_type: request.setting_type(),
            value: request.value().to_vec(),
            permitted,
        });
        if !permitted {
            return Err(Arc::new(SettingError::AccessDenied {
                id: request.id().to_string(),
            }));
        }
        request.write_through(flags)
    }
}
