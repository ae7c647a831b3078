//! The apply and read pipeline.
//!
//! [`SettingManager`] owns the provider catalog and group membership. A
//! request resolves its identifier under the catalog lock, takes shared
//! references to the providers involved and releases the lock before any
//! provider or collaborator callback runs, so providers may re-enter the
//! manager.

mod builder;
mod describe;
mod report;

pub use builder::SettingManagerBuilder;
pub use describe::ProviderDescription;
pub use report::{ApplyReport, MemberOutcome};

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::codec::{self, CodecLimits, alloc_zeroed};
use crate::provider::read_native;
use crate::registry::{ProviderHandle, ProviderRecord};
use crate::{
    AccessControl, AuthToken, CertificateRenderer, CommitRequest, GroupResolver, ProviderRegistry,
    SettingError, SettingFlags, SettingId, SettingProvider, SettingResult, SettingType, ValueKind,
};

struct Catalog {
    registry: ProviderRegistry,
    groups: GroupResolver,
}

/// What an identifier resolved to, captured under the catalog lock.
enum Target {
    Single(ProviderRecord),
    Group {
        id: SettingId,
        members: Vec<Option<ProviderRecord>>,
    },
}

/// Registry, group resolver and codec behind one request interface.
pub struct SettingManager {
    catalog: Mutex<Catalog>,
    access: Arc<dyn AccessControl>,
    renderer: Option<Arc<dyn CertificateRenderer>>,
    limits: CodecLimits,
}

impl SettingManager {
    /// Start building a manager that commits writes through `access`.
    #[must_use]
    pub fn builder(access: Arc<dyn AccessControl>) -> SettingManagerBuilder {
        SettingManagerBuilder::new(access)
    }

    /// Register a provider and add it to any group that declares it.
    ///
    /// The provider is queried for its metadata before the catalog lock is
    /// taken. A provider that belongs to no group is registered normally;
    /// group membership never causes registration to fail.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::DuplicateId`] if the identifier is taken.
    pub fn register(&self, provider: Arc<dyn SettingProvider>) -> SettingResult<ProviderHandle> {
        let record = ProviderRecord::capture(provider);
        let id = record.id().clone();
        let mut catalog = self.catalog.lock();
        let handle = catalog.registry.insert(record)?;
        match catalog.groups.register_member(&id, handle) {
            Ok(joined) => tracing::debug!(id = %id, groups = joined, "provider joined groups"),
            Err(err) => match err.as_ref() {
                SettingError::NotFound { .. } => {
                    tracing::debug!(id = %id, "provider is not a group member");
                }
                _ => tracing::warn!(id = %id, error = %err, "group registration failed"),
            },
        }
        Ok(handle)
    }

    /// Look up a single provider, translating legacy identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::NotFound`] if nothing matches.
    pub fn find_by_id(&self, id: &str) -> SettingResult<ProviderRecord> {
        self.catalog.lock().registry.find_by_id(id).cloned()
    }

    /// Providers that have joined the group `id`, in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::NotFound`] if no such group is declared.
    pub fn find_group_members(&self, id: &str) -> SettingResult<Vec<ProviderRecord>> {
        let catalog = self.catalog.lock();
        let group = catalog.groups.find_group(id)?;
        Ok(group
            .members()
            .iter()
            .filter_map(|&handle| catalog.registry.get(handle).cloned())
            .collect())
    }

    /// Restore defaults on every provider whose flags intersect `filter`.
    ///
    /// Providers are visited in registration order. Failures are logged and
    /// do not stop the pass.
    pub fn reset_all_matching_flags(&self, filter: SettingFlags) {
        let records: Vec<ProviderRecord> = self
            .catalog
            .lock()
            .registry
            .matching_flags(filter)
            .cloned()
            .collect();
        for record in records {
            match record.provider().set_to_default() {
                Ok(()) => tracing::info!(id = %record.id(), "reset setting to default"),
                Err(err) => tracing::error!(
                    id = %record.id(),
                    error = %err,
                    "failed to reset setting to default"
                ),
            }
        }
    }

    /// Decode `value` and commit it to the provider or group named `id`.
    ///
    /// For a group every member is attempted in order and the returned
    /// status is that of the last member that failed.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::Unsupported`] for an empty identifier or a
    /// missing token, [`SettingError::NotFound`] if `id` resolves to nothing,
    /// or the decode or commit error of the single provider or last failing
    /// member.
    pub fn apply(
        &self,
        id: &str,
        value: Option<&str>,
        auth_token: Option<AuthToken>,
        flags: &mut SettingFlags,
    ) -> SettingResult<()> {
        self.apply_with_report(id, value, auth_token, flags)?
            .into_result()
    }

    /// As [`SettingManager::apply`], but keep every member outcome.
    ///
    /// # Errors
    ///
    /// Returns the request-level failures of [`SettingManager::apply`].
    /// Member failures are recorded in the report instead.
    pub fn apply_with_report(
        &self,
        id: &str,
        value: Option<&str>,
        auth_token: Option<AuthToken>,
        flags: &mut SettingFlags,
    ) -> SettingResult<ApplyReport> {
        if id.is_empty() {
            return Err(Arc::new(SettingError::unsupported("setting id is empty")));
        }
        let Some(token) = auth_token else {
            tracing::debug!(id, "apply request carries no auth token");
            return Err(Arc::new(SettingError::unsupported("auth token is missing")));
        };
        match self.resolve(id)? {
            Target::Single(record) => {
                let mut report = ApplyReport::new(record.id().clone(), false);
                let result = self.apply_one(&record, value, token, flags);
                if let Err(err) = &result {
                    tracing::error!(id = %record.id(), error = %err, "failed to apply setting");
                }
                report.record(MemberOutcome::new(record.id().clone(), result));
                Ok(report)
            }
            Target::Group { id: group, members } => {
                let mut report = ApplyReport::new(group.clone(), true);
                for member in members {
                    let Some(record) = member else {
                        tracing::error!(group = %group, "group member no longer resolves");
                        return Err(Arc::new(SettingError::not_found(group.as_str())));
                    };
                    tracing::debug!(group = %group, member = %record.id(), "applying group member");
                    let result = self.apply_one(&record, value, token, flags);
                    if let Err(err) = &result {
                        tracing::error!(
                            group = %group,
                            member = %record.id(),
                            error = %err,
                            "failed to apply group member"
                        );
                    }
                    report.record(MemberOutcome::new(record.id().clone(), result));
                }
                Ok(report)
            }
        }
    }

    /// Read the current or default value of a provider as a wire string.
    ///
    /// Groups are never read as a unit. `Ok(None)` means the provider holds
    /// no String or Binary value; an empty Cert reads as `Some("")`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::NotFound`] for an unknown identifier, the
    /// provider's error if the read fails, or an encoding error.
    pub fn read(&self, id: &str, kind: ValueKind) -> SettingResult<Option<String>> {
        let record = self.find_by_id(id)?;
        let native = self.fetch(&record, kind)?;
        let setting_type = record.setting_type();
        if native.is_empty() && matches!(setting_type, SettingType::String | SettingType::Binary) {
            return Ok(None);
        }
        codec::encode(setting_type, &native, self.renderer.as_deref()).map(Some)
    }

    /// Snapshot every provider with its current and default values, and log
    /// each entry at debug level.
    #[must_use]
    pub fn describe_providers(&self) -> Vec<ProviderDescription> {
        let records: Vec<ProviderRecord> = self.catalog.lock().registry.iter().cloned().collect();
        tracing::debug!(count = records.len(), "describing registered setting providers");
        records
            .iter()
            .map(|record| {
                let description = ProviderDescription::new(
                    record,
                    self.read_for_description(record, ValueKind::Current),
                    self.read_for_description(record, ValueKind::Default),
                );
                tracing::debug!(
                    id = %description.id(),
                    setting_type = %description.setting_type(),
                    flags = %format_args!("{:#x}", description.flags()),
                    current = description.current_value().unwrap_or(codec::vocabulary::UNKNOWN),
                    default = description.default_value().unwrap_or(codec::vocabulary::UNKNOWN),
                    "setting provider"
                );
                description
            })
            .collect()
    }

    /// Limits applied while decoding wire values.
    #[must_use]
    pub const fn codec_limits(&self) -> CodecLimits {
        self.limits
    }

    /// Number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.catalog.lock().registry.len()
    }

    /// Returns `true` if no provider is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalog.lock().registry.is_empty()
    }

    fn resolve(&self, id: &str) -> SettingResult<Target> {
        let catalog = self.catalog.lock();
        if let Ok(record) = catalog.registry.find_by_id(id) {
            return Ok(Target::Single(record.clone()));
        }
        let Ok(group) = catalog.groups.find_group(id) else {
            tracing::info!(id, "no provider or group for setting id");
            return Err(Arc::new(SettingError::not_found(id)));
        };
        Ok(Target::Group {
            id: group.id().clone(),
            members: group
                .members()
                .iter()
                .map(|&handle| catalog.registry.get(handle).cloned())
                .collect(),
        })
    }

    fn apply_one(
        &self,
        record: &ProviderRecord,
        value: Option<&str>,
        token: AuthToken,
        flags: &mut SettingFlags,
    ) -> SettingResult<()> {
        let native = codec::decode(record.setting_type(), value, self.limits)?;
        let request = CommitRequest::new(record.provider().as_ref(), token, &native);
        self.access.commit(request, flags)
    }

    fn read_for_description(&self, record: &ProviderRecord, kind: ValueKind) -> Option<String> {
        let native = self
            .fetch(record, kind)
            .inspect_err(|err| {
                tracing::warn!(id = %record.id(), error = %err, "failed to read setting value");
            })
            .ok()?;
        codec::encode(record.setting_type(), &native, self.renderer.as_deref()).ok()
    }

    /// Read a native value with the two-phase size protocol.
    ///
    /// Variable-length values larger than the wire limit are refused before
    /// any buffer is allocated.
    fn fetch(&self, record: &ProviderRecord, kind: ValueKind) -> SettingResult<Vec<u8>> {
        let provider = record.provider().as_ref();
        let required = match read_native(provider, kind, &mut []) {
            Ok(_) => return Ok(Vec::new()),
            Err(err) => match err.required_size() {
                Some(required) => required,
                None => return Err(err),
            },
        };
        let limit = self.limits.max_wire_size();
        if record.setting_type().is_variable_length() && required > limit {
            tracing::error!(
                id = %record.id(),
                required,
                limit,
                "setting value exceeds the wire size limit"
            );
            return Err(Arc::new(SettingError::TooLong { limit }));
        }
        let mut buffer = alloc_zeroed(required)?;
        let written = read_native(provider, kind, &mut buffer)?;
        buffer.truncate(written);
        Ok(buffer)
    }
}

impl fmt::Debug for SettingManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingManager")
            .field("providers", &self.len())
            .field("limits", &self.limits)
            .field("renderer", &self.renderer.is_some())
            .finish_non_exhaustive()
    }
}
