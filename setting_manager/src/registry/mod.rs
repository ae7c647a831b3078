//! The catalog of registered setting providers.
//!
//! Records live in an arena addressed by [`ProviderHandle`]. Handles are
//! stable because providers are never unregistered, and arena order is
//! registration order, which is also the enumeration order of every scan.

mod legacy;

pub use legacy::LegacyIdTable;

use std::fmt;
use std::sync::Arc;

use crate::id::is_digit_leading;
use crate::{SettingError, SettingFlags, SettingId, SettingProvider, SettingResult, SettingType};

/// Stable index of a provider within a [`ProviderRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProviderHandle(usize);

impl ProviderHandle {
    /// Position of the provider in registration order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A registered provider plus the metadata captured when it was registered.
#[derive(Clone)]
pub struct ProviderRecord {
    id: SettingId,
    setting_type: SettingType,
    flags: SettingFlags,
    provider: Arc<dyn SettingProvider>,
}

impl ProviderRecord {
    /// Query `provider` for its identifier, type and flags once.
    #[must_use]
    pub fn capture(provider: Arc<dyn SettingProvider>) -> Self {
        Self {
            id: provider.id().clone(),
            setting_type: provider.setting_type(),
            flags: provider.flags(),
            provider,
        }
    }

    /// Identifier the provider registered under.
    #[must_use]
    pub const fn id(&self) -> &SettingId {
        &self.id
    }

    /// Type reported at registration.
    #[must_use]
    pub const fn setting_type(&self) -> SettingType {
        self.setting_type
    }

    /// Flags reported at registration.
    #[must_use]
    pub const fn flags(&self) -> SettingFlags {
        self.flags
    }

    /// The provider itself.
    #[must_use]
    pub const fn provider(&self) -> &Arc<dyn SettingProvider> {
        &self.provider
    }
}

impl fmt::Debug for ProviderRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRecord")
            .field("id", &self.id)
            .field("setting_type", &self.setting_type)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

/// Insertion-ordered catalog of providers keyed by unique identifier.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    records: Vec<ProviderRecord>,
    legacy_ids: LegacyIdTable,
}

impl ProviderRegistry {
    /// Empty registry translating legacy identifiers through `legacy_ids`.
    #[must_use]
    pub const fn new(legacy_ids: LegacyIdTable) -> Self {
        Self {
            records: Vec::new(),
            legacy_ids,
        }
    }

    /// Add `provider` to the catalog.
    ///
    /// The identifier, type and flags are read once and kept in the record.
    ///
    /// # Errors
    ///
    /// As for [`ProviderRegistry::insert`].
    pub fn register(&mut self, provider: Arc<dyn SettingProvider>) -> SettingResult<ProviderHandle> {
        self.insert(ProviderRecord::capture(provider))
    }

    /// Add a record whose metadata was captured beforehand.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::DuplicateId`] if a provider with the same
    /// identifier is already registered; the registry is left unchanged.
    pub fn insert(&mut self, record: ProviderRecord) -> SettingResult<ProviderHandle> {
        if self.position(record.id.as_str()).is_some() {
            tracing::warn!(id = %record.id, "rejecting duplicate provider registration");
            return Err(Arc::new(SettingError::DuplicateId {
                id: record.id.as_str().to_owned(),
            }));
        }
        let handle = ProviderHandle(self.records.len());
        tracing::debug!(
            id = %record.id,
            setting_type = %record.setting_type,
            flags = %format_args!("{:#x}", record.flags),
            "registered setting provider"
        );
        self.records.push(record);
        Ok(handle)
    }

    /// Resolve `id` to a handle.
    ///
    /// Digit-leading identifiers are translated through the legacy table
    /// first and are never matched verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::NotFound`] if no provider matches, or if a
    /// digit-leading identifier has no translation.
    pub fn resolve(&self, id: &str) -> SettingResult<ProviderHandle> {
        let target = if is_digit_leading(id) {
            let Some(canonical) = self.legacy_ids.translate(id) else {
                tracing::warn!(id, "no translation for legacy setting id");
                return Err(Arc::new(SettingError::not_found(id)));
            };
            canonical.as_str()
        } else {
            id
        };
        self.position(target)
            .map(ProviderHandle)
            .ok_or_else(|| Arc::new(SettingError::not_found(id)))
    }

    /// Look up the record for `id`, applying legacy translation.
    ///
    /// # Errors
    ///
    /// As for [`ProviderRegistry::resolve`].
    pub fn find_by_id(&self, id: &str) -> SettingResult<&ProviderRecord> {
        let handle = self.resolve(id)?;
        self.get(handle)
            .ok_or_else(|| Arc::new(SettingError::not_found(id)))
    }

    /// Record for `handle`, if it belongs to this registry.
    #[must_use]
    pub fn get(&self, handle: ProviderHandle) -> Option<&ProviderRecord> {
        self.records.get(handle.0)
    }

    /// Records whose flags intersect `filter`, in registration order.
    pub fn matching_flags(&self, filter: SettingFlags) -> impl Iterator<Item = &ProviderRecord> {
        self.records
            .iter()
            .filter(move |record| record.flags.intersects(filter))
    }

    /// All records in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, ProviderRecord> {
        self.records.iter()
    }

    /// Number of registered providers.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The legacy translation table in use.
    #[must_use]
    pub const fn legacy_ids(&self) -> &LegacyIdTable {
        &self.legacy_ids
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id == *id)
    }
}

impl<'a> IntoIterator for &'a ProviderRegistry {
    type Item = &'a ProviderRecord;
    type IntoIter = std::slice::Iter<'a, ProviderRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests;
