//! Resolution of group identifiers to member providers.
//!
//! A group is a named set of settings written together. Group identifiers
//! share a namespace with provider identifiers, but a group is only consulted
//! after direct provider lookup has failed.

mod manifest;

pub use manifest::GroupManifest;

use std::sync::Arc;

use crate::registry::ProviderHandle;
use crate::{SettingError, SettingId, SettingResult};

/// A live group and the providers that have joined it so far.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingGroup {
    id: SettingId,
    members: Vec<ProviderHandle>,
}

impl SettingGroup {
    /// Identifier of the group.
    #[must_use]
    pub const fn id(&self) -> &SettingId {
        &self.id
    }

    /// Member handles in the order their providers registered.
    #[must_use]
    pub fn members(&self) -> &[ProviderHandle] {
        &self.members
    }
}

/// Tracks group membership as providers register.
#[derive(Debug, Default)]
pub struct GroupResolver {
    manifest: GroupManifest,
    groups: Vec<SettingGroup>,
}

impl GroupResolver {
    /// Resolver for the groups declared in `manifest`.
    ///
    /// Every declared group exists from the start, initially without
    /// members.
    #[must_use]
    pub fn new(manifest: GroupManifest) -> Self {
        let groups = manifest
            .iter()
            .map(|(id, _)| SettingGroup {
                id: id.clone(),
                members: Vec::new(),
            })
            .collect();
        Self { manifest, groups }
    }

    /// Group named `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::NotFound`] if no such group is declared.
    pub fn find_group(&self, id: &str) -> SettingResult<&SettingGroup> {
        self.groups
            .iter()
            .find(|group| group.id == *id)
            .ok_or_else(|| Arc::new(SettingError::not_found(id)))
    }

    /// Add a newly registered provider to every group that declares it.
    ///
    /// Returns the number of groups joined.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::NotFound`] if no group lists `id`. Callers
    /// registering standalone settings should expect and tolerate this.
    pub fn register_member(&mut self, id: &SettingId, handle: ProviderHandle) -> SettingResult<usize> {
        let mut joined = 0_usize;
        for group_id in self.manifest.groups_for(id.as_str()) {
            let Some(group) = self.groups.iter_mut().find(|group| group.id == *group_id) else {
                continue;
            };
            if !group.members.contains(&handle) {
                group.members.push(handle);
                tracing::debug!(group = %group.id, member = %id, "added setting to group");
            }
            joined += 1;
        }
        if joined == 0 {
            return Err(Arc::new(SettingError::not_found(id.as_str())));
        }
        Ok(joined)
    }

    /// Declared membership.
    #[must_use]
    pub const fn manifest(&self) -> &GroupManifest {
        &self.manifest
    }

    /// All groups in group-id order.
    pub fn iter(&self) -> std::slice::Iter<'_, SettingGroup> {
        self.groups.iter()
    }
}
