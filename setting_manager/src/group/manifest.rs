//! Explicit group membership declarations.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{SettingError, SettingId, SettingResult};

/// Declares which settings belong to which group.
///
/// Membership is an exact identifier match; a setting may appear in several
/// groups. The manifest only says who *may* join a group. Members are added
/// to the live group as their providers register.
///
/// # Examples
///
/// ```
/// use setting_manager::GroupManifest;
///
/// let mut manifest = GroupManifest::new();
/// manifest.insert(
///     "Dfci.AllCameras.Enable",
///     ["Dfci.FrontCamera.Enable", "Dfci.RearCamera.Enable"],
/// )?;
/// let groups: Vec<_> = manifest.groups_for("Dfci.RearCamera.Enable").collect();
/// assert_eq!(groups.len(), 1);
/// # Ok::<_, std::sync::Arc<setting_manager::SettingError>>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupManifest {
    groups: BTreeMap<SettingId, Vec<SettingId>>,
}

impl GroupManifest {
    /// An empty manifest.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }

    /// Declare `group` with the given members, replacing any earlier
    /// declaration. Repeated member identifiers are kept once.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::InvalidId`] if the group or any member
    /// identifier is invalid, and [`SettingError::Validation`] if the group
    /// lists itself as a member.
    pub fn insert<I, S>(&mut self, group: impl Into<String>, members: I) -> SettingResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let group_id = SettingId::new(group)?;
        let mut declared: Vec<SettingId> = Vec::new();
        for raw in members {
            let member = SettingId::new(raw)?;
            if member == group_id {
                return Err(Arc::new(SettingError::validation(
                    format!("groups.{group_id}"),
                    "a group cannot contain itself",
                )));
            }
            if !declared.contains(&member) {
                declared.push(member);
            }
        }
        self.groups.insert(group_id, declared);
        Ok(())
    }

    /// Build a manifest from `group -> members` entries.
    ///
    /// # Errors
    ///
    /// As for [`GroupManifest::insert`].
    pub fn from_entries<'a, I>(entries: I) -> SettingResult<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a Vec<String>)>,
    {
        let mut manifest = Self::new();
        for (group, members) in entries {
            manifest.insert(group.as_str(), members.iter().map(String::as_str))?;
        }
        Ok(manifest)
    }

    /// Groups that list `member`, in group-id order.
    pub fn groups_for<'a>(&'a self, member: &'a str) -> impl Iterator<Item = &'a SettingId> + 'a {
        self.groups
            .iter()
            .filter(move |(_, members)| members.iter().any(|m| *m == *member))
            .map(|(group, _)| group)
    }

    /// Declared members of `group`.
    #[must_use]
    pub fn members(&self, group: &str) -> Option<&[SettingId]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    /// Iterate over `(group, members)` declarations.
    pub fn iter(&self) -> impl Iterator<Item = (&SettingId, &[SettingId])> {
        self.groups
            .iter()
            .map(|(group, members)| (group, members.as_slice()))
    }

    /// Number of declared groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if no group is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
