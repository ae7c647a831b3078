//! Translation of legacy numeric identifiers.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::id::is_digit_leading;
use crate::{SettingError, SettingId, SettingResult};

/// Numeric identifiers issued by the first version of the management
/// protocol and the settings they name today.
const BUILTIN: &[(&str, &str)] = &[
    ("1", "Dfci.OnboardCameras.Enable"),
    ("2", "Dfci.OnboardAudio.Enable"),
    ("3", "Dfci.OnboardRadios.Enable"),
    ("4", "Dfci.BootExternalMedia.Enable"),
    ("5", "Dfci.BootOnboardNetwork.Enable"),
    ("6", "Dfci.CpuAndIoVirtualization.Enable"),
    ("7", "Device.Password.Password"),
    ("8", "Device.SecureBootKeys.Enum"),
];

/// Mapping from digit-leading legacy identifiers to canonical ones.
///
/// # Examples
///
/// ```
/// use setting_manager::LegacyIdTable;
///
/// let mut table = LegacyIdTable::builtin();
/// assert_eq!(table.translate("7").map(|id| id.as_str()), Some("Device.Password.Password"));
/// table.insert("7", "Device.Password.Admin")?;
/// assert_eq!(table.translate("7").map(|id| id.as_str()), Some("Device.Password.Admin"));
/// assert!(table.translate("99").is_none());
/// # Ok::<_, std::sync::Arc<setting_manager::SettingError>>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegacyIdTable {
    entries: BTreeMap<String, SettingId>,
}

impl LegacyIdTable {
    /// Table with no entries; every legacy identifier fails to translate.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Table holding the built-in version-1 entries.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .filter_map(|&(legacy, canonical)| {
                SettingId::new(canonical)
                    .ok()
                    .map(|id| (legacy.to_owned(), id))
            })
            .collect();
        Self { entries }
    }

    /// Add or replace the translation for `legacy`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::InvalidId`] if `legacy` does not start with a
    /// decimal digit or `canonical` is not a valid identifier.
    pub fn insert(
        &mut self,
        legacy: impl Into<String>,
        canonical: impl Into<String>,
    ) -> SettingResult<()> {
        let key = legacy.into();
        if !is_digit_leading(&key) {
            return Err(Arc::new(SettingError::invalid_id(
                key,
                "legacy identifiers must start with a decimal digit",
            )));
        }
        let target = SettingId::new(canonical)?;
        self.entries.insert(key, target);
        Ok(())
    }

    /// Canonical identifier for `legacy`, if one is known.
    #[must_use]
    pub fn translate(&self, legacy: &str) -> Option<&SettingId> {
        self.entries.get(legacy)
    }

    /// Number of translations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no translations are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(legacy, canonical)` pairs in legacy-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingId)> {
        self.entries
            .iter()
            .map(|(legacy, canonical)| (legacy.as_str(), canonical))
    }
}
