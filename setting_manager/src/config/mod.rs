//! Manager configuration: wire-size limit, group manifest and legacy ids.
//!
//! Values are layered with figment. Defaults come first, then an optional
//! TOML file, then environment variables prefixed with `SETTING_MANAGER_`.
//!
//! ```toml
//! max_wire_size = 65536
//!
//! [groups]
//! "Dfci.AllCameras.Enable" = ["Dfci.FrontCamera.Enable", "Dfci.RearCamera.Enable"]
//!
//! [legacy_ids]
//! "9" = "Dfci.OnboardWpbt.Enable"
//! ```

use std::collections::BTreeMap;
use std::error::Error;
use std::sync::Arc;

use camino::Utf8Path;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::codec::{CodecLimits, DEFAULT_MAX_WIRE_SIZE};
use crate::{GroupManifest, LegacyIdTable, SettingError, SettingResult};

/// Prefix of environment variables read by [`ManagerConfig::load`].
pub const ENV_PREFIX: &str = "SETTING_MANAGER_";

/// Configuration consumed by [`crate::SettingManagerBuilder`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Largest wire value accepted by the codec, in bytes.
    pub max_wire_size: usize,
    /// Group identifier to the ordered identifiers of its members.
    pub groups: BTreeMap<String, Vec<String>>,
    /// Legacy numeric identifiers added to, or replacing, the built-in table.
    pub legacy_ids: BTreeMap<String, String>,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            max_wire_size: DEFAULT_MAX_WIRE_SIZE,
            groups: BTreeMap::new(),
            legacy_ids: BTreeMap::new(),
        }
    }
}

fn file_error(path: &Utf8Path, err: impl Into<Box<dyn Error + Send + Sync>>) -> Arc<SettingError> {
    Arc::new(SettingError::File {
        path: path.to_path_buf(),
        source: err.into(),
    })
}

impl ManagerConfig {
    /// Layer defaults, the file at `path` and the environment.
    ///
    /// A `path` that does not name an existing file is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::File`] if the file cannot be read or is not
    /// valid TOML.
    pub fn figment(path: Option<&Utf8Path>) -> SettingResult<Figment> {
        let mut layers = Figment::from(Serialized::defaults(Self::default()));
        if let Some(file) = path.filter(|candidate| candidate.is_file()) {
            let data = std::fs::read_to_string(file).map_err(|e| file_error(file, e))?;
            // Parse once up front so syntax errors name the file.
            toml::from_str::<toml::Value>(&data).map_err(|e| file_error(file, e))?;
            tracing::debug!(path = %file, "loaded setting manager configuration file");
            layers = layers.merge(Toml::string(&data));
        }
        Ok(layers.merge(Env::prefixed(ENV_PREFIX)))
    }

    /// Load and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::File`] for an unreadable file,
    /// [`SettingError::Gathering`] if the layered values do not deserialize,
    /// and the errors of [`ManagerConfig::validate`].
    ///
    /// # Examples
    ///
    /// ```
    /// use setting_manager::ManagerConfig;
    ///
    /// let config = ManagerConfig::load(None)?;
    /// assert_eq!(config.max_wire_size, 128 * 1024);
    /// # Ok::<_, std::sync::Arc<setting_manager::SettingError>>(())
    /// ```
    pub fn load(path: Option<&Utf8Path>) -> SettingResult<Self> {
        let config: Self = Self::figment(path)?
            .extract()
            .map_err(|e| Arc::new(SettingError::gathering(e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value, reporting all problems at once.
    ///
    /// # Errors
    ///
    /// Returns a [`SettingError::Validation`] for a single problem, or a
    /// [`SettingError::Aggregate`] of them when there are several.
    pub fn validate(&self) -> SettingResult<()> {
        let mut errors: Vec<SettingError> = Vec::new();
        if self.max_wire_size == 0 {
            errors.push(SettingError::validation(
                "max_wire_size",
                "must be greater than zero",
            ));
        }
        for (group, members) in &self.groups {
            let key = format!("groups.{group}");
            if members.is_empty() {
                errors.push(SettingError::validation(
                    key,
                    "a group needs at least one member",
                ));
                continue;
            }
            let declared = GroupManifest::new()
                .insert(group.as_str(), members.iter().map(String::as_str));
            if let Err(err) = declared {
                errors.push(SettingError::validation(key, err.to_string()));
            }
        }
        let mut legacy = LegacyIdTable::empty();
        for (numeric, canonical) in &self.legacy_ids {
            if let Err(err) = legacy.insert(numeric.as_str(), canonical.as_str()) {
                errors.push(SettingError::validation(
                    format!("legacy_ids.{numeric}"),
                    err.to_string(),
                ));
            }
        }
        SettingError::try_aggregate(errors).map_or(Ok(()), |err| Err(Arc::new(err)))
    }

    /// Codec limits derived from this configuration.
    #[must_use]
    pub const fn codec_limits(&self) -> CodecLimits {
        CodecLimits::new(self.max_wire_size)
    }

    /// The declared group manifest.
    ///
    /// # Errors
    ///
    /// Returns the first invalid group declaration.
    pub fn group_manifest(&self) -> SettingResult<GroupManifest> {
        GroupManifest::from_entries(&self.groups)
    }

    /// The built-in legacy table with the configured entries applied.
    ///
    /// # Errors
    ///
    /// Returns the first invalid legacy entry.
    pub fn legacy_table(&self) -> SettingResult<LegacyIdTable> {
        let mut table = LegacyIdTable::builtin();
        for (numeric, canonical) in &self.legacy_ids {
            table.insert(numeric.as_str(), canonical.as_str())?;
        }
        Ok(table)
    }
}
