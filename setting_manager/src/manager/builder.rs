//! Construction of a [`SettingManager`].

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{Catalog, SettingManager};
use crate::{
    AccessControl, CertificateRenderer, GroupResolver, ManagerConfig, ProviderRegistry,
    SettingResult,
};

/// Assembles a [`SettingManager`] from configuration and collaborators.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use setting_manager::{ManagerConfig, PermitAll, SettingManagerBuilder};
///
/// let mut config = ManagerConfig::default();
/// config.groups.insert(
///     "Dfci.AllCameras.Enable".into(),
///     vec!["Dfci.FrontCamera.Enable".into(), "Dfci.RearCamera.Enable".into()],
/// );
/// let manager = SettingManagerBuilder::new(Arc::new(PermitAll))
///     .config(config)
///     .build()?;
/// assert!(manager.find_group_members("Dfci.AllCameras.Enable")?.is_empty());
/// # Ok::<_, std::sync::Arc<setting_manager::SettingError>>(())
/// ```
pub struct SettingManagerBuilder {
    config: ManagerConfig,
    access: Arc<dyn AccessControl>,
    renderer: Option<Arc<dyn CertificateRenderer>>,
}

impl SettingManagerBuilder {
    /// Start a builder that commits writes through `access`.
    #[must_use]
    pub fn new(access: Arc<dyn AccessControl>) -> Self {
        Self {
            config: ManagerConfig::default(),
            access,
            renderer: None,
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn config(mut self, config: ManagerConfig) -> Self {
        self.config = config;
        self
    }

    /// Render Cert settings through `renderer` on read.
    #[must_use]
    pub fn certificate_renderer(mut self, renderer: Arc<dyn CertificateRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Validate the configuration and build the manager.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`ManagerConfig::validate`].
    pub fn build(self) -> SettingResult<SettingManager> {
        self.config.validate()?;
        let registry = ProviderRegistry::new(self.config.legacy_table()?);
        let groups = GroupResolver::new(self.config.group_manifest()?);
        tracing::debug!(
            groups = groups.manifest().len(),
            legacy_ids = registry.legacy_ids().len(),
            max_wire_size = self.config.max_wire_size,
            "setting manager ready"
        );
        Ok(SettingManager {
            catalog: Mutex::new(Catalog { registry, groups }),
            access: self.access,
            renderer: self.renderer,
            limits: self.config.codec_limits(),
        })
    }
}

impl fmt::Debug for SettingManagerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingManagerBuilder")
            .field("config", &self.config)
            .field("renderer", &self.renderer.is_some())
            .finish_non_exhaustive()
    }
}
