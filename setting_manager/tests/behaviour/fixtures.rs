//! Scenario state shared by the setting manager steps.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use setting_manager::{ManagerConfig, SettingManager, SettingResult, SettingType};
use test_helpers::{MockHandle, RecordingAccess};

/// State collected by `Given` steps and inspected by `Then` steps.
///
/// The manager is built lazily by the first step that needs it, so group
/// declarations and denials must precede registrations in a scenario.
#[derive(Debug, Default, ScenarioState)]
pub struct ManagerContext {
    /// Configuration assembled before the manager is built.
    pub config: Slot<ManagerConfig>,
    /// Settings the access-control double refuses.
    pub denied: Slot<Vec<String>>,
    /// Access-control double handed to the manager.
    pub access: Slot<Arc<RecordingAccess>>,
    /// Manager under test.
    pub manager: Slot<Arc<SettingManager>>,
    /// Mock handles keyed by setting identifier.
    pub handles: Slot<BTreeMap<String, MockHandle>>,
    /// Result of the most recent apply.
    pub outcome: Slot<SettingResult<()>>,
}

impl ManagerContext {
    /// Returns the scenario's manager, building it on first use.
    pub fn manager(&self) -> Result<Arc<SettingManager>> {
        if let Some(manager) = self.manager.get() {
            return Ok(manager);
        }
        let gate = self
            .denied
            .take()
            .unwrap_or_default()
            .iter()
            .fold(RecordingAccess::new(), |access, id| access.deny(id))
            .shared();
        let built = Arc::new(
            SettingManager::builder(gate.clone())
                .config(self.config.take().unwrap_or_default())
                .build()?,
        );
        self.access.set(gate);
        self.manager.set(Arc::clone(&built));
        Ok(built)
    }

    /// Handle of the mock registered under `id`.
    pub fn handle(&self, id: &str) -> Result<MockHandle> {
        self.handles
            .with_ref(|handles| handles.get(id).cloned())
            .flatten()
            .ok_or_else(|| anyhow!("no mock registered for '{id}'"))
    }
}

/// Parses a setting type from its variant name.
pub fn parse_type(name: &str) -> Result<SettingType> {
    SettingType::ALL
        .into_iter()
        .find(|candidate| format!("{candidate:?}") == name)
        .ok_or_else(|| anyhow!("unknown setting type '{name}'"))
}

/// Splits a comma-separated list of identifiers.
#[must_use]
pub fn split_ids(ids: &str) -> Vec<String> {
    ids.split(',').map(|id| id.trim().to_owned()).collect()
}

/// Creates an empty context for each scenario.
#[fixture]
pub fn manager_context() -> ManagerContext {
    ManagerContext::default()
}
