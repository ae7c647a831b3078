//! Steps that read values back and run reset passes.

use anyhow::{Result, ensure};
use rstest_bdd_macros::{then, when};
use setting_manager::{SettingFlags, ValueKind};

use crate::fixtures::ManagerContext;

#[when("settings flagged reset on unenroll are reset")]
fn reset_unenrolled(manager_context: &ManagerContext) -> Result<()> {
    manager_context
        .manager()?
        .reset_all_matching_flags(SettingFlags::RESET_ON_UNENROLL);
    Ok(())
}

#[then("{id} reads {value}")]
fn reads_value(manager_context: &ManagerContext, id: String, value: String) -> Result<()> {
    let actual = manager_context.manager()?.read(&id, ValueKind::Current)?;
    ensure!(
        actual.as_deref() == Some(value.as_str()),
        "{id} read {actual:?}, expected {value}"
    );
    Ok(())
}

#[then("{id} stores only a terminator")]
fn stores_terminator(manager_context: &ManagerContext, id: String) -> Result<()> {
    let stored = manager_context.handle(&id)?.current();
    ensure!(stored == [0], "{id} stores {stored:?}");
    Ok(())
}
