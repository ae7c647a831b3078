//! Steps that set up the catalog and apply wire values.

use anyhow::{Result, anyhow, ensure};
use rstest_bdd_macros::{given, then, when};
use setting_manager::{AuthToken, SettingError, SettingFlags, SettingType};
use test_helpers::MockProvider;

use crate::fixtures::{ManagerContext, parse_type, split_ids};

const TOKEN: AuthToken = AuthToken::new(0xD1FC);

fn initial_value(setting_type: SettingType) -> (Vec<u8>, Vec<u8>) {
    match setting_type {
        SettingType::Enable
        | SettingType::SecureBootKeyEnum
        | SettingType::Password
        | SettingType::UsbPortEnum => (vec![0], vec![1]),
        _ => (Vec::new(), Vec::new()),
    }
}

fn register(
    manager_context: &ManagerContext,
    id: &str,
    setting_type: SettingType,
    flags: SettingFlags,
) -> Result<()> {
    let manager = manager_context.manager()?;
    let (current, default) = initial_value(setting_type);
    let provider = MockProvider::new(id, setting_type)?
        .with_flags(flags)
        .with_current(&current)
        .with_default(&default);
    let handle = provider.handle();
    manager.register(provider.shared())?;
    manager_context
        .handles
        .get_or_insert_with(Default::default)
        .insert(id.to_owned(), handle);
    Ok(())
}

fn record_apply(manager_context: &ManagerContext, id: &str, value: Option<&str>) -> Result<()> {
    let manager = manager_context.manager()?;
    let mut flags = SettingFlags::EMPTY;
    manager_context
        .outcome
        .set(manager.apply(id, value, Some(TOKEN), &mut flags));
    Ok(())
}

fn take_outcome(manager_context: &ManagerContext) -> Result<Result<(), String>> {
    let outcome = manager_context
        .outcome
        .take()
        .ok_or_else(|| anyhow!("no apply has been attempted"))?;
    Ok(outcome.map_err(|err| format!("{err:?}")))
}

#[given("the group {group} lists {members}")]
fn declare_group(manager_context: &ManagerContext, group: String, members: String) -> Result<()> {
    ensure!(
        manager_context.manager.is_empty(),
        "groups must be declared before the manager is built"
    );
    manager_context
        .config
        .get_or_insert_with(Default::default)
        .groups
        .insert(group, split_ids(&members));
    Ok(())
}

#[given("writes to {id} are denied")]
fn deny_writes(manager_context: &ManagerContext, id: String) -> Result<()> {
    ensure!(
        manager_context.manager.is_empty(),
        "denials must be declared before the manager is built"
    );
    manager_context
        .denied
        .get_or_insert_with(Vec::new)
        .push(id);
    Ok(())
}

#[given("the {kind} settings {ids} are registered")]
fn register_settings(manager_context: &ManagerContext, kind: String, ids: String) -> Result<()> {
    let setting_type = parse_type(&kind)?;
    for id in split_ids(&ids) {
        register(manager_context, &id, setting_type, SettingFlags::EMPTY)?;
    }
    Ok(())
}

#[given("the {kind} setting {id} resets on unenroll")]
fn register_unenroll_setting(
    manager_context: &ManagerContext,
    kind: String,
    id: String,
) -> Result<()> {
    register(
        manager_context,
        &id,
        parse_type(&kind)?,
        SettingFlags::RESET_ON_UNENROLL,
    )
}

#[when("{value} is applied to {id}")]
fn apply_value(manager_context: &ManagerContext, value: String, id: String) -> Result<()> {
    record_apply(manager_context, &id, Some(&value))
}

#[when("{id} is cleared")]
fn clear_value(manager_context: &ManagerContext, id: String) -> Result<()> {
    record_apply(manager_context, &id, None)
}

#[then("the apply succeeds")]
fn apply_succeeds(manager_context: &ManagerContext) -> Result<()> {
    take_outcome(manager_context)?.map_err(|err| anyhow!("apply failed: {err}"))
}

#[then("the apply fails with access denied for {id}")]
fn apply_denied(manager_context: &ManagerContext, id: String) -> Result<()> {
    let outcome = manager_context
        .outcome
        .take()
        .ok_or_else(|| anyhow!("no apply has been attempted"))?;
    let err = outcome.err().ok_or_else(|| anyhow!("apply succeeded"))?;
    ensure!(
        matches!(&*err, SettingError::AccessDenied { id: denied } if *denied == id),
        "expected access denied for {id}, got {err}"
    );
    Ok(())
}

#[then("the apply fails with not found")]
fn apply_not_found(manager_context: &ManagerContext) -> Result<()> {
    let err = take_outcome(manager_context)?
        .err()
        .ok_or_else(|| anyhow!("apply succeeded"))?;
    ensure!(err.starts_with("NotFound"), "expected NotFound, got {err}");
    Ok(())
}

#[then("the apply fails with an invalid value")]
fn apply_invalid(manager_context: &ManagerContext) -> Result<()> {
    let err = take_outcome(manager_context)?
        .err()
        .ok_or_else(|| anyhow!("apply succeeded"))?;
    ensure!(
        err.starts_with("InvalidValue"),
        "expected InvalidValue, got {err}"
    );
    Ok(())
}

#[then("access control committed {ids} in order")]
fn committed_in_order(manager_context: &ManagerContext, ids: String) -> Result<()> {
    let access = manager_context
        .access
        .get()
        .ok_or_else(|| anyhow!("manager has not been built"))?;
    let committed = access.permitted_ids();
    ensure!(
        committed == split_ids(&ids),
        "unexpected commit order: {committed:?}"
    );
    Ok(())
}
