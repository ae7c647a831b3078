//! Unit tests for provider registration and lookup.
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface unexpected failures"
)]

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::{LegacyIdTable, ProviderRegistry};
use crate::{
    ProviderBuilder, SettingError, SettingFlags, SettingProvider, SettingType, fill_buffer,
};

fn provider(id: &str, flags: SettingFlags) -> Arc<dyn SettingProvider> {
    let built = ProviderBuilder::new(id, SettingType::Enable)
        .flags(flags)
        .current_value(|buf| fill_buffer(buf, &[1]))
        .default_value(|buf| fill_buffer(buf, &[0]))
        .set_value(|_, _| Ok(()))
        .set_to_default(|| Ok(()))
        .build()
        .expect("test provider builds");
    Arc::new(built)
}

#[fixture]
fn registry() -> ProviderRegistry {
    let mut registry = ProviderRegistry::new(LegacyIdTable::builtin());
    for id in [
        "Dfci.OnboardCameras.Enable",
        "Dfci.OnboardAudio.Enable",
        "Device.Password.Password",
    ] {
        registry
            .register(provider(id, SettingFlags::EMPTY))
            .expect("fixture registration");
    }
    registry
}

#[rstest]
fn duplicate_registration_leaves_one_record(mut registry: ProviderRegistry) {
    let err = registry
        .register(provider("Dfci.OnboardAudio.Enable", SettingFlags::NO_PREBOOT_UI))
        .expect_err("duplicate id");
    assert!(matches!(err.as_ref(), SettingError::DuplicateId { .. }));
    assert_eq!(registry.len(), 3);
    let matches = registry
        .iter()
        .filter(|record| *record.id() == *"Dfci.OnboardAudio.Enable")
        .count();
    assert_eq!(matches, 1);
    let record = registry
        .find_by_id("Dfci.OnboardAudio.Enable")
        .expect("original survives");
    assert!(record.flags().is_empty());
}

#[rstest]
fn handles_follow_registration_order(mut registry: ProviderRegistry) {
    let handle = registry
        .register(provider("Dfci.OnboardRadios.Enable", SettingFlags::EMPTY))
        .expect("register");
    assert_eq!(handle.index(), 3);
    let ids: Vec<&str> = registry.iter().map(|record| record.id().as_str()).collect();
    assert_eq!(
        ids,
        [
            "Dfci.OnboardCameras.Enable",
            "Dfci.OnboardAudio.Enable",
            "Device.Password.Password",
            "Dfci.OnboardRadios.Enable",
        ]
    );
}

#[rstest]
fn lookup_is_exact_and_case_sensitive(registry: ProviderRegistry) {
    assert!(registry.find_by_id("Dfci.OnboardCameras.Enable").is_ok());
    for miss in ["dfci.onboardcameras.enable", "Dfci.OnboardCameras", ""] {
        let err = registry.find_by_id(miss).expect_err("no match");
        assert!(matches!(err.as_ref(), SettingError::NotFound { .. }));
    }
}

#[rstest]
fn legacy_ids_translate_before_lookup(registry: ProviderRegistry) {
    let record = registry.find_by_id("7").expect("translated id");
    assert_eq!(record.id().as_str(), "Device.Password.Password");
}

#[test]
fn untranslated_legacy_id_is_not_scanned_verbatim() {
    let mut registry = ProviderRegistry::new(LegacyIdTable::empty());
    registry
        .register(provider("Dfci.OnboardCameras.Enable", SettingFlags::EMPTY))
        .expect("register");
    let err = registry.find_by_id("1").expect_err("no translation");
    assert!(matches!(err.as_ref(), SettingError::NotFound { id } if id == "1"));
}

#[test]
fn matching_flags_filters_in_registry_order() {
    let mut registry = ProviderRegistry::default();
    let unenroll = SettingFlags::RESET_ON_UNENROLL;
    for (id, flags) in [
        ("Dfci.A.Enable", unenroll),
        ("Dfci.B.Enable", SettingFlags::NO_PREBOOT_UI),
        ("Dfci.C.Enable", unenroll | SettingFlags::NO_PREBOOT_UI),
    ] {
        registry.register(provider(id, flags)).expect("register");
    }
    let ids: Vec<&str> = registry
        .matching_flags(unenroll)
        .map(|record| record.id().as_str())
        .collect();
    assert_eq!(ids, ["Dfci.A.Enable", "Dfci.C.Enable"]);
}

#[rstest]
#[case("7", "Device.Password.Admin", true)]
#[case("42", "Dfci.Custom.Enable", true)]
#[case("Seven", "Device.Password.Admin", false)]
#[case("9", "0Bad", false)]
fn legacy_table_validates_entries(
    #[case] legacy: &str,
    #[case] canonical: &str,
    #[case] accepted: bool,
) {
    let mut table = LegacyIdTable::builtin();
    assert_eq!(table.insert(legacy, canonical).is_ok(), accepted);
    if accepted {
        assert_eq!(
            table.translate(legacy).map(|id| id.as_str()),
            Some(canonical)
        );
    }
}

#[test]
fn legacy_table_counts_its_translations() {
    let mut table = LegacyIdTable::empty();
    assert!(table.is_empty());
    table
        .insert("9", "Dfci.Custom.Enable")
        .expect("new entry");
    table
        .insert("9", "Dfci.Other.Enable")
        .expect("replacement");
    assert_eq!(table.len(), 1);
    assert!(!table.is_empty());
    assert_eq!(LegacyIdTable::builtin().len(), 8);
}
