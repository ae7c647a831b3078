//! Group fan-out through the public API with recording doubles.
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface unexpected failures"
)]

use std::sync::Arc;

use rstest::{fixture, rstest};
use setting_manager::{
    AccessControl, AuthToken, ManagerConfig, SettingError, SettingFlags, SettingManager, SettingType,
};
use test_helpers::{MockHandle, MockProvider, RecordingAccess};

const GROUP: &str = "Dfci.AllCameras.Enable";
const FRONT: &str = "Dfci.FrontCamera.Enable";
const REAR: &str = "Dfci.RearCamera.Enable";
const IR: &str = "Dfci.IrCamera.Enable";
const TOKEN: Option<AuthToken> = Some(AuthToken::new(0xD1F0));

struct Harness {
    manager: SettingManager,
    access: Arc<RecordingAccess>,
    front: MockHandle,
    rear: MockHandle,
    ir: MockHandle,
}

fn camera(id: &str) -> MockProvider {
    MockProvider::new(id, SettingType::Enable)
        .expect("camera id is valid")
        .with_current(&[0])
        .with_default(&[1])
}

fn harness(gate: RecordingAccess) -> Harness {
    let mut config = ManagerConfig::default();
    config.groups.insert(
        GROUP.to_owned(),
        vec![FRONT.to_owned(), REAR.to_owned(), IR.to_owned()],
    );
    let access = gate.shared();
    let commits: Arc<dyn AccessControl> = access.clone();
    let manager = SettingManager::builder(commits)
        .config(config)
        .build()
        .expect("configuration is valid");
    let mut handles = Vec::new();
    for id in [FRONT, REAR, IR] {
        let provider = camera(id);
        handles.push(provider.handle());
        manager
            .register(provider.shared())
            .expect("camera registers");
    }
    let mut members = handles.into_iter();
    Harness {
        manager,
        access,
        front: members.next().expect("front handle"),
        rear: members.next().expect("rear handle"),
        ir: members.next().expect("ir handle"),
    }
}

#[fixture]
fn cameras() -> Harness {
    harness(RecordingAccess::new())
}

#[rstest]
fn group_write_reaches_every_member_in_order(cameras: Harness) {
    let mut flags = SettingFlags::EMPTY;
    cameras
        .manager
        .apply(GROUP, Some("Enabled"), TOKEN, &mut flags)
        .expect("group applies");
    assert_eq!(cameras.access.permitted_ids(), vec![FRONT, REAR, IR]);
    for handle in [&cameras.front, &cameras.rear, &cameras.ir] {
        assert_eq!(handle.current(), vec![1]);
        assert_eq!(handle.set_calls(), 1);
    }
}

#[rstest]
fn denied_member_does_not_stop_the_rest() {
    let cameras = harness(RecordingAccess::new().deny(REAR));
    let mut flags = SettingFlags::EMPTY;
    let err = cameras
        .manager
        .apply(GROUP, Some("Enabled"), TOKEN, &mut flags)
        .expect_err("rear camera is denied");
    assert!(matches!(&*err, SettingError::AccessDenied { id } if id == REAR));
    assert_eq!(cameras.front.current(), vec![1]);
    assert_eq!(cameras.ir.current(), vec![1]);
    assert_eq!(cameras.rear.set_calls(), 0);
    assert_eq!(cameras.access.commits().len(), 3);
}

#[rstest]
fn last_failing_member_decides_the_status(cameras: Harness) {
    cameras.front.fail_writes(SettingError::aborted("front write"));
    cameras.rear.fail_writes(SettingError::aborted("rear write"));
    let mut flags = SettingFlags::EMPTY;
    let err = cameras
        .manager
        .apply(GROUP, Some("Disabled"), TOKEN, &mut flags)
        .expect_err("two members fail");
    assert_eq!(err.to_string(), "operation aborted: rear write");
    assert_eq!(cameras.ir.current(), vec![0]);
    assert_eq!(cameras.ir.set_calls(), 1);
}

#[rstest]
fn report_lists_every_failure(cameras: Harness) {
    cameras.front.fail_writes(SettingError::aborted("front write"));
    cameras.ir.fail_writes(SettingError::aborted("ir write"));
    let mut flags = SettingFlags::EMPTY;
    let report = cameras
        .manager
        .apply_with_report(GROUP, Some("Enabled"), TOKEN, &mut flags)
        .expect("request resolves");
    assert!(report.is_group());
    assert_eq!(report.target().as_str(), GROUP);
    let failed: Vec<&str> = report.failures().map(|outcome| outcome.id().as_str()).collect();
    assert_eq!(failed, vec![FRONT, IR]);
    let err = report
        .into_aggregate_result()
        .expect_err("two failures aggregate");
    let SettingError::Aggregate(errors) = &*err else {
        panic!("expected aggregate error, got {err}");
    };
    assert_eq!(errors.len(), 2);
}

#[rstest]
fn invalid_value_fails_every_member_without_commits(cameras: Harness) {
    let mut flags = SettingFlags::EMPTY;
    let err = cameras
        .manager
        .apply(GROUP, Some("On"), TOKEN, &mut flags)
        .expect_err("On is not an Enable value");
    assert!(matches!(&*err, SettingError::InvalidValue { .. }));
    assert!(cameras.access.commits().is_empty());
}

#[rstest]
fn output_flags_accumulate_across_members() {
    let mut config = ManagerConfig::default();
    config
        .groups
        .insert(GROUP.to_owned(), vec![FRONT.to_owned(), REAR.to_owned()]);
    let manager = SettingManager::builder(RecordingAccess::new().shared())
        .config(config)
        .build()
        .expect("configuration is valid");
    manager
        .register(
            camera(FRONT)
                .reporting(SettingFlags::OUT_REBOOT_REQUIRED)
                .shared(),
        )
        .expect("front registers");
    manager
        .register(camera(REAR).reporting(SettingFlags::OUT_ALREADY_SET).shared())
        .expect("rear registers");
    let mut flags = SettingFlags::from_bits_retain(0x8000_0000);
    manager
        .apply(GROUP, Some("Enabled"), TOKEN, &mut flags)
        .expect("group applies");
    assert_eq!(flags.bits(), 0x8000_0003);
}

#[rstest]
fn token_reaches_access_control_unchanged() {
    let cameras = harness(RecordingAccess::new().require_token(AuthToken::new(7)));
    let mut flags = SettingFlags::EMPTY;
    let err = cameras
        .manager
        .apply(FRONT, Some("Enabled"), TOKEN, &mut flags)
        .expect_err("wrong token");
    assert!(matches!(&*err, SettingError::AccessDenied { .. }));
    let commits = cameras.access.commits();
    let record = commits.first().expect("one commit recorded");
    assert_eq!(record.token, AuthToken::new(0xD1F0));
    assert_eq!(record.setting_type, SettingType::Enable);
    assert_eq!(record.value, vec![1]);
    assert!(!record.permitted);
}
