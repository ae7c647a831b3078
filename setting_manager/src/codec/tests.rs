//! Unit tests for the per-type wire codecs.
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface unexpected failures"
)]

use std::sync::Arc;

use rstest::rstest;

use super::vocabulary::{CERT_NOT_AVAILABLE, INCONSISTENT, UNSUPPORTED_VALUE};
use super::*;
use crate::{CertificateRenderer, SettingError, SettingResult, SettingType};

fn limits() -> CodecLimits {
    CodecLimits::default()
}

fn assert_invalid_value(result: SettingResult<impl std::fmt::Debug>) {
    match result {
        Err(err) => assert!(
            matches!(err.as_ref(), SettingError::InvalidValue { .. }),
            "expected InvalidValue, got {err:?}"
        ),
        Ok(value) => panic!("expected InvalidValue, decoded {value:?}"),
    }
}

#[rstest]
#[case(true)]
#[case(false)]
fn enable_round_trips_booleans(#[case] value: bool) {
    let state = EnableState::from(value);
    let decoded = enable::decode(enable::encode(state)).expect("decode rendered state");
    assert_eq!(decoded, state);
}

#[test]
fn enable_renders_but_never_accepts_inconsistent() {
    assert_eq!(enable::encode(EnableState::Inconsistent), INCONSISTENT);
    assert_eq!(
        encode(SettingType::Enable, &[INCONSISTENT_SENTINEL], None).expect("encode"),
        "Inconsistent"
    );
    assert_invalid_value(enable::decode("Inconsistent"));
}

#[rstest]
#[case("enabled")]
#[case("ENABLED")]
#[case("True")]
#[case("1")]
#[case("")]
fn enable_decoding_is_strict(#[case] wire: &str) {
    assert_invalid_value(decode(SettingType::Enable, Some(wire), limits()));
}

#[test]
fn enable_treats_other_nonzero_bytes_as_enabled() {
    assert_eq!(
        encode(SettingType::Enable, &[7], None).expect("encode"),
        "Enabled"
    );
}

#[rstest]
#[case("MsOnly", 0)]
#[case("MsPlus3rdParty", 1)]
#[case("None", 2)]
fn secure_boot_accepts_settable_selections(#[case] wire: &str, #[case] byte: u8) {
    let native = decode(SettingType::SecureBootKeyEnum, Some(wire), limits()).expect("decode");
    assert_eq!(native, vec![byte]);
    assert_eq!(
        encode(SettingType::SecureBootKeyEnum, &native, None).expect("encode"),
        wire
    );
}

#[test]
fn secure_boot_custom_is_encode_only() {
    assert_invalid_value(secure_boot::decode("Custom"));
    assert_eq!(secure_boot::encode_byte(3), "Custom");
    assert_eq!(secure_boot::encode_byte(0x42), "None");
}

#[test]
fn password_decodes_store_without_suffix() {
    assert_eq!(password::decode("ABeb").expect("decode"), vec![0xAB]);
    assert_eq!(password::decode("0102EB").expect("decode"), vec![0x01, 0x02]);
}

#[rstest]
#[case::too_short("eb")]
#[case::three_chars("Aeb")]
#[case::odd_length("ABCeb")]
#[case::missing_suffix("ABCD")]
#[case::non_hex("ZZeb")]
#[case::non_ascii("éeb")]
fn password_rejects_malformed_stores(#[case] wire: &str) {
    assert_invalid_value(password::decode(wire));
}

#[test]
fn password_encode_reports_presence_only() {
    assert_eq!(
        encode(SettingType::Password, &[1], None).expect("encode"),
        "System Password Set"
    );
    assert_eq!(
        encode(SettingType::Password, &[0], None).expect("encode"),
        "No System Password"
    );
}

#[rstest]
#[case("UsbPortEnabled")]
#[case("UsbPortHwDisabled")]
#[case("UsbPortDataDisabled")]
#[case("UsbPortAuthenticated")]
fn usb_port_states_round_trip(#[case] wire: &str) {
    let native = decode(SettingType::UsbPortEnum, Some(wire), limits()).expect("decode");
    assert_eq!(
        encode(SettingType::UsbPortEnum, &native, None).expect("encode"),
        wire
    );
}

#[test]
fn usb_port_encodes_sentinel_and_unknown_bytes() {
    assert_eq!(usb_port::encode_byte(INCONSISTENT_SENTINEL), INCONSISTENT);
    assert_eq!(usb_port::encode_byte(0x10), UNSUPPORTED_VALUE);
    assert_invalid_value(usb_port::decode("Inconsistent"));
    assert_invalid_value(usb_port::decode("UnsupportedValue"));
}

#[test]
fn string_decode_appends_terminator() {
    let native = decode(SettingType::String, Some("Asset-0042"), limits()).expect("decode");
    assert_eq!(native, b"Asset-0042\0".to_vec());
    assert_eq!(
        encode(SettingType::String, &native, None).expect("encode"),
        "Asset-0042"
    );
}

#[test]
fn string_accepts_absent_value_as_clear() {
    assert_eq!(
        decode(SettingType::String, None, limits()).expect("decode"),
        vec![0]
    );
}

#[test]
fn string_longer_than_limit_is_too_long() {
    let tight = CodecLimits::new(4);
    assert!(string::decode("abcd", tight).is_ok());
    let err = string::decode("abcde", tight).expect_err("over limit");
    assert!(matches!(err.as_ref(), SettingError::TooLong { limit: 4 }));
}

#[test]
fn string_stops_at_embedded_terminator() {
    let tight = CodecLimits::new(4);
    assert_eq!(
        string::decode("ab\0cdefgh", tight).expect("decode"),
        b"ab\0".to_vec()
    );
}

#[test]
fn string_encode_requires_terminator() {
    let err = string::encode(b"no terminator").expect_err("unterminated");
    assert!(matches!(err.as_ref(), SettingError::TooLong { .. }));
}

#[rstest]
#[case(SettingType::Binary)]
#[case(SettingType::Cert)]
fn base64_round_trips_buffers(#[case] ty: SettingType) {
    for len in 0..=16_u8 {
        let bytes: Vec<u8> = (0..len).map(|b| b.wrapping_mul(37)).collect();
        let wire = binary::encode(&bytes).expect("encode");
        assert_eq!(decode(ty, Some(&wire), limits()).expect("decode"), bytes);
    }
}

#[rstest]
#[case("not base64!")]
#[case("QUJD=")]
#[case("QQ")]
fn base64_rejects_corrupt_input(#[case] wire: &str) {
    assert_invalid_value(decode(SettingType::Binary, Some(wire), limits()));
}

#[test]
fn base64_ignores_line_breaks() {
    assert_eq!(
        decode(SettingType::Binary, Some("QUJD\nREVG\r\n"), limits()).expect("decode"),
        b"ABCDEF".to_vec()
    );
}

#[rstest]
#[case(SettingType::Enable)]
#[case(SettingType::SecureBootKeyEnum)]
#[case(SettingType::Password)]
#[case(SettingType::UsbPortEnum)]
#[case(SettingType::Binary)]
fn absent_values_are_unsupported(#[case] ty: SettingType) {
    let err = decode(ty, None, limits()).expect_err("absent value");
    assert!(matches!(err.as_ref(), SettingError::Unsupported { .. }));
}

#[test]
fn cert_absent_value_clears() {
    assert!(
        decode(SettingType::Cert, None, limits())
            .expect("decode")
            .is_empty()
    );
}

#[test]
fn oversize_input_is_rejected_before_decoding() {
    let tight = CodecLimits::new(8);
    assert_invalid_value(decode(SettingType::Binary, Some("QUJDREVGR0hJ"), tight));
    assert_invalid_value(decode(SettingType::Password, Some("0102030405eb"), tight));
}

struct Thumbprint;

impl CertificateRenderer for Thumbprint {
    fn render_thumbprint(&self, certificate: &[u8]) -> SettingResult<String> {
        if certificate.starts_with(&[0x30]) {
            Ok(String::from("AA:BB:CC"))
        } else {
            Err(Arc::new(SettingError::invalid_value(
                SettingType::Cert,
                "not DER",
            )))
        }
    }
}

#[test]
fn cert_encode_uses_renderer_or_fallback() {
    assert_eq!(
        encode(SettingType::Cert, &[0x30, 0x82], Some(&Thumbprint)).expect("encode"),
        "AA:BB:CC"
    );
    assert_eq!(
        encode(SettingType::Cert, &[0x01], Some(&Thumbprint)).expect("encode"),
        CERT_NOT_AVAILABLE
    );
    assert_eq!(
        encode(SettingType::Cert, &[0x30], None).expect("encode"),
        CERT_NOT_AVAILABLE
    );
    assert_eq!(
        encode(SettingType::Cert, &[], Some(&Thumbprint)).expect("encode"),
        ""
    );
}

#[test]
fn fixed_size_encode_needs_a_byte() {
    assert_invalid_value(encode(SettingType::UsbPortEnum, &[], None));
}
