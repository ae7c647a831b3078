//! Certificate renderers for read-path tests.

use std::sync::Arc;

use setting_manager::{CertificateRenderer, SettingError, SettingResult};

/// Renders every certificate as the same thumbprint.
#[derive(Clone, Debug)]
pub struct FixedThumbprint(pub String);

impl CertificateRenderer for FixedThumbprint {
    fn render_thumbprint(&self, _certificate: &[u8]) -> SettingResult<String> {
        Ok(self.0.clone())
    }
}

/// Renders the first `len` bytes as colon-separated upper-case hex.
#[derive(Clone, Copy, Debug)]
pub struct HexThumbprint {
    /// Number of leading bytes included in the thumbprint.
    pub len: usize,
}

impl CertificateRenderer for HexThumbprint {
    fn render_thumbprint(&self, certificate: &[u8]) -> SettingResult<String> {
        Ok(certificate
            .iter()
            .take(self.len)
            .map(|byte| hex::encode_upper([*byte]))
            .collect::<Vec<_>>()
            .join(":"))
    }
}

/// Fails to parse every certificate.
#[derive(Clone, Copy, Debug, Default)]
pub struct RejectingRenderer;

impl CertificateRenderer for RejectingRenderer {
    fn render_thumbprint(&self, certificate: &[u8]) -> SettingResult<String> {
        Err(Arc::new(SettingError::aborted(format!(
            "unparseable certificate of {} bytes",
            certificate.len()
        ))))
    }
}
