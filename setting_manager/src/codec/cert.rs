//! Certificate settings: Base64 bytes on write, a thumbprint on read.

use super::vocabulary::CERT_NOT_AVAILABLE;
use crate::CertificateRenderer;

/// Render a stored certificate for display.
///
/// An empty store renders as an empty string. Without a renderer, or when the
/// renderer cannot parse the certificate, the fixed "not available" text is
/// returned.
#[must_use]
pub fn encode(native: &[u8], renderer: Option<&dyn CertificateRenderer>) -> String {
    if native.is_empty() {
        return String::new();
    }
    let Some(renderer) = renderer else {
        tracing::warn!("no certificate renderer available");
        return CERT_NOT_AVAILABLE.to_owned();
    };
    renderer.render_thumbprint(native).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "unable to render certificate thumbprint");
        CERT_NOT_AVAILABLE.to_owned()
    })
}
