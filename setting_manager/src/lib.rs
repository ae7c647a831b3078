//! Registry, group resolver and typed value codec for remotely managed
//! device settings.
//!
//! Platform firmware exposes a fixed catalog of security-relevant settings to
//! an out-of-band management tool. Each setting is implemented by a
//! [`SettingProvider`] registered with a [`SettingManager`]. The manager
//! resolves identifiers to providers or to named groups of providers,
//! converts printable wire values to native bytes with [`codec`], and hands
//! every decoded write to an [`AccessControl`] collaborator that decides
//! whether it may be committed.
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU8, Ordering};
//! use setting_manager::{
//!     AuthToken, PermitAll, ProviderBuilder, SettingFlags, SettingManager, SettingType,
//!     ValueKind, fill_buffer,
//! };
//!
//! let state = Arc::new(AtomicU8::new(0));
//! let (get, set) = (Arc::clone(&state), Arc::clone(&state));
//! let camera = ProviderBuilder::new("Dfci.OnboardCameras.Enable", SettingType::Enable)
//!     .current_value(move |buf| fill_buffer(buf, &[get.load(Ordering::SeqCst)]))
//!     .default_value(|buf| fill_buffer(buf, &[1]))
//!     .set_value(move |value, _| {
//!         set.store(value.first().copied().unwrap_or_default(), Ordering::SeqCst);
//!         Ok(())
//!     })
//!     .set_to_default(|| Ok(()))
//!     .build()?;
//!
//! let manager = SettingManager::builder(Arc::new(PermitAll)).build()?;
//! manager.register(Arc::new(camera))?;
//!
//! let mut flags = SettingFlags::EMPTY;
//! manager.apply(
//!     "Dfci.OnboardCameras.Enable",
//!     Some("Enabled"),
//!     Some(AuthToken::new(1)),
//!     &mut flags,
//! )?;
//! assert_eq!(
//!     manager.read("Dfci.OnboardCameras.Enable", ValueKind::Current)?.as_deref(),
//!     Some("Enabled"),
//! );
//! # Ok::<_, std::sync::Arc<setting_manager::SettingError>>(())
//! ```

mod access;
pub mod codec;
mod config;
mod error;
mod flags;
mod group;
mod id;
mod manager;
mod provider;
pub mod registry;
mod setting_type;

pub use access::{AccessControl, AuthToken, CertificateRenderer, CommitRequest, PermitAll};
pub use config::{ENV_PREFIX, ManagerConfig};
pub use error::{AggregatedErrors, ErrorIter, SettingError, SettingResult};
pub use flags::SettingFlags;
pub use group::{GroupManifest, GroupResolver, SettingGroup};
pub use id::{MAX_ID_LEN, SettingId, is_digit_leading};
pub use manager::{
    ApplyReport, MemberOutcome, ProviderDescription, SettingManager, SettingManagerBuilder,
};
pub use provider::{ClosureProvider, ProviderBuilder, SettingProvider, ValueKind, fill_buffer};
pub use registry::{LegacyIdTable, ProviderHandle, ProviderRecord, ProviderRegistry};
pub use setting_type::SettingType;
