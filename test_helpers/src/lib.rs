//! Test doubles shared by the setting-manager integration and behavioural
//! suites.
//!
//! - [`MockProvider`] stores its value in memory and counts every call.
//! - [`RecordingAccess`] records commits and refuses selected settings.
//! - [`FixedThumbprint`], [`HexThumbprint`] and [`RejectingRenderer`] stand in
//!   for a certificate parser.
//! - [`with_jail`] runs configuration tests inside a [`figment::Jail`].

mod access;
mod jail;
mod provider;
mod renderer;

pub use access::{CommitRecord, RecordingAccess};
pub use jail::{jail_error, with_jail, write_config};
pub use provider::{MockHandle, MockProvider};
pub use renderer::{FixedThumbprint, HexThumbprint, RejectingRenderer};
