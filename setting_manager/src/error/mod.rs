//! Error types produced by the setting registry, codec and pipeline.

mod aggregate;
mod constructors;
mod types;

pub use aggregate::{AggregatedErrors, ErrorIter};
pub use types::SettingError;

use std::sync::Arc;

/// Result alias used throughout the crate.
///
/// Errors are shared behind an [`Arc`] so a single failure can be returned to
/// the caller while also being retained in a per-member [`crate::ApplyReport`].
pub type SettingResult<T> = Result<T, Arc<SettingError>>;
