//! Primary error enum for setting registration, codec and apply flows.

use figment::Error as FigmentError;
use thiserror::Error;

use super::aggregate::AggregatedErrors;
use crate::SettingType;

/// Errors that can occur while registering, resolving, decoding, encoding or
/// committing a setting.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingError {
    /// Wire input is malformed or outside the vocabulary of its type.
    #[error("invalid value for {setting_type}: {reason}")]
    InvalidValue {
        /// Type whose decoding rules rejected the input.
        setting_type: SettingType,
        /// Human-readable explanation of the rejection.
        reason: String,
    },

    /// The operation is not supported for the request as given.
    #[error("unsupported request: {reason}")]
    Unsupported {
        /// Explanation of why the request cannot be honoured.
        reason: String,
    },

    /// No provider, group or value exists for the identifier.
    #[error("setting '{id}' not found")]
    NotFound {
        /// Identifier that failed to resolve.
        id: String,
    },

    /// A value exceeds the maximum wire size, or a string lacks a terminator.
    #[error("value exceeds the maximum size of {limit} bytes")]
    TooLong {
        /// Size limit that was exceeded.
        limit: usize,
    },

    /// Allocating a value buffer failed.
    #[error("unable to allocate {requested} bytes")]
    OutOfResources {
        /// Number of bytes that could not be reserved.
        requested: usize,
    },

    /// An encoding primitive failed unexpectedly.
    #[error("operation aborted: {reason}")]
    Aborted {
        /// Description of the failing primitive.
        reason: String,
    },

    /// A provider with the same identifier is already registered.
    #[error("a provider with id '{id}' is already registered")]
    DuplicateId {
        /// Identifier that was registered twice.
        id: String,
    },

    /// The identifier is empty, digit-leading, too long or not printable.
    #[error("invalid setting id '{id}': {reason}")]
    InvalidId {
        /// Identifier as supplied by the caller.
        id: String,
        /// Explanation of the rule that was broken.
        reason: String,
    },

    /// A provider under construction lacks one of its required operations.
    #[error("provider '{id}' is missing the {missing} operation")]
    IncompleteCapability {
        /// Identifier of the incomplete provider.
        id: String,
        /// Name of the first missing operation.
        missing: &'static str,
    },

    /// The destination buffer cannot hold the value.
    ///
    /// Providers return this from a size query so the caller can allocate
    /// `required` bytes and ask again.
    #[error("buffer too small: {required} bytes required")]
    BufferTooSmall {
        /// Number of bytes the value occupies.
        required: usize,
    },

    /// The access-control collaborator refused the mutation.
    #[error("access denied for setting '{id}'")]
    AccessDenied {
        /// Identifier of the setting that may not be changed.
        id: String,
    },

    /// Error originating from a configuration file.
    #[error("configuration file error in '{path}': {source}")]
    File {
        /// Path that triggered the configuration failure.
        path: camino::Utf8PathBuf,
        /// Underlying error reported while reading or parsing the file.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error while gathering configuration from providers.
    #[error("failed to gather configuration: {0}")]
    Gathering(#[from] Box<FigmentError>),

    /// A configuration value failed validation.
    #[error("validation failed for '{key}': {message}")]
    Validation {
        /// Configuration key that failed validation.
        key: String,
        /// Human-readable explanation of the validation failure.
        message: String,
    },

    /// Multiple errors were collected from one operation.
    #[error("multiple setting errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}
