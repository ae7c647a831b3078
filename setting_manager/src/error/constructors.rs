//! Constructors and aggregation helpers for `SettingError`.

use std::sync::Arc;

use figment::Error as FigmentError;

use super::{AggregatedErrors, SettingError};
use crate::SettingType;

impl SettingError {
    /// Tries to build a [`SettingError`] from an iterator of errors.
    ///
    /// The iterator is consumed eagerly. It returns:
    /// * `None` when no errors are supplied;
    /// * the inner error when a single [`Arc`] is uniquely owned;
    /// * [`Self::Aggregate`] containing that single [`Arc`] when the error is
    ///   already shared; and
    /// * [`Self::Aggregate`] combining every error for two or more inputs.
    #[must_use]
    pub fn try_aggregate<I, E>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        let mut arcs: Vec<Arc<Self>> = errors.into_iter().map(Into::into).collect();
        if arcs.len() > 1 {
            return Some(Self::Aggregate(Box::new(AggregatedErrors::new(arcs))));
        }
        let last = arcs.pop()?;
        Some(match Arc::try_unwrap(last) {
            Ok(err) => err,
            Err(shared) => Self::Aggregate(Box::new(AggregatedErrors::new(vec![shared]))),
        })
    }

    /// Build an `InvalidValue` error for `setting_type`.
    ///
    /// # Examples
    ///
    /// ```
    /// use setting_manager::{SettingError, SettingType};
    /// let e = SettingError::invalid_value(SettingType::Enable, "unknown token");
    /// assert!(matches!(e, SettingError::InvalidValue { .. }));
    /// ```
    #[must_use]
    pub fn invalid_value(setting_type: SettingType, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            setting_type,
            reason: reason.into(),
        }
    }

    /// Build an `Unsupported` error.
    #[must_use]
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self::Unsupported {
            reason: reason.into(),
        }
    }

    /// Build a `NotFound` error for `id`.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Build an `Aborted` error.
    #[must_use]
    pub fn aborted(reason: impl Into<String>) -> Self {
        Self::Aborted {
            reason: reason.into(),
        }
    }

    /// Build an `InvalidId` error.
    #[must_use]
    pub fn invalid_id(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidId {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Build a `Validation` error for a configuration key.
    #[must_use]
    pub fn validation(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Construct a gathering error from a [`figment::Error`].
    #[must_use]
    pub fn gathering(source: FigmentError) -> Self {
        Self::Gathering(Box::new(source))
    }

    /// Returns the byte count carried by a `BufferTooSmall` error.
    ///
    /// # Examples
    ///
    /// ```
    /// use setting_manager::SettingError;
    /// let e = SettingError::BufferTooSmall { required: 12 };
    /// assert_eq!(e.required_size(), Some(12));
    /// assert_eq!(SettingError::not_found("x").required_size(), None);
    /// ```
    #[must_use]
    pub const fn required_size(&self) -> Option<usize> {
        match self {
            Self::BufferTooSmall { required } => Some(*required),
            _ => None,
        }
    }
}

impl From<FigmentError> for SettingError {
    fn from(e: FigmentError) -> Self {
        Self::gathering(e)
    }
}
