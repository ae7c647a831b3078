//! Container for several `SettingError` values collected in one pass.

use std::error::Error;
use std::fmt;
use std::slice;
use std::sync::Arc;

use super::SettingError;

/// Errors gathered while validating configuration or fanning a write out
/// across a setting group, in the order they were recorded.
#[derive(Debug, Default)]
pub struct AggregatedErrors(Vec<Arc<SettingError>>);

impl AggregatedErrors {
    /// Wrap errors already collected by the caller.
    #[must_use]
    pub const fn new(errors: Vec<Arc<SettingError>>) -> Self {
        Self(errors)
    }

    /// Record another failure.
    pub fn push(&mut self, error: impl Into<Arc<SettingError>>) {
        self.0.push(error.into());
    }

    /// Iterate over the contained errors.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> ErrorIter<'_> {
        ErrorIter(self.0.iter())
    }

    /// The most recently recorded failure.
    #[must_use]
    pub fn last(&self) -> Option<&Arc<SettingError>> {
        self.0.last()
    }

    /// Number of errors in the aggregation.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no errors were collected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut numbered = self.0.iter().zip(1_usize..);
        if let Some((first, _)) = numbered.next() {
            write!(f, "1: {first}")?;
        }
        numbered.try_for_each(|(err, position)| write!(f, "\n{position}: {err}"))
    }
}

impl Error for AggregatedErrors {}

impl FromIterator<Arc<SettingError>> for AggregatedErrors {
    fn from_iter<I: IntoIterator<Item = Arc<SettingError>>>(errors: I) -> Self {
        Self(errors.into_iter().collect())
    }
}

/// Borrowing iterator returned by [`AggregatedErrors::iter`].
#[derive(Clone, Debug)]
pub struct ErrorIter<'a>(slice::Iter<'a, Arc<SettingError>>);

impl<'a> Iterator for ErrorIter<'a> {
    type Item = &'a SettingError;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(Arc::as_ref)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> IntoIterator for &'a AggregatedErrors {
    type Item = &'a SettingError;
    type IntoIter = ErrorIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for AggregatedErrors {
    type Item = Arc<SettingError>;
    type IntoIter = std::vec::IntoIter<Arc<SettingError>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
