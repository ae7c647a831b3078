//! Per-member outcomes of an apply request.

use std::sync::Arc;

use crate::{AggregatedErrors, SettingError, SettingId, SettingResult};

/// Outcome of applying a value to one provider.
#[derive(Clone, Debug)]
pub struct MemberOutcome {
    id: SettingId,
    result: SettingResult<()>,
}

impl MemberOutcome {
    pub(super) const fn new(id: SettingId, result: SettingResult<()>) -> Self {
        Self { id, result }
    }

    /// Identifier of the provider.
    #[must_use]
    pub const fn id(&self) -> &SettingId {
        &self.id
    }

    /// Result of decoding and committing the value.
    #[must_use]
    pub const fn result(&self) -> &SettingResult<()> {
        &self.result
    }
}

/// Every outcome produced by one apply request, in processing order.
///
/// A request naming a single provider yields one outcome; a group yields one
/// per member.
#[derive(Clone, Debug)]
pub struct ApplyReport {
    target: SettingId,
    group: bool,
    outcomes: Vec<MemberOutcome>,
}

impl ApplyReport {
    pub(super) const fn new(target: SettingId, group: bool) -> Self {
        Self {
            target,
            group,
            outcomes: Vec::new(),
        }
    }

    pub(super) fn record(&mut self, outcome: MemberOutcome) {
        self.outcomes.push(outcome);
    }

    /// Identifier the request resolved to.
    #[must_use]
    pub const fn target(&self) -> &SettingId {
        &self.target
    }

    /// Whether the request named a group.
    #[must_use]
    pub const fn is_group(&self) -> bool {
        self.group
    }

    /// All outcomes in processing order.
    #[must_use]
    pub fn outcomes(&self) -> &[MemberOutcome] {
        &self.outcomes
    }

    /// Outcomes that failed.
    pub fn failures(&self) -> impl Iterator<Item = &MemberOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.result.is_err())
    }

    /// Returns `true` when every outcome succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.result.is_ok())
    }

    /// Collapse to the status of the last failing member, or success.
    ///
    /// # Errors
    ///
    /// Returns the error of the last member that failed.
    pub fn into_result(self) -> SettingResult<()> {
        self.outcomes
            .into_iter()
            .rev()
            .find_map(|outcome| outcome.result.err())
            .map_or(Ok(()), Err)
    }

    /// Collapse to an aggregate of every failure, or success.
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::Aggregate`] listing each failure in
    /// processing order.
    pub fn into_aggregate_result(self) -> SettingResult<()> {
        let failures: AggregatedErrors = self
            .outcomes
            .into_iter()
            .filter_map(|outcome| outcome.result.err())
            .collect();
        if failures.is_empty() {
            return Ok(());
        }
        Err(Arc::new(SettingError::Aggregate(Box::new(failures))))
    }
}
