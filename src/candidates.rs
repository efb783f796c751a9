//! Candidate snapshots: the actionable work seen in one cycle.
//!
//! Extraction and diffing are pure. Deciding when a snapshot becomes the
//! committed baseline belongs to [`crate::revive::ReviveManager`].

use std::collections::HashSet;

use serde::Serialize;

use crate::model::{Step, WorkItem};

/// An unordered set of work items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CandidateSet(HashSet<WorkItem>);

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items in `self` that are absent from `baseline`.
    ///
    /// Items that disappeared since `baseline` are not reported.
    pub fn new_since(&self, baseline: &CandidateSet) -> CandidateSet {
        CandidateSet(self.0.difference(&baseline.0).cloned().collect())
    }

    pub fn contains(&self, item: &WorkItem) -> bool {
        self.0.contains(item)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkItem> {
        self.0.iter()
    }
}

impl FromIterator<WorkItem> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = WorkItem>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for CandidateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Sorted so log lines are stable across cycles.
        let mut items: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        items.sort();
        write!(f, "[{}]", items.join(", "))
    }
}

/// Project the steps that still need offers into a candidate set.
///
/// Only `PENDING` and `PREPARED` steps qualify; anything already launched or
/// finished is either served or done.
pub fn extract<'a, S, I>(steps: I) -> CandidateSet
where
    S: Step + 'a,
    I: IntoIterator<Item = &'a S>,
{
    steps
        .into_iter()
        .filter(|step| step.status().is_actionable())
        .map(WorkItem::from_step)
        .collect()
}
