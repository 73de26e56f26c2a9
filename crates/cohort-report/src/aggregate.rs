use std::collections::BTreeMap;

use serde::Serialize;

use cohort_model::{
    CaseId, FailureDetail, FailureKind, FileGroup, GroupKey, IncompleteGroupError, OutcomeStatus,
    ValidationOutcome,
};

/// One group's fate as recorded in the session report.
#[derive(Debug, Clone, Serialize)]
pub struct CaseEntry {
    pub group: GroupKey,
    pub status: OutcomeStatus,
    pub failure: Option<FailureDetail>,
    /// Raw validator payload, empty when nothing ran.
    pub output: String,
}

/// Outcomes of one pass over a session, bucketed by test case.
///
/// Buckets are keyed by [`CaseId`], so groups whose files carry the same
/// `-testcase<N>` marker land together while unmarked groups collect
/// under the `unknown` bucket. Entries keep recording order; the buckets
/// themselves iterate in case order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregatedReport {
    cases: BTreeMap<CaseId, Vec<CaseEntry>>,
    unrecognized: Vec<String>,
}

impl AggregatedReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a dispatched outcome into the bucket for the group's case.
    pub fn record_outcome(&mut self, group: &FileGroup, outcome: ValidationOutcome) {
        let entry = CaseEntry {
            group: group.key().clone(),
            status: outcome.status,
            failure: outcome.failure,
            output: outcome.output,
        };
        self.push_entry(group.case_id(), entry);
    }

    /// Record a group that never reached a validator because required
    /// categories were missing.
    pub fn record_incomplete(&mut self, group: &FileGroup, error: &IncompleteGroupError) {
        let entry = CaseEntry {
            group: group.key().clone(),
            status: OutcomeStatus::Failed,
            failure: Some(FailureDetail {
                kind: FailureKind::IncompleteGroup,
                message: error.to_string(),
            }),
            output: String::new(),
        };
        self.push_entry(group.case_id(), entry);
    }

    /// List a file name that matched no category contract.
    pub fn record_unrecognized(&mut self, name: impl Into<String>) {
        let name = name.into();
        let at = self
            .unrecognized
            .partition_point(|existing| *existing <= name);
        self.unrecognized.insert(at, name);
    }

    fn push_entry(&mut self, case: CaseId, entry: CaseEntry) {
        self.cases.entry(case).or_default().push(entry);
    }

    pub fn cases(&self) -> &BTreeMap<CaseId, Vec<CaseEntry>> {
        &self.cases
    }

    pub fn unrecognized(&self) -> &[String] {
        &self.unrecognized
    }

    pub fn group_count(&self) -> usize {
        self.cases.values().map(Vec::len).sum()
    }

    pub fn passed_count(&self) -> usize {
        self.entries()
            .filter(|entry| entry.status == OutcomeStatus::Passed)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.entries()
            .filter(|entry| entry.status == OutcomeStatus::Failed)
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.entries()
            .any(|entry| entry.status == OutcomeStatus::Failed)
    }

    fn entries(&self) -> impl Iterator<Item = &CaseEntry> {
        self.cases.values().flatten()
    }
}
