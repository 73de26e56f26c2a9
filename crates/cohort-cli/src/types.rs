use std::path::PathBuf;
use std::time::Duration;

use cohort_model::Session;
use cohort_report::AggregatedReport;
use cohort_validate::ValidatorConfig;

/// Everything one pass over the inbound directory needs to know.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory scanned for `.zip` archives.
    pub inbound_root: PathBuf,
    /// Directory the per-session workspaces are created under.
    pub ingress_root: PathBuf,
    pub validator: ValidatorConfig,
    /// Dispatch pool size.
    pub workers: usize,
}

/// Outcome of one pass.
#[derive(Debug)]
pub struct PassResult {
    pub run_id: u64,
    pub sessions: Vec<SessionSummary>,
    /// Archives that could not be claimed or unpacked this pass.
    pub errors: Vec<String>,
    pub duration: Duration,
}

impl PassResult {
    /// Any archive-level error this pass.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Any group recorded as failed across this pass's sessions.
    pub fn any_group_failed(&self) -> bool {
        self.sessions
            .iter()
            .any(|summary| summary.report.has_failures())
    }
}

/// One archive fully processed: the session it became plus the
/// aggregated outcomes and where they were persisted.
#[derive(Debug)]
pub struct SessionSummary {
    pub session: Session,
    pub report: AggregatedReport,
    pub report_path: PathBuf,
}
