use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;

use cohort_model::{CaseId, Session};

use crate::aggregate::{AggregatedReport, CaseEntry};
use crate::error::{ReportError, Result};

/// File name of the persisted report inside the session root.
pub const REPORT_FILE_NAME: &str = "report.json";

const REPORT_SCHEMA: &str = "cohort-intake.session-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

/// Envelope persisted next to the session's claimed archive.
#[derive(Debug, Serialize)]
pub struct SessionReportPayload {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub run_id: u64,
    pub session: Session,
    pub group_count: usize,
    pub passed: usize,
    pub failed: usize,
    pub cases: BTreeMap<CaseId, Vec<CaseEntry>>,
    pub unrecognized: Vec<String>,
}

fn build_payload(
    run_id: u64,
    session: &Session,
    report: &AggregatedReport,
    generated_at: String,
) -> SessionReportPayload {
    SessionReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at,
        run_id,
        session: session.clone(),
        group_count: report.group_count(),
        passed: report.passed_count(),
        failed: report.failed_count(),
        cases: report.cases().clone(),
        unrecognized: report.unrecognized().to_vec(),
    }
}

/// Persist the aggregated outcomes as `report.json` in the session root
/// and return the path written.
pub fn write_session_report(
    run_id: u64,
    session: &Session,
    report: &AggregatedReport,
) -> Result<PathBuf> {
    let output_path = session.root_dir.join(REPORT_FILE_NAME);
    let payload = build_payload(run_id, session, report, Utc::now().to_rfc3339());
    let json = serde_json::to_string_pretty(&payload)?;
    fs::write(&output_path, format!("{json}\n")).map_err(|source| ReportError::Write {
        path: output_path.clone(),
        source,
    })?;
    Ok(output_path)
}
