//! One pass over the inbound directory: claim each waiting archive into
//! a fresh session, group the extracted files, dispatch complete groups
//! to the configured validator, and persist a per-session report.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, trace, warn};

use cohort_ingest::store::{collect_entries, list_archives};
use cohort_ingest::{accumulate, check_completeness, unpack};
use cohort_model::FileGroup;
use cohort_report::{AggregatedReport, write_session_report};
use cohort_validate::{DispatchOptions, ValidationStrategy, build_validator, dispatch_groups};

use crate::logging::redact_value;
use crate::types::{PassResult, PipelineConfig, SessionSummary};

/// Process every archive currently waiting in the inbound directory.
///
/// A missing inbound directory aborts the pass; any other per-archive
/// failure is recorded in the result and the pass continues with the
/// next archive.
pub fn run_pass(config: &PipelineConfig, run_id: u64) -> Result<PassResult> {
    let pass_span = info_span!("pass", run_id);
    let _pass_guard = pass_span.enter();
    let started = Instant::now();

    let validator = build_validator(&config.validator).context("configure validator")?;
    let archives = list_archives(&config.inbound_root).context("scan inbound directory")?;
    debug!(
        inbound = %config.inbound_root.display(),
        archive_count = archives.len(),
        "inbound scan complete"
    );

    let mut sessions = Vec::new();
    let mut errors = Vec::new();
    for archive in &archives {
        match process_archive(config, validator.as_ref(), archive, run_id) {
            Ok(Some(summary)) => sessions.push(summary),
            Ok(None) => {}
            Err(error) => {
                warn!(archive = %archive.display(), %error, "archive processing failed");
                errors.push(format!("{}: {error:#}", archive.display()));
            }
        }
    }

    let result = PassResult {
        run_id,
        sessions,
        errors,
        duration: started.elapsed(),
    };
    info!(
        run_id,
        session_count = result.sessions.len(),
        error_count = result.errors.len(),
        duration_ms = result.duration.as_millis(),
        "pass complete"
    );
    Ok(result)
}

/// Claim and fully process one archive. Returns `Ok(None)` when the
/// archive was gone by claim time (another pass won the race).
fn process_archive(
    config: &PipelineConfig,
    validator: &dyn ValidationStrategy,
    archive: &Path,
    run_id: u64,
) -> Result<Option<SessionSummary>> {
    let session = match unpack(archive, &config.ingress_root) {
        Ok(session) => session,
        Err(error) if error.is_vanished() => {
            debug!(archive = %archive.display(), "archive claimed by another pass");
            return Ok(None);
        }
        Err(error) => return Err(error).context("unpack archive"),
    };

    let session_span = info_span!(
        "session",
        session_id = %session.id,
        archive = %session.archive_name
    );
    let _session_guard = session_span.enter();
    let session_start = Instant::now();

    let entries =
        collect_entries(&session.ingress_dir, session.id).context("collect extracted files")?;
    let grouping = accumulate(entries);

    let mut report = AggregatedReport::new();
    for entry in &grouping.unrecognized {
        report.record_unrecognized(entry.name.clone());
    }

    let mut ready: Vec<&FileGroup> = Vec::new();
    for group in grouping.groups.values() {
        if group.has_case_conflict() {
            warn!(
                group = %group.key(),
                "files disagree on testcase marker; first in name order wins"
            );
        }
        match check_completeness(group) {
            Ok(()) => ready.push(group),
            Err(incomplete) => {
                warn!(group = %group.key(), %incomplete, "group skipped");
                report.record_incomplete(group, &incomplete);
            }
        }
    }
    info!(
        group_count = grouping.group_count(),
        ready = ready.len(),
        unrecognized = grouping.unrecognized.len(),
        "grouping complete"
    );

    let mut outcomes = dispatch_groups(
        validator,
        &ready,
        &DispatchOptions {
            workers: config.workers,
        },
    );
    for group in &ready {
        if let Some(outcome) = outcomes.remove(group.key()) {
            trace!(
                group = %group.key(),
                output = redact_value(&outcome.output),
                "validator output"
            );
            report.record_outcome(group, outcome);
        }
    }

    let report_path =
        write_session_report(run_id, &session, &report).context("persist session report")?;
    info!(
        passed = report.passed_count(),
        failed = report.failed_count(),
        report = %report_path.display(),
        duration_ms = session_start.elapsed().as_millis(),
        "session complete"
    );

    Ok(Some(SessionSummary {
        session,
        report,
        report_path,
    }))
}
