//! End-to-end intake passes over real archives and a stub shell validator.

#![cfg(unix)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use cohort_cli::pipeline::run_pass;
use cohort_cli::types::PipelineConfig;
use cohort_model::{CaseId, FailureKind, OutcomeStatus};
use cohort_report::REPORT_FILE_NAME;
use cohort_validate::{ProcessConfig, ValidatorConfig};

fn build_zip(path: &Path, files: &[(&str, &str)]) {
    let file = fs::File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    for (name, contents) in files {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(contents.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

/// Write a stub validator invoked as `sh <script> <schema> <qe>
/// <profile> <observation> <demographic>` from the group directory.
fn write_script(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("validator.sh");
    fs::write(&path, body).unwrap();
    path
}

fn config(root: &Path, script: PathBuf) -> PipelineConfig {
    let inbound_root = root.join("inbound");
    let ingress_root = root.join("ingress");
    fs::create_dir_all(&inbound_root).unwrap();
    fs::create_dir_all(&ingress_root).unwrap();
    PipelineConfig {
        inbound_root,
        ingress_root,
        validator: ValidatorConfig::Process(ProcessConfig {
            executable: "/bin/sh".to_string(),
            script,
            schema: PathBuf::from("schema-descriptor.json"),
            timeout: Duration::from_secs(30),
        }),
        workers: 2,
    }
}

#[test]
fn complete_archive_flows_to_a_passed_report() {
    let root = TempDir::new().unwrap();
    let counter = root.path().join("invocations.log");
    let script = write_script(
        root.path(),
        &format!(
            "printf '%s\\n' \"$2\" >> \"{}\"\necho \"validated $2\"\n",
            counter.display()
        ),
    );
    let config = config(root.path(), script);
    build_zip(
        &config.inbound_root.join("submission.zip"),
        &[
            ("DEMOGRAPHIC_DATA_X-testcase1.csv", "id,name\n1,a\n"),
            ("QE_ADMIN_DATA_X-testcase1.csv", "id,org\n1,qe\n"),
            ("SCREENING_X-testcase1.csv", "id,score\n1,9\n"),
        ],
    );

    let result = run_pass(&config, 1).unwrap();

    assert_eq!(result.run_id, 1);
    assert!(result.errors.is_empty(), "errors: {:?}", result.errors);
    assert_eq!(result.sessions.len(), 1);
    let summary = &result.sessions[0];
    assert_eq!(summary.session.archive_name, "submission.zip");
    assert_eq!(summary.report.group_count(), 1);
    assert_eq!(summary.report.passed_count(), 1);
    assert_eq!(summary.report.failed_count(), 0);

    let entries = &summary.report.cases()[&CaseId::Case(1)];
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].status, OutcomeStatus::Passed);
    assert_eq!(entries[0].group.as_str(), "X");
    assert!(entries[0].output.contains("validated QE_ADMIN_DATA_X-testcase1.csv"));

    // Exactly one dispatch, from the session's group directory.
    let invocations = fs::read_to_string(&counter).unwrap();
    assert_eq!(invocations.lines().count(), 1);

    // The archive was claimed out of inbound into the session root.
    assert_eq!(fs::read_dir(&config.inbound_root).unwrap().count(), 0);
    assert!(summary.session.root_dir.join("submission.zip").exists());
    assert!(summary.session.ingress_dir.join("SCREENING_X-testcase1.csv").exists());

    let report_path = summary.session.root_dir.join(REPORT_FILE_NAME);
    assert_eq!(summary.report_path, report_path);
    let persisted: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(persisted["schema"], "cohort-intake.session-report");
    assert_eq!(persisted["run_id"], 1);
    assert_eq!(persisted["cases"]["testcase_1"][0]["status"], "passed");

    // Nothing left inbound, so the next pass is a no-op.
    let second = run_pass(&config, 2).unwrap();
    assert!(second.sessions.is_empty());
    assert!(second.errors.is_empty());
}

#[test]
fn incomplete_group_is_reported_and_siblings_still_run() {
    let root = TempDir::new().unwrap();
    let counter = root.path().join("invocations.log");
    let script = write_script(
        root.path(),
        &format!(
            "printf '%s\\n' \"$2\" >> \"{}\"\necho \"validated $2\"\n",
            counter.display()
        ),
    );
    let config = config(root.path(), script);
    build_zip(
        &config.inbound_root.join("mixed.zip"),
        &[
            ("DEMOGRAPHIC_DATA_X-testcase1.csv", "id\n1\n"),
            ("QE_ADMIN_DATA_X-testcase1.csv", "id\n1\n"),
            ("SCREENING_X-testcase1.csv", "id\n1\n"),
            ("DEMOGRAPHIC_DATA_Y.csv", "id\n2\n"),
            ("QE_ADMIN_DATA_Y.csv", "id\n2\n"),
            ("manifest.json", "{}"),
        ],
    );

    let result = run_pass(&config, 1).unwrap();

    assert!(result.errors.is_empty(), "errors: {:?}", result.errors);
    assert_eq!(result.sessions.len(), 1);
    let summary = &result.sessions[0];
    assert_eq!(summary.report.group_count(), 2);
    assert_eq!(summary.report.passed_count(), 1);
    assert_eq!(summary.report.failed_count(), 1);

    // The incomplete group lands in the unknown bucket with its exact
    // missing categories, and never reaches the validator.
    let unknown = &summary.report.cases()[&CaseId::Unknown];
    assert_eq!(unknown.len(), 1);
    assert_eq!(unknown[0].group.as_str(), "Y");
    assert_eq!(unknown[0].status, OutcomeStatus::Failed);
    let failure = unknown[0].failure.as_ref().unwrap();
    assert_eq!(failure.kind, FailureKind::IncompleteGroup);
    assert_eq!(failure.message, "incomplete file group Y: missing SCREENING");

    let invocations = fs::read_to_string(&counter).unwrap();
    assert_eq!(invocations.lines().count(), 1);

    assert!(
        summary
            .report
            .unrecognized()
            .iter()
            .any(|name| name == "manifest.json")
    );
}

#[test]
fn failing_group_never_blocks_its_siblings() {
    let root = TempDir::new().unwrap();
    let script = write_script(
        root.path(),
        "case \"$2\" in\n\
         QE_ADMIN_DATA_A-*) echo \"rejected $2\"; exit 3 ;;\n\
         esac\n\
         echo \"validated $2\"\n",
    );
    let config = config(root.path(), script);
    build_zip(
        &config.inbound_root.join("two-groups.zip"),
        &[
            ("DEMOGRAPHIC_DATA_A-testcase1.csv", "id\n1\n"),
            ("QE_ADMIN_DATA_A-testcase1.csv", "id\n1\n"),
            ("SCREENING_A-testcase1.csv", "id\n1\n"),
            ("DEMOGRAPHIC_DATA_B-testcase2.csv", "id\n2\n"),
            ("QE_ADMIN_DATA_B-testcase2.csv", "id\n2\n"),
            ("SCREENING_B-testcase2.csv", "id\n2\n"),
        ],
    );

    let result = run_pass(&config, 1).unwrap();

    assert_eq!(result.sessions.len(), 1);
    let report = &result.sessions[0].report;
    assert_eq!(report.group_count(), 2);

    let rejected = &report.cases()[&CaseId::Case(1)];
    assert_eq!(rejected[0].status, OutcomeStatus::Failed);
    let failure = rejected[0].failure.as_ref().unwrap();
    assert_eq!(failure.kind, FailureKind::ValidatorRejected);
    assert!(rejected[0].output.contains("rejected QE_ADMIN_DATA_A-testcase1.csv"));

    let passed = &report.cases()[&CaseId::Case(2)];
    assert_eq!(passed[0].status, OutcomeStatus::Passed);
    assert!(passed[0].output.contains("validated QE_ADMIN_DATA_B-testcase2.csv"));
}

#[test]
fn missing_inbound_root_aborts_the_pass() {
    let root = TempDir::new().unwrap();
    let script = write_script(root.path(), "exit 0\n");
    let mut config = config(root.path(), script);
    config.inbound_root = root.path().join("no-such-inbound");

    let error = run_pass(&config, 1).unwrap_err();
    assert!(format!("{error:#}").contains("scan inbound directory"));
}

#[test]
fn unreadable_archive_is_an_error_entry_not_an_abort() {
    let root = TempDir::new().unwrap();
    let script = write_script(
        root.path(),
        "echo \"validated $2\"\n",
    );
    let config = config(root.path(), script);
    // Not a ZIP at all; claiming succeeds, extraction fails.
    fs::write(config.inbound_root.join("broken.zip"), b"not an archive").unwrap();
    build_zip(
        &config.inbound_root.join("good.zip"),
        &[
            ("DEMOGRAPHIC_DATA_X.csv", "id\n1\n"),
            ("QE_ADMIN_DATA_X.csv", "id\n1\n"),
            ("SCREENING_X.csv", "id\n1\n"),
        ],
    );

    let result = run_pass(&config, 1).unwrap();

    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("broken.zip"));
    assert_eq!(result.sessions.len(), 1);
    assert_eq!(result.sessions[0].report.passed_count(), 1);
    // The unnumbered group reports under the unknown bucket.
    assert!(result.sessions[0].report.cases().contains_key(&CaseId::Unknown));
}
