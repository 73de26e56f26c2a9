//! Error types for validation dispatch.
//!
//! The taxonomy keeps "the validator said no" apart from "the validator
//! never ran": rejections carry the validator's own output, while
//! spawn/transport problems carry the underlying cause.

use std::path::PathBuf;

use thiserror::Error;

use cohort_model::{GroupKey, PayloadSlot};

#[derive(Debug, Error)]
pub enum ValidateError {
    /// Required payload slots were empty at dispatch time. Checked
    /// before any work happens; distinct from grouping completeness.
    #[error("missing required validation inputs: {}", join_slots(.missing))]
    MissingInput { missing: Vec<PayloadSlot> },

    /// The request carried no payload files at all.
    #[error("validation request for group {group} has no payload files")]
    EmptyRequest { group: GroupKey },

    /// The validator executable could not be started.
    #[error("failed to spawn validator {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Monitoring the running validator failed.
    #[error("failed to monitor validator process: {source}")]
    Wait {
        #[source]
        source: std::io::Error,
    },

    /// Capturing or reading back validator output failed.
    #[error("failed to capture validator output: {source}")]
    Capture {
        #[source]
        source: std::io::Error,
    },

    /// The validator exceeded its wall-clock limit and was killed.
    #[error("validator timed out after {limit_secs}s and was killed")]
    Timeout { limit_secs: u64 },

    /// The validator ran to completion and rejected the input.
    #[error("validator exited with code {code}")]
    NonZeroExit { code: i32, output: String },

    /// The validation service answered with a non-success status.
    #[error("validation service returned HTTP {status}")]
    ServiceStatus { status: u16, body: String },

    /// A payload file could not be read for upload.
    #[error("failed to read payload file {path}: {source}")]
    PayloadRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP-level failure talking to the validation service.
    #[error("validation service request failed: {0}")]
    Http(#[from] reqwest::Error),
}

fn join_slots(slots: &[PayloadSlot]) -> String {
    slots
        .iter()
        .copied()
        .map(PayloadSlot::part_name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, ValidateError>;
