//! Per-case aggregation of validation outcomes and session report
//! persistence.
//!
//! A pass over one session produces an [`AggregatedReport`]: every
//! group's outcome bucketed by its `-testcase<N>` marker (or the
//! `unknown` bucket when no file carries one), plus the file names that
//! matched no category contract. [`write_session_report`] persists the
//! whole thing as pretty-printed JSON in the session root.

pub mod aggregate;
pub mod error;
pub mod writer;

pub use aggregate::{AggregatedReport, CaseEntry};
pub use error::{ReportError, Result};
pub use writer::{REPORT_FILE_NAME, SessionReportPayload, write_session_report};
