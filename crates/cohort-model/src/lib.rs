//! Core data model for the screening cohort intake pipeline.
//!
//! Everything here is plain data plus the file naming contract:
//! categories and payload slots, extracted file entries, groups and
//! their completeness, sessions, case ids, and validation outcomes.
//! No I/O happens in this crate.

pub mod case;
pub mod category;
pub mod error;
pub mod file;
pub mod group;
pub mod naming;
pub mod outcome;
pub mod session;

pub use case::CaseId;
pub use category::{Category, PayloadSlot};
pub use error::IncompleteGroupError;
pub use file::FileEntry;
pub use group::{FileGroup, GroupKey};
pub use outcome::{FailureDetail, FailureKind, OutcomeStatus, ValidationOutcome};
pub use session::{Session, SessionId};
