//! Cohort intake: archive staging, unpacking, and file grouping.
//!
//! The intake side of the pipeline owns everything up to the point
//! where complete file groups exist on disk:
//!
//! - **store** — typed filesystem operations over the landing zone and
//!   session workspaces
//! - **unpack** — claim an inbound ZIP into a fresh session and extract
//!   it
//! - **grouping** — accumulate extracted files into suffix-keyed groups
//!   and check completeness
//!
//! File contents are opaque at this layer; only names and sizes matter.

pub mod checksum;
pub mod error;
pub mod grouping;
pub mod store;
pub mod unpack;

pub use error::{IngestError, Result};
pub use grouping::{GroupingOutcome, accumulate, check_completeness, extract_group_key};
pub use unpack::{INGRESS_SUBDIR, unpack};
