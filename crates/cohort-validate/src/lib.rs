//! Validation dispatch for cohort file groups.
//!
//! Two interchangeable engines sit behind one [`ValidationStrategy`]
//! seam, selected at configuration time:
//!
//! - **process** — runs a local validator script with a fixed-shape
//!   argv, a hard wall-clock limit, and merged output capture
//! - **service** — uploads the group as multipart form data to a
//!   remote validation endpoint
//!
//! The dispatcher normalizes both into per-group
//! [`cohort_model::ValidationOutcome`]s; one group failing never stops
//! another.

pub mod dispatch;
pub mod error;
pub mod process;
pub mod request;
pub mod service;
pub mod strategy;

pub use dispatch::{DEFAULT_WORKERS, DispatchOptions, dispatch_group, dispatch_groups};
pub use error::{Result, ValidateError};
pub use process::ProcessValidator;
pub use request::{PayloadFile, ValidationRequest};
pub use service::ServiceValidator;
pub use strategy::{
    ProcessConfig, ServiceConfig, VALIDATION_TIMEOUT, ValidationStrategy, ValidatorConfig,
    build_validator,
};
