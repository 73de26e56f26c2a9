//! Strategy seam between the dispatcher and the concrete validators.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;
use crate::process::ProcessValidator;
use crate::request::ValidationRequest;
use crate::service::ServiceValidator;

/// Wall-clock limit shared by both variants unless configured otherwise.
pub const VALIDATION_TIMEOUT: Duration = Duration::from_secs(300);

/// A pluggable validation engine.
///
/// Implementations return the validator's raw output on success and a
/// typed error otherwise; the dispatcher turns either into a per-group
/// outcome. Strategies are selected once at configuration time.
pub trait ValidationStrategy: Send + Sync {
    /// Short name for logs and reports.
    fn name(&self) -> &'static str;

    /// Validate one request. `correlation_id` ties validator output
    /// back to the session and group that produced it.
    fn validate(&self, request: &ValidationRequest, correlation_id: &str) -> Result<String>;
}

/// Configuration for the local-process variant.
#[derive(Debug, Clone)]
pub struct ProcessConfig {
    /// Interpreter to run, e.g. `python3`.
    pub executable: String,
    /// Validator script handed to the interpreter.
    pub script: PathBuf,
    /// Schema descriptor the script validates against.
    pub schema: PathBuf,
    pub timeout: Duration,
}

/// Configuration for the remote-service variant.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Service root, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Path appended to the root, e.g. `/validate`.
    pub endpoint: String,
    pub timeout: Duration,
}

/// Which validation engine a run uses.
#[derive(Debug, Clone)]
pub enum ValidatorConfig {
    Process(ProcessConfig),
    Service(ServiceConfig),
}

/// Build the configured strategy. Only the service variant can fail
/// here (HTTP client construction).
pub fn build_validator(config: &ValidatorConfig) -> Result<Box<dyn ValidationStrategy>> {
    match config {
        ValidatorConfig::Process(process) => {
            Ok(Box::new(ProcessValidator::new(process.clone())))
        }
        ValidatorConfig::Service(service) => {
            Ok(Box::new(ServiceValidator::new(service.clone())?))
        }
    }
}
