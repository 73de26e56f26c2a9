use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while persisting a session report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The report payload could not be serialized.
    #[error("failed to serialize session report: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The report file could not be written.
    #[error("failed to write session report to {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_error_names_the_path() {
        let error = ReportError::Write {
            path: PathBuf::from("/data/session/report.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            error.to_string(),
            "failed to write session report to /data/session/report.json: denied"
        );
    }
}
