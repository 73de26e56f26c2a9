use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Passed,
    Failed,
}

/// Why a group failed. Validator rejections are deliberately distinct
/// from infrastructure problems; a report reader can tell "the data is
/// bad" from "the validator never ran".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A required category marker was absent at grouping time.
    IncompleteGroup,
    /// A required payload slot was empty at dispatch time.
    MissingInput,
    /// The validator exceeded its wall-clock limit and was killed.
    Timeout,
    /// The validator ran and said no: non-zero exit or non-2xx status.
    ValidatorRejected,
    /// The validator could not be reached or spawned.
    Transport,
    /// Anything else caught at the per-group boundary.
    Internal,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureDetail {
    pub kind: FailureKind,
    pub message: String,
}

/// Result of dispatching one file group.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationOutcome {
    pub status: OutcomeStatus,
    /// Raw validator payload: combined stdout/stderr for the process
    /// variant, response body for the service variant. May be empty for
    /// failures that happen before the validator runs.
    pub output: String,
    pub failure: Option<FailureDetail>,
}

impl ValidationOutcome {
    pub fn passed(output: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Passed,
            output: output.into(),
            failure: None,
        }
    }

    pub fn failed(kind: FailureKind, message: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Failed,
            output: output.into(),
            failure: Some(FailureDetail {
                kind,
                message: message.into(),
            }),
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == OutcomeStatus::Passed
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure.as_ref().map(|detail| detail.kind)
    }
}
