//! Per-group dispatch: run the configured strategy over complete
//! groups and normalize every result into a `ValidationOutcome`.
//!
//! Errors stop at the group boundary. Whatever happens to one group,
//! its siblings still run and still report.

use std::collections::BTreeMap;
use std::time::Instant;

use crossbeam_channel::unbounded;
use tracing::{info, warn};

use cohort_model::{FailureKind, FileGroup, GroupKey, ValidationOutcome};

use crate::error::ValidateError;
use crate::request::ValidationRequest;
use crate::strategy::ValidationStrategy;

/// Default number of concurrent validator invocations.
pub const DEFAULT_WORKERS: usize = 4;

#[derive(Debug, Clone)]
pub struct DispatchOptions {
    /// Upper bound on concurrent validator invocations.
    pub workers: usize,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
        }
    }
}

/// Dispatch one group and fold any error into a failed outcome.
pub fn dispatch_group(
    validator: &dyn ValidationStrategy,
    group: &FileGroup,
    correlation_id: &str,
) -> ValidationOutcome {
    let request = ValidationRequest::from_group(group);
    let started = Instant::now();
    match validator.validate(&request, correlation_id) {
        Ok(output) => {
            info!(
                "[{}] Group {} passed {} validation in {} ms",
                correlation_id,
                group.key(),
                validator.name(),
                started.elapsed().as_millis()
            );
            ValidationOutcome::passed(output)
        }
        Err(err) => {
            warn!(
                "[{}] Group {} failed {} validation: {}",
                correlation_id,
                group.key(),
                validator.name(),
                err
            );
            failure_outcome(err)
        }
    }
}

/// Dispatch many groups over a bounded worker pool.
///
/// Results come back keyed and sorted, so output order never depends on
/// worker scheduling.
pub fn dispatch_groups(
    validator: &dyn ValidationStrategy,
    groups: &[&FileGroup],
    options: &DispatchOptions,
) -> BTreeMap<GroupKey, ValidationOutcome> {
    if groups.is_empty() {
        return BTreeMap::new();
    }
    let workers = options.workers.clamp(1, groups.len());

    let (task_tx, task_rx) = unbounded::<&FileGroup>();
    let (result_tx, result_rx) = unbounded::<(GroupKey, ValidationOutcome)>();
    for group in groups.iter().copied() {
        let _ = task_tx.send(group);
    }
    drop(task_tx);

    std::thread::scope(|scope| {
        for _ in 0..workers {
            let task_rx = task_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                while let Ok(group) = task_rx.recv() {
                    let correlation_id = format!("{}/{}", group.session(), group.key());
                    let outcome = dispatch_group(validator, group, &correlation_id);
                    let _ = result_tx.send((group.key().clone(), outcome));
                }
            });
        }
        drop(result_tx);
        drop(task_rx);
    });

    result_rx.iter().collect()
}

/// Lower a dispatch error into the failure taxonomy. Validator output
/// travels on the outcome; everything else lands in the message.
fn failure_outcome(err: ValidateError) -> ValidationOutcome {
    let message = err.to_string();
    match err {
        ValidateError::MissingInput { .. } | ValidateError::EmptyRequest { .. } => {
            ValidationOutcome::failed(FailureKind::MissingInput, message, "")
        }
        ValidateError::Timeout { .. } => {
            ValidationOutcome::failed(FailureKind::Timeout, message, "")
        }
        ValidateError::NonZeroExit { output, .. } => {
            ValidationOutcome::failed(FailureKind::ValidatorRejected, message, output)
        }
        ValidateError::ServiceStatus { body, .. } => {
            ValidationOutcome::failed(FailureKind::ValidatorRejected, message, body)
        }
        ValidateError::Spawn { .. } | ValidateError::Http(_) => {
            ValidationOutcome::failed(FailureKind::Transport, message, "")
        }
        ValidateError::Wait { .. }
        | ValidateError::Capture { .. }
        | ValidateError::PayloadRead { .. } => {
            ValidationOutcome::failed(FailureKind::Internal, message, "")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use cohort_model::{FileEntry, SessionId};

    use super::*;
    use crate::error::Result;

    /// Deterministic stand-in: passes or fails by group key.
    struct ScriptedValidator {
        calls: AtomicUsize,
    }

    impl ValidationStrategy for ScriptedValidator {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn validate(&self, request: &ValidationRequest, _correlation_id: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if request.group().as_str().starts_with("bad") {
                return Err(ValidateError::NonZeroExit {
                    code: 1,
                    output: format!("rejected {}", request.group()),
                });
            }
            Ok(format!("validated {}", request.group()))
        }
    }

    fn complete_group(key: &str) -> FileGroup {
        let session = SessionId::new();
        let mut group = FileGroup::new(GroupKey::new(key), session);
        for prefix in ["DEMOGRAPHIC_DATA", "QE_ADMIN_DATA", "SCREENING"] {
            let name = format!("{prefix}_{key}.csv");
            group.push(FileEntry {
                name: name.clone(),
                path: PathBuf::from("/s/ingress").join(name),
                size: 1,
                session,
            });
        }
        group
    }

    #[test]
    fn one_failing_group_never_blocks_its_siblings() {
        let validator = ScriptedValidator {
            calls: AtomicUsize::new(0),
        };
        let good = complete_group("good");
        let bad = complete_group("bad");
        let groups = [&good, &bad];

        let results = dispatch_groups(&validator, &groups, &DispatchOptions { workers: 2 });

        assert_eq!(results.len(), 2);
        assert_eq!(validator.calls.load(Ordering::SeqCst), 2);
        assert!(results[&GroupKey::new("good")].is_passed());
        let failed = &results[&GroupKey::new("bad")];
        assert!(!failed.is_passed());
        assert_eq!(failed.failure_kind(), Some(FailureKind::ValidatorRejected));
        assert_eq!(failed.output, "rejected bad");
    }

    #[test]
    fn results_are_keyed_and_sorted() {
        let validator = ScriptedValidator {
            calls: AtomicUsize::new(0),
        };
        let groups: Vec<FileGroup> = ["c", "a", "b"].into_iter().map(complete_group).collect();
        let refs: Vec<&FileGroup> = groups.iter().collect();

        let results = dispatch_groups(&validator, &refs, &DispatchOptions { workers: 1 });
        let keys: Vec<&str> = results.keys().map(GroupKey::as_str).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_group_list_dispatches_nothing() {
        let validator = ScriptedValidator {
            calls: AtomicUsize::new(0),
        };
        let results = dispatch_groups(&validator, &[], &DispatchOptions::default());
        assert!(results.is_empty());
        assert_eq!(validator.calls.load(Ordering::SeqCst), 0);
    }
}
