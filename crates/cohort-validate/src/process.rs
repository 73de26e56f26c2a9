//! Local-process validation: run an external validator script against
//! the group's files.

use std::io::{Read, Seek, SeekFrom};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use cohort_model::PayloadSlot;

use crate::error::{Result, ValidateError};
use crate::request::ValidationRequest;
use crate::strategy::{ProcessConfig, ValidationStrategy};

/// Fixed argv length: executable, script, schema, four payload slots.
const EXPECTED_ARG_COUNT: usize = 7;

/// How often the running validator is checked against its deadline.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct ProcessValidator {
    config: ProcessConfig,
}

impl ProcessValidator {
    pub fn new(config: ProcessConfig) -> Self {
        Self { config }
    }

    /// Build the fixed-shape command line for a request.
    ///
    /// Slot positions are stable: a missing slot contributes an empty
    /// string so the validator script always sees the same arity.
    pub fn build_command(&self, request: &ValidationRequest) -> Vec<String> {
        let mut argv = Vec::with_capacity(EXPECTED_ARG_COUNT);
        argv.push(self.config.executable.clone());
        argv.push(self.config.script.display().to_string());
        argv.push(self.config.schema.display().to_string());
        for slot in PayloadSlot::ORDER {
            let name = request
                .slot(slot)
                .map(|file| file.name.clone())
                .unwrap_or_default();
            argv.push(name);
        }
        while argv.len() < EXPECTED_ARG_COUNT {
            argv.push(String::new());
        }
        argv
    }

    /// Run the command, polling for completion until the deadline.
    ///
    /// Output goes to temp files rather than pipes so a chatty validator
    /// can never deadlock the poll loop; both streams are read back and
    /// combined after exit.
    fn run(&self, argv: &[String], request: &ValidationRequest) -> Result<String> {
        let Some(working_dir) = request.working_dir() else {
            return Err(ValidateError::EmptyRequest {
                group: request.group().clone(),
            });
        };

        let stdout_file = tempfile::tempfile().map_err(|e| ValidateError::Capture { source: e })?;
        let stderr_file = tempfile::tempfile().map_err(|e| ValidateError::Capture { source: e })?;
        let stdout_clone = stdout_file
            .try_clone()
            .map_err(|e| ValidateError::Capture { source: e })?;
        let stderr_clone = stderr_file
            .try_clone()
            .map_err(|e| ValidateError::Capture { source: e })?;

        let mut child = Command::new(&argv[0])
            .args(&argv[1..])
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout_clone))
            .stderr(Stdio::from(stderr_clone))
            .spawn()
            .map_err(|e| ValidateError::Spawn {
                program: argv[0].clone(),
                source: e,
            })?;

        let started = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if started.elapsed() >= self.config.timeout {
                        warn!(
                            "Validator exceeded {}s for group {}, killing",
                            self.config.timeout.as_secs(),
                            request.group()
                        );
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(ValidateError::Timeout {
                            limit_secs: self.config.timeout.as_secs(),
                        });
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ValidateError::Wait { source: e });
                }
            }
        };

        let output = combine_streams(stdout_file, stderr_file)?;
        if status.success() {
            Ok(output)
        } else {
            Err(ValidateError::NonZeroExit {
                code: status.code().unwrap_or(-1),
                output,
            })
        }
    }
}

impl ValidationStrategy for ProcessValidator {
    fn name(&self) -> &'static str {
        "process"
    }

    fn validate(&self, request: &ValidationRequest, correlation_id: &str) -> Result<String> {
        request.ensure_not_empty()?;
        let argv = self.build_command(request);
        debug!("[{}] Running validator: {}", correlation_id, argv.join(" "));
        let started = Instant::now();
        let output = self.run(&argv, request)?;
        debug!(
            "[{}] Validator finished in {} ms ({} bytes of output)",
            correlation_id,
            started.elapsed().as_millis(),
            output.len()
        );
        Ok(output)
    }
}

/// Read both capture files back and merge them, stdout first.
fn combine_streams(mut stdout_file: std::fs::File, mut stderr_file: std::fs::File) -> Result<String> {
    let mut output = String::new();
    stdout_file
        .seek(SeekFrom::Start(0))
        .and_then(|_| stdout_file.read_to_string(&mut output))
        .map_err(|e| ValidateError::Capture { source: e })?;

    let mut stderr = String::new();
    stderr_file
        .seek(SeekFrom::Start(0))
        .and_then(|_| stderr_file.read_to_string(&mut stderr))
        .map_err(|e| ValidateError::Capture { source: e })?;

    if !stderr.is_empty() {
        if !output.is_empty() && !output.ends_with('\n') {
            output.push('\n');
        }
        output.push_str(&stderr);
    }
    Ok(output)
}
