//! Interval scheduler driving repeated passes.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};

use crate::pipeline::run_pass;
use crate::types::PipelineConfig;

/// Default time between passes.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);

/// Hands out monotonically increasing run ids, one per interval tick.
#[derive(Debug)]
pub struct Scheduler {
    interval: Duration,
    last_run_id: u64,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run_id: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Next run id. Starts at 1 and never repeats.
    pub fn next_run_id(&mut self) -> u64 {
        self.last_run_id += 1;
        self.last_run_id
    }
}

/// Scan the inbound directory forever, one pass per interval tick.
///
/// A failed pass is logged and does not stop the schedule; the next
/// tick may find the problem (say, a not-yet-created inbound directory)
/// resolved. Passes run back to back with the configured sleep between
/// them, so a slow pass delays the next tick rather than overlapping it.
pub fn watch(config: &PipelineConfig, interval: Duration) -> Result<()> {
    let mut scheduler = Scheduler::new(interval);
    info!(
        inbound = %config.inbound_root.display(),
        interval_secs = interval.as_secs(),
        "watching for inbound archives"
    );
    loop {
        let run_id = scheduler.next_run_id();
        match run_pass(config, run_id) {
            Ok(result) => {
                if result.has_errors() {
                    warn!(
                        run_id,
                        error_count = result.errors.len(),
                        "pass finished with archive errors"
                    );
                }
            }
            Err(error) => warn!(run_id, %error, "pass failed"),
        }
        thread::sleep(scheduler.interval());
    }
}
