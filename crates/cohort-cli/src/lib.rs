//! Library components of the cohort intake CLI: logging setup, the
//! single-pass pipeline, the interval scheduler, and terminal output.

pub mod logging;
pub mod pipeline;
pub mod summary;
pub mod types;
pub mod watch;
