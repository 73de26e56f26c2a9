use std::path::PathBuf;

use serde::Serialize;

use crate::naming;
use crate::session::SessionId;

/// One file materialized from an archive, recorded at extraction time.
///
/// Entries are immutable: grouping and dispatch read them, nothing
/// rewrites them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct FileEntry {
    /// Base file name, e.g. `DEMOGRAPHIC_DATA_x-testcase1.csv`.
    pub name: String,
    /// Absolute path inside the session's ingress directory.
    pub path: PathBuf,
    /// Size in bytes as written during extraction.
    pub size: u64,
    /// Session that produced this entry.
    pub session: SessionId,
}

impl FileEntry {
    pub fn is_csv(&self) -> bool {
        naming::has_csv_extension(&self.name)
    }
}
