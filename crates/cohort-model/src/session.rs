use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one archive-unpack session.
///
/// Every archive claimed from the inbound directory gets a fresh id, so
/// two archives landing in the same scan can never collide on group keys
/// or on-disk paths.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SessionId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One successfully unpacked archive: the session workspace plus the
/// provenance of the archive it came from.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: SessionId,
    /// Base name of the claimed archive.
    pub archive_name: String,
    /// SHA-256 of the archive, computed at claim time.
    pub archive_sha256: String,
    /// Session root, `{ingress_root}/{session_id}`. The claimed archive
    /// lives here.
    pub root_dir: PathBuf,
    /// Extraction target, `{root_dir}/ingress`.
    pub ingress_dir: PathBuf,
}
