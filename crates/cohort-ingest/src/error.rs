//! Error types for archive intake and grouping.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while staging, unpacking, or listing cohort files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Store errors ===
    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to stat a path.
    #[error("failed to check {path}: {source}")]
    PathCheck {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a file or its metadata.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to move an entry between directories.
    #[error("failed to move {from} to {to}: {source}")]
    EntryMove {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Unpack errors ===
    /// Archive could not be opened as a ZIP.
    #[error("failed to open archive {path}: {source}")]
    ArchiveOpen {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// An entry inside the archive could not be read.
    #[error("failed to read entry {index} of archive {path}: {source}")]
    ArchiveEntry {
        path: PathBuf,
        index: usize,
        #[source]
        source: zip::result::ZipError,
    },

    /// An entry name would escape the extraction directory.
    #[error("archive {path} contains unsafe entry name {name:?}")]
    UnsafeEntryName { path: PathBuf, name: String },

    /// Failed to write an extracted entry to disk.
    #[error("failed to write extracted file {path}: {source}")]
    EntryWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    /// True when the failing entry was already gone: the loser of a
    /// claim race sees this and skips the archive instead of reporting
    /// a failure.
    pub fn is_vanished(&self) -> bool {
        match self {
            Self::EntryMove { source, .. } | Self::FileRead { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}

/// Result type for intake operations.
pub type Result<T> = std::result::Result<T, IngestError>;
