//! Filesystem operations over the landing zone and session workspaces.
//!
//! Every operation surfaces I/O failures as typed errors; nothing here
//! swallows a filesystem problem. Callers decide whether a failure
//! aborts the pass (missing inbound root) or skips one item.

use std::path::{Path, PathBuf};

use tracing::debug;

use cohort_model::{FileEntry, SessionId};

use crate::error::{IngestError, Result};

/// Whether the path exists at all.
pub fn exists(path: &Path) -> Result<bool> {
    path.try_exists().map_err(|e| IngestError::PathCheck {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Create the directory and any missing parents.
pub fn ensure_directory(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| IngestError::DirectoryCreate {
        path: path.to_path_buf(),
        source: e,
    })
}

/// List all children of a directory, sorted by file name.
pub fn list_children(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut children = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        children.push(entry.path());
    }

    children.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(children)
}

/// List the ZIP archives sitting in a directory, sorted by file name.
pub fn list_archives(dir: &Path) -> Result<Vec<PathBuf>> {
    let archives = list_children(dir)?
        .into_iter()
        .filter(|path| path.is_file() && has_extension(path, "zip"))
        .collect();
    Ok(archives)
}

/// Move an entry, falling back to copy-and-unlink when a rename is not
/// possible (e.g. across filesystems).
pub fn move_entry(from: &Path, to: &Path) -> Result<()> {
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }
    debug!("Rename failed, copying {} to {}", from.display(), to.display());
    std::fs::copy(from, to).map_err(|e| IngestError::EntryMove {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source: e,
    })?;
    std::fs::remove_file(from).map_err(|e| IngestError::EntryMove {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source: e,
    })
}

/// Snapshot the files of a directory as session-tagged entries, sorted
/// by name. Subdirectories are not descended into.
pub fn collect_entries(dir: &Path, session: SessionId) -> Result<Vec<FileEntry>> {
    let mut entries = Vec::new();
    for path in list_children(dir)? {
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let metadata = std::fs::metadata(&path).map_err(|e| IngestError::FileRead {
            path: path.clone(),
            source: e,
        })?;
        entries.push(FileEntry {
            name: name.to_string(),
            path: path.clone(),
            size: metadata.len(),
            session,
        });
    }
    Ok(entries)
}

fn has_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn exists_distinguishes_present_and_absent() {
        let dir = TempDir::new().unwrap();
        assert!(exists(dir.path()).unwrap());
        assert!(!exists(&dir.path().join("nope")).unwrap());
    }

    #[test]
    fn list_children_is_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.csv"), "x").unwrap();
        fs::write(dir.path().join("a.csv"), "x").unwrap();
        fs::create_dir(dir.path().join("c")).unwrap();

        let children = list_children(dir.path()).unwrap();
        let names: Vec<_> = children
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv", "c"]);
    }

    #[test]
    fn list_children_reports_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = list_children(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
    }

    #[test]
    fn list_archives_filters_by_extension() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("batch.zip"), "x").unwrap();
        fs::write(dir.path().join("other.ZIP"), "x").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("folder.zip")).unwrap();

        let archives = list_archives(dir.path()).unwrap();
        assert_eq!(archives.len(), 2);
        assert!(archives.iter().all(|p| p.is_file()));
    }

    #[test]
    fn move_entry_relocates_the_file() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("in.zip");
        let to = dir.path().join("claimed.zip");
        fs::write(&from, "payload").unwrap();

        move_entry(&from, &to).unwrap();
        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "payload");
    }

    #[test]
    fn collect_entries_skips_directories_and_records_sizes() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("SCREENING_a.csv"), "12345").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let session = SessionId::new();
        let entries = collect_entries(dir.path(), session).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "SCREENING_a.csv");
        assert_eq!(entries[0].size, 5);
        assert_eq!(entries[0].session, session);
    }
}
