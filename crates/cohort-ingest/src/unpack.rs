//! Archive unpacking into per-session workspaces.
//!
//! An archive is claimed by moving it out of the inbound directory into
//! a fresh session directory before extraction. The inbound directory
//! only ever shrinks, so repeated passes never re-process an archive and
//! overlapping passes race on the rename at worst. Failed extractions
//! leave the session directory (and the claimed archive) on disk for
//! diagnostics.

use std::fs::File;
use std::io;
use std::path::Path;

use tracing::{debug, info};
use zip::ZipArchive;

use cohort_model::{Session, SessionId};

use crate::checksum;
use crate::error::{IngestError, Result};
use crate::store;

/// Name of the extraction target inside a session directory.
pub const INGRESS_SUBDIR: &str = "ingress";

/// Claim an archive and extract it into `{ingress_root}/{session}/ingress/`.
///
/// Every call creates a fresh session, so two archives landing in the
/// same scan can never mix files. The claimed archive stays in the
/// session directory; its SHA-256 is recorded for provenance.
pub fn unpack(archive_path: &Path, ingress_root: &Path) -> Result<Session> {
    let session_id = SessionId::new();
    let root_dir = ingress_root.join(session_id.to_string());
    let ingress_dir = root_dir.join(INGRESS_SUBDIR);

    let archive_name = archive_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("archive.zip"));

    store::ensure_directory(&root_dir)?;
    let claimed = root_dir.join(&archive_name);
    store::move_entry(archive_path, &claimed)?;
    info!(
        "Claimed archive {} as session {}",
        archive_name, session_id
    );

    let archive_sha256 = checksum::sha256_file(&claimed)?;
    store::ensure_directory(&ingress_dir)?;
    let extracted = extract_archive(&claimed, &ingress_dir)?;
    info!(
        "Extracted {} file(s) from {} into {}",
        extracted,
        archive_name,
        ingress_dir.display()
    );

    Ok(Session {
        id: session_id,
        archive_name,
        archive_sha256,
        root_dir,
        ingress_dir,
    })
}

/// Extract all file entries of a ZIP archive into `dest`. Returns the
/// number of files written.
fn extract_archive(archive_path: &Path, dest: &Path) -> Result<usize> {
    let file = File::open(archive_path).map_err(|e| IngestError::FileRead {
        path: archive_path.to_path_buf(),
        source: e,
    })?;
    let mut archive = ZipArchive::new(file).map_err(|e| IngestError::ArchiveOpen {
        path: archive_path.to_path_buf(),
        source: e,
    })?;

    let mut extracted = 0;
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| IngestError::ArchiveEntry {
            path: archive_path.to_path_buf(),
            index,
            source: e,
        })?;
        if entry.is_dir() {
            continue;
        }

        // Entry names are untrusted; reject anything that would land
        // outside the session workspace.
        let Some(relative) = entry.enclosed_name() else {
            return Err(IngestError::UnsafeEntryName {
                path: archive_path.to_path_buf(),
                name: entry.name().to_string(),
            });
        };

        let target = dest.join(relative);
        if let Some(parent) = target.parent() {
            store::ensure_directory(parent)?;
        }
        let mut out = File::create(&target).map_err(|e| IngestError::EntryWrite {
            path: target.clone(),
            source: e,
        })?;
        let written = io::copy(&mut entry, &mut out).map_err(|e| IngestError::EntryWrite {
            path: target.clone(),
            source: e,
        })?;
        debug!("Extracted {} ({} bytes)", entry.name(), written);
        extracted += 1;
    }

    Ok(extracted)
}
