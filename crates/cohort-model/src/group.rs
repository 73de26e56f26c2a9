use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::case::CaseId;
use crate::category::Category;
use crate::file::FileEntry;
use crate::session::SessionId;

/// Key shared by the files of one cohort: the suffix following a
/// category token, with the testcase marker and extension stripped.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupKey(String);

impl GroupKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Files accumulated under one [`GroupKey`] within a session.
///
/// Entries are held in sorted name order regardless of arrival order, so
/// everything derived from a group (categories, case id, argv shape) is
/// independent of how the directory listing happened to be ordered.
#[derive(Debug, Clone, Serialize)]
pub struct FileGroup {
    key: GroupKey,
    session: SessionId,
    entries: Vec<FileEntry>,
}

impl FileGroup {
    pub fn new(key: GroupKey, session: SessionId) -> Self {
        Self {
            key,
            session,
            entries: Vec::new(),
        }
    }

    pub fn key(&self) -> &GroupKey {
        &self.key
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert keeping sorted name order. Duplicate names are kept; the
    /// extractor never produces them within one session.
    pub fn push(&mut self, entry: FileEntry) {
        let at = self
            .entries
            .partition_point(|existing| existing.name <= entry.name);
        self.entries.insert(at, entry);
    }

    /// Categories whose markers appear among the entry names.
    pub fn present_categories(&self) -> Vec<Category> {
        let found: BTreeSet<Category> = self
            .entries
            .iter()
            .filter_map(|entry| Category::from_file_name(&entry.name))
            .collect();
        found.into_iter().collect()
    }

    /// Required categories with no marker in this group.
    pub fn missing_categories(&self) -> Vec<Category> {
        let present: BTreeSet<Category> = self.present_categories().into_iter().collect();
        Category::REQUIRED
            .into_iter()
            .filter(|category| !present.contains(category))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_categories().is_empty()
    }

    /// Case id for reporting: the first entry in name order that carries
    /// a marker wins; a group with no marker at all is `Unknown`.
    pub fn case_id(&self) -> CaseId {
        self.entries
            .iter()
            .map(|entry| CaseId::from_file_name(&entry.name))
            .find(|case| *case != CaseId::Unknown)
            .unwrap_or(CaseId::Unknown)
    }

    /// True when entries carry more than one distinct case marker.
    pub fn has_case_conflict(&self) -> bool {
        let cases: BTreeSet<CaseId> = self
            .entries
            .iter()
            .map(|entry| CaseId::from_file_name(&entry.name))
            .filter(|case| *case != CaseId::Unknown)
            .collect();
        cases.len() > 1
    }

    /// Directory the group's files live in; validators run with this as
    /// their working directory.
    pub fn source_dir(&self) -> Option<&Path> {
        self.entries.first().and_then(|entry| entry.path.parent())
    }
}
