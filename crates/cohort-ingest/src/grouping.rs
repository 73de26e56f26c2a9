//! Grouping extracted files by their shared suffix key.
//!
//! The naming contract is `<CATEGORY>_<group_suffix>[-testcase<N>].csv`.
//! Files that match no category marker (or are not CSVs at all) are
//! orphaned input, not errors: they are tracked on the side so an
//! operator can see them, and the pass continues.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use cohort_model::naming;
use cohort_model::{Category, FileEntry, FileGroup, GroupKey, IncompleteGroupError};

/// Result of one grouping pass over a session's extracted files.
#[derive(Debug, Default)]
pub struct GroupingOutcome {
    /// Groups keyed by shared suffix, in sorted key order.
    pub groups: BTreeMap<GroupKey, FileGroup>,
    /// Files the naming contract does not cover.
    pub unrecognized: Vec<FileEntry>,
}

impl GroupingOutcome {
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

/// Derive the group key from a file name, if the name follows the
/// contract: a required category token, an underscore, and a non-empty
/// suffix (testcase marker and `.csv` extension stripped).
pub fn extract_group_key(file_name: &str) -> Option<GroupKey> {
    let stem = naming::csv_stem(file_name)?;
    let category = Category::from_file_name(file_name)?;
    let suffix = &stem[category.token().len() + 1..];
    let (suffix, _) = naming::split_testcase_marker(suffix);
    if suffix.is_empty() {
        None
    } else {
        Some(GroupKey::new(suffix))
    }
}

/// Accumulate extracted files into groups.
///
/// Deterministic regardless of arrival order: groups live in a sorted
/// map and each group holds its entries in sorted name order. Calling
/// this twice over the same entries yields the same outcome.
pub fn accumulate(entries: Vec<FileEntry>) -> GroupingOutcome {
    let mut outcome = GroupingOutcome::default();
    for entry in entries {
        let Some(key) = extract_group_key(&entry.name) else {
            warn!("Unrecognized file name, leaving ungrouped: {}", entry.name);
            outcome.unrecognized.push(entry);
            continue;
        };
        debug!("File {} joins group {}", entry.name, key);
        let session = entry.session;
        outcome
            .groups
            .entry(key.clone())
            .or_insert_with(|| FileGroup::new(key, session))
            .push(entry);
    }
    outcome
}

/// Verify that every required category is present in the group.
///
/// The error carries exactly the missing categories; the caller records
/// it as this group's failure and moves on to the siblings.
pub fn check_completeness(group: &FileGroup) -> Result<(), IncompleteGroupError> {
    let missing = group.missing_categories();
    if missing.is_empty() {
        return Ok(());
    }
    Err(IncompleteGroupError {
        group_id: group.key().clone(),
        present: group.present_categories(),
        missing,
    })
}
