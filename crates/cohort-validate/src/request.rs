//! Lowering a complete file group into a validation request.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use cohort_model::{FileGroup, GroupKey, PayloadSlot, SessionId};

use crate::error::{Result, ValidateError};

/// One file assigned to a payload slot.
#[derive(Debug, Clone)]
pub struct PayloadFile {
    pub name: String,
    pub path: PathBuf,
}

/// Everything a strategy needs to validate one group. Built once per
/// dispatch and consumed exactly once.
#[derive(Debug, Clone)]
pub struct ValidationRequest {
    group: GroupKey,
    session: SessionId,
    working_dir: Option<PathBuf>,
    slots: BTreeMap<PayloadSlot, PayloadFile>,
}

impl ValidationRequest {
    /// Assign the group's files to payload slots by filename prefix.
    ///
    /// Files matching no slot prefix leave their slot empty; a bare
    /// `SCREENING_` file is such a case. When two files claim the same
    /// slot the first in name order wins.
    pub fn from_group(group: &FileGroup) -> Self {
        let mut slots: BTreeMap<PayloadSlot, PayloadFile> = BTreeMap::new();
        for entry in group.entries() {
            let Some(slot) = PayloadSlot::from_file_name(&entry.name) else {
                debug!("File {} fills no payload slot", entry.name);
                continue;
            };
            if slots.contains_key(&slot) {
                debug!("Slot {} already filled, skipping {}", slot, entry.name);
                continue;
            }
            slots.insert(
                slot,
                PayloadFile {
                    name: entry.name.clone(),
                    path: entry.path.clone(),
                },
            );
        }
        Self {
            group: group.key().clone(),
            session: group.session(),
            working_dir: group.source_dir().map(Path::to_path_buf),
            slots,
        }
    }

    /// Build a request from explicit slot assignments.
    pub fn from_parts(
        group: GroupKey,
        session: SessionId,
        working_dir: Option<PathBuf>,
        slots: BTreeMap<PayloadSlot, PayloadFile>,
    ) -> Self {
        Self {
            group,
            session,
            working_dir,
            slots,
        }
    }

    pub fn group(&self) -> &GroupKey {
        &self.group
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Directory the validator runs in; the slot file names resolve
    /// relative to it.
    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    pub fn slot(&self, slot: PayloadSlot) -> Option<&PayloadFile> {
        self.slots.get(&slot)
    }

    /// Filled slots in canonical order.
    pub fn filled(&self) -> Vec<(PayloadSlot, &PayloadFile)> {
        PayloadSlot::ORDER
            .into_iter()
            .filter_map(|slot| self.slots.get(&slot).map(|file| (slot, file)))
            .collect()
    }

    /// Slots with no file, in canonical order.
    pub fn missing_slots(&self) -> Vec<PayloadSlot> {
        PayloadSlot::ORDER
            .into_iter()
            .filter(|slot| !self.slots.contains_key(slot))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Defensive re-check before invocation: a request with no payload
    /// at all never reaches a validator.
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(ValidateError::EmptyRequest {
                group: self.group.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cohort_model::FileEntry;

    fn group_of(names: &[&str]) -> FileGroup {
        let session = SessionId::new();
        let mut group = FileGroup::new(GroupKey::new("X"), session);
        for name in names {
            group.push(FileEntry {
                name: name.to_string(),
                path: PathBuf::from("/s/ingress").join(name),
                size: 1,
                session,
            });
        }
        group
    }

    #[test]
    fn slots_fill_by_prefix() {
        let group = group_of(&[
            "QE_ADMIN_DATA_X.csv",
            "SCREENING_PROFILE_DATA_X.csv",
            "SCREENING_OBSERVATION_DATA_X.csv",
            "DEMOGRAPHIC_DATA_X.csv",
        ]);
        let request = ValidationRequest::from_group(&group);
        assert!(request.missing_slots().is_empty());
        assert_eq!(
            request.slot(PayloadSlot::QeAdmin).unwrap().name,
            "QE_ADMIN_DATA_X.csv"
        );
        assert_eq!(request.working_dir(), Some(Path::new("/s/ingress")));
    }

    #[test]
    fn bare_screening_files_fill_no_slot() {
        let group = group_of(&[
            "QE_ADMIN_DATA_X.csv",
            "SCREENING_X.csv",
            "DEMOGRAPHIC_DATA_X.csv",
        ]);
        let request = ValidationRequest::from_group(&group);
        assert_eq!(
            request.missing_slots(),
            vec![PayloadSlot::ScreeningProfile, PayloadSlot::ScreeningObservation]
        );
        assert!(!request.is_empty());
    }

    #[test]
    fn first_file_in_name_order_wins_a_contested_slot() {
        let group = group_of(&["QE_ADMIN_DATA_A.csv", "QE_ADMIN_DATA_B.csv"]);
        let request = ValidationRequest::from_group(&group);
        assert_eq!(
            request.slot(PayloadSlot::QeAdmin).unwrap().name,
            "QE_ADMIN_DATA_A.csv"
        );
    }

    #[test]
    fn empty_requests_are_rejected_up_front() {
        let group = group_of(&[]);
        let request = ValidationRequest::from_group(&group);
        assert!(request.is_empty());
        assert!(matches!(
            request.ensure_not_empty().unwrap_err(),
            ValidateError::EmptyRequest { .. }
        ));
    }
}
