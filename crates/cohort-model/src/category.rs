use std::fmt;

use serde::Serialize;

/// A required file category within a cohort group.
///
/// Completeness of a [`crate::FileGroup`] is defined over exactly this set:
/// a group is complete when all three category markers appear among its
/// file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "DEMOGRAPHIC_DATA")]
    Demographic,
    #[serde(rename = "QE_ADMIN_DATA")]
    QeAdmin,
    #[serde(rename = "SCREENING")]
    Screening,
}

impl Category {
    /// All required categories, in reporting order.
    pub const REQUIRED: [Category; 3] =
        [Category::Demographic, Category::QeAdmin, Category::Screening];

    /// The filename token for this category.
    pub fn token(self) -> &'static str {
        match self {
            Category::Demographic => "DEMOGRAPHIC_DATA",
            Category::QeAdmin => "QE_ADMIN_DATA",
            Category::Screening => "SCREENING",
        }
    }

    /// Match a file name against the `<CATEGORY>_` marker set.
    pub fn from_file_name(name: &str) -> Option<Category> {
        Category::REQUIRED
            .into_iter()
            .find(|category| has_marker(name, category.token()))
    }
}

fn has_marker(name: &str, token: &str) -> bool {
    name.strip_prefix(token)
        .is_some_and(|rest| rest.starts_with('_'))
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// One of the four fixed payload slots a validator accepts.
///
/// Slots are matched by filename prefix and handed to validators in
/// canonical order: QE admin, screening profile, screening observation,
/// demographic. The slot set is deliberately finer-grained than
/// [`Category`]: grouping recognizes three markers, dispatch fills four
/// slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadSlot {
    QeAdmin,
    ScreeningProfile,
    ScreeningObservation,
    Demographic,
}

impl PayloadSlot {
    /// All slots in canonical argv/form order.
    pub const ORDER: [PayloadSlot; 4] = [
        PayloadSlot::QeAdmin,
        PayloadSlot::ScreeningProfile,
        PayloadSlot::ScreeningObservation,
        PayloadSlot::Demographic,
    ];

    /// Filename prefix that assigns a file to this slot.
    pub fn file_prefix(self) -> &'static str {
        match self {
            PayloadSlot::QeAdmin => "QE_ADMIN_DATA_",
            PayloadSlot::ScreeningProfile => "SCREENING_PROFILE_DATA_",
            PayloadSlot::ScreeningObservation => "SCREENING_OBSERVATION_DATA_",
            PayloadSlot::Demographic => "DEMOGRAPHIC_DATA_",
        }
    }

    /// Multipart part name used by the remote validation service.
    pub fn part_name(self) -> &'static str {
        match self {
            PayloadSlot::QeAdmin => "QE_ADMIN_DATA_FILE",
            PayloadSlot::ScreeningProfile => "SCREENING_PROFILE_DATA_FILE",
            PayloadSlot::ScreeningObservation => "SCREENING_OBSERVATION_DATA_FILE",
            PayloadSlot::Demographic => "DEMOGRAPHIC_DATA_FILE",
        }
    }

    /// Assign a file name to a slot by prefix, if any matches.
    pub fn from_file_name(name: &str) -> Option<PayloadSlot> {
        PayloadSlot::ORDER
            .into_iter()
            .find(|slot| name.starts_with(slot.file_prefix()))
    }
}

impl fmt::Display for PayloadSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.part_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_markers_match() {
        assert_eq!(
            Category::from_file_name("DEMOGRAPHIC_DATA_group1.csv"),
            Some(Category::Demographic)
        );
        assert_eq!(
            Category::from_file_name("QE_ADMIN_DATA_group1.csv"),
            Some(Category::QeAdmin)
        );
        assert_eq!(
            Category::from_file_name("SCREENING_group1.csv"),
            Some(Category::Screening)
        );
    }

    #[test]
    fn screening_marker_covers_profile_and_observation() {
        assert_eq!(
            Category::from_file_name("SCREENING_PROFILE_DATA_group1.csv"),
            Some(Category::Screening)
        );
        assert_eq!(
            Category::from_file_name("SCREENING_OBSERVATION_DATA_group1.csv"),
            Some(Category::Screening)
        );
    }

    #[test]
    fn marker_requires_separator() {
        assert_eq!(Category::from_file_name("SCREENINGgroup1.csv"), None);
        assert_eq!(Category::from_file_name("notes.txt"), None);
        assert_eq!(Category::from_file_name("demographic_data_x.csv"), None);
    }

    #[test]
    fn slots_match_by_prefix() {
        assert_eq!(
            PayloadSlot::from_file_name("QE_ADMIN_DATA_c1.csv"),
            Some(PayloadSlot::QeAdmin)
        );
        assert_eq!(
            PayloadSlot::from_file_name("SCREENING_PROFILE_DATA_c1.csv"),
            Some(PayloadSlot::ScreeningProfile)
        );
        assert_eq!(
            PayloadSlot::from_file_name("SCREENING_OBSERVATION_DATA_c1.csv"),
            Some(PayloadSlot::ScreeningObservation)
        );
        assert_eq!(
            PayloadSlot::from_file_name("DEMOGRAPHIC_DATA_c1.csv"),
            Some(PayloadSlot::Demographic)
        );
        // A bare SCREENING_ file belongs to the screening category but
        // fills neither screening slot.
        assert_eq!(PayloadSlot::from_file_name("SCREENING_c1.csv"), None);
    }

    #[test]
    fn slot_order_is_argv_order() {
        let parts: Vec<&str> = PayloadSlot::ORDER
            .into_iter()
            .map(PayloadSlot::part_name)
            .collect();
        assert_eq!(
            parts,
            vec![
                "QE_ADMIN_DATA_FILE",
                "SCREENING_PROFILE_DATA_FILE",
                "SCREENING_OBSERVATION_DATA_FILE",
                "DEMOGRAPHIC_DATA_FILE",
            ]
        );
    }
}
