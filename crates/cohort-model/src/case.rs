use std::fmt;

use serde::{Serialize, Serializer};

use crate::naming;

/// Report bucket for a file group, derived from the `-testcase<N>`
/// marker in its file names. Groups without a derivable number are filed
/// under [`CaseId::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CaseId {
    Case(u32),
    Unknown,
}

impl CaseId {
    /// Derive a case id from one file name. Non-CSV names and names
    /// without a well-formed marker yield `Unknown`.
    pub fn from_file_name(name: &str) -> CaseId {
        let Some(stem) = naming::csv_stem(name) else {
            return CaseId::Unknown;
        };
        match naming::split_testcase_marker(stem) {
            (_, Some(number)) => CaseId::Case(number),
            (_, None) => CaseId::Unknown,
        }
    }

    /// The label used as a report key: `testcase_<N>` or `unknown`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseId::Case(number) => write!(f, "testcase_{number}"),
            CaseId::Unknown => f.write_str("unknown"),
        }
    }
}

// Case ids key report maps, so they serialize as their label.
impl Serialize for CaseId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
