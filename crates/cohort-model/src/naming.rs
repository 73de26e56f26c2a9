//! Primitives of the extracted-file naming contract:
//! `<CATEGORY>_<group_suffix>[-testcase<N>].csv`.

/// Marker that carries the test-case number in a file name.
pub const TESTCASE_MARKER: &str = "-testcase";

/// True when the name carries a `.csv` extension (compared ASCII
/// case-insensitively). Only such files participate in grouping.
pub fn has_csv_extension(name: &str) -> bool {
    csv_stem(name).is_some()
}

/// The file name with its `.csv` extension removed, or `None` for
/// non-CSV names.
pub fn csv_stem(name: &str) -> Option<&str> {
    let dot = name.len().checked_sub(4)?;
    let (stem, ext) = name.split_at(dot);
    if ext.eq_ignore_ascii_case(".csv") && !stem.is_empty() {
        Some(stem)
    } else {
        None
    }
}

/// Split a trailing `-testcase<N>` marker off a file stem.
///
/// Returns the stem without the marker plus the parsed number. Stems
/// without a well-formed marker come back unchanged with `None`; the
/// marker must sit at the very end and `<N>` must be all decimal digits.
pub fn split_testcase_marker(stem: &str) -> (&str, Option<u32>) {
    if let Some(at) = stem.rfind(TESTCASE_MARKER) {
        let digits = &stem[at + TESTCASE_MARKER.len()..];
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(number) = digits.parse::<u32>() {
                return (&stem[..at], Some(number));
            }
        }
    }
    (stem, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_extension_is_case_insensitive() {
        assert!(has_csv_extension("DEMOGRAPHIC_DATA_x.csv"));
        assert!(has_csv_extension("DEMOGRAPHIC_DATA_x.CSV"));
        assert!(!has_csv_extension("DEMOGRAPHIC_DATA_x.txt"));
        assert!(!has_csv_extension("archive.zip"));
        assert!(!has_csv_extension(".csv"));
    }

    #[test]
    fn stem_strips_only_the_extension() {
        assert_eq!(csv_stem("SCREENING_y.csv"), Some("SCREENING_y"));
        assert_eq!(csv_stem("SCREENING_y.v2.csv"), Some("SCREENING_y.v2"));
        assert_eq!(csv_stem("SCREENING_y"), None);
    }

    #[test]
    fn testcase_marker_splits_off() {
        assert_eq!(split_testcase_marker("X-testcase1"), ("X", Some(1)));
        assert_eq!(split_testcase_marker("X-testcase42"), ("X", Some(42)));
        assert_eq!(split_testcase_marker("X"), ("X", None));
    }

    #[test]
    fn malformed_markers_are_left_alone() {
        assert_eq!(split_testcase_marker("X-testcase"), ("X-testcase", None));
        assert_eq!(split_testcase_marker("X-testcaseA"), ("X-testcaseA", None));
        assert_eq!(
            split_testcase_marker("X-testcase1b"),
            ("X-testcase1b", None)
        );
        // Marker anywhere but the tail is part of the suffix.
        assert_eq!(
            split_testcase_marker("X-testcase1-final"),
            ("X-testcase1-final", None)
        );
    }

    #[test]
    fn oversized_numbers_do_not_parse() {
        let stem = "X-testcase99999999999999999999";
        assert_eq!(split_testcase_marker(stem), (stem, None));
    }
}
