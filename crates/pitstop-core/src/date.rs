//! Conversion between the display date format (`DD/MM/YYYY`) and the storage
//! format (`YYYY-MM-DD`) used by the `maintenances.date` column.
//!
//! Neither direction checks calendar correctness: `31/02/2024` becomes
//! `2024-02-31`. Ill-formed input never panics; a missing segment is rendered
//! as the literal text `undefined`.

use std::sync::OnceLock;

use regex::Regex;

const MISSING_SEGMENT: &str = "undefined";

/// Convert `DD/MM/YYYY` into `YYYY-MM-DD`.
///
/// ```
/// use pitstop_core::date::to_storage;
///
/// assert_eq!(to_storage("05/03/2024"), "2024-03-05");
/// ```
#[must_use]
pub fn to_storage(display: &str) -> String {
    let [day, month, year] = split_segments(display, '/');
    format!("{year}-{month}-{day}")
}

/// Convert `YYYY-MM-DD` into `DD/MM/YYYY`. Empty input yields an empty string.
///
/// ```
/// use pitstop_core::date::to_display;
///
/// assert_eq!(to_display("2024-03-05"), "05/03/2024");
/// assert_eq!(to_display(""), "");
/// ```
#[must_use]
pub fn to_display(storage: &str) -> String {
    if storage.is_empty() {
        return String::new();
    }
    let [year, month, day] = split_segments(storage, '-');
    format!("{day}/{month}/{year}")
}

/// Whether `value` has the `DD/MM/YYYY` shape. Digits only, no calendar check.
#[must_use]
pub fn is_display_format(value: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("Invalid regex"))
        .is_match(value)
}

fn split_segments(value: &str, separator: char) -> [&str; 3] {
    let mut parts = value.split(separator);
    let mut next = || parts.next().unwrap_or(MISSING_SEGMENT);
    [next(), next(), next()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_to_storage_and_back_is_exact() {
        let storage = to_storage("05/03/2024");
        assert_eq!(storage, "2024-03-05");
        assert_eq!(to_display(&storage), "05/03/2024");
    }

    #[test]
    fn storage_to_display_and_back_is_exact() {
        for storage in ["2023-12-31", "1999-01-01", "2024-02-29"] {
            assert_eq!(to_storage(&to_display(storage)), storage);
        }
    }

    #[test]
    fn impossible_dates_pass_through() {
        assert_eq!(to_storage("31/02/2024"), "2024-02-31");
        assert_eq!(to_display("2024-13-45"), "45/13/2024");
    }

    #[test]
    fn empty_storage_date_displays_empty() {
        assert_eq!(to_display(""), "");
    }

    #[test]
    fn missing_segments_render_as_undefined() {
        assert_eq!(to_storage("2024"), "undefined-undefined-2024");
        assert_eq!(to_storage(""), "undefined-undefined-");
        assert_eq!(to_display("2024-03"), "undefined/03/2024");
    }

    #[test]
    fn extra_segments_are_ignored() {
        assert_eq!(to_storage("01/02/2024/extra"), "2024-02-01");
    }

    #[test]
    fn display_format_shape_check() {
        assert!(is_display_format("05/03/2024"));
        assert!(is_display_format("31/02/2024"));
        assert!(!is_display_format("5/3/2024"));
        assert!(!is_display_format("2024-03-05"));
        assert!(!is_display_format(""));
    }
}
