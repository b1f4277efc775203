//! Classification of free-form final-status strings.
//!
//! The backend has used two vocabularies over time (`GRANTED` / `DENIED`
//! and localized forms such as `SUKCES` or `ODMOWA - niska zgodność`), so
//! every check here is case-insensitive and tolerant of both.

use crate::models::StatusTag;

/// Status values that count as a granted entry.
pub const SUCCESS_STATUSES: &[&str] = &["GRANTED", "MATCH", "SUKCES", "OK"];

/// Substrings marking an explicit denial.
pub const DENIAL_MARKERS: &[&str] = &["DENIED", "NO_MATCH", "ODMOWA"];

/// Label shown for successful attempts.
pub const SUCCESS_LABEL: &str = "SUKCES";

/// Label shown for explicitly denied attempts.
pub const DENIAL_LABEL: &str = "ODMOWA";

/// Placeholder for an absent or empty status.
pub const MISSING_LABEL: &str = "-";

/// `true` iff the uppercased status is one of [`SUCCESS_STATUSES`].
///
/// Absent and empty statuses are not successes.
pub fn classify_success(status: Option<&str>) -> bool {
    let upper = status.unwrap_or_default().to_uppercase();
    SUCCESS_STATUSES.contains(&upper.as_str())
}

/// `true` when the uppercased status contains any of [`DENIAL_MARKERS`].
pub fn is_denial(status: Option<&str>) -> bool {
    let upper = status.unwrap_or_default().to_uppercase();
    DENIAL_MARKERS.iter().any(|marker| upper.contains(marker))
}

/// Style tag for a status: success first, then denial, otherwise neutral.
pub fn status_tag(status: Option<&str>) -> StatusTag {
    if classify_success(status) {
        StatusTag::Success
    } else if is_denial(status) {
        StatusTag::Danger
    } else {
        StatusTag::Neutral
    }
}

/// Display label for a status, using the same precedence as [`status_tag`].
pub fn status_label(status: Option<&str>) -> String {
    match status_tag(status) {
        StatusTag::Success => SUCCESS_LABEL.to_string(),
        StatusTag::Danger => DENIAL_LABEL.to_string(),
        StatusTag::Neutral => match status {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => MISSING_LABEL.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_set_is_case_insensitive() {
        for s in ["granted", "GRANTED", "Match", "sukces", "OK"] {
            assert!(classify_success(Some(s)), "{s} should be a success");
        }
    }

    #[test]
    fn test_non_success_statuses() {
        for s in ["DENIED", "no_match", ""] {
            assert!(!classify_success(Some(s)), "{s} should not be a success");
        }
        assert!(!classify_success(None));
    }

    #[test]
    fn test_success_requires_exact_member() {
        // Substrings of a success word do not count.
        assert!(!classify_success(Some("GRANTED LATE")));
        assert!(!classify_success(Some(" OK")));
    }

    #[test]
    fn test_denial_markers() {
        assert!(is_denial(Some("DENIED")));
        assert!(is_denial(Some("NO_MATCH")));
        assert!(is_denial(Some("ODMOWA - nieprawidłowy QR")));
        assert!(is_denial(Some("odmowa - niska zgodność")));
        assert!(!is_denial(Some("BŁĄD SYSTEMU")));
        assert!(!is_denial(None));
    }

    #[test]
    fn test_status_tag_precedence() {
        assert_eq!(status_tag(Some("Sukces")), StatusTag::Success);
        assert_eq!(status_tag(Some("DENIED")), StatusTag::Danger);
        assert_eq!(status_tag(Some("BŁĄD SYSTEMU")), StatusTag::Neutral);
        assert_eq!(status_tag(None), StatusTag::Neutral);
    }

    #[test]
    fn test_status_label() {
        assert_eq!(status_label(Some("GRANTED")), "SUKCES");
        assert_eq!(status_label(Some("DENIED")), "ODMOWA");
        assert_eq!(status_label(Some("ODMOWA - niska zgodność")), "ODMOWA");
        assert_eq!(status_label(Some("NO_MATCH")), "ODMOWA");
        assert_eq!(status_label(Some("BŁĄD SYSTEMU")), "BŁĄD SYSTEMU");
        assert_eq!(status_label(Some("")), "-");
        assert_eq!(status_label(None), "-");
    }
}
