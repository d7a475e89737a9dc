//! NDC code cleaning.
//!
//! Product and package codes arrive from upstream exports with stray
//! whitespace, empty strings, and the literal `"nan"` left behind by
//! spreadsheet round-trips. A row keyed by any of those is unusable, so the
//! normalizer drops it before the key ever reaches a table.

/// Clean an identifier used as a table key.
///
/// Returns the trimmed code, or `None` when the value is absent, blank, or
/// the literal `"nan"` (case-insensitive). Rows whose key cleans to `None`
/// must be dropped.
pub fn clean_code(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return None;
    }
    Some(trimmed.to_string())
}

/// Clean an identifier carried as a soft reference (not a key).
///
/// Same trimming as [`clean_code`], but the row is kept either way; an
/// unusable reference simply becomes `None`.
pub fn clean_soft_code(raw: Option<&str>) -> Option<String> {
    clean_code(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        assert_eq!(clean_code(Some("  0002-0152 ")), Some("0002-0152".into()));
    }

    #[test]
    fn rejects_missing_and_blank() {
        assert_eq!(clean_code(None), None);
        assert_eq!(clean_code(Some("")), None);
        assert_eq!(clean_code(Some("   ")), None);
    }

    #[test]
    fn rejects_nan_any_case() {
        assert_eq!(clean_code(Some("nan")), None);
        assert_eq!(clean_code(Some("NaN")), None);
        assert_eq!(clean_code(Some(" NAN ")), None);
    }

    #[test]
    fn keeps_codes_containing_nan() {
        // Only the exact literal is rejected.
        assert_eq!(clean_code(Some("nan-123")), Some("nan-123".into()));
    }
}
