// EventSheet - core/sheet.rs
//
// Worksheet name derivation. Excel limits names to 31 characters, rejects
// `[ ] : * ? / \`, forbids a leading or trailing apostrophe, and compares
// names case-insensitively.

use crate::util::constants::{
    FALLBACK_SHEET_NAME, FORBIDDEN_SHEET_CHARS, MAX_SHEET_NAME_LEN, RESERVED_SHEET_NAME,
    SHEET_NAME_REPLACEMENT,
};
use std::collections::HashSet;

/// Make `label` acceptable as a worksheet name (without uniqueness).
pub fn sanitize_sheet_name(label: &str) -> String {
    let replaced: String = label
        .chars()
        .map(|c| {
            if FORBIDDEN_SHEET_CHARS.contains(&c) || c.is_control() {
                SHEET_NAME_REPLACEMENT
            } else {
                c
            }
        })
        .collect();
    let trimmed = replaced.trim().trim_matches('\'');
    let truncated = truncate_chars(trimmed, MAX_SHEET_NAME_LEN).trim_end();
    let name = truncated.trim_end_matches('\'');
    if name.is_empty() {
        FALLBACK_SHEET_NAME.to_string()
    } else if name.eq_ignore_ascii_case(RESERVED_SHEET_NAME) {
        // Excel reserves "History" for change tracking.
        format!("{name}{SHEET_NAME_REPLACEMENT}")
    } else {
        name.to_string()
    }
}

/// Assign a unique, valid worksheet name to each label, in order.
///
/// A clash (case-insensitive) gets a " (n)" suffix; the base is shortened so
/// the suffixed name still fits the length limit.
pub fn assign_sheet_names<'a, I>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut taken: HashSet<String> = HashSet::new();
    let mut names = Vec::new();

    for label in labels {
        let base = sanitize_sheet_name(label);
        let mut candidate = base.clone();
        let mut n = 2usize;
        while taken.contains(&candidate.to_lowercase()) {
            let suffix = format!(" ({n})");
            let room = MAX_SHEET_NAME_LEN.saturating_sub(suffix.chars().count());
            candidate = format!("{}{suffix}", truncate_chars(&base, room).trim_end());
            n += 1;
        }
        taken.insert(candidate.to_lowercase());
        names.push(candidate);
    }

    names
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_label_unchanged() {
        assert_eq!(sanitize_sheet_name("Admin privileges"), "Admin privileges");
    }

    #[test]
    fn test_long_label_truncated() {
        let name = sanitize_sheet_name("Administrator privileges granted to user");
        assert_eq!(name.chars().count(), MAX_SHEET_NAME_LEN);
        assert_eq!(name, "Administrator privileges grante");
    }

    #[test]
    fn test_forbidden_chars_replaced() {
        assert_eq!(sanitize_sheet_name("a/b:c*d?e[f]g\\h"), "a_b_c_d_e_f_g_h");
    }

    #[test]
    fn test_apostrophes_and_empty() {
        assert_eq!(sanitize_sheet_name("'quoted'"), "quoted");
        assert_eq!(sanitize_sheet_name("''"), FALLBACK_SHEET_NAME);
        assert_eq!(sanitize_sheet_name("   "), FALLBACK_SHEET_NAME);
    }

    #[test]
    fn test_reserved_name_altered() {
        assert_eq!(sanitize_sheet_name("History"), "History_");
    }

    #[test]
    fn test_multibyte_truncation() {
        let name = sanitize_sheet_name(&"ü".repeat(40));
        assert_eq!(name.chars().count(), MAX_SHEET_NAME_LEN);
    }

    #[test]
    fn test_duplicates_get_suffix() {
        let names = assign_sheet_names(["Email sent", "email SENT", "Email sent"]);
        assert_eq!(names, vec!["Email sent", "email SENT (2)", "Email sent (3)"]);
    }

    #[test]
    fn test_truncated_duplicates_stay_within_limit() {
        let long_a = "Database connection established on primary";
        let long_b = "Database connection established on replica";
        let names = assign_sheet_names([long_a, long_b]);
        assert_ne!(names[0], names[1]);
        for name in &names {
            assert!(name.chars().count() <= MAX_SHEET_NAME_LEN, "{name}");
        }
        assert!(names[1].ends_with(" (2)"));
    }
}
