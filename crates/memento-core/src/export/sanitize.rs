//! File-name safe titles.

/// Stand-in for entries without a usable title.
pub const UNTITLED: &str = "Untitled";

/// Longest sanitized title, in characters.
pub const MAX_TITLE_CHARS: usize = 50;

const FORBIDDEN: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Make a title safe to embed in a file name.
///
/// Surrounding whitespace is trimmed, forbidden and control characters
/// become `_`, the result is cut to [`MAX_TITLE_CHARS`] characters, and a
/// blank result becomes [`UNTITLED`]. Applying it twice gives the same result
/// as applying it once.
pub fn sanitize_title(title: Option<&str>) -> String {
    let cleaned: String = title
        .unwrap_or_default()
        .trim()
        .chars()
        .map(|c| {
            if FORBIDDEN.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .take(MAX_TITLE_CHARS)
        .collect();

    // Truncation can end on a space.
    let cleaned = cleaned.trim_end();
    if cleaned.is_empty() {
        UNTITLED.to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_forbidden_characters() {
        assert_eq!(
            sanitize_title(Some(r#"a\b/c:d*e?f"g<h>i|j"#)),
            "a_b_c_d_e_f_g_h_i_j"
        );
    }

    #[test]
    fn test_truncates_by_characters() {
        let long = "日".repeat(80);
        let sanitized = sanitize_title(Some(&long));
        assert_eq!(sanitized.chars().count(), MAX_TITLE_CHARS);
    }

    #[test]
    fn test_placeholder_for_blank() {
        assert_eq!(sanitize_title(None), UNTITLED);
        assert_eq!(sanitize_title(Some("")), UNTITLED);
        assert_eq!(sanitize_title(Some("   ")), UNTITLED);
    }

    #[test]
    fn test_trims_and_replaces_control_characters() {
        assert_eq!(sanitize_title(Some("  Trip\n")), "Trip");
        assert_eq!(sanitize_title(Some("Day\tone\u{7}")), "Day_one_");
        assert_eq!(sanitize_title(Some("\n\t ")), UNTITLED);
    }

    #[test]
    fn test_idempotent() {
        let samples = vec![
            String::new(),
            "plain".to_string(),
            "what? no: way".to_string(),
            "   leading".to_string(),
            "  Trip\n".to_string(),
            "tab\tin\u{1b}side ".to_string(),
            format!("{} trailing-space-at-cut", "a".repeat(49)),
            format!("{}tail", " ".repeat(60)),
            "x/".repeat(40),
            UNTITLED.to_string(),
        ];
        for sample in &samples {
            let once = sanitize_title(Some(sample.as_str()));
            assert_eq!(sanitize_title(Some(&once)), once, "sample {:?}", sample);
        }
    }
}
