//! Text normalization.

/// Punctuation kept through normalization. Everything else outside
/// alphanumerics and whitespace is stripped.
const PUNCT_ALLOWLIST: [char; 7] = ['\'', '-', '#', '/', ':', '@', '.'];

/// A query in both its original and normalized forms.
///
/// Entity extraction runs against the original (capitalization carries
/// signal); classification runs against the normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    pub original: String,
    pub normalized: String,
}

/// Trim, collapse whitespace, strip punctuation outside the allow-list,
/// and lowercase.
pub fn normalize(text: &str) -> NormalizedQuery {
    let original = collapse_whitespace(text.trim());
    let normalized = original
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || PUNCT_ALLOWLIST.contains(c))
        .collect::<String>()
        .to_lowercase();
    NormalizedQuery {
        original,
        normalized: collapse_whitespace(&normalized),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether `keyword` appears in `text` on word boundaries.
///
/// Works for multi-word keywords; assumes `text` is already normalized.
pub fn contains_keyword(text: &str, keyword: &str) -> bool {
    let padded = format!(" {text} ");
    let needle = format!(" {keyword} ");
    padded.contains(&needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_and_lowercases() {
        let q = normalize("  Show   me  John Smith's   tickets!  ");
        assert_eq!(q.original, "Show me John Smith's tickets!");
        assert_eq!(q.normalized, "show me john smith's tickets");
    }

    #[test]
    fn test_allowlisted_punctuation_survives() {
        let q = normalize("Reschedule WO-1042 to 2026-08-12 14:30");
        assert_eq!(q.normalized, "reschedule wo-1042 to 2026-08-12 14:30");
    }

    #[test]
    fn test_stripped_punctuation() {
        let q = normalize("What's up? (urgent!)");
        assert_eq!(q.normalized, "what's up urgent");
    }

    #[test]
    fn test_contains_keyword_word_boundaries() {
        assert!(contains_keyword("create a ticket", "create"));
        assert!(!contains_keyword("recreate a ticket", "create"));
        assert!(contains_keyword("go to the schedule", "go to"));
    }
}
