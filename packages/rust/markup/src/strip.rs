//! Tag removal and whitespace normalization.

use std::sync::LazyLock;

use regex::Regex;

use crate::entities::decode_refs;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<.+?>").expect("valid regex"));

static SPACES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Collapse every whitespace run to a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    SPACES_RE.replace_all(text, " ").trim().to_string()
}

/// Remove `<...>` tags (shortest match, no nesting awareness), then collapse
/// whitespace.
///
/// Only apply this to an isolated fragment: stripping a whole document first
/// would destroy the markers that locate its fields.
pub fn strip_markup(text: &str) -> String {
    collapse_whitespace(&TAG_RE.replace_all(text, ""))
}

/// Whole-document normalization applied right after retrieval: whitespace
/// runs (including newlines) become single spaces, then references are
/// decoded.
///
/// Leading and trailing whitespace is kept as one space rather than trimmed,
/// so markers that begin at the very start of the page still line up.
pub fn normalize_document(raw: &str) -> String {
    decode_refs(&SPACES_RE.replace_all(raw, " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_collapses() {
        assert_eq!(
            strip_markup("  <a href=\"/name/nm0000206/\">Keanu\n  Reeves</a> "),
            "Keanu Reeves"
        );
    }

    #[test]
    fn tag_free_text_only_collapses_whitespace() {
        assert_eq!(strip_markup("plain   text\twith\n\nbreaks"), "plain text with breaks");
        assert_eq!(strip_markup("already clean"), "already clean");
    }

    #[test]
    fn unterminated_tag_is_kept() {
        assert_eq!(strip_markup("a < b and c"), "a < b and c");
    }

    #[test]
    fn empty_tag_pair_is_not_a_tag() {
        assert_eq!(strip_markup("x <> y"), "x <> y");
    }

    #[test]
    fn normalize_document_decodes_after_collapsing() {
        let doc = normalize_document("<b>Tom&nbsp;&amp;\n\n Jerry</b>");
        assert_eq!(doc, "<b>Tom & Jerry</b>");
    }
}
