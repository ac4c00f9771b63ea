//! Field rules: one independent (markers, normalizer) step per output key.
//!
//! An assembler is an ordered slice of [`FieldRule`]s run over the same
//! document. A rule that finds nothing produces `None` and its key stays
//! absent; there is no failure path.

use filmdex_markup::strip_markup;
use filmdex_shared::{FieldValue, Record};

/// Extracts one field from a whole (normalized) document.
pub type Extract = fn(&str) -> Option<FieldValue>;

/// A keyed extraction step.
#[derive(Clone, Copy)]
pub struct FieldRule {
    pub key: &'static str,
    pub extract: Extract,
}

impl FieldRule {
    pub const fn new(key: &'static str, extract: Extract) -> Self {
        Self { key, extract }
    }
}

impl std::fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRule").field("key", &self.key).finish()
    }
}

/// Run `rules` in order over `doc`, inserting every value produced.
///
/// Keys already present in `record` are left untouched. Returns the number
/// of fields inserted.
pub fn apply_rules(doc: &str, rules: &[FieldRule], record: &mut Record) -> usize {
    let mut inserted = 0;
    for rule in rules {
        if let Some(value) = (rule.extract)(doc)
            && record.insert(rule.key, value)
        {
            inserted += 1;
        }
    }
    inserted
}

/// Insert data-dependent `(key, value)` pairs, first occurrence winning.
pub fn apply_sections(sections: Vec<(String, FieldValue)>, record: &mut Record) -> usize {
    let mut inserted = 0;
    for (key, value) in sections {
        if record.insert(key, value) {
            inserted += 1;
        }
    }
    inserted
}

// ---------------------------------------------------------------------------
// Shared normalizers
// ---------------------------------------------------------------------------

/// `Some(List)` unless `items` is empty.
pub fn list_value(items: Vec<String>) -> Option<FieldValue> {
    (!items.is_empty()).then_some(FieldValue::List(items))
}

/// `Some(Text)` unless `text` is empty.
pub fn text_value(text: String) -> Option<FieldValue> {
    (!text.is_empty()).then_some(FieldValue::Text(text))
}

/// Split on `sep`, strip markup from each piece, drop empty pieces.
pub fn split_list(fragment: &str, sep: &str) -> Vec<String> {
    fragment
        .split(sep)
        .map(strip_markup)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Split a ` / `-separated list of qualified values, e.g.
/// `Dolby</a> <i>(some prints)</i> / DTS</a>`, into `Dolby::(some prints)`
/// and `DTS`.
///
/// With `reopen`, every piece is prefixed with `<a ` first; the fragment
/// starts inside a link tag whose opening was consumed by the start marker.
pub fn qualified_list(fragment: &str, reopen: bool) -> Vec<String> {
    fragment
        .split(" / ")
        .filter(|piece| !piece.is_empty())
        .map(|piece| {
            let piece = if reopen {
                format!("<a {piece}")
            } else {
                piece.to_string()
            };
            strip_markup(&piece.replace(" <i>", "::"))
        })
        .filter(|s| !s.is_empty())
        .collect()
}

/// Alternate title text with its note boundary marked:
/// `Matrix (Spain) [es]` → `Matrix::(Spain)::[es]`.
pub fn mark_aka(fragment: &str) -> String {
    strip_markup(fragment)
        .replacen(" (", "::(", 1)
        .replace(" [", "::[")
}

/// Strip `fragment` after re-opening the tag its start marker cut into.
pub fn reopened_text(fragment: &str) -> String {
    strip_markup(&format!("<a {fragment}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always(_: &str) -> Option<FieldValue> {
        Some(FieldValue::Int(1))
    }

    fn never(_: &str) -> Option<FieldValue> {
        None
    }

    fn second(_: &str) -> Option<FieldValue> {
        Some(FieldValue::Int(2))
    }

    #[test]
    fn rules_fill_only_found_keys_once() {
        let rules = [
            FieldRule::new("a", always),
            FieldRule::new("b", never),
            FieldRule::new("a", second),
        ];
        let mut rec = Record::new();
        assert_eq!(apply_rules("doc", &rules, &mut rec), 1);
        assert_eq!(rec.int("a"), Some(1));
        assert!(!rec.contains_key("b"));
    }

    #[test]
    fn split_list_drops_empty_pieces() {
        assert_eq!(
            split_list("<a>USA</a> /  / <b>UK</b>", " / "),
            vec!["USA".to_string(), "UK".to_string()]
        );
    }

    #[test]
    fn qualified_list_marks_notes() {
        let frag = concat!(
            r#"Dolby">Dolby</a> <i>(some prints)</i> / "#,
            r#"<a href="/List?sound-mix=DTS">DTS</a> "#,
        );
        assert_eq!(
            qualified_list(frag, true),
            vec!["Dolby::(some prints)".to_string(), "DTS".to_string()]
        );
    }

    #[test]
    fn aka_marks_note_boundaries() {
        assert_eq!(
            mark_aka("<i>Matrix</i> (Spain) [es] [alt]"),
            "Matrix::(Spain)::[es]::[alt]"
        );
        assert_eq!(mark_aka("Plain"), "Plain");
    }

    #[test]
    fn reopened_text_drops_partial_tag() {
        assert_eq!(
            reopened_text(r#"Cali">Los Angeles, California</a>"#),
            "Los Angeles, California"
        );
    }
}
