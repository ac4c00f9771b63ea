//! Positional scanning primitives.
//!
//! Every page-specific field is carved out of a document by one or more
//! calls to [`find_between`] with literal marker strings, or located through
//! the tag that contains a marker with [`enclosing_tags`]. Both scan with a
//! cursor that only moves forward, so results come back in document order.

/// End marker(s) accepted by [`find_between`].
///
/// With several alternatives, the one occurring earliest after the start
/// marker wins; on a tie, the first listed.
#[derive(Debug, Clone, Copy)]
pub enum Ends<'a> {
    One(&'a str),
    Any(&'a [&'a str]),
}

impl<'a> From<&'a str> for Ends<'a> {
    fn from(end: &'a str) -> Self {
        Self::One(end)
    }
}

impl<'a> From<&'a [&'a str]> for Ends<'a> {
    fn from(ends: &'a [&'a str]) -> Self {
        Self::Any(ends)
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for Ends<'a> {
    fn from(ends: &'a [&'a str; N]) -> Self {
        Self::Any(ends.as_slice())
    }
}

impl Ends<'_> {
    /// Earliest end marker in `hay`, as (offset, marker length).
    fn earliest(&self, hay: &str) -> Option<(usize, usize)> {
        match *self {
            Ends::One(end) => hay.find(end).map(|i| (i, end.len())),
            Ends::Any(ends) => ends
                .iter()
                .filter_map(|end| hay.find(end).map(|i| (i, end.len())))
                .min_by_key(|&(i, _)| i),
        }
    }
}

/// Every fragment of `doc` lying strictly between `start` and the nearest
/// following end marker, scanning from byte offset `from`.
///
/// An offset inside a multi-byte character is rounded up to the next
/// character boundary. After each match the scan resumes just past the
/// matched end marker. A `start` with no end marker after it contributes
/// nothing.
pub fn find_between<'d, 'e>(
    doc: &'d str,
    start: &str,
    ends: impl Into<Ends<'e>>,
    from: usize,
) -> Vec<&'d str> {
    let ends = ends.into();
    let mut out = Vec::new();
    let mut cursor = from;
    while cursor < doc.len() && !doc.is_char_boundary(cursor) {
        cursor += 1;
    }

    while let Some(tail) = doc.get(cursor..) {
        let Some(bi) = tail.find(start) else {
            break;
        };
        let body_at = cursor + bi + start.len();
        let Some((ei, end_len)) = ends.earliest(&doc[body_at..]) else {
            break;
        };
        out.push(&doc[body_at..body_at + ei]);

        let next = body_at + ei + end_len;
        if next <= cursor {
            // Empty markers matched at the cursor; nothing left to find.
            break;
        }
        cursor = next;
    }

    out
}

/// All fragments between `start` and `ends`, from the beginning of `doc`.
pub fn between<'d, 'e>(doc: &'d str, start: &str, ends: impl Into<Ends<'e>>) -> Vec<&'d str> {
    find_between(doc, start, ends, 0)
}

/// The first fragment between `start` and `ends`, if any.
pub fn first_between<'d, 'e>(
    doc: &'d str,
    start: &str,
    ends: impl Into<Ends<'e>>,
) -> Option<&'d str> {
    let ends = ends.into();
    let bi = doc.find(start)?;
    let body_at = bi + start.len();
    let (ei, _) = ends.earliest(&doc[body_at..])?;
    Some(&doc[body_at..body_at + ei])
}

/// Every complete tag (`<` through `>`, inclusive) that contains `needle`.
///
/// A `>` inside a quoted attribute value does not close a tag. An
/// occurrence of `needle` that sits in text rather than inside a tag (the
/// nearest `<` before it is already closed) is skipped.
pub fn enclosing_tags<'d>(doc: &'d str, needle: &str) -> Vec<&'d str> {
    let mut out = Vec::new();
    if needle.is_empty() {
        return out;
    }
    let mut cursor = 0;

    while let Some(bi) = doc[cursor..].find(needle).map(|i| cursor + i) {
        let after = bi + needle.len();
        let Some(open) = doc[cursor..bi].rfind('<').map(|i| cursor + i) else {
            cursor = after;
            continue;
        };

        let close = match tag_end(doc, open) {
            Some(end) if end < bi => {
                cursor = after;
                continue;
            }
            Some(end) if end >= after => Some(end),
            _ => doc[after..].find('>').map(|i| after + i),
        };
        let Some(close) = close else {
            break;
        };
        out.push(&doc[open..=close]);
        cursor = close + 1;
    }

    out
}

/// Offset of the `>` closing the tag opened at `open`, skipping any `>`
/// inside a quoted attribute value.
fn tag_end(doc: &str, open: usize) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut after_equals = false;

    for (i, c) in doc[open + 1..].char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '>' => return Some(open + 1 + i),
                '"' | '\'' if after_equals => quote = Some(c),
                _ => {}
            },
        }
        if !c.is_whitespace() {
            after_equals = quote.is_none() && c == '=';
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_markers_yield_nothing() {
        assert!(between("<b>bold</b>", "<i>", "</i>").is_empty());
        assert!(between("", "<i>", "</i>").is_empty());
        assert!(between("<b>bold</b>", "<b>", &["</x>", "</y>"]).is_empty());
    }

    #[test]
    fn dangling_start_yields_nothing() {
        assert!(between("prefix <li>never closed", "<li>", "</li>").is_empty());
        // The terminated region before a dangling start still counts.
        let doc = "<li>one</li> <li>two";
        assert_eq!(between(doc, "<li>", "</li>"), vec!["one"]);
    }

    #[test]
    fn sequential_regions_in_order() {
        let doc = "<li>a</li> junk <li>b</li><li>c</li> tail";
        assert_eq!(between(doc, "<li>", "</li>"), vec!["a", "b", "c"]);
    }

    #[test]
    fn earliest_alternative_end_wins() {
        let doc = "<li>first<br>rest</li><li>second</li>";
        assert_eq!(
            between(doc, "<li>", &["</li>", "<br>"]),
            vec!["first", "second"]
        );
    }

    #[test]
    fn delimiters_never_included() {
        let doc = "[[x]] [[y]]";
        for frag in between(doc, "[[", "]]") {
            assert!(!frag.contains("[[") && !frag.contains("]]"));
        }
    }

    #[test]
    fn from_offset_skips_earlier_regions() {
        let doc = "(a) (b) (c)";
        assert_eq!(find_between(doc, "(", ")", 4), vec!["b", "c"]);
        assert!(find_between(doc, "(", ")", 100).is_empty());
    }

    #[test]
    fn from_offset_inside_a_character_rounds_up() {
        let doc = "é<li>ü</li><li>ö</li>";
        assert_eq!(find_between(doc, "<li>", "</li>", 1), vec!["ü", "ö"]);
        assert_eq!(find_between(doc, "<li>", "</li>", 7), vec!["ö"]);
    }

    #[test]
    fn first_between_matches_head_of_list() {
        let doc = "x=1; x=2;";
        assert_eq!(first_between(doc, "x=", ";"), Some("1"));
        assert_eq!(first_between(doc, "y=", ";"), None);
    }

    #[test]
    fn enclosing_tag_recovers_attribute_owner() {
        let doc = r#"<div><img src="/img/a.jpg" alt="cover" height="90"> text</div>"#;
        assert_eq!(
            enclosing_tags(doc, r#"alt="cover""#),
            vec![r#"<img src="/img/a.jpg" alt="cover" height="90">"#]
        );
    }

    #[test]
    fn enclosing_tags_collects_every_occurrence() {
        let doc = r#"<input name="arg" value="1"> <input name="arg" value="2">"#;
        let tags = enclosing_tags(doc, r#"name="arg""#);
        assert_eq!(tags.len(), 2);
        assert!(tags[1].contains(r#"value="2""#));
    }

    #[test]
    fn quoted_angle_bracket_does_not_close_the_tag() {
        let doc = r#"<img title="a>b" alt="cover" src="x.jpg"> after"#;
        assert_eq!(
            enclosing_tags(doc, r#"alt="cover""#),
            vec![r#"<img title="a>b" alt="cover" src="x.jpg">"#]
        );

        let doc = r#"<img alt="cover" title='x > y' src="x.jpg">"#;
        assert_eq!(enclosing_tags(doc, r#"alt="cover""#), vec![doc]);
    }

    #[test]
    fn apostrophe_in_unquoted_text_is_not_a_quote() {
        let doc = r#"<p title=Don't>alt="cover" in prose</p>"#;
        assert!(enclosing_tags(doc, r#"alt="cover""#).is_empty());
    }

    #[test]
    fn needle_in_text_is_not_a_tag() {
        let doc = r#"<p>alt="cover" in prose</p>"#;
        assert!(enclosing_tags(doc, r#"alt="cover""#).is_empty());
    }
}
