//! Person biography page.
//!
//! Apart from `spouse`, every key on this page comes from the page itself:
//! each `<dt class="ch">` heading becomes a field named after its label.

use tracing::{debug, instrument};

use filmdex_markup::{between, first_between, strip_markup};
use filmdex_shared::{FieldValue, InfoSet, PageResult, Record};

use crate::rules::{FieldRule, apply_rules, apply_sections, list_value};

pub const PERSON_BIOGRAPHY_RULES: &[FieldRule] = &[FieldRule::new("spouse", spouse)];

/// Labels that are never turned into fields.
const SKIPPED_LABELS: &[&str] = &["imdb mini-biography by", "spouse"];

/// Labels that hold a single value rather than a list.
const SINGLE_VALUE_LABELS: &[&str] = &["birth name", "height"];

/// Stands in for a cell break while the body is split on `::`.
const CELL_BREAK: &str = "\u{e000}";

/// Assemble the biography record of a person.
#[instrument(skip_all)]
pub fn person_biography(doc: &str) -> PageResult {
    let mut data = Record::new();
    let mut found = apply_rules(doc, PERSON_BIOGRAPHY_RULES, &mut data);
    found += apply_sections(misc_sections(doc), &mut data);
    debug!(fields = found, "person biography page assembled");
    PageResult::new(data, &[InfoSet::Biography])
}

fn spouse(doc: &str) -> Option<FieldValue> {
    let table = first_between(doc, "Spouse</dt>", &["</table>", "</dd>"])?;
    let spouses = table
        .split("</tr>")
        .map(|row| {
            let row = if row.matches("</td>").count() > 1 {
                row.replacen("</td>", "::</td>", 1)
            } else {
                row.to_string()
            };
            strip_markup(&row).replace(":: ", "::").trim().to_string()
        })
        .filter(|s| !s.is_empty())
        .collect();
    list_value(spouses)
}

/// `(label, value)` for every labelled section of the page.
pub fn misc_sections(doc: &str) -> Vec<(String, FieldValue)> {
    between(doc, r#"<dt class="ch">"#, &["<hr", "</dd>"])
        .into_iter()
        .filter_map(|section| {
            let mut parts = section.split("</dt>");
            let (label, body) = (parts.next()?, parts.next()?);
            if parts.next().is_some() {
                return None;
            }
            let label = section_label(label)?;
            let items = section_items(body);
            let value = if SINGLE_VALUE_LABELS.contains(&label.as_str()) {
                FieldValue::Text(items.into_iter().next()?)
            } else {
                list_value(items)?
            };
            Some((label, value))
        })
        .collect()
}

fn section_label(raw: &str) -> Option<String> {
    let label = raw.to_lowercase().replace(':', "").trim().to_string();
    if SKIPPED_LABELS.contains(&label.as_str()) {
        return None;
    }
    Some(match label.as_str() {
        "salary" => "salary history".to_string(),
        _ => label,
    })
}

/// Split a section body into its paragraphs or table rows. Cells of one
/// row stay together, joined by `::`.
fn section_items(body: &str) -> Vec<String> {
    let mut body = body.replace(r#"</p><p class="biopar">"#, "::");
    for cell_break in [r#"</td> <td valign="top">"#, r#"</td><td valign="top">"#] {
        body = body.replace(cell_break, CELL_BREAK);
    }
    for row_end in ["</td> </tr>", "</td></tr>"] {
        body = body.replace(row_end, "::");
    }

    strip_markup(&body)
        .split("::")
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| item.replace(CELL_BREAK, "::"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::load_page;

    #[test]
    fn biography_page_sections() {
        let page = person_biography(&load_page("person_bio.html"));
        let data = &page.data;

        assert_eq!(page.info_sets, vec![InfoSet::Biography]);
        assert_eq!(data.text("birth name"), Some("Keanu Charles Reeves"));
        assert_eq!(data.text("height"), Some("6' 1\" (1.85 m)"));
        assert_eq!(
            data.list("mini biography").unwrap(),
            ["Keanu was born in Beirut.", "He moved to Toronto."]
        );
        assert_eq!(
            data.list("salary history").unwrap(),
            ["The Matrix (1999)::$10,000,000", "Speed (1994)::$1,200,000"]
        );
        assert_eq!(
            data.list("spouse").unwrap(),
            ["Jane Doe::(1990 - 1995) (divorced)"]
        );
        assert!(!data.contains_key("imdb mini-biography by"));
        assert!(!data.contains_key("salary"));
    }

    #[test]
    fn sections_with_extra_headings_are_dropped() {
        let doc = concat!(
            r#"<dt class="ch">Trivia</dt>one</dt>two</dd>"#,
            r#"<dt class="ch">Nickname</dt><dd>The One</dd>"#,
        );
        let sections = misc_sections(doc);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].0, "nickname");
        assert_eq!(sections[0].1, FieldValue::List(vec!["The One".into()]));
    }

    #[test]
    fn markers_without_separating_space_also_match() {
        let body = r#"<table><tr><td valign="top">A</td><td valign="top">B</td></tr></table>"#;
        assert_eq!(section_items(body), vec!["A::B".to_string()]);
    }

    #[test]
    fn empty_page_is_empty_record() {
        let page = person_biography("<html></html>");
        assert!(page.data.is_empty());
    }
}
