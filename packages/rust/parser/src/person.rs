//! Person main-details page, including the filmography.

use tracing::{debug, instrument, warn};

use filmdex_markup::{between, find_id, first_between, is_identity_code, strip_markup};
use filmdex_shared::{Canonicalizer, FieldValue, FilmdexError, InfoSet, PageResult, Result, Work};

use crate::rules::{
    FieldRule, apply_rules, apply_sections, list_value, reopened_text, split_list, text_value,
};

/// Field rules for the fixed part of the page, in extraction order.
pub const PERSON_MAIN_RULES: &[FieldRule] = &[
    FieldRule::new("birth date", birth_date),
    FieldRule::new("birth notes", birth_notes),
    FieldRule::new("death date", death_date),
    FieldRule::new("death notes", death_notes),
    FieldRule::new("akas", akas),
    FieldRule::new("headshot", headshot),
];

/// Medium qualifiers kept as part of a filmography title.
const MEDIUM_QUALIFIERS: &[&str] = &["TV", "V", "mini", "VG"];

const TV_SERIES_MARK: &str = "<small>TV Series</small>";

/// Assemble the main record of a person from its (normalized) page.
///
/// Fails with [`FilmdexError::DataAccess`] when the `<title>` element is
/// missing. A page without a filmography index still succeeds, with only the
/// `main` info set.
#[instrument(skip(doc, canon))]
pub fn person_main(doc: &str, person_id: &str, canon: &dyn Canonicalizer) -> Result<PageResult> {
    let Some(name) = first_between(doc, "<title>", "</title>") else {
        warn!("title marker missing from person page");
        return Err(FilmdexError::missing_person(person_id));
    };

    let mut data = canon.canonicalize_name(&strip_markup(name));
    let mut found = apply_rules(doc, PERSON_MAIN_RULES, &mut data);

    let Some(sections) = filmography_sections(doc) else {
        debug!(fields = found, "person main page assembled without filmography");
        return Ok(PageResult::new(data, &[InfoSet::Main]));
    };
    found += apply_sections(sections, &mut data);
    debug!(fields = found, "person main page assembled");

    Ok(PageResult::new(data, &[InfoSet::Main, InfoSet::Filmography]))
}

// ---------------------------------------------------------------------------
// Fixed fields
// ---------------------------------------------------------------------------

fn birth_date(doc: &str) -> Option<FieldValue> {
    let block = first_between(doc, r#"<div class="ch">Date of birth"#, &["<br>", "<dt>"])?;
    text_value(reopened_text(block))
}

fn birth_notes(doc: &str) -> Option<FieldValue> {
    text_value(reopened_text(first_between(doc, r#"href="/BornWhere?"#, "</dd>")?))
}

fn death_block(doc: &str) -> Option<&str> {
    first_between(doc, r#"<div class="ch">Date of death"#, "</dd>")
}

fn death_date(doc: &str) -> Option<FieldValue> {
    let date = death_block(doc)?.split("<br>").next()?;
    text_value(reopened_text(date))
}

fn death_notes(doc: &str) -> Option<FieldValue> {
    let notes = death_block(doc)?.split("<br>").nth(1)?;
    text_value(strip_markup(notes))
}

fn akas(doc: &str) -> Option<FieldValue> {
    list_value(split_list(first_between(doc, "Sometimes Credited As:", "</dl>")?, "<br>"))
}

fn headshot(doc: &str) -> Option<FieldValue> {
    let link = first_between(doc, r#"name="headshot""#, "</a>")?;
    text_value(first_between(link, r#"src=""#, "\"")?.to_string())
}

// ---------------------------------------------------------------------------
// Filmography
// ---------------------------------------------------------------------------

/// `(anchor, label)` pairs from the `Filmography as:` index, e.g.
/// `("actor", "actor")`. `None` when the page has no index.
fn filmography_index(doc: &str) -> Option<Vec<(String, String)>> {
    let index = first_between(doc, "Filmography as:</i>", "</p>")?;
    let entries = index
        .split(", ")
        .filter_map(|entry| {
            let anchor = first_between(entry, r##"href="#"##, "\"")?;
            let label = strip_markup(first_between(entry, "\">", "</a")?).to_lowercase();
            (!label.is_empty()).then(|| (anchor.to_string(), label))
        })
        .collect();
    Some(entries)
}

/// One `(label, works)` pair per filmography section with at least one
/// parseable entry. Sections sharing a label are concatenated.
pub fn filmography_sections(doc: &str) -> Option<Vec<(String, FieldValue)>> {
    let mut sections: Vec<(String, Vec<Work>)> = Vec::new();

    for (anchor, label) in filmography_index(doc)? {
        let works = section_works(doc, &anchor);
        if works.is_empty() {
            continue;
        }
        match sections.iter_mut().find(|(known, _)| *known == label) {
            Some((_, all)) => all.extend(works),
            None => sections.push((label, works)),
        }
    }

    Some(
        sections
            .into_iter()
            .map(|(label, works)| (label, FieldValue::Works(works)))
            .collect(),
    )
}

fn section_works(doc: &str, anchor: &str) -> Vec<Work> {
    let open = format!(r#"<a name="{anchor}">"#);
    let Some(start) = doc.find(&open) else {
        return Vec::new();
    };
    let Some(len) = doc[start..].find("</ol>") else {
        return Vec::new();
    };

    between(&doc[start..start + len], "<li>", &["</li>", "<br>"])
        .into_iter()
        .filter_map(parse_work)
        .collect()
}

/// Parse one filmography entry such as
/// `<a href="/title/tt0133093/">The Matrix</a> (1999) .... Neo`.
pub fn parse_work(entry: &str) -> Option<Work> {
    let id = entry
        .get(..7)
        .filter(|prefix| is_identity_code(prefix))
        .or_else(|| find_id(entry))?
        .to_string();

    let title_at = entry.find("/\">")?;
    let title_end = entry.find("</a>").filter(|&end| end > title_at)?;
    let mut title = entry[title_at + 3..title_end].to_string();
    let mut rest = entry[title_end + 4..].to_string();

    let mut status = None;
    if let Some(open) = rest.find("<font ")
        && let Some(close) = rest.find("</font>")
        && close > open
        && let Some(gt) = rest[open + 6..].find('>')
        && open + 7 + gt <= close
    {
        status = Some(rest[open + 7 + gt..close].to_string());
        rest.replace_range(open..close + "</font>".len(), "");
    }

    if let Some(open) = rest.find("<i>")
        && let Some(len) = rest[open..].find("</i>")
    {
        rest.replace_range(open..open + len + "</i>".len(), "");
    }

    if let Some(at) = rest.find(TV_SERIES_MARK) {
        title = format!("\"{title}\"");
        rest.replace_range(at..at + TV_SERIES_MARK.len(), "");
    }

    let mut tail = rest.trim();
    for _ in 0..2 {
        let Some(close) = tail.strip_prefix('(').and_then(|t| t.find(')')) else {
            break;
        };
        let inner = &tail[1..=close];
        let qualifies =
            inner.starts_with(|c: char| c.is_ascii_digit()) || MEDIUM_QUALIFIERS.contains(&inner);
        if !qualifies {
            break;
        }
        title = format!("{title} {}", &tail[..close + 2]);
        tail = tail[close + 2..].trim_start();
    }

    let tail = tail.replace("<small>", " ").replace("</small>", " ");
    let mut parts = tail.trim().split("....");
    let lead = parts.next().unwrap_or_default().trim();
    let notes = if lead.starts_with('(') {
        strip_markup(lead)
    } else {
        String::new()
    };
    let role = strip_markup(&parts.collect::<Vec<_>>().join(" "));

    Some(Work {
        id,
        title,
        status,
        role,
        notes,
    })
}

#[cfg(test)]
mod tests {
    use filmdex_shared::DefaultCanonicalizer;

    use super::*;
    use crate::test_support::load_page;

    #[test]
    fn main_details_with_filmography() {
        let doc = load_page("person_maindetails.html");
        let page = person_main(&doc, "0000206", &DefaultCanonicalizer).unwrap();
        let data = &page.data;

        assert_eq!(page.info_sets, vec![InfoSet::Main, InfoSet::Filmography]);
        assert_eq!(data.text("name"), Some("Keanu Reeves"));
        assert_eq!(data.text("imdb index"), Some("I"));
        assert_eq!(data.text("birth date"), Some("2 September 1964"));
        assert_eq!(data.text("birth notes"), Some("Beirut, Lebanon"));
        assert_eq!(data.list("akas").unwrap(), ["Keanu Reaves", "K. Reeves"]);
        assert_eq!(
            data.text("headshot"),
            Some("http://ia.media-imdb.com/images/M/keanu.jpg")
        );
        assert!(!data.contains_key("death date"));
        // Every producer entry lacks a title link.
        assert!(!data.contains_key("producer"));

        let actor = data.works("actor").unwrap();
        assert_eq!(actor.len(), 3);
        assert_eq!(
            actor[0],
            Work {
                id: "0410519".into(),
                title: "The Matrix 4".into(),
                status: Some("announced".into()),
                role: "Neo".into(),
                notes: String::new(),
            }
        );
        assert_eq!(actor[1].title, "The Matrix (1999)");
        assert_eq!(actor[1].status, None);
        assert_eq!(
            actor[2],
            Work {
                id: "0108778".into(),
                title: "\"Friends\" (1994)".into(),
                status: None,
                role: "Himself".into(),
                notes: "(uncredited)".into(),
            }
        );
    }

    #[test]
    fn page_without_filmography_has_main_only() {
        let doc = "<title>Jane Doe</title><a name=\"headshot\"><img src=\"/jd.jpg\"></a>";
        let page = person_main(doc, "0000001", &DefaultCanonicalizer).unwrap();
        assert_eq!(page.info_sets, vec![InfoSet::Main]);
        assert_eq!(page.data.text("headshot"), Some("/jd.jpg"));
    }

    #[test]
    fn missing_title_is_a_data_access_failure() {
        let err = person_main("<html></html>", "0000206", &DefaultCanonicalizer).unwrap_err();
        assert_eq!(err.to_string(), "unable to get personID \"0000206\"");
    }

    #[test]
    fn death_date_and_notes_share_a_block() {
        let doc = concat!(
            r#"<div class="ch">Date of death (details):</div>"#,
            r#"<a href="/OnThisDay?day=4">4 June</a> "#,
            r#"<a href="/DiedInYear?1999">1999</a><br>heart attack</dd>"#,
        );
        assert_eq!(death_date(doc), Some(FieldValue::Text("4 June 1999".into())));
        assert_eq!(death_notes(doc), Some(FieldValue::Text("heart attack".into())));
    }

    #[test]
    fn work_with_leading_code_and_medium_qualifiers() {
        let entry = r#"0123456<a href="/title/tt0123456/">Game</a> (2001) (VG) (voice) .... Hero"#;
        let work = parse_work(entry).unwrap();
        assert_eq!(work.id, "0123456");
        assert_eq!(work.title, "Game (2001) (VG)");
        assert_eq!(work.notes, "(voice)");
        assert_eq!(work.role, "Hero");
    }

    #[test]
    fn work_without_title_link_is_dropped() {
        assert_eq!(parse_work(r#"<a href="/title/tt0123456">Broken"#), None);
        assert_eq!(parse_work("no code at all /\">X</a>"), None);
    }

    #[test]
    fn italic_annotation_is_removed() {
        let entry = r#"<a href="/title/tt0000042/">Show</a> <i>(segment "Pilot")</i> .... Guest"#;
        let work = parse_work(entry).unwrap();
        assert_eq!(work.title, "Show");
        assert_eq!(work.role, "Guest");
        assert_eq!(work.notes, "");
    }
}
