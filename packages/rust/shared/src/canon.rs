//! Canonicalization of raw display titles and names into identity records.
//!
//! The extraction engine only hands raw strings to a [`Canonicalizer`];
//! [`DefaultCanonicalizer`] covers the conventions of the site's page titles.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{FieldValue, Record};

/// Turns raw display strings into structured identity records.
pub trait Canonicalizer: Send + Sync {
    /// `"The Matrix (1999)"` → `title`, `year`, and optionally `kind`/`imdb index`.
    fn canonicalize_title(&self, raw: &str) -> Record;

    /// `"Keanu Reeves (I)"` → `name` and optionally `imdb index`.
    fn canonicalize_name(&self, raw: &str) -> Record;
}

/// Leading articles moved to the end of canonical titles.
const ARTICLES: &[&str] = &[
    "The", "A", "An", "La", "Le", "Les", "L'", "El", "Los", "Las", "Il", "Lo", "Gli", "Der",
    "Die", "Das", "Den", "Het", "Een", "Un", "Una", "Une", "Ein", "Eine",
];

/// Medium qualifiers that may trail a title.
const KINDS: &[(&str, &str)] = &[
    ("TV", "tv movie"),
    ("V", "video movie"),
    ("mini", "tv mini series"),
    ("VG", "video game"),
];

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}|\?{4})(?:/([IVXLC]+))?$").expect("valid regex")
});

static INDEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[IVXLC]+$").expect("valid regex"));

/// Canonicalizer following the site's title/name display conventions.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCanonicalizer;

impl Canonicalizer for DefaultCanonicalizer {
    fn canonicalize_title(&self, raw: &str) -> Record {
        let mut rest = raw.trim();
        let mut year = None;
        let mut index = None;
        let mut kind = None;

        // Peel trailing "(...)" qualifiers right to left.
        while let Some((head, inner)) = trailing_group(rest) {
            if let Some((_, k)) = KINDS.iter().find(|(tag, _)| *tag == inner) {
                kind.get_or_insert(*k);
            } else if let Some(caps) = YEAR_RE.captures(inner) {
                year = caps[1].parse::<i64>().ok();
                index = caps.get(2).map(|m| m.as_str().to_string());
            } else {
                break;
            }
            rest = head;
        }

        let mut title = rest.to_string();
        if title.len() > 1 && title.starts_with('"') && title.ends_with('"') {
            title = title[1..title.len() - 1].to_string();
            kind.get_or_insert("tv series");
        }

        let mut rec = Record::new();
        rec.insert("title", FieldValue::Text(canonical_title(&title)));
        if let Some(y) = year {
            rec.insert("year", FieldValue::Int(y));
        }
        if let Some(k) = kind {
            rec.insert("kind", FieldValue::Text(k.to_string()));
        }
        if let Some(i) = index {
            rec.insert("imdb index", FieldValue::Text(i));
        }
        rec
    }

    fn canonicalize_name(&self, raw: &str) -> Record {
        let mut name = raw.trim();
        let mut index = None;

        if let Some((head, inner)) = trailing_group(name)
            && INDEX_RE.is_match(inner)
        {
            index = Some(inner.to_string());
            name = head;
        }

        let mut rec = Record::new();
        rec.insert("name", FieldValue::Text(name.to_string()));
        if let Some(i) = index {
            rec.insert("imdb index", FieldValue::Text(i));
        }
        rec
    }
}

/// Split `"Head (inner)"` into `("Head", "inner")`.
fn trailing_group(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_end();
    let body = s.strip_suffix(')')?;
    let open = body.rfind('(')?;
    Some((body[..open].trim_end(), &body[open + 1..]))
}

/// Move a leading article to the end: `The Matrix` → `Matrix, The`.
pub fn canonical_title(title: &str) -> String {
    for article in ARTICLES {
        let Some(rest) = title.strip_prefix(article) else {
            continue;
        };
        if article.ends_with('\'') {
            if !rest.is_empty() {
                return format!("{rest}, {article}");
            }
        } else if let Some(rest) = rest.strip_prefix(' ')
            && !rest.trim().is_empty()
        {
            return format!("{}, {article}", rest.trim());
        }
    }
    title.to_string()
}
