//! Credit-list decomposition into [`Person`] records.

use std::sync::LazyLock;

use regex::Regex;

use filmdex_shared::Person;

use crate::strip::strip_markup;

/// Separates a credited name from the role played.
pub const ROLE_DELIMITER: &str = " .... ";

static ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:nm|tt)([0-9]{7})\b").expect("valid regex"));

/// First 7-digit identity code referenced as `nm…` or `tt…` in `text`.
pub fn find_id(text: &str) -> Option<&str> {
    ID_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Whether `code` is a bare 7-digit identity code.
pub fn is_identity_code(code: &str) -> bool {
    code.len() == 7 && code.bytes().all(|b| b.is_ascii_digit())
}

/// Split `fragment` on `separator` and parse each piece into a [`Person`].
///
/// With `has_role`, the text after [`ROLE_DELIMITER`] becomes the person's
/// current role. Pieces without an identity code or without a name left
/// after cleaning are dropped.
pub fn parse_persons(fragment: &str, separator: &str, has_role: bool) -> Vec<Person> {
    fragment
        .split(separator)
        .filter_map(|piece| parse_person(piece, has_role))
        .collect()
}

fn parse_person(piece: &str, has_role: bool) -> Option<Person> {
    let mut entry = piece.to_string();
    let mut notes = String::new();

    if let Some(open) = entry.find(" (")
        && let Some(close) = entry.rfind(')')
        && close > open
    {
        notes = strip_markup(&entry[open..=close]);
        entry = format!("{}{}", &entry[..open], &entry[close + 1..]).replace('&', "");
    }

    let mut current_role = None;
    if has_role {
        let mut parts = entry.split(ROLE_DELIMITER);
        let head = parts.next().unwrap_or_default().to_string();
        if let Some(role) = parts.next() {
            current_role = Some(strip_markup(role));
        }
        entry = head;
    }

    let id = find_id(&entry)?.to_string();
    let name = strip_markup(&entry);
    if name.is_empty() {
        return None;
    }

    Some(Person {
        id,
        name,
        notes,
        current_role,
    })
}
