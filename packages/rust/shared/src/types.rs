//! Record types populated by the extraction engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity and work records
// ---------------------------------------------------------------------------

/// A person reference recovered from a credit list (director, cast, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// 7-digit identity code, without the `nm` prefix.
    pub id: String,
    /// Display name with markup and notes removed.
    pub name: String,
    /// Parenthetical free text, e.g. `(archive footage)`. May be empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    /// Role played; only present when the role delimiter was found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_role: Option<String>,
}

/// A work (movie, series, game) from a person's filmography.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
    /// 7-digit identity code, without the `tt` prefix.
    pub id: String,
    /// Title, with year/medium qualifiers appended.
    pub title: String,
    /// Production status such as "announced" or "filming".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Role played by the queried person. May be empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub role: String,
    /// Participation notes such as `(uncredited)`. May be empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

// ---------------------------------------------------------------------------
// FieldValue
// ---------------------------------------------------------------------------

/// The value stored under one key of a [`Record`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Float(f64),
    List(Vec<String>),
    People(Vec<Person>),
    Works(Vec<Work>),
    /// The field's marker was found but its content could not be converted.
    /// Keeps "present but unparseable" apart from "absent".
    Unparsed { unparsed: String },
}

impl FieldValue {
    pub fn unparsed(raw: impl Into<String>) -> Self {
        Self::Unparsed {
            unparsed: raw.into(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_people(&self) -> Option<&[Person]> {
        match self {
            Self::People(people) => Some(people),
            _ => None,
        }
    }

    pub fn as_works(&self) -> Option<&[Work]> {
        match self {
            Self::Works(works) => Some(works),
            _ => None,
        }
    }

    pub fn is_unparsed(&self) -> bool {
        matches!(self, Self::Unparsed { .. })
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// The result mapping for one page: field name to value.
///
/// Keys are set at most once. An absent key means the field was not found
/// on the page, which is never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under `key` unless the key is already set.
    ///
    /// Returns `false` (and drops `value`) when the key was occupied.
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) -> bool {
        use std::collections::btree_map::Entry;

        match self.fields.entry(key.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Like [`Record::get`], but treats unparsed values as absent.
    pub fn get_parsed(&self, key: &str) -> Option<&FieldValue> {
        self.get(key).filter(|v| !v.is_unparsed())
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(FieldValue::as_int)
    }

    pub fn float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(FieldValue::as_float)
    }

    pub fn list(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(FieldValue::as_list)
    }

    pub fn people(&self, key: &str) -> Option<&[Person]> {
        self.get(key).and_then(FieldValue::as_people)
    }

    pub fn works(&self, key: &str) -> Option<&[Work]> {
        self.get(key).and_then(FieldValue::as_works)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Page results
// ---------------------------------------------------------------------------

/// A named facet of a record that one page populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfoSet {
    Main,
    Filmography,
    Plot,
    Biography,
}

/// Output of one page-level pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult {
    pub data: Record,
    pub info_sets: Vec<InfoSet>,
}

impl PageResult {
    pub fn new(data: Record, info_sets: &[InfoSet]) -> Self {
        Self {
            data,
            info_sets: info_sets.to_vec(),
        }
    }
}

/// One entry of a title or name search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    /// 7-digit identity code.
    pub id: String,
    /// Canonicalized identity (title/year/kind or name/index).
    pub identity: Record,
}
