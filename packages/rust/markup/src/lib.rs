//! Substring-level markup primitives.
//!
//! Documents are never parsed into a tree. Fields are located by literal
//! marker strings and cleaned up afterwards:
//! - [`entities`] — character/entity reference decoding
//! - [`strip`] — tag removal, whitespace collapsing, document normalization
//! - [`scan`] — bounded extraction and enclosing-tag lookup
//! - [`persons`] — credit lists into [`filmdex_shared::Person`] records

pub mod entities;
pub mod persons;
pub mod scan;
pub mod strip;

pub use entities::{decode_refs, lookup_entity};
pub use persons::{ROLE_DELIMITER, find_id, is_identity_code, parse_persons};
pub use scan::{Ends, between, enclosing_tags, find_between, first_between};
pub use strip::{collapse_whitespace, normalize_document, strip_markup};
