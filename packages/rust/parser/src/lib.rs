//! Record assemblers for the site's mobile page layout.
//!
//! Each assembler takes one normalized document (see
//! [`filmdex_markup::normalize_document`]) and fills a [`filmdex_shared::Record`]
//! by running an ordered list of [`rules::FieldRule`]s over it:
//! - [`movie`] — movie main details
//! - [`plot`] — movie plot summaries
//! - [`person`] — person main details and filmography
//! - [`biography`] — person biography
//! - [`search`] — title and name search results
//!
//! Missing optional fields never fail an assembler; only the mandatory
//! `<title>` of a movie or person page does.

pub mod biography;
pub mod movie;
pub mod person;
pub mod plot;
pub mod rules;
pub mod search;

pub use biography::person_biography;
pub use movie::movie_main;
pub use person::person_main;
pub use plot::movie_plot;
pub use rules::{FieldRule, apply_rules, apply_sections};
pub use search::{name_search, title_search};

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;

    use filmdex_markup::normalize_document;

    fn fixture_path(name: &str) -> PathBuf {
        std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures/html")
            .join(name)
    }

    /// A fixture page, normalized the way retrieved pages are.
    pub fn load_page(name: &str) -> String {
        let raw = std::fs::read_to_string(fixture_path(name))
            .unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"));
        normalize_document(&raw)
    }
}
