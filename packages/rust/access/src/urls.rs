//! Locators of the mobile pages, relative to the configured site root.

use url::Url;

use filmdex_markup::is_identity_code;
use filmdex_shared::{FilmdexError, Result};

/// Pages available for a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoviePage {
    MainDetails,
    PlotSummary,
}

impl MoviePage {
    fn slug(self) -> &'static str {
        match self {
            Self::MainDetails => "maindetails",
            Self::PlotSummary => "plotsummary",
        }
    }
}

/// Pages available for a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonPage {
    MainDetails,
    Biography,
}

impl PersonPage {
    fn slug(self) -> &'static str {
        match self {
            Self::MainDetails => "maindetails",
            Self::Biography => "bio",
        }
    }
}

/// Which index a search query runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Title,
    Name,
}

impl SearchKind {
    fn flag(self) -> &'static str {
        match self {
            Self::Title => "tt",
            Self::Name => "nm",
        }
    }
}

/// Reject anything but a bare 7-digit identity code.
pub fn validate_id(id: &str) -> Result<()> {
    if is_identity_code(id) {
        Ok(())
    } else {
        Err(FilmdexError::validation(format!(
            "invalid identity code \"{id}\": expected 7 digits"
        )))
    }
}

fn join(base: &Url, path: &str) -> Result<Url> {
    base.join(path)
        .map_err(|e| FilmdexError::validation(format!("cannot build URL for {path}: {e}")))
}

/// `{base}title/tt{id}/{page}`
pub fn movie_url(base: &Url, movie_id: &str, page: MoviePage) -> Result<Url> {
    validate_id(movie_id)?;
    join(base, &format!("title/tt{movie_id}/{}", page.slug()))
}

/// `{base}name/nm{id}/{page}`
pub fn person_url(base: &Url, person_id: &str, page: PersonPage) -> Result<Url> {
    validate_id(person_id)?;
    join(base, &format!("name/nm{person_id}/{}", page.slug()))
}

/// `{base}find?tt=on&mx={results}&q={query}` (`nm=on` for names).
pub fn search_url(base: &Url, kind: SearchKind, query: &str, results: u32) -> Result<Url> {
    let query = query.trim();
    if query.is_empty() {
        return Err(FilmdexError::validation("search query is empty"));
    }
    if results == 0 {
        return Err(FilmdexError::validation("at least one search result must be requested"));
    }

    let mut url = join(base, "find")?;
    url.query_pairs_mut()
        .append_pair(kind.flag(), "on")
        .append_pair("mx", &results.to_string())
        .append_pair("q", query);
    Ok(url)
}
