//! Retrieval and orchestration for filmdex.
//!
//! - [`fetch`] — the [`Fetcher`] seam and its HTTP implementation
//! - [`urls`] — page locators and identity-code validation
//! - [`mobile`] — [`MobileAccess`], one method per record page

pub mod fetch;
pub mod mobile;
pub mod urls;

pub use fetch::{Fetcher, HttpFetcher};
pub use mobile::MobileAccess;
pub use urls::{MoviePage, PersonPage, SearchKind, movie_url, person_url, search_url, validate_id};
