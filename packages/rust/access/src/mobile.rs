//! Record retrieval through the site's mobile page layout.

use tracing::{info, instrument};
use url::Url;

use filmdex_markup::normalize_document;
use filmdex_parser::{
    movie_main, movie_plot, name_search, person_biography, person_main, title_search,
};
use filmdex_shared::{
    AccessConfig, Canonicalizer, DefaultCanonicalizer, PageResult, Result, SearchHit,
};

use crate::fetch::{Fetcher, HttpFetcher};
use crate::urls::{MoviePage, PersonPage, SearchKind, movie_url, person_url, search_url};

/// Fetches pages and assembles records from them.
///
/// Every operation is one retrieval followed by one pure extraction pass;
/// nothing is cached or shared between calls.
#[derive(Debug, Clone)]
pub struct MobileAccess<F = HttpFetcher, C = DefaultCanonicalizer> {
    fetcher: F,
    canon: C,
    base_url: Url,
    search_results: u32,
}

impl MobileAccess {
    /// HTTP retrieval with the default canonicalizer.
    pub fn from_config(config: &AccessConfig) -> Result<Self> {
        Ok(Self::new(HttpFetcher::new(config)?, DefaultCanonicalizer, config))
    }
}

impl<F: Fetcher, C: Canonicalizer> MobileAccess<F, C> {
    pub fn new(fetcher: F, canon: C, config: &AccessConfig) -> Self {
        Self {
            fetcher,
            canon,
            base_url: config.base_url.clone(),
            search_results: config.search_results,
        }
    }

    /// Fetch a page and normalize it for extraction.
    async fn retrieve(&self, url: Url) -> Result<String> {
        let raw = self.fetcher.fetch(&url).await?;
        Ok(normalize_document(&raw))
    }

    /// Search titles; at most `results` hits (default from configuration).
    #[instrument(skip(self))]
    pub async fn search_movie(&self, title: &str, results: Option<u32>) -> Result<Vec<SearchHit>> {
        let limit = results.unwrap_or(self.search_results);
        let url = search_url(&self.base_url, SearchKind::Title, title, limit)?;
        let doc = self.retrieve(url).await?;

        let mut hits = title_search(&doc, &self.canon);
        hits.truncate(limit as usize);
        info!(hits = hits.len(), "movie search complete");
        Ok(hits)
    }

    #[instrument(skip(self))]
    pub async fn get_movie_main(&self, movie_id: &str) -> Result<PageResult> {
        let url = movie_url(&self.base_url, movie_id, MoviePage::MainDetails)?;
        let doc = self.retrieve(url).await?;
        let page = movie_main(&doc, movie_id, &self.canon)?;
        info!(fields = page.data.len(), "movie main details retrieved");
        Ok(page)
    }

    #[instrument(skip(self))]
    pub async fn get_movie_plot(&self, movie_id: &str) -> Result<PageResult> {
        let url = movie_url(&self.base_url, movie_id, MoviePage::PlotSummary)?;
        let doc = self.retrieve(url).await?;
        Ok(movie_plot(&doc))
    }

    /// Search names; at most `results` hits (default from configuration).
    #[instrument(skip(self))]
    pub async fn search_person(&self, name: &str, results: Option<u32>) -> Result<Vec<SearchHit>> {
        let limit = results.unwrap_or(self.search_results);
        let url = search_url(&self.base_url, SearchKind::Name, name, limit)?;
        let doc = self.retrieve(url).await?;

        let mut hits = name_search(&doc, &self.canon);
        hits.truncate(limit as usize);
        info!(hits = hits.len(), "person search complete");
        Ok(hits)
    }

    #[instrument(skip(self))]
    pub async fn get_person_main(&self, person_id: &str) -> Result<PageResult> {
        let url = person_url(&self.base_url, person_id, PersonPage::MainDetails)?;
        let doc = self.retrieve(url).await?;
        let page = person_main(&doc, person_id, &self.canon)?;
        info!(fields = page.data.len(), "person main details retrieved");
        Ok(page)
    }

    #[instrument(skip(self))]
    pub async fn get_person_biography(&self, person_id: &str) -> Result<PageResult> {
        let url = person_url(&self.base_url, person_id, PersonPage::Biography)?;
        let doc = self.retrieve(url).await?;
        Ok(person_biography(&doc))
    }
}
