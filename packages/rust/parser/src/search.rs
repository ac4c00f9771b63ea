//! Title and name search result pages.
//!
//! A search either lands on a results list or, when the query matched a
//! single record, directly on that record's page. The page `<title>` tells
//! the two apart.

use tracing::{debug, instrument};

use filmdex_markup::{
    Ends, between, enclosing_tags, find_id, first_between, is_identity_code, strip_markup,
};
use filmdex_shared::{Canonicalizer, Record, SearchHit};

/// Markers distinguishing one kind of search page.
#[derive(Debug, Clone, Copy)]
struct SearchLayout {
    /// Lower-cased `<title>` prefix of a results list.
    results_title: &'static str,
    /// Text inside the tag that carries the code on a direct hit.
    direct_tag: &'static str,
    /// Markers around the code within that tag.
    direct_code: (&'static str, &'static str),
    /// End markers of one `<li>` entry of a results list.
    entry_ends: &'static [&'static str],
}

const TITLE_SEARCH: SearchLayout = SearchLayout {
    results_title: "imdb title",
    direct_tag: r#"name="arg""#,
    direct_code: (r#"value=""#, "\""),
    entry_ends: &["</li>", "<br>"],
};

const NAME_SEARCH: SearchLayout = SearchLayout {
    results_title: "imdb name search",
    direct_tag: "/board/threads/",
    direct_code: ("/name/nm", "/"),
    entry_ends: &["<small", "</li>", "<br"],
};

/// Hits of a title search page, identities canonicalized as titles.
#[instrument(skip_all)]
pub fn title_search(doc: &str, canon: &dyn Canonicalizer) -> Vec<SearchHit> {
    search(doc, &TITLE_SEARCH, |raw| canon.canonicalize_title(raw))
}

/// Hits of a name search page, identities canonicalized as names.
#[instrument(skip_all)]
pub fn name_search(doc: &str, canon: &dyn Canonicalizer) -> Vec<SearchHit> {
    search(doc, &NAME_SEARCH, |raw| canon.canonicalize_name(raw))
}

fn search(doc: &str, layout: &SearchLayout, identity: impl Fn(&str) -> Record) -> Vec<SearchHit> {
    let Some(title) = first_between(doc, "<title>", "</title>") else {
        return Vec::new();
    };

    if !title.trim_start().to_lowercase().starts_with(layout.results_title) {
        let hit = direct_hit(doc, title, layout, &identity);
        debug!(direct = hit.is_some(), "search landed on a record page");
        return hit.into_iter().collect();
    }

    let hits: Vec<SearchHit> = between(doc, "<li>", Ends::Any(layout.entry_ends))
        .into_iter()
        .filter_map(|entry| {
            let id = find_id(entry)?;
            let text = strip_markup(entry);
            (!text.is_empty()).then(|| SearchHit {
                id: id.to_string(),
                identity: identity(&text),
            })
        })
        .collect();
    debug!(hits = hits.len(), "search results parsed");
    hits
}

fn direct_hit(
    doc: &str,
    title: &str,
    layout: &SearchLayout,
    identity: &impl Fn(&str) -> Record,
) -> Option<SearchHit> {
    let tags = enclosing_tags(doc, layout.direct_tag);
    let (open, close) = layout.direct_code;
    let id = first_between(*tags.first()?, open, close).filter(|id| is_identity_code(id))?;
    let text = strip_markup(title);
    if text.is_empty() {
        return None;
    }
    Some(SearchHit {
        id: id.to_string(),
        identity: identity(&text),
    })
}
