//! Movie main-details page.

use tracing::{debug, instrument, warn};

use filmdex_markup::{between, enclosing_tags, first_between, parse_persons, strip_markup};
use filmdex_shared::{Canonicalizer, FieldValue, FilmdexError, InfoSet, PageResult, Person, Result};

use crate::rules::{FieldRule, apply_rules, list_value, mark_aka, qualified_list, text_value};

/// Field rules for the main-details page, in extraction order.
pub const MOVIE_MAIN_RULES: &[FieldRule] = &[
    FieldRule::new("director", director),
    FieldRule::new("writer", writer),
    FieldRule::new("cover url", cover_url),
    FieldRule::new("genres", genres),
    FieldRule::new("rating", rating),
    FieldRule::new("votes", votes),
    FieldRule::new("top 250 rank", top_250_rank),
    FieldRule::new("cast", cast),
    FieldRule::new("akas", akas),
    FieldRule::new("mpaa", mpaa),
    FieldRule::new("runtimes", runtimes),
    FieldRule::new("countries", countries),
    FieldRule::new("languages", languages),
    FieldRule::new("color info", color_info),
    FieldRule::new("sound mix", sound_mix),
    FieldRule::new("certificates", certificates),
    FieldRule::new("plot outline", plot_outline),
];

/// Assemble the main record of a movie from its (normalized) page.
///
/// The `<title>` element is mandatory: without it the code does not name a
/// retrievable movie and [`FilmdexError::DataAccess`] is returned. Every
/// other field is optional.
#[instrument(skip(doc, canon))]
pub fn movie_main(doc: &str, movie_id: &str, canon: &dyn Canonicalizer) -> Result<PageResult> {
    let Some(title) = first_between(doc, "<title>", "</title>") else {
        warn!("title marker missing from movie page");
        return Err(FilmdexError::missing_movie(movie_id));
    };

    let mut data = canon.canonicalize_title(&strip_markup(title));
    let found = apply_rules(doc, MOVIE_MAIN_RULES, &mut data);
    debug!(fields = found, "movie main page assembled");

    Ok(PageResult::new(data, &[InfoSet::Main]))
}

// ---------------------------------------------------------------------------
// Credits
// ---------------------------------------------------------------------------

fn people_value(people: Vec<Person>) -> Option<FieldValue> {
    (!people.is_empty()).then_some(FieldValue::People(people))
}

fn director(doc: &str) -> Option<FieldValue> {
    let block = first_between(doc, "Directed by</b><br>", "<br> <br>")?;
    people_value(parse_persons(block, "<br>", false))
}

fn writer(doc: &str) -> Option<FieldValue> {
    let block = first_between(doc, "Writing credits</b>", "<br> <br>")?;
    people_value(parse_persons(block, "<br>", false))
}

fn cast(doc: &str) -> Option<FieldValue> {
    let block = first_between(doc, "Cast overview", "</table>")
        .or_else(|| first_between(doc, "Credited cast", "</table>"))?;
    // Drop the table header; the first row then starts at its link.
    let rows = match block.find("href=") {
        Some(at) => format!("< a{}", &block[at..]),
        None => block.to_string(),
    };
    people_value(parse_persons(&rows, "</tr><tr>", true))
}

// ---------------------------------------------------------------------------
// Ratings
// ---------------------------------------------------------------------------

/// `<b>7.5/10</b> (1,234` out of `User Rating:</b> <b>7.5/10</b> (1,234 votes)`.
fn user_rating(doc: &str) -> Option<&str> {
    first_between(doc, "User Rating:</b>", " votes)")
}

fn rating(doc: &str) -> Option<FieldValue> {
    let score = first_between(user_rating(doc)?, "<b>", "</b>")?;
    let (raw, _) = score.split_once("/10")?;
    let raw = raw.trim();
    Some(match raw.parse::<f64>() {
        Ok(value) => FieldValue::Float(value),
        Err(_) => FieldValue::unparsed(raw),
    })
}

fn votes(doc: &str) -> Option<FieldValue> {
    let block = user_rating(doc)?;
    let tail = &block[block.rfind('(')?..];
    if tail.contains("await") {
        // "(awaiting 5 votes)": not enough votes yet.
        return None;
    }
    let raw = tail[1..].replace(',', "");
    let raw = raw.trim();
    Some(match raw.parse::<i64>() {
        Ok(count) => FieldValue::Int(count),
        Err(_) => FieldValue::unparsed(raw),
    })
}

fn top_250_rank(doc: &str) -> Option<FieldValue> {
    let link = first_between(doc, r#"href="/top_250_films""#, "</a>")?;
    let raw = &link[link.rfind('#')? + 1..];
    Some(match raw.trim().parse::<i64>() {
        Ok(rank) => FieldValue::Int(rank),
        Err(_) => FieldValue::unparsed(raw),
    })
}

// ---------------------------------------------------------------------------
// Details
// ---------------------------------------------------------------------------

fn cover_url(doc: &str) -> Option<FieldValue> {
    let tags = enclosing_tags(doc, r#"alt="cover""#);
    let src = first_between(*tags.first()?, r#"src=""#, "\"")?;
    text_value(src.to_string())
}

fn owned(fragments: Vec<&str>) -> Vec<String> {
    fragments
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn genres(doc: &str) -> Option<FieldValue> {
    list_value(owned(between(doc, r#"href="/Sections/Genres/"#, "/")))
}

fn countries(doc: &str) -> Option<FieldValue> {
    list_value(owned(between(doc, r#"href="/Sections/Countries/"#, "\"")))
}

fn languages(doc: &str) -> Option<FieldValue> {
    list_value(owned(between(doc, r#"href="/Sections/Languages/"#, "\"")))
}

fn akas(doc: &str) -> Option<FieldValue> {
    let titles = between(doc, r#"<i class="transl">"#, "<br")
        .into_iter()
        .map(mark_aka)
        .filter(|aka| !aka.is_empty())
        .collect();
    list_value(titles)
}

fn mpaa(doc: &str) -> Option<FieldValue> {
    text_value(strip_markup(first_between(doc, "MPAA</a>:", "<br>")?))
}

fn runtimes(doc: &str) -> Option<FieldValue> {
    let block = first_between(doc, "Runtime:</b>", "<br>")?;
    let times = block
        .split('/')
        .map(|t| t.trim().replace(" min", ""))
        .filter(|t| !t.is_empty())
        .collect();
    list_value(times)
}

fn color_info(doc: &str) -> Option<FieldValue> {
    list_value(qualified_list(first_between(doc, r#""/List?color-info="#, "<br")?, true))
}

fn sound_mix(doc: &str) -> Option<FieldValue> {
    list_value(qualified_list(first_between(doc, "/List?sound-mix=", "<br>")?, true))
}

fn certificates(doc: &str) -> Option<FieldValue> {
    list_value(qualified_list(first_between(doc, "Certification:</b>", "<br")?, false))
}

fn plot_outline(doc: &str) -> Option<FieldValue> {
    let outline = first_between(doc, "Plot Outline:</b>", &["<a ", "<br"])?;
    text_value(outline.trim().to_string())
}

#[cfg(test)]
mod tests {
    use filmdex_shared::DefaultCanonicalizer;

    use super::*;
    use crate::test_support::load_page;

    #[test]
    fn minimal_title_page() {
        let doc = "<html><head><title>Example Film</title></head><body>\
                   <b>User Rating:</b> <b>7.5/10</b> (1,234 votes)</body></html>";
        let page = movie_main(doc, "0000001", &DefaultCanonicalizer).unwrap();

        let mut keys: Vec<_> = page.data.keys().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["rating", "title", "votes"]);
        assert_eq!(page.data.text("title"), Some("Example Film"));
        assert_eq!(page.data.float("rating"), Some(7.5));
        assert_eq!(page.data.int("votes"), Some(1234));
        assert_eq!(page.info_sets, vec![InfoSet::Main]);
    }

    #[test]
    fn missing_title_is_a_data_access_failure() {
        let err = movie_main("<html><body>nothing</body></html>", "0133093", &DefaultCanonicalizer)
            .unwrap_err();
        assert!(matches!(err, FilmdexError::DataAccess { .. }));
        assert_eq!(err.requested_id(), Some("0133093"));
        assert_eq!(err.to_string(), "unable to get movieID \"0133093\"");
    }

    #[test]
    fn full_main_details_page() {
        let doc = load_page("movie_maindetails.html");
        let page = movie_main(&doc, "0133093", &DefaultCanonicalizer).unwrap();
        let data = &page.data;

        assert_eq!(data.text("title"), Some("Matrix, The"));
        assert_eq!(data.int("year"), Some(1999));
        assert_eq!(
            data.text("cover url"),
            Some("http://ia.media-imdb.com/images/M/matrix.jpg")
        );
        assert_eq!(data.float("rating"), Some(8.7));
        assert_eq!(data.int("votes"), Some(1_234_567));
        assert_eq!(data.int("top 250 rank"), Some(29));
        assert_eq!(data.list("genres").unwrap(), ["Action", "Sci-Fi"]);
        assert_eq!(data.list("countries").unwrap(), ["USA", "Australia"]);
        assert_eq!(data.list("languages").unwrap(), ["English"]);
        assert_eq!(data.list("runtimes").unwrap(), ["136", "USA:135"]);
        assert_eq!(
            data.text("mpaa"),
            Some("Rated R for sci-fi violence and brief language.")
        );
        assert_eq!(data.list("akas").unwrap(), ["Matrix, The::(Spain)", "Matrix"]);
        assert_eq!(data.list("color info").unwrap(), ["Color::(Technicolor)"]);
        assert_eq!(data.list("sound mix").unwrap(), ["Dolby Digital", "SDDS"]);
        assert_eq!(
            data.list("certificates").unwrap(),
            ["USA:R", "UK:15::(video rating)"]
        );
        assert_eq!(
            data.text("plot outline"),
            Some("A computer hacker learns about the true nature of his reality.")
        );
    }

    #[test]
    fn credits_are_person_lists() {
        let doc = load_page("movie_maindetails.html");
        let page = movie_main(&doc, "0133093", &DefaultCanonicalizer).unwrap();

        let directors = page.data.people("director").unwrap();
        assert_eq!(directors.len(), 2);
        assert_eq!(directors[0].id, "0905152");
        assert_eq!(directors[0].name, "Andy Wachowski");

        let writers = page.data.people("writer").unwrap();
        assert_eq!(writers.len(), 2);
        assert_eq!(writers[0].name, "Larry Wachowski");
        assert_eq!(writers[0].notes, "(written by)");

        let cast = page.data.people("cast").unwrap();
        assert_eq!(cast.len(), 2);
        assert_eq!(cast[0].id, "0000206");
        assert_eq!(cast[0].name, "Keanu Reeves");
        assert_eq!(cast[0].current_role.as_deref(), Some("Neo"));
        assert_eq!(cast[1].name, "Laurence Fishburne");
        assert_eq!(cast[1].current_role.as_deref(), Some("Morpheus"));
    }

    #[test]
    fn unconvertible_numbers_are_marked_unparsed() {
        let doc = "<title>X</title><b>User Rating:</b> <b>n/a/10</b> (many votes) \
                   <a href=\"/top_250_films\">Top 250: #?</a>";
        let page = movie_main(doc, "0000001", &DefaultCanonicalizer).unwrap();
        assert!(page.data.get("rating").unwrap().is_unparsed());
        assert!(page.data.get("votes").unwrap().is_unparsed());
        assert!(page.data.get("top 250 rank").unwrap().is_unparsed());
        assert!(page.data.get_parsed("rating").is_none());
    }

    #[test]
    fn cover_with_angle_bracket_in_title_attribute() {
        let doc = r#"<title>X</title><img title="Neo > Smith" alt="cover" src="/img/m.jpg">"#;
        let page = movie_main(doc, "0000001", &DefaultCanonicalizer).unwrap();
        assert_eq!(page.data.text("cover url"), Some("/img/m.jpg"));
    }

    #[test]
    fn pending_votes_are_absent() {
        let doc = concat!(
            "<title>X</title><b>User Rating:</b> ",
            "<b>awaiting 5 votes</b> (awaiting 5 votes)",
        );
        let page = movie_main(doc, "0000001", &DefaultCanonicalizer).unwrap();
        assert!(!page.data.contains_key("votes"));
        assert!(!page.data.contains_key("rating"));
    }

    #[test]
    fn credited_cast_is_the_fallback() {
        let doc = concat!(
            "<title>X</title><b>Credited cast:</b><table><tr><td>",
            r#"<a href="/name/nm0000001/">Ann</a></td>"#,
            "<td> .... </td><td>Herself</td></tr></table>",
        );
        assert_eq!(
            cast(doc),
            Some(FieldValue::People(vec![Person {
                id: "0000001".into(),
                name: "Ann".into(),
                notes: String::new(),
                current_role: Some("Herself".into()),
            }]))
        );
    }
}
