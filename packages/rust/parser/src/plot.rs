//! Movie plot-summary page.

use tracing::{debug, instrument};

use filmdex_markup::{between, strip_markup};
use filmdex_shared::{FieldValue, InfoSet, PageResult, Record};

use crate::rules::{FieldRule, apply_rules, list_value};

pub const MOVIE_PLOT_RULES: &[FieldRule] = &[FieldRule::new("plot", plot)];

/// Assemble the plot record. A page without summaries yields an empty record.
#[instrument(skip_all)]
pub fn movie_plot(doc: &str) -> PageResult {
    let mut data = Record::new();
    let found = apply_rules(doc, MOVIE_PLOT_RULES, &mut data);
    debug!(fields = found, "movie plot page assembled");
    PageResult::new(data, &[InfoSet::Plot])
}

fn plot(doc: &str) -> Option<FieldValue> {
    let paragraphs = between(doc, r#"<p class="plotpar">"#, "</p>")
        .into_iter()
        .map(strip_markup)
        .filter(|p| !p.is_empty())
        .collect();
    list_value(paragraphs)
}
