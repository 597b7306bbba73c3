//! Autocomplete candidates for the search box.
//!
//! Candidates come in three groups, in this order: status options, labels,
//! issue titles. Groups are concatenated first and only then cut to the
//! limit, so a broad query can push title matches out entirely.

use serde::{Deserialize, Serialize};

use super::filter::{FilterState, extract_labels};
use super::i18n::Language;
use super::models::{Dataset, Label};

/// Maximum number of suggestions shown at once.
pub const SUGGESTION_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Status,
    Label,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    /// Value the facet is set to when the suggestion is picked.
    pub value: String,
    pub display: String,
    /// `#rrggbb` swatch for status and label suggestions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swatch: Option<String>,
}

/// Suggestions for `query` with the default limit and English display text.
pub fn suggest(query: &str, dataset: &Dataset, state: &FilterState) -> Vec<Suggestion> {
    let labels = extract_labels(dataset);
    suggest_with(
        query,
        dataset,
        &labels,
        state,
        SUGGESTION_LIMIT,
        Language::default(),
    )
}

/// Suggestions against a precomputed label list.
///
/// `labels` is expected to be the output of [`extract_labels`] for `dataset`.
pub fn suggest_with(
    query: &str,
    dataset: &Dataset,
    labels: &[Label],
    state: &FilterState,
    limit: usize,
    lang: Language,
) -> Vec<Suggestion> {
    if query.is_empty() {
        return Vec::new();
    }

    let q = query.to_lowercase();
    let messages = lang.messages();
    let mut suggestions = Vec::new();

    for option in dataset.status_options() {
        if option.name.to_lowercase().contains(&q)
            && state.project_status.as_deref() != Some(option.name.as_str())
        {
            suggestions.push(Suggestion {
                kind: SuggestionKind::Status,
                value: option.name.clone(),
                display: format!("{}:{}", messages.filter_status, option.name),
                swatch: Some(option.color.palette().dot.to_string()),
            });
        }
    }

    for label in labels {
        if label.name.to_lowercase().contains(&q) && !state.has_label(&label.name) {
            suggestions.push(Suggestion {
                kind: SuggestionKind::Label,
                value: label.name.clone(),
                display: format!("{}:{}", messages.filter_label, label.name),
                swatch: Some(super::color::hex_to_rgb(&label.color).to_hex()),
            });
        }
    }

    for issue in dataset.issues() {
        if issue.title.to_lowercase().contains(&q) {
            suggestions.push(Suggestion {
                kind: SuggestionKind::Text,
                value: issue.title.clone(),
                display: issue.title.clone(),
                swatch: None,
            });
        }
    }

    let found = suggestions.len();
    suggestions.truncate(limit);
    tracing::debug!(query, found, shown = suggestions.len(), "computed suggestions");
    suggestions
}
