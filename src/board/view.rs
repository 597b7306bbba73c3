//! Board chrome around the columns: result counter, active filter badges and
//! the status/label pickers.

use serde::Serialize;

use super::color::{FALLBACK_LABEL_COLOR, LabelStyle};
use super::filter::{FilterState, count_filtered_issues, total_issues};
use super::i18n::{Language, format_date_time};
use super::models::{Dataset, Label, ProjectInfo, StatusColor};
use super::render::{RenderOptions, RenderOutcome, render_with};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsSummary {
    pub count: usize,
    pub total: usize,
    pub has_active_filters: bool,
    /// Only set while filters are active.
    pub display: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetKind {
    Text,
    IssueState,
    Status,
    Label,
}

/// One removable chip in the search box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterBadge {
    pub kind: FacetKind,
    pub caption: String,
    pub value: String,
    /// Status color for status badges.
    pub status_color: Option<StatusColor>,
    /// Chip style for label badges; labels missing from the dataset get the fallback gray.
    pub label_style: Option<LabelStyle>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMenuEntry {
    pub name: String,
    pub color: StatusColor,
    pub is_selected: bool,
    pub is_first: bool,
    pub is_last: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelMenuEntry {
    pub name: String,
    pub style: LabelStyle,
    pub is_selected: bool,
}

/// Everything one board pass hands to the markup layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    pub project: ProjectInfo,
    pub updated_display: Option<String>,
    pub outcome: RenderOutcome,
    pub summary: ResultsSummary,
    pub badges: Vec<FilterBadge>,
    /// Empty when the project has no `Status` field, in which case the picker is hidden.
    pub status_menu: Vec<StatusMenuEntry>,
    pub label_menu: Vec<LabelMenuEntry>,
}

pub fn results_summary(dataset: &Dataset, state: &FilterState, lang: Language) -> ResultsSummary {
    let count = count_filtered_issues(Some(dataset), state);
    let total = total_issues(Some(dataset));
    let has_active_filters = state.has_active_filters();
    ResultsSummary {
        count,
        total,
        has_active_filters,
        display: has_active_filters.then(|| lang.messages().showing_results(count, total)),
    }
}

/// Badges in display order: text, issue state, status, then labels as selected.
pub fn active_badges(
    dataset: &Dataset,
    labels: &[Label],
    state: &FilterState,
    lang: Language,
) -> Vec<FilterBadge> {
    let messages = lang.messages();
    let mut badges = Vec::new();

    if !state.text.is_empty() {
        badges.push(FilterBadge {
            kind: FacetKind::Text,
            caption: messages.filter_text.to_string(),
            value: state.text.clone(),
            status_color: None,
            label_style: None,
        });
    }

    if let Some(issue_state) = state.issue_state {
        badges.push(FilterBadge {
            kind: FacetKind::IssueState,
            caption: messages.filter_state.to_string(),
            value: issue_state.as_str().to_string(),
            status_color: None,
            label_style: None,
        });
    }

    if let Some(status) = &state.project_status {
        let color = dataset
            .find_status_option(status)
            .map(|o| o.color)
            .unwrap_or_default();
        badges.push(FilterBadge {
            kind: FacetKind::Status,
            caption: messages.filter_status.to_string(),
            value: status.clone(),
            status_color: Some(color),
            label_style: None,
        });
    }

    for name in &state.labels {
        let hex = labels
            .iter()
            .find(|l| &l.name == name)
            .map_or(FALLBACK_LABEL_COLOR, |l| l.color.as_str());
        badges.push(FilterBadge {
            kind: FacetKind::Label,
            caption: messages.filter_label.to_string(),
            value: name.clone(),
            status_color: None,
            label_style: Some(LabelStyle::for_hex(hex)),
        });
    }

    badges
}

pub fn status_menu(dataset: &Dataset, state: &FilterState) -> Vec<StatusMenuEntry> {
    let options = dataset.status_options();
    let last = options.len().saturating_sub(1);
    options
        .iter()
        .enumerate()
        .map(|(i, option)| StatusMenuEntry {
            name: option.name.clone(),
            color: option.color,
            is_selected: state.project_status.as_deref() == Some(option.name.as_str()),
            is_first: i == 0,
            is_last: i == last,
        })
        .collect()
}

pub fn label_menu(labels: &[Label], state: &FilterState) -> Vec<LabelMenuEntry> {
    labels
        .iter()
        .map(|label| LabelMenuEntry {
            name: label.name.clone(),
            style: LabelStyle::for_hex(&label.color),
            is_selected: state.has_label(&label.name),
        })
        .collect()
}

/// Full board pass: columns plus the surrounding chrome.
pub fn board_view(
    dataset: &Dataset,
    labels: &[Label],
    state: &FilterState,
    options: &RenderOptions,
) -> BoardView {
    BoardView {
        project: dataset.project.clone(),
        updated_display: dataset
            .generated_at
            .as_deref()
            .and_then(|g| format_date_time(g, options.language)),
        outcome: render_with(dataset, state, options),
        summary: results_summary(dataset, state, options.language),
        badges: active_badges(dataset, labels, state, options.language),
        status_menu: status_menu(dataset, state),
        label_menu: label_menu(labels, state),
    }
}
