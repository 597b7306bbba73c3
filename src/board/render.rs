//! Derives the column and card view records of one render pass.
//!
//! `(Dataset, FilterState) -> RenderOutcome` with no side effects. Markup
//! generation is left to whoever consumes the records; the only HTML this
//! module produces is the escaped, highlighted card title.

use serde::Serialize;

use super::color::{LabelStyle, accent_color};
use super::filter::{FilterState, filter_issues, sort_issues_by_status};
use super::i18n::{Language, format_simple_date};
use super::models::{Dataset, Issue, Label, Milestone, StatusColor, SubIssues};

/// Hard cutoff for card descriptions, in characters.
pub const DESCRIPTION_LIMIT: usize = 300;

const ELLIPSIS: &str = "...";

/// Knobs a render pass reads besides the dataset and filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub description_limit: usize,
    pub language: Language,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            description_limit: DESCRIPTION_LIMIT,
            language: Language::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "columns", rename_all = "snake_case")]
pub enum RenderOutcome {
    Columns(Vec<ColumnView>),
    /// Nothing survived the filters; distinct from loading or error states.
    NoResults,
}

impl RenderOutcome {
    pub fn columns(&self) -> &[ColumnView] {
        match self {
            RenderOutcome::Columns(columns) => columns,
            RenderOutcome::NoResults => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RenderOutcome::NoResults)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnView {
    pub title: String,
    pub due_on_display: Option<String>,
    pub description: Option<String>,
    /// Some surviving column has a description, so headers without one reserve the space.
    pub has_any_description: bool,
    pub accent_color: String,
    pub cards: Vec<CardView>,
    /// Position among surviving columns.
    pub column_index: usize,
    pub is_last_column: bool,
}

impl ColumnView {
    pub fn needs_description_placeholder(&self) -> bool {
        self.has_any_description && self.description.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub id: String,
    /// Escaped title with text-filter matches wrapped in `<mark>`.
    pub title_html: String,
    /// `None` for private issues, which must not link out.
    pub url: Option<String>,
    pub status: Option<String>,
    /// Gray when the issue has no status or the project doesn't define it.
    pub status_color: StatusColor,
    pub description_excerpt: Option<String>,
    pub labels: Vec<LabelView>,
    pub sub_issues: Option<SubIssueProgress>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelView {
    pub name: String,
    pub style: LabelStyle,
    /// Label is part of the active filter.
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubIssueProgress {
    pub completed: u32,
    pub total: u32,
    pub percentage: u32,
}

impl SubIssueProgress {
    /// `None` when there is nothing to show (`total == 0`).
    pub fn from_sub_issues(sub: &SubIssues) -> Option<Self> {
        if sub.total == 0 {
            return None;
        }
        let completed = sub.completed.min(sub.total);
        let percentage = (f64::from(completed) / f64::from(sub.total) * 100.0).round() as u32;
        Some(Self {
            completed,
            total: sub.total,
            percentage,
        })
    }

    /// One flag per segment of the progress bar, completed segments first.
    pub fn segments(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.total).map(move |i| i < self.completed)
    }
}

/// Escape the five HTML-significant characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Byte ranges of `text` whose lowercase form contains `query` lowercased,
/// the same comparison the text filter uses. Ranges never overlap and always
/// fall on char boundaries of `text`.
fn match_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    // (offset in lowered, offset in text) at every char boundary of text
    let mut lowered = String::with_capacity(text.len());
    let mut bounds = Vec::with_capacity(text.len() + 1);
    for (offset, c) in text.char_indices() {
        bounds.push((lowered.len(), offset));
        lowered.extend(c.to_lowercase());
    }
    bounds.push((lowered.len(), text.len()));

    let floor = |pos: usize| bounds[bounds.partition_point(|&(l, _)| l <= pos) - 1].1;
    let ceil = |pos: usize| bounds[bounds.partition_point(|&(l, _)| l < pos)].1;

    let mut ranges = Vec::new();
    let mut last_end = 0;
    for (start, found) in lowered.match_indices(&needle) {
        let (start, end) = (floor(start), ceil(start + found.len()));
        if start >= last_end && end > start {
            ranges.push((start, end));
            last_end = end;
        }
    }
    ranges
}

/// Escape `text` and wrap every case-insensitive occurrence of `query` in
/// `<mark>`, keeping the original casing. Matches are found on the raw text
/// so they never split an entity.
pub fn highlight_text(text: &str, query: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (start, end) in match_ranges(text, query) {
        out.push_str(&escape_html(&text[cursor..start]));
        out.push_str("<mark>");
        out.push_str(&escape_html(&text[start..end]));
        out.push_str("</mark>");
        cursor = end;
    }
    out.push_str(&escape_html(&text[cursor..]));
    out
}

/// Cut `text` to `max_chars` characters, trim trailing whitespace and append
/// `...`. Text that already fits is returned unchanged.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{}", text[..cut].trim_end(), ELLIPSIS),
    }
}

fn status_color(dataset: &Dataset, status: Option<&str>) -> StatusColor {
    status
        .and_then(|s| dataset.find_status_option(s))
        .map(|o| o.color)
        .unwrap_or_default()
}

fn label_view(label: &Label, state: &FilterState) -> LabelView {
    LabelView {
        name: label.name.clone(),
        style: LabelStyle::for_hex(&label.color),
        is_active: state.has_label(&label.name),
    }
}

fn card_view(
    issue: &Issue,
    dataset: &Dataset,
    state: &FilterState,
    options: &RenderOptions,
) -> CardView {
    let status = issue.status().map(str::to_string);
    CardView {
        id: issue.id.clone(),
        title_html: highlight_text(&issue.title, &state.text),
        url: (!issue.is_private).then(|| issue.url.clone()),
        status_color: status_color(dataset, status.as_deref()),
        status,
        description_excerpt: issue
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(|d| truncate_text(d, options.description_limit)),
        labels: issue.labels.iter().map(|l| label_view(l, state)).collect(),
        sub_issues: issue
            .sub_issues
            .as_ref()
            .and_then(SubIssueProgress::from_sub_issues),
    }
}

fn non_empty(description: &Option<String>) -> Option<&str> {
    description.as_deref().filter(|d| !d.trim().is_empty())
}

/// Run one render pass with default options.
pub fn render(dataset: &Dataset, state: &FilterState) -> RenderOutcome {
    render_with(dataset, state, &RenderOptions::default())
}

pub fn render_with(
    dataset: &Dataset,
    state: &FilterState,
    options: &RenderOptions,
) -> RenderOutcome {
    let status_options = dataset.status_options();

    let surviving: Vec<(&Milestone, Vec<&Issue>)> = dataset
        .milestones
        .iter()
        .filter_map(|milestone| {
            let issues = filter_issues(&milestone.issues, state);
            if issues.is_empty() {
                return None;
            }
            Some((milestone, sort_issues_by_status(issues, status_options)))
        })
        .collect();

    if surviving.is_empty() {
        tracing::debug!("render pass: no results");
        return RenderOutcome::NoResults;
    }

    let has_any_description = surviving
        .iter()
        .any(|(m, _)| non_empty(&m.description).is_some());
    let last = surviving.len() - 1;

    let columns: Vec<ColumnView> = surviving
        .into_iter()
        .enumerate()
        .map(|(column_index, (milestone, issues))| ColumnView {
            title: milestone.title.clone(),
            due_on_display: milestone
                .due_on
                .as_deref()
                .and_then(|d| format_simple_date(d, options.language)),
            description: non_empty(&milestone.description).map(str::to_string),
            has_any_description,
            accent_color: accent_color(&milestone.title),
            cards: issues
                .into_iter()
                .map(|issue| card_view(issue, dataset, state, options))
                .collect(),
            column_index,
            is_last_column: column_index == last,
        })
        .collect();

    tracing::debug!(
        columns = columns.len(),
        cards = columns.iter().map(|c| c.cards.len()).sum::<usize>(),
        "render pass complete"
    );
    RenderOutcome::Columns(columns)
}
