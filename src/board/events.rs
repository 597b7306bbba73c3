//! Intent-level entry point for any UI driving the board.
//!
//! A [`Board`] owns the loaded dataset and the single [`FilterState`]. Each
//! [`Intent`] applies at most one facet mutation and then runs a full render
//! pass; there is no incremental recomputation.

use super::filter::{FilterState, extract_labels};
use super::models::{Dataset, IssueState, Label};
use super::render::RenderOptions;
use super::suggest::{SUGGESTION_LIMIT, Suggestion, SuggestionKind, suggest_with};
use super::view::{BoardView, FacetKind, board_view};
use crate::errors::BoardError;

/// What the user asked for, independent of the widget that asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Typing in the search box. Only computes suggestions.
    InputTextChanged(String),
    /// Enter in the search box; the text is trimmed and replaces the text facet.
    CommitTextFilter(String),
    SelectSuggestion(Suggestion),
    /// Label picker: add when absent, remove when present.
    ToggleLabel(String),
    /// Status picker or badge: clear when already active, otherwise replace.
    ToggleStatus(String),
    /// Label chip on a card: only ever adds.
    ClickCardLabel(String),
    SetIssueState(Option<IssueState>),
    /// Close button on a badge. `value` names the label for label badges.
    RemoveFacet {
        kind: FacetKind,
        value: Option<String>,
    },
    /// Backspace on an empty search box: last label, else status, else text.
    RemoveLastFacet,
    ClearAll,
}

/// Result of dispatching an intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Reaction {
    Suggestions(Vec<Suggestion>),
    Rendered(Box<BoardView>),
}

/// Display settings a board session carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSettings {
    pub suggestion_limit: usize,
    pub render: RenderOptions,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            suggestion_limit: SUGGESTION_LIMIT,
            render: RenderOptions::default(),
        }
    }
}

/// One board session: dataset, derived label list, and the live filters.
#[derive(Debug, Clone)]
pub struct Board {
    dataset: Dataset,
    labels: Vec<Label>,
    filters: FilterState,
    settings: BoardSettings,
}

impl Board {
    pub fn new(dataset: Dataset, settings: BoardSettings) -> Result<Self, BoardError> {
        dataset.ensure_not_empty()?;
        let labels = extract_labels(&dataset);
        tracing::debug!(
            milestones = dataset.milestones.len(),
            labels = labels.len(),
            "board session started"
        );
        Ok(Self {
            dataset,
            labels,
            filters: FilterState::new(),
            settings,
        })
    }

    /// Swap in a freshly loaded dataset. Filters are kept; selections the
    /// new data no longer knows simply match nothing.
    pub fn reload(&mut self, dataset: Dataset) -> Result<(), BoardError> {
        dataset.ensure_not_empty()?;
        self.labels = extract_labels(&dataset);
        self.dataset = dataset;
        Ok(())
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    pub fn suggestions(&self, query: &str) -> Vec<Suggestion> {
        suggest_with(
            query,
            &self.dataset,
            &self.labels,
            &self.filters,
            self.settings.suggestion_limit,
            self.settings.render.language,
        )
    }

    pub fn view(&self) -> BoardView {
        board_view(
            &self.dataset,
            &self.labels,
            &self.filters,
            &self.settings.render,
        )
    }

    pub fn dispatch(&mut self, intent: Intent) -> Reaction {
        tracing::debug!(?intent, "dispatching intent");
        if let Intent::InputTextChanged(query) = &intent {
            return Reaction::Suggestions(self.suggestions(query));
        }
        self.apply(intent);
        Reaction::Rendered(Box::new(self.view()))
    }

    fn toggle_status(&mut self, name: String) {
        if self.filters.project_status.as_deref() == Some(name.as_str()) {
            self.filters.set_project_status(None);
        } else {
            self.filters.set_project_status(Some(name));
        }
    }

    fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::InputTextChanged(_) => {}
            Intent::CommitTextFilter(text) => self.filters.set_text(text.trim()),
            Intent::SelectSuggestion(suggestion) => match suggestion.kind {
                SuggestionKind::Status => self.toggle_status(suggestion.value),
                SuggestionKind::Label => self.filters.add_label(&suggestion.value),
                SuggestionKind::Text => self.filters.set_text(suggestion.value),
            },
            Intent::ToggleLabel(name) => {
                if self.filters.has_label(&name) {
                    self.filters.remove_label(&name);
                } else {
                    self.filters.add_label(&name);
                }
            }
            Intent::ToggleStatus(name) => self.toggle_status(name),
            Intent::ClickCardLabel(name) => self.filters.add_label(&name),
            Intent::SetIssueState(state) => self.filters.set_issue_state(state),
            Intent::RemoveFacet { kind, value } => match kind {
                FacetKind::Text => self.filters.set_text(""),
                FacetKind::IssueState => self.filters.set_issue_state(None),
                FacetKind::Status => self.filters.set_project_status(None),
                FacetKind::Label => {
                    if let Some(name) = value {
                        self.filters.remove_label(&name);
                    }
                }
            },
            Intent::RemoveLastFacet => {
                if let Some(last) = self.filters.labels.last().cloned() {
                    self.filters.remove_label(&last);
                } else if self.filters.project_status.is_some() {
                    self.filters.set_project_status(None);
                } else if !self.filters.text.is_empty() {
                    self.filters.set_text("");
                }
            }
            Intent::ClearAll => self.filters.reset(),
        }
    }
}
