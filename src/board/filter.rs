//! Facet state and the pure filter/sort functions over it.
//!
//! Facets combine with AND. The label facet itself is AND as well: an issue
//! must carry every selected label. Filtering keeps input order, and the
//! status sort is stable, so the same input always lays out the same board.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::models::{Dataset, Issue, IssueState, Label, StatusOption};

/// The mutable query a user builds up on the board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub text: String,
    pub issue_state: Option<IssueState>,
    pub project_status: Option<String>,
    /// Selection order is kept; no duplicates.
    pub labels: Vec<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored verbatim; trimming is the caller's job.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn add_label(&mut self, name: &str) {
        if !self.has_label(name) {
            self.labels.push(name.to_string());
        }
    }

    pub fn remove_label(&mut self, name: &str) {
        self.labels.retain(|l| l != name);
    }

    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l == name)
    }

    pub fn set_project_status(&mut self, status: Option<String>) {
        self.project_status = status;
    }

    pub fn set_issue_state(&mut self, state: Option<IssueState>) {
        self.issue_state = state;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn has_active_filters(&self) -> bool {
        !self.text.is_empty()
            || self.issue_state.is_some()
            || self.project_status.is_some()
            || !self.labels.is_empty()
    }

    /// Whether a single issue passes every active facet.
    pub fn matches(&self, issue: &Issue) -> bool {
        if !self.text.is_empty() {
            let needle = self.text.to_lowercase();
            let title_match = issue.title.to_lowercase().contains(&needle);
            let label_match = issue
                .labels
                .iter()
                .any(|l| l.name.to_lowercase().contains(&needle));
            if !title_match && !label_match {
                return false;
            }
        }

        if let Some(state) = self.issue_state
            && issue.state != state
        {
            return false;
        }

        if let Some(status) = &self.project_status
            && issue.status() != Some(status.as_str())
        {
            return false;
        }

        self.labels.iter().all(|label| issue.has_label(label))
    }
}

/// Issues that pass every active facet, in input order.
pub fn filter_issues<'a>(issues: &'a [Issue], state: &FilterState) -> Vec<&'a Issue> {
    issues.iter().filter(|issue| state.matches(issue)).collect()
}

/// Stable sort by position of the issue's status within `status_options`.
///
/// Issues without a status, or with one the options don't list, share the
/// rank `status_options.len()` and end up last in input order.
pub fn sort_issues_by_status<'a>(
    mut issues: Vec<&'a Issue>,
    status_options: &[StatusOption],
) -> Vec<&'a Issue> {
    if status_options.is_empty() {
        return issues;
    }

    let mut order: HashMap<&str, usize> = HashMap::with_capacity(status_options.len());
    for (index, option) in status_options.iter().enumerate() {
        order.entry(option.name.as_str()).or_insert(index);
    }
    let unranked = status_options.len();

    issues.sort_by_key(|issue| {
        issue
            .status()
            .and_then(|s| order.get(s).copied())
            .unwrap_or(unranked)
    });
    issues
}

/// Number of issues across all milestones that pass the filters.
pub fn count_filtered_issues(dataset: Option<&Dataset>, state: &FilterState) -> usize {
    dataset.map_or(0, |data| {
        data.milestones
            .iter()
            .map(|m| m.issues.iter().filter(|i| state.matches(i)).count())
            .sum()
    })
}

/// Number of issues across all milestones, ignoring filters.
pub fn total_issues(dataset: Option<&Dataset>) -> usize {
    dataset.map_or(0, Dataset::total_issues)
}

/// Ordering used for label lists: case-insensitive first, ordinal as tie-break.
pub fn compare_label_names(a: &str, b: &str) -> std::cmp::Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Every distinct label in the dataset, sorted by name.
///
/// Labels are identified by name; the first occurrence's color wins.
pub fn extract_labels(dataset: &Dataset) -> Vec<Label> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut labels: Vec<Label> = Vec::new();
    for issue in dataset.issues() {
        for label in &issue.labels {
            if seen.insert(label.name.as_str()) {
                labels.push(label.clone());
            }
        }
    }
    labels.sort_by(|a, b| compare_label_names(&a.name, &b.name));
    labels
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::board::models::{CustomFieldValue, Milestone, ProjectField, StatusColor};

    pub(crate) fn label(name: &str, color: &str) -> Label {
        Label {
            name: name.to_string(),
            color: color.to_string(),
        }
    }

    pub(crate) fn issue(title: &str, status: Option<&str>, labels: &[&str]) -> Issue {
        let mut custom_fields = HashMap::new();
        if let Some(status) = status {
            custom_fields.insert(
                "Status".to_string(),
                CustomFieldValue {
                    value: Some(status.to_string()),
                    option_id: None,
                },
            );
        }
        Issue {
            id: format!("id-{}", title),
            title: title.to_string(),
            state: IssueState::Open,
            url: format!("https://github.com/org/repo/issues/{}", title.len()),
            labels: labels.iter().map(|l| label(l, "ededed")).collect(),
            custom_fields,
            sub_issues: None,
            description: None,
            is_private: false,
        }
    }

    pub(crate) fn option(name: &str, color: StatusColor) -> StatusOption {
        StatusOption {
            id: None,
            name: name.to_string(),
            color,
        }
    }

    /// The single-issue board used throughout the scenarios.
    pub(crate) fn scenario_dataset() -> Dataset {
        let mut fix = issue("Fix bug", Some("Todo"), &[]);
        fix.labels = vec![label("bug", "ff0000")];
        Dataset {
            generated_at: None,
            project: Default::default(),
            fields: vec![ProjectField {
                id: None,
                name: "Status".to_string(),
                options: vec![
                    option("Todo", StatusColor::Gray),
                    option("Done", StatusColor::Green),
                ],
            }],
            milestones: vec![Milestone {
                title: "v1".to_string(),
                due_on: None,
                description: None,
                issues: vec![fix],
            }],
        }
    }

    fn titles(issues: &[&Issue]) -> Vec<String> {
        issues.iter().map(|i| i.title.clone()).collect()
    }

    #[test]
    fn test_state_mutations() {
        let mut state = FilterState::new();
        assert!(!state.has_active_filters());

        state.add_label("bug");
        state.add_label("bug");
        state.add_label("ui");
        assert_eq!(state.labels, vec!["bug", "ui"]);

        state.remove_label("missing");
        assert_eq!(state.labels.len(), 2);
        state.remove_label("bug");
        assert_eq!(state.labels, vec!["ui"]);

        state.set_project_status(Some("Todo".into()));
        state.set_project_status(Some("Todo".into()));
        assert_eq!(state.project_status.as_deref(), Some("Todo"));

        state.set_issue_state(Some(IssueState::Closed));
        state.set_text("  padded ");
        assert_eq!(state.text, "  padded ");
        assert!(state.has_active_filters());

        state.reset();
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn test_has_active_filters_per_facet() {
        let mut s = FilterState::new();
        s.set_text("x");
        assert!(s.has_active_filters());
        let mut s = FilterState::new();
        s.set_issue_state(Some(IssueState::Open));
        assert!(s.has_active_filters());
        let mut s = FilterState::new();
        s.set_project_status(Some("Done".into()));
        assert!(s.has_active_filters());
        let mut s = FilterState::new();
        s.add_label("a");
        assert!(s.has_active_filters());
    }

    #[test]
    fn test_empty_state_is_identity() {
        let issues = vec![
            issue("c", Some("Done"), &["x"]),
            issue("a", None, &[]),
            issue("b", Some("Todo"), &["y", "z"]),
        ];
        let out = filter_issues(&issues, &FilterState::new());
        assert_eq!(out.len(), issues.len());
        for (kept, original) in out.iter().zip(&issues) {
            assert_eq!(*kept, original);
        }
    }

    #[test]
    fn test_text_matches_title_or_label_case_insensitive() {
        let issues = vec![
            issue("Login page crashes", None, &[]),
            issue("Improve docs", None, &["Frontend"]),
            issue("Other", None, &["backend"]),
        ];
        let mut state = FilterState::new();
        state.set_text("LOGIN");
        assert_eq!(titles(&filter_issues(&issues, &state)), vec!["Login page crashes"]);
        state.set_text("front");
        assert_eq!(titles(&filter_issues(&issues, &state)), vec!["Improve docs"]);
        state.set_text("end");
        assert_eq!(titles(&filter_issues(&issues, &state)), vec!["Improve docs", "Other"]);
    }

    #[test]
    fn test_labels_are_and_not_or() {
        let issues = vec![
            issue("only-a", None, &["A"]),
            issue("a-and-b", None, &["B", "A"]),
            issue("all", None, &["A", "C", "B"]),
            issue("none", None, &[]),
        ];
        let mut state = FilterState::new();
        state.add_label("A");
        state.add_label("B");
        let out = filter_issues(&issues, &state);
        assert_eq!(titles(&out), vec!["a-and-b", "all"]);
        for i in out {
            assert!(i.has_label("A") && i.has_label("B"));
        }
    }

    #[test]
    fn test_label_match_is_case_sensitive() {
        let issues = vec![issue("x", None, &["Bug"])];
        let mut state = FilterState::new();
        state.add_label("bug");
        assert!(filter_issues(&issues, &state).is_empty());
    }

    #[test]
    fn test_project_status_requires_status_value() {
        let issues = vec![
            issue("todo", Some("Todo"), &[]),
            issue("none", None, &[]),
            issue("done", Some("Done"), &[]),
        ];
        let mut state = FilterState::new();
        state.set_project_status(Some("Todo".into()));
        assert_eq!(titles(&filter_issues(&issues, &state)), vec!["todo"]);
        state.set_project_status(Some("Unknown".into()));
        assert!(filter_issues(&issues, &state).is_empty());
    }

    #[test]
    fn test_issue_state_facet() {
        let mut closed = issue("closed", None, &[]);
        closed.state = IssueState::Closed;
        let issues = vec![issue("open", None, &[]), closed];
        let mut state = FilterState::new();
        state.set_issue_state(Some(IssueState::Closed));
        assert_eq!(titles(&filter_issues(&issues, &state)), vec!["closed"]);
    }

    #[test]
    fn test_facets_combine_with_and() {
        let issues = vec![
            issue("Fix login", Some("Todo"), &["bug"]),
            issue("Fix logout", Some("Done"), &["bug"]),
            issue("Fix signup", Some("Todo"), &["feature"]),
        ];
        let mut state = FilterState::new();
        state.set_text("fix");
        state.set_project_status(Some("Todo".into()));
        state.add_label("bug");
        assert_eq!(titles(&filter_issues(&issues, &state)), vec!["Fix login"]);
    }

    #[test]
    fn test_scenario_label_filter() {
        let data = scenario_dataset();
        let issues = &data.milestones[0].issues;
        let mut state = FilterState::new();
        state.add_label("bug");
        assert_eq!(titles(&filter_issues(issues, &state)), vec!["Fix bug"]);

        let mut state = FilterState::new();
        state.add_label("missing");
        assert!(filter_issues(issues, &state).is_empty());
    }

    #[test]
    fn test_sort_scenario_todo_before_done() {
        let issues = vec![issue("done", Some("Done"), &[]), issue("todo", Some("Todo"), &[])];
        let options = vec![option("Todo", StatusColor::Gray), option("Done", StatusColor::Green)];
        let sorted = sort_issues_by_status(issues.iter().collect(), &options);
        assert_eq!(titles(&sorted), vec!["todo", "done"]);
    }

    #[test]
    fn test_sort_without_options_is_identity() {
        let issues = vec![issue("b", Some("Done"), &[]), issue("a", Some("Todo"), &[])];
        let sorted = sort_issues_by_status(issues.iter().collect(), &[]);
        assert_eq!(titles(&sorted), vec!["b", "a"]);
    }

    #[test]
    fn test_sort_is_stable_and_unknown_last() {
        let issues = vec![
            issue("u1", Some("Archived"), &[]),
            issue("d1", Some("Done"), &[]),
            issue("n1", None, &[]),
            issue("t1", Some("Todo"), &[]),
            issue("d2", Some("Done"), &[]),
            issue("u2", Some("Archived"), &[]),
            issue("t2", Some("Todo"), &[]),
        ];
        let options = vec![option("Todo", StatusColor::Gray), option("Done", StatusColor::Green)];
        let sorted = sort_issues_by_status(issues.iter().collect(), &options);
        assert_eq!(titles(&sorted), vec!["t1", "t2", "d1", "d2", "u1", "n1", "u2"]);
    }

    #[test]
    fn test_counts_tolerate_missing_dataset() {
        let state = FilterState::new();
        assert_eq!(count_filtered_issues(None, &state), 0);
        assert_eq!(total_issues(None), 0);
        assert_eq!(total_issues(Some(&Dataset::default())), 0);
    }

    #[test]
    fn test_counts_across_milestones() {
        let mut data = scenario_dataset();
        data.milestones.push(Milestone {
            title: "v2".into(),
            due_on: None,
            description: None,
            issues: vec![issue("Add bug tracker", None, &[]), issue("Docs", None, &[])],
        });
        let mut state = FilterState::new();
        assert_eq!(count_filtered_issues(Some(&data), &state), 3);
        state.set_text("bug");
        assert_eq!(count_filtered_issues(Some(&data), &state), 2);
        assert_eq!(total_issues(Some(&data)), 3);
    }

    #[test]
    fn test_extract_labels_dedupes_first_color_wins_and_sorts() {
        let mut a = issue("a", None, &[]);
        a.labels = vec![label("zeta", "000001"), label("Alpha", "000002")];
        let mut b = issue("b", None, &[]);
        b.labels = vec![label("zeta", "ffffff"), label("beta", "000003")];
        let data = Dataset {
            milestones: vec![Milestone {
                title: "m".into(),
                due_on: None,
                description: None,
                issues: vec![a, b],
            }],
            ..Default::default()
        };
        let labels = extract_labels(&data);
        let names: Vec<_> = labels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "beta", "zeta"]);
        assert_eq!(labels[2].color, "000001");
    }

    #[test]
    fn test_compare_label_names_tie_break() {
        use std::cmp::Ordering;
        assert_eq!(compare_label_names("a", "B"), Ordering::Less);
        assert_eq!(compare_label_names("B", "b"), Ordering::Less);
        assert_eq!(compare_label_names("x", "x"), Ordering::Equal);
    }
}
