//! Turns a flat export of project items into a [`Dataset`].
//!
//! Fetching the items is someone else's job; this module only owns the
//! grouping policy: one milestone per distinct milestone title, items
//! without a milestone collected under the unplanned column, milestones in
//! title order with the unplanned one always last.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::filter::compare_label_names;
use super::models::{
    CustomFieldValue, Dataset, Issue, IssueState, Label, Milestone, ProjectField, ProjectInfo,
    SubIssues,
};
use crate::errors::BoardError;

/// Title given to the column of items that have no milestone.
pub const DEFAULT_UNPLANNED_TITLE: &str = "To be planned";

/// Organization and project number parsed from a project URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    pub org: String,
    pub number: u32,
}

static PROJECT_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com/orgs/([^/]+)/projects/(\d+)").unwrap());

/// Parse `https://github.com/orgs/{org}/projects/{number}`.
pub fn parse_project_url(url: &str) -> Result<ProjectRef, BoardError> {
    let caps = PROJECT_URL_RE
        .captures(url)
        .ok_or_else(|| BoardError::InvalidProjectUrl(url.to_string()))?;
    let number = caps[2]
        .parse()
        .map_err(|_| BoardError::InvalidProjectUrl(url.to_string()))?;
    Ok(ProjectRef {
        org: caps[1].to_string(),
        number,
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItemMilestone {
    pub title: String,
    #[serde(default)]
    pub due_on: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One project item as exported, before grouping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub state: Option<IssueState>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub milestone: Option<ItemMilestone>,
    #[serde(default)]
    pub labels: Option<Vec<Label>>,
    #[serde(default)]
    pub custom_fields: Option<HashMap<String, CustomFieldValue>>,
    #[serde(default)]
    pub sub_issues: Option<SubIssues>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_private: Option<bool>,
}

impl ProjectItem {
    fn into_issue(self) -> Issue {
        Issue {
            id: self.id,
            title: self.title,
            state: self.state.unwrap_or_default(),
            url: self.url,
            labels: self.labels.unwrap_or_default(),
            custom_fields: self.custom_fields.unwrap_or_default(),
            sub_issues: self.sub_issues,
            description: self.description,
            is_private: self.is_private.unwrap_or(false),
        }
    }
}

/// The export file the `build` command consumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProjectExport {
    #[serde(default)]
    pub project: ProjectInfo,
    #[serde(default)]
    pub fields: Vec<ProjectField>,
    #[serde(default)]
    pub items: Vec<ProjectItem>,
}

/// Group items into milestones: titles sorted, unplanned column last.
///
/// The first item seen for a milestone title decides its due date and
/// description. Issue order inside a milestone follows item order.
pub fn group_by_milestone(items: Vec<ProjectItem>, unplanned_title: &str) -> Vec<Milestone> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut milestones: Vec<Milestone> = Vec::new();

    for mut item in items {
        let (title, due_on, description) = match item.milestone.take() {
            Some(m) => (m.title, m.due_on, m.description),
            None => (unplanned_title.to_string(), None, None),
        };
        let slot = *index.entry(title.clone()).or_insert_with(|| {
            milestones.push(Milestone {
                title,
                due_on,
                description,
                issues: Vec::new(),
            });
            milestones.len() - 1
        });
        milestones[slot].issues.push(item.into_issue());
    }

    milestones.sort_by(|a, b| {
        let a_unplanned = a.title == unplanned_title;
        let b_unplanned = b.title == unplanned_title;
        a_unplanned
            .cmp(&b_unplanned)
            .then_with(|| compare_label_names(&a.title, &b.title))
    });
    milestones
}

/// Assemble a full dataset from an export.
///
/// Fails when the project URL is set but not an organization project URL,
/// or when there is nothing to show.
pub fn build_dataset(
    export: ProjectExport,
    unplanned_title: &str,
    generated_at: chrono::DateTime<chrono::Utc>,
) -> Result<Dataset, BoardError> {
    if !export.project.url.is_empty() {
        let project = parse_project_url(&export.project.url)?;
        tracing::debug!(org = %project.org, number = project.number, "assembling project");
    }
    let item_count = export.items.len();
    let dataset = Dataset {
        generated_at: Some(generated_at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
        project: export.project,
        fields: export
            .fields
            .into_iter()
            .filter(|f| !f.options.is_empty())
            .collect(),
        milestones: group_by_milestone(export.items, unplanned_title),
    };
    dataset.ensure_not_empty()?;
    tracing::info!(
        items = item_count,
        milestones = dataset.milestones.len(),
        "grouped project items into milestones"
    );
    Ok(dataset)
}
