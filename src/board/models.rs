use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::BoardError;

/// Name of the project field that drives sorting, status filtering and suggestions.
pub const STATUS_FIELD: &str = "Status";

/// Treat an explicit JSON `null` the same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum IssueState {
    #[default]
    Open,
    Closed,
}

impl IssueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
        }
    }
}

impl FromStr for IssueState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OPEN" => Ok(Self::Open),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(format!("Invalid issue state: {}", s)),
        }
    }
}

/// The fixed color enum a project status option can declare.
///
/// Anything the board does not recognize deserializes to `Gray`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusColor {
    Green,
    Yellow,
    Purple,
    Blue,
    Orange,
    Red,
    Pink,
    #[default]
    #[serde(other)]
    Gray,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Label {
    pub name: String,
    /// Six hex digits, no leading `#`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: StatusColor,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<StatusOption>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldValue {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubIssues {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub completed: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: IssueState,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<Label>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_fields: HashMap<String, CustomFieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_issues: Option<SubIssues>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_private: bool,
}

impl Issue {
    /// Value of the `Status` custom field, if the issue has one.
    pub fn status(&self) -> Option<&str> {
        self.custom_fields
            .get(STATUS_FIELD)
            .and_then(|field| field.value.as_deref())
    }

    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l.name == name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub title: String,
    /// ISO timestamp; `None` marks the unplanned milestone.
    #[serde(default)]
    pub due_on: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub issues: Vec<Issue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

/// The whole board payload, loaded once and replaced wholesale on reload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    #[serde(default)]
    pub generated_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub project: ProjectInfo,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: Vec<ProjectField>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub milestones: Vec<Milestone>,
}

impl Dataset {
    /// Parse a dataset and require at least one milestone.
    pub fn from_json(content: &str) -> Result<Self, BoardError> {
        let dataset: Dataset = serde_json::from_str(content).map_err(|source| {
            BoardError::DatasetParse {
                path: "<inline>".into(),
                source,
            }
        })?;
        dataset.ensure_not_empty()?;
        Ok(dataset)
    }

    pub fn load(path: &Path) -> Result<Self, BoardError> {
        let content = std::fs::read_to_string(path).map_err(|source| BoardError::DatasetRead {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset: Dataset =
            serde_json::from_str(&content).map_err(|source| BoardError::DatasetParse {
                path: path.to_path_buf(),
                source,
            })?;
        dataset.ensure_not_empty()?;
        tracing::info!(
            path = %path.display(),
            milestones = dataset.milestones.len(),
            issues = dataset.total_issues(),
            "loaded roadmap dataset"
        );
        Ok(dataset)
    }

    pub fn save(&self, path: &Path) -> Result<(), BoardError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| BoardError::Other(anyhow::Error::new(e)))?;
        std::fs::write(path, content).map_err(|source| BoardError::DatasetWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn ensure_not_empty(&self) -> Result<(), BoardError> {
        if self.milestones.is_empty() {
            return Err(BoardError::EmptyDataset);
        }
        Ok(())
    }

    /// Ordered options of the `Status` field, empty when the project has none.
    pub fn status_options(&self) -> &[StatusOption] {
        self.fields
            .iter()
            .find(|f| f.name == STATUS_FIELD)
            .map(|f| f.options.as_slice())
            .unwrap_or(&[])
    }

    pub fn find_status_option(&self, name: &str) -> Option<&StatusOption> {
        self.status_options().iter().find(|o| o.name == name)
    }

    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.milestones.iter().flat_map(|m| m.issues.iter())
    }

    pub fn total_issues(&self) -> usize {
        self.milestones.iter().map(|m| m.issues.len()).sum()
    }
}
