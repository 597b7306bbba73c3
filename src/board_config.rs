//! Board configuration read from `.roadmap/roadmap.toml`.
//!
//! Values are layered: file, then environment, then CLI flags.
//!
//! # Configuration File Format
//!
//! ```toml
//! [board]
//! data_file = "public/roadmap-data.json"
//! language = "en"
//! suggestion_limit = 10
//! description_limit = 300
//! unplanned_title = "To be planned"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::board::events::BoardSettings;
use crate::board::i18n::Language;
use crate::board::ingest::DEFAULT_UNPLANNED_TITLE;
use crate::board::render::{DESCRIPTION_LIMIT, RenderOptions};
use crate::board::suggest::SUGGESTION_LIMIT;

pub const ROADMAP_DIR: &str = ".roadmap";
pub const CONFIG_FILE: &str = "roadmap.toml";

pub const ENV_DATA_FILE: &str = "ROADMAP_DATA_FILE";
pub const ENV_LANG: &str = "ROADMAP_LANG";

/// The `[board]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSection {
    /// Dataset path, relative to the project directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<String>,
    /// Display language code, `en` or `fr`
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
    /// Card description cutoff in characters
    #[serde(default = "default_description_limit")]
    pub description_limit: usize,
    /// Column title for issues without a milestone (used by `build`)
    #[serde(default = "default_unplanned_title")]
    pub unplanned_title: String,
}

fn default_language() -> String {
    Language::default().to_string()
}

fn default_suggestion_limit() -> usize {
    SUGGESTION_LIMIT
}

fn default_description_limit() -> usize {
    DESCRIPTION_LIMIT
}

fn default_unplanned_title() -> String {
    DEFAULT_UNPLANNED_TITLE.to_string()
}

impl Default for BoardSection {
    fn default() -> Self {
        Self {
            data_file: None,
            language: default_language(),
            suggestion_limit: default_suggestion_limit(),
            description_limit: default_description_limit(),
            unplanned_title: default_unplanned_title(),
        }
    }
}

/// Contents of `roadmap.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardToml {
    #[serde(default)]
    pub board: BoardSection,
}

impl BoardToml {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse roadmap.toml")
    }

    /// Load `roadmap.toml` from the given `.roadmap` directory, or defaults when absent.
    pub fn load_or_default(roadmap_dir: &Path) -> Result<Self> {
        let config_path = roadmap_dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize roadmap.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.board.language.parse::<Language>().is_err() {
            warnings.push(format!(
                "Unknown language '{}': falling back to 'en' (valid values: en, fr)",
                self.board.language
            ));
        }
        if self.board.suggestion_limit == 0 {
            warnings.push("suggestion_limit is 0: no suggestions will be shown".to_string());
        }
        if self.board.description_limit == 0 {
            warnings.push("description_limit is 0: card descriptions will be empty".to_string());
        }
        if self.board.unplanned_title.trim().is_empty() {
            warnings.push("unplanned_title is empty".to_string());
        }
        if let Some(ref data_file) = self.board.data_file
            && !data_file.ends_with(".json")
        {
            warnings.push(format!(
                "data_file '{}' does not look like a JSON file",
                data_file
            ));
        }

        warnings
    }
}

/// Resolved board configuration.
///
/// It merges settings from:
/// 1. roadmap.toml file
/// 2. Environment variables
/// 3. CLI arguments
#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub project_dir: PathBuf,
    pub roadmap_dir: PathBuf,
    pub toml: BoardToml,
    /// Data file from env or CLI, already resolved against the project directory
    pub data_file_override: Option<PathBuf>,
    pub language: Language,
}

impl BoardConfig {
    pub fn new(project_dir: PathBuf) -> Result<Self> {
        let project_dir = project_dir
            .canonicalize()
            .context("Failed to resolve project directory")?;
        let roadmap_dir = project_dir.join(ROADMAP_DIR);
        let toml = BoardToml::load_or_default(&roadmap_dir)?;

        let language = std::env::var(ENV_LANG)
            .ok()
            .filter(|v| !v.is_empty())
            .map(|v| Language::from_code(&v))
            .unwrap_or_else(|| Language::from_code(&toml.board.language));
        let data_file_override = std::env::var(ENV_DATA_FILE)
            .ok()
            .filter(|v| !v.is_empty())
            .map(|v| project_dir.join(v));

        Ok(Self {
            project_dir,
            roadmap_dir,
            toml,
            data_file_override,
            language,
        })
    }

    /// Create a BoardConfig with CLI overrides applied on top of file and env.
    pub fn with_cli_args(
        project_dir: PathBuf,
        data_file: Option<PathBuf>,
        language: Option<Language>,
    ) -> Result<Self> {
        let mut config = Self::new(project_dir)?;
        if let Some(path) = data_file {
            config.data_file_override = Some(config.project_dir.join(path));
        }
        if let Some(lang) = language {
            config.language = lang;
        }
        Ok(config)
    }

    pub fn config_file(&self) -> PathBuf {
        self.roadmap_dir.join(CONFIG_FILE)
    }

    /// Explicitly configured data file (env/CLI → file), if any.
    pub fn configured_data_file(&self) -> Option<PathBuf> {
        self.data_file_override.clone().or_else(|| {
            self.toml
                .board
                .data_file
                .as_ref()
                .map(|f| self.project_dir.join(f))
        })
    }

    pub fn unplanned_title(&self) -> &str {
        &self.toml.board.unplanned_title
    }

    pub fn settings(&self) -> BoardSettings {
        BoardSettings {
            suggestion_limit: self.toml.board.suggestion_limit,
            render: RenderOptions {
                description_limit: self.toml.board.description_limit,
                language: self.language,
            },
        }
    }

    pub fn validate(&self) -> Vec<String> {
        self.toml.validate()
    }
}
