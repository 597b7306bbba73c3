use anyhow::{Context, Result, anyhow};
use glob::glob;
use std::path::{Path, PathBuf};

use crate::board::events::BoardSettings;
use crate::board::i18n::Language;
use crate::board_config::{BoardConfig, ROADMAP_DIR};

/// Default dataset file name, shared by discovery and `build`.
pub const DATA_FILE_NAME: &str = "roadmap-data.json";

/// Runtime configuration for the CLI.
///
/// Wraps the layered [`BoardConfig`] and resolves which dataset file the
/// commands read.
#[derive(Debug, Clone)]
pub struct Config {
    pub project_dir: PathBuf,
    pub roadmap_dir: PathBuf,
    pub verbose: bool,
    board: BoardConfig,
}

impl Config {
    pub fn new(
        project_dir: PathBuf,
        verbose: bool,
        data_file: Option<PathBuf>,
        language: Option<Language>,
    ) -> Result<Self> {
        let board = BoardConfig::with_cli_args(project_dir, data_file, language)?;
        Ok(Self {
            project_dir: board.project_dir.clone(),
            roadmap_dir: board.roadmap_dir.clone(),
            verbose,
            board,
        })
    }

    pub fn board_config(&self) -> &BoardConfig {
        &self.board
    }

    pub fn settings(&self) -> BoardSettings {
        self.board.settings()
    }

    pub fn language(&self) -> Language {
        self.board.language
    }

    /// Dataset to read: the configured file if any, otherwise discovered.
    pub fn data_file(&self) -> Result<PathBuf> {
        match self.board.configured_data_file() {
            Some(path) => Ok(path),
            None => Self::find_data_file(&self.project_dir),
        }
    }

    /// Where `build` writes when no output is given.
    pub fn default_output_file(&self) -> PathBuf {
        self.board
            .configured_data_file()
            .unwrap_or_else(|| self.roadmap_dir.join(DATA_FILE_NAME))
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.roadmap_dir).context("Failed to create .roadmap directory")
    }

    /// Find a dataset, checking .roadmap/roadmap-data.json, then
    /// public/roadmap-data.json, then the newest *roadmap*.json in the project root.
    fn find_data_file(project_dir: &Path) -> Result<PathBuf> {
        let candidates = [
            project_dir.join(ROADMAP_DIR).join(DATA_FILE_NAME),
            project_dir.join("public").join(DATA_FILE_NAME),
        ];
        if let Some(found) = candidates.into_iter().find(|p| p.exists()) {
            return Ok(found);
        }

        let pattern = project_dir
            .join("*roadmap*.json")
            .to_string_lossy()
            .to_string();

        let mut data_files: Vec<PathBuf> = glob(&pattern)
            .context("Failed to read glob pattern")?
            .filter_map(|entry| entry.ok())
            .collect();

        if data_files.is_empty() {
            return Err(anyhow!(
                "No roadmap data found. Run `roadmap build` or provide --data-file"
            ));
        }

        data_files.sort_by(|a, b| {
            let a_time = a.metadata().and_then(|m| m.modified()).ok();
            let b_time = b.metadata().and_then(|m| m.modified()).ok();
            b_time.cmp(&a_time)
        });

        tracing::debug!(path = %data_files[0].display(), "discovered roadmap data file");
        Ok(data_files.remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board_config::tests::{ENV_MUTEX, clear_env};
    use std::fs;
    use tempfile::tempdir;

    fn config_for(dir: &Path) -> Config {
        Config::new(dir.to_path_buf(), false, None, None).unwrap()
    }

    #[test]
    fn test_prefers_roadmap_dir() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".roadmap")).unwrap();
        fs::create_dir_all(dir.path().join("public")).unwrap();
        fs::write(dir.path().join(".roadmap/roadmap-data.json"), "{}").unwrap();
        fs::write(dir.path().join("public/roadmap-data.json"), "{}").unwrap();

        let config = config_for(dir.path());
        assert_eq!(
            config.data_file().unwrap(),
            config.project_dir.join(".roadmap/roadmap-data.json")
        );
    }

    #[test]
    fn test_falls_back_to_public() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("public")).unwrap();
        fs::write(dir.path().join("public/roadmap-data.json"), "{}").unwrap();

        let config = config_for(dir.path());
        assert_eq!(
            config.data_file().unwrap(),
            config.project_dir.join("public/roadmap-data.json")
        );
    }

    #[test]
    fn test_glob_discovery() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("my-roadmap-2025.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.json"), "{}").unwrap();

        let config = config_for(dir.path());
        assert_eq!(
            config.data_file().unwrap(),
            config.project_dir.join("my-roadmap-2025.json")
        );
    }

    #[test]
    fn test_no_data_file_error() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        let dir = tempdir().unwrap();
        let err = config_for(dir.path()).data_file().unwrap_err();
        assert!(err.to_string().contains("No roadmap data found"));
    }

    #[test]
    fn test_explicit_data_file_wins_over_discovery() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".roadmap")).unwrap();
        fs::write(dir.path().join(".roadmap/roadmap-data.json"), "{}").unwrap();

        let config = Config::new(
            dir.path().to_path_buf(),
            true,
            Some(PathBuf::from("custom.json")),
            Some(Language::Fr),
        )
        .unwrap();
        assert!(config.verbose);
        assert_eq!(config.language(), Language::Fr);
        assert_eq!(
            config.data_file().unwrap(),
            config.project_dir.join("custom.json")
        );
        assert_eq!(
            config.default_output_file(),
            config.project_dir.join("custom.json")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        let dir = tempdir().unwrap();
        let config = config_for(dir.path());
        assert_eq!(
            config.default_output_file(),
            config.roadmap_dir.join("roadmap-data.json")
        );
        config.ensure_directories().unwrap();
        assert!(config.roadmap_dir.exists());
    }
}
