//! Typed error hierarchy for the roadmap board.
//!
//! The engine itself only fails for one reason: a dataset with no milestones
//! is not a board. Everything else about the input is normalized. The
//! remaining variants belong to the loading and configuration shell.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, assembling or configuring a board.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("No roadmap data available yet: the dataset has no milestones")]
    EmptyDataset,

    #[error("Failed to read dataset at {path}: {source}")]
    DatasetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse dataset at {path}: {source}")]
    DatasetParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write dataset at {path}: {source}")]
    DatasetWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid project URL format: {0}")]
    InvalidProjectUrl(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dataset_is_matchable() {
        let err = BoardError::EmptyDataset;
        assert!(matches!(err, BoardError::EmptyDataset));
        assert!(err.to_string().contains("no milestones"));
    }

    #[test]
    fn dataset_read_carries_path() {
        let path = PathBuf::from("/srv/roadmap-data.json");
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = BoardError::DatasetRead {
            path: path.clone(),
            source: io_err,
        };
        match &err {
            BoardError::DatasetRead { path: p, source } => {
                assert_eq!(p, &path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            _ => panic!("Expected DatasetRead"),
        }
        assert!(err.to_string().contains("/srv/roadmap-data.json"));
    }

    #[test]
    fn dataset_parse_exposes_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = BoardError::DatasetParse {
            path: PathBuf::from("data.json"),
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn invalid_project_url_mentions_input() {
        let err = BoardError::InvalidProjectUrl("https://example.com".into());
        assert!(err.to_string().contains("https://example.com"));
    }

    #[test]
    fn converts_from_anyhow() {
        let err: BoardError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, BoardError::Other(_)));
        assert_eq!(err.to_string(), "boom");
    }
}
