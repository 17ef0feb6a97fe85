//! Error types for the progress store

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a load fell back to default progress.
///
/// `ProgressStore::load` never fails; it resets to defaults and hands this back so
/// the caller can surface diagnostics.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no save file at {0}")]
    Missing(PathBuf),
    #[error("failed to read save file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed save file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// True when there was simply nothing saved yet
    pub fn is_missing(&self) -> bool {
        matches!(self, LoadError::Missing(_))
    }
}

/// Errors surfaced by progress mutators, `save` and `delete`
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("level index {index} out of range (level count {level_count})")]
    LevelOutOfRange { index: usize, level_count: usize },
    #[error("timestamp {0} cannot be encoded as save ticks")]
    TimestampOutOfRange(chrono::DateTime<chrono::Utc>),
    #[error("failed to serialize progress: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write save file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to delete save file {path}: {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ProgressError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_out_of_range_message() {
        let err = ProgressError::LevelOutOfRange {
            index: 5,
            level_count: 5,
        };
        assert_eq!(
            err.to_string(),
            "level index 5 out of range (level count 5)"
        );
    }

    #[test]
    fn test_load_error_missing() {
        let err = LoadError::Missing(PathBuf::from("/tmp/Game.sav"));
        assert!(err.is_missing());
        assert!(err.to_string().contains("Game.sav"));

        let err = LoadError::Read {
            path: PathBuf::from("/tmp/Game.sav"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!err.is_missing());
    }
}
