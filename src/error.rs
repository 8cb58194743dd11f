use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop an operation before it touches the filesystem.
///
/// Per-file problems are not errors: unreadable directories end up in
/// [`crate::model::ScanWarning`] and failed removals in
/// [`crate::model::Outcome::Failed`].
#[derive(Debug, Error)]
pub enum CleanupError {
    #[error("Root directory does not exist: {}", .0.display())]
    RootMissing(PathBuf),
    #[error("Root path is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),
    #[error("Invalid prefix catalog: {0}")]
    InvalidCatalog(String),
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("Filesystem error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CleanupError {
    /// True for errors caused by bad caller input rather than the environment.
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::RootMissing(_)
                | Self::RootNotDirectory(_)
                | Self::InvalidCatalog(_)
                | Self::UnknownCategory(_)
        )
    }
}
