use crate::constants::UNREAL_EXTENSIONS;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// A file found by a scan that is eligible for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub prefix: String,
    pub size: Option<u64>,
}

/// A directory the walk could not read. The scan carries on without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanWarning {
    pub path: Option<PathBuf>,
    pub message: String,
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "Unreadable directory {}: {}", path.display(), self.message),
            None => write!(f, "Unreadable directory: {}", self.message),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub root: PathBuf,
    pub files: Vec<CandidateFile>,
    pub warnings: Vec<ScanWarning>,
}

impl ScanResult {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Sum of the sizes that could be read during the scan.
    pub fn total_size(&self) -> u64 {
        self.files.iter().filter_map(|f| f.size).sum()
    }
}

/// Result of one attempted removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Deleted(PathBuf),
    Failed { path: PathBuf, reason: String },
}

impl Outcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Deleted(path) | Self::Failed { path, .. } => path,
        }
    }

    pub const fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deleted(path) => write!(f, "Successfully deleted: {}", path.display()),
            Self::Failed { path, reason } => {
                write!(f, "Failed to delete {}: {reason}", path.display())
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteReport {
    pub outcomes: Vec<Outcome>,
    pub cancelled: bool,
}

impl DeleteReport {
    pub fn deleted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_deleted()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.deleted_count()
    }

    pub fn summary(&self) -> String {
        let mut msg = format!(
            "Deleted {} files, {} failed.",
            self.deleted_count(),
            self.failed_count()
        );
        if self.cancelled {
            msg.push_str(" Cancelled before finishing.");
        }
        msg
    }
}

/// Case-insensitive set of file extensions, stored as `.ext` in lower case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    extensions: BTreeSet<String>,
}

impl ExtensionFilter {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .map(|e| format!(".{e}"))
            .collect();
        Self { extensions }
    }

    pub fn unreal_assets() -> Self {
        Self::new(UNREAL_EXTENSIONS)
    }

    pub fn matches(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| {
            let ext = format!(".{}", ext.to_string_lossy().to_lowercase());
            self.extensions.contains(&ext)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}

impl fmt::Display for ExtensionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "{}", joined.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_filter_normalizes_entries() {
        let filter = ExtensionFilter::new(["uasset", ".UMAP", "  ", "."]);
        let entries: Vec<&str> = filter.iter().collect();
        assert_eq!(entries, vec![".uasset", ".umap"]);
        assert!(ExtensionFilter::new(["", " . "]).is_empty());
    }

    #[test]
    fn extension_filter_is_case_insensitive() {
        let filter = ExtensionFilter::unreal_assets();
        assert!(filter.matches(Path::new("/tmp/SM_Rock.uasset")));
        assert!(filter.matches(Path::new("/tmp/Level.UMAP")));
        assert!(!filter.matches(Path::new("/tmp/readme.txt")));
        assert!(!filter.matches(Path::new("/tmp/SM_Rock")));
    }

    #[test]
    fn report_counts_and_summary() {
        let report = DeleteReport {
            outcomes: vec![
                Outcome::Deleted(PathBuf::from("/a")),
                Outcome::Failed {
                    path: PathBuf::from("/b"),
                    reason: "file not found".to_string(),
                },
                Outcome::Deleted(PathBuf::from("/c")),
            ],
            cancelled: false,
        };
        assert_eq!(report.deleted_count(), 2);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.summary(), "Deleted 2 files, 1 failed.");
    }

    #[test]
    fn outcome_log_lines() {
        let ok = Outcome::Deleted(PathBuf::from("/x/SM_Rock.uasset"));
        assert_eq!(ok.to_string(), "Successfully deleted: /x/SM_Rock.uasset");

        let failed = Outcome::Failed {
            path: PathBuf::from("/x/T_Rock.uasset"),
            reason: "permission denied".to_string(),
        };
        assert_eq!(
            failed.to_string(),
            "Failed to delete /x/T_Rock.uasset: permission denied"
        );
        assert_eq!(failed.path(), Path::new("/x/T_Rock.uasset"));
    }
}
