use crate::constants::{ALLOWLIST_FILE, APP_DIR};
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Paths that are never offered for deletion, whatever their prefix.
#[derive(Debug, Clone, Default)]
pub struct Allowlist {
    rules: Vec<PathBuf>,
}

impl Allowlist {
    pub fn new<I, P>(rules: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            rules: rules.into_iter().map(Into::into).collect(),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(ALLOWLIST_FILE))
    }

    /// Loads the allowlist from the default configuration path.
    /// Returns an empty allowlist if the file doesn't exist or errors.
    pub fn load() -> Self {
        Self::default_path().map_or_else(Self::default, |path| Self::load_from(&path))
    }

    pub fn load_from(path: &Path) -> Self {
        let mut rules = Vec::new();

        if let Ok(file) = fs::File::open(path) {
            let reader = BufReader::new(file);
            for line in reader.lines().map_while(Result::ok) {
                let trimmed = line.trim();
                // Skip empty lines and comments
                if !trimmed.is_empty() && !trimmed.starts_with('#') {
                    rules.push(PathBuf::from(trimmed));
                }
            }
            log::debug!("Loaded {} protected paths from {}", rules.len(), path.display());
        }

        Self { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// A path is protected when it equals a rule or lies underneath one.
    /// Comparison is per path component, so `/mods/Keep` does not cover
    /// `/mods/KeepNot`.
    pub fn is_protected(&self, path: &Path) -> bool {
        self.rules.iter().any(|rule| path.starts_with(rule))
    }
}
