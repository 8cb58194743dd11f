use crate::constants::{APP_DIR, PREFERENCES_FILE};
use crate::error::CleanupError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Flat key-value settings persisted as a JSON object.
///
/// Every `set` writes the file straight away. A missing file is an empty
/// store; a corrupt one is logged and ignored.
#[derive(Debug, Clone)]
pub struct Preferences {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

impl Preferences {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(PREFERENCES_FILE))
    }

    /// Loads from the user config directory, or an in-memory store when the
    /// platform has none.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(path),
            None => Self::in_memory(),
        }
    }

    pub fn load_from(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::error!("Failed to load preferences from {}: {e}", path.display());
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self {
            path: Some(path),
            values,
        }
    }

    pub const fn in_memory() -> Self {
        Self {
            path: None,
            values: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str, default: &str) -> String {
        self.values
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), CleanupError> {
        self.values.insert(key.to_string(), value.into());
        self.save()
    }

    fn save(&self) -> Result<(), CleanupError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        fs::write(path, content)?;
        Ok(())
    }
}
