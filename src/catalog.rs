use crate::constants::DEFAULT_CATALOG;
use crate::error::CleanupError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub prefixes: Vec<String>,
}

/// Named groups of asset prefixes, in display order.
///
/// A prefix may belong to several categories (`SK_` is both an animation
/// and a mesh prefix). Matching is per prefix, so the overlap only matters
/// for bulk selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixCatalog {
    categories: Vec<Category>,
}

impl Default for PrefixCatalog {
    fn default() -> Self {
        let categories = DEFAULT_CATALOG
            .iter()
            .map(|(name, prefixes)| Category {
                name: (*name).to_string(),
                prefixes: prefixes.iter().map(ToString::to_string).collect(),
            })
            .collect();
        Self { categories }
    }
}

impl PrefixCatalog {
    pub fn new(categories: Vec<Category>) -> Result<Self, CleanupError> {
        // Names are selection keys and are looked up case-insensitively.
        let mut seen = BTreeSet::new();
        for category in &categories {
            if category.name.trim().is_empty() {
                return Err(CleanupError::InvalidCatalog(
                    "category name is empty".to_string(),
                ));
            }
            if category.prefixes.iter().any(String::is_empty) {
                return Err(CleanupError::InvalidCatalog(format!(
                    "category '{}' contains an empty prefix",
                    category.name
                )));
            }
            if !seen.insert(category.name.to_lowercase()) {
                return Err(CleanupError::InvalidCatalog(format!(
                    "category '{}' is defined more than once",
                    category.name
                )));
            }
        }
        Ok(Self { categories })
    }

    /// Loads a catalog from a JSON list of `{"name": ..., "prefixes": [...]}`.
    pub fn from_json_file(path: &Path) -> Result<Self, CleanupError> {
        let content = fs::read_to_string(path)?;
        let categories: Vec<Category> = serde_json::from_str(&content)?;
        Self::new(categories)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Case-insensitive lookup, also accepting the name without the
    /// trailing " Prefixes" (`mesh` finds "Mesh Prefixes").
    pub fn find_category(&self, query: &str) -> Result<&Category, CleanupError> {
        let wanted = query.trim().to_lowercase();
        self.categories
            .iter()
            .find(|c| {
                let name = c.name.to_lowercase();
                name == wanted || name.strip_suffix(" prefixes") == Some(wanted.as_str())
            })
            .ok_or_else(|| CleanupError::UnknownCategory(query.to_string()))
    }

    /// Sorted union of every prefix in the catalog.
    pub fn all_prefixes(&self) -> BTreeSet<String> {
        self.categories
            .iter()
            .flat_map(|c| c.prefixes.iter().cloned())
            .collect()
    }
}
