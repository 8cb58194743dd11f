use crate::catalog::PrefixCatalog;
use std::collections::{BTreeMap, BTreeSet};

/// Which prefixes the user picked.
///
/// The per-prefix map is the only source of truth. Category flags exist
/// solely to drive the one-shot "toggle category" action and are never
/// recomputed from the prefixes, so deselecting a single member afterwards
/// leaves the category flag as it was.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    prefixes: BTreeMap<String, bool>,
    categories: BTreeMap<String, Vec<String>>,
    category_flags: BTreeMap<String, bool>,
}

impl SelectionState {
    pub fn new(catalog: &PrefixCatalog) -> Self {
        let mut state = Self::default();
        for category in catalog.categories() {
            for prefix in &category.prefixes {
                state.prefixes.insert(prefix.clone(), false);
            }
            state
                .categories
                .insert(category.name.clone(), category.prefixes.clone());
            state.category_flags.insert(category.name.clone(), false);
        }
        state
    }

    pub fn is_selected(&self, prefix: &str) -> bool {
        self.prefixes.get(prefix).copied().unwrap_or(false)
    }

    pub fn category_flag(&self, name: &str) -> bool {
        self.category_flags.get(name).copied().unwrap_or(false)
    }

    /// Sets a single prefix. Unknown prefixes are ignored.
    pub fn set_prefix(&mut self, prefix: &str, selected: bool) {
        if let Some(value) = self.prefixes.get_mut(prefix) {
            *value = selected;
        }
    }

    pub fn toggle_prefix(&mut self, prefix: &str) {
        if let Some(value) = self.prefixes.get_mut(prefix) {
            *value = !*value;
        }
    }

    /// Assigns `selected` to every prefix of the category, overriding any
    /// individual choice made before.
    pub fn set_category(&mut self, name: &str, selected: bool) {
        let Some(members) = self.categories.get(name) else {
            return;
        };
        for prefix in members {
            if let Some(value) = self.prefixes.get_mut(prefix) {
                *value = selected;
            }
        }
        self.category_flags.insert(name.to_string(), selected);
    }

    pub fn toggle_category(&mut self, name: &str) {
        let next = !self.category_flag(name);
        self.set_category(name, next);
    }

    pub fn select_all(&mut self) {
        self.prefixes.values_mut().for_each(|v| *v = true);
    }

    pub fn clear(&mut self) {
        self.prefixes.values_mut().for_each(|v| *v = false);
    }

    pub fn selected_count(&self) -> usize {
        self.prefixes.values().filter(|v| **v).count()
    }

    pub fn selected_prefixes(&self) -> BTreeSet<String> {
        self.prefixes
            .iter()
            .filter(|(_, selected)| **selected)
            .map(|(prefix, _)| prefix.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_toggle_is_one_shot() {
        let catalog = PrefixCatalog::default();
        let mut selection = SelectionState::new(&catalog);

        selection.toggle_category("Mesh Prefixes");
        selection.set_prefix("PM_", false);

        let mesh = catalog.category("Mesh Prefixes").map(|c| c.prefixes.clone());
        for prefix in mesh.unwrap_or_default() {
            assert_eq!(selection.is_selected(&prefix), prefix != "PM_", "{prefix}");
        }
        assert!(selection.category_flag("Mesh Prefixes"));
    }

    #[test]
    fn category_toggle_overrides_individual_choices() {
        let catalog = PrefixCatalog::default();
        let mut selection = SelectionState::new(&catalog);

        selection.toggle_prefix("VFX_");
        selection.toggle_category("VFX Prefixes");
        assert!(selection.is_selected("FX_"));
        assert!(selection.is_selected("VFX_"));

        selection.toggle_category("VFX Prefixes");
        assert!(!selection.is_selected("FX_"));
        assert!(!selection.is_selected("VFX_"));
    }

    #[test]
    fn shared_prefix_is_one_entry() {
        let catalog = PrefixCatalog::default();
        let mut selection = SelectionState::new(&catalog);

        selection.toggle_category("Animation Prefixes");
        assert!(selection.is_selected("SK_"));
        // The mesh flag never moved even though SK_ is now selected.
        assert!(!selection.category_flag("Mesh Prefixes"));

        selection.toggle_category("Mesh Prefixes");
        selection.toggle_category("Mesh Prefixes");
        assert!(!selection.is_selected("SK_"));
        assert!(selection.is_selected("ABP_"));
    }

    #[test]
    fn selected_prefixes_and_bulk_actions() {
        let catalog = PrefixCatalog::default();
        let mut selection = SelectionState::new(&catalog);
        assert!(selection.selected_prefixes().is_empty());

        selection.toggle_prefix("SM_");
        selection.toggle_prefix("T_");
        selection.toggle_prefix("NOT_IN_CATALOG_");
        let selected: Vec<String> = selection.selected_prefixes().into_iter().collect();
        assert_eq!(selected, vec!["SM_".to_string(), "T_".to_string()]);

        selection.select_all();
        assert_eq!(selection.selected_count(), catalog.all_prefixes().len());

        selection.clear();
        assert_eq!(selection.selected_count(), 0);
    }
}
