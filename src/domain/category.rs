use serde::{Deserialize, Serialize};

use crate::domain::types::CategoryId;

/// Column names carrying one category's effective-date range.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryFields {
    pub id: CategoryId,
    /// Human readable name shown on dashboard badges.
    pub label: String,
    pub from_field: String,
    pub to_field: String,
}

impl CategoryFields {
    /// Uses the `<id>_client_effective_from/_to` naming convention.
    #[must_use]
    pub fn conventional(id: CategoryId, label: impl Into<String>) -> Self {
        Self {
            from_field: id.default_from_field(),
            to_field: id.default_to_field(),
            label: label.into(),
            id,
        }
    }
}

/// Lookup of every recognized category, built once at startup.
///
/// Iteration follows insertion order so summaries render in the configured
/// order. Re-adding an id replaces the earlier entry in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryTable {
    entries: Vec<CategoryFields>,
}

impl CategoryTable {
    pub fn new(entries: impl IntoIterator<Item = CategoryFields>) -> Self {
        let mut table = Self::default();
        for entry in entries {
            table.insert(entry);
        }
        table
    }

    pub fn insert(&mut self, entry: CategoryFields) {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, id: &CategoryId) -> Option<&CategoryFields> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryFields> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The service lines the firm currently offers.
    pub fn standard() -> Self {
        let defaults = [
            ("acc", "Accounting"),
            ("audit", "Audit"),
            ("sheria", "Sheria"),
            ("imm", "Immigration"),
        ];
        Self::new(defaults.into_iter().filter_map(|(id, label)| {
            CategoryId::new(id)
                .ok()
                .map(|id| CategoryFields::conventional(id, label))
        }))
    }
}
