use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::domain::types::CategoryId;

/// Whether "now" falls inside a company's effective range for a category.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    Active,
    Inactive,
}

impl Display for ClientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientStatus::Active => write!(f, "active"),
            ClientStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// One status checkbox in the filter panel.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Active,
    Inactive,
    All,
}

impl StatusFilter {
    /// Parses a status key, returning `None` for anything unrecognized.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "active" => Some(StatusFilter::Active),
            "inactive" => Some(StatusFilter::Inactive),
            "all" => Some(StatusFilter::All),
            _ => None,
        }
    }

    pub fn admits(self, status: ClientStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == ClientStatus::Active,
            StatusFilter::Inactive => status == ClientStatus::Inactive,
        }
    }
}

/// Immutable snapshot of the filter panel state.
///
/// The UI owns the mutable copy and hands a fresh value to the engine on every
/// evaluation.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct FilterSpec {
    all_categories: bool,
    categories: BTreeSet<CategoryId>,
    status_by_category: BTreeMap<CategoryId, BTreeSet<StatusFilter>>,
}

impl FilterSpec {
    /// A spec that places no restriction on categories.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn all_categories(mut self, enabled: bool) -> Self {
        self.all_categories = enabled;
        self
    }

    #[must_use]
    pub fn category(mut self, id: CategoryId) -> Self {
        self.categories.insert(id);
        self
    }

    /// Selects `id` and adds `status` to its accepted statuses.
    #[must_use]
    pub fn status(mut self, id: CategoryId, status: StatusFilter) -> Self {
        self.categories.insert(id.clone());
        self.status_by_category.entry(id).or_default().insert(status);
        self
    }

    /// Selects `id` with a status restriction that no company satisfies.
    #[must_use]
    pub fn unmatched_status(mut self, id: CategoryId) -> Self {
        self.categories.insert(id.clone());
        self.status_by_category.entry(id).or_default();
        self
    }

    pub fn is_all_categories(&self) -> bool {
        self.all_categories
    }

    pub fn selected_categories(&self) -> impl Iterator<Item = &CategoryId> {
        self.categories.iter()
    }

    /// True when no concrete category restriction applies.
    pub fn is_unrestricted(&self) -> bool {
        self.all_categories || self.categories.is_empty()
    }

    /// Accepted statuses for `id`; empty when none were ticked.
    pub fn statuses_for(&self, id: &CategoryId) -> impl Iterator<Item = StatusFilter> + '_ {
        self.status_by_category
            .get(id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// No status entry, or one containing `All`, means any status including
    /// non-membership. An empty entry admits nothing.
    pub fn accepts_any_status(&self, id: &CategoryId) -> bool {
        self.status_by_category
            .get(id)
            .is_none_or(|set| set.contains(&StatusFilter::All))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acc() -> CategoryId {
        CategoryId::new("acc").unwrap()
    }

    #[test]
    fn default_spec_is_unrestricted() {
        assert!(FilterSpec::unrestricted().is_unrestricted());
        assert!(
            FilterSpec::unrestricted()
                .category(acc())
                .all_categories(true)
                .is_unrestricted()
        );
        assert!(!FilterSpec::unrestricted().category(acc()).is_unrestricted());
    }

    #[test]
    fn status_selects_category() {
        let spec = FilterSpec::unrestricted().status(acc(), StatusFilter::Active);
        assert_eq!(spec.selected_categories().count(), 1);
        assert_eq!(
            spec.statuses_for(&acc()).collect::<Vec<_>>(),
            vec![StatusFilter::Active]
        );
        assert!(!spec.accepts_any_status(&acc()));
    }

    #[test]
    fn all_status_accepts_anything() {
        let spec = FilterSpec::unrestricted()
            .status(acc(), StatusFilter::Inactive)
            .status(acc(), StatusFilter::All);
        assert!(spec.accepts_any_status(&acc()));
        assert!(FilterSpec::unrestricted().category(acc()).accepts_any_status(&acc()));
    }

    #[test]
    fn unmatched_status_restricts_to_nothing() {
        let spec = FilterSpec::unrestricted().unmatched_status(acc());
        assert!(!spec.is_unrestricted());
        assert!(!spec.accepts_any_status(&acc()));
        assert_eq!(spec.statuses_for(&acc()).count(), 0);

        let widened = spec.status(acc(), StatusFilter::All);
        assert!(widened.accepts_any_status(&acc()));
    }

    #[test]
    fn status_keys_parse_loosely() {
        assert_eq!(StatusFilter::from_key(" Active "), Some(StatusFilter::Active));
        assert_eq!(StatusFilter::from_key("INACTIVE"), Some(StatusFilter::Inactive));
        assert_eq!(StatusFilter::from_key("all"), Some(StatusFilter::All));
        assert_eq!(StatusFilter::from_key("pending"), None);
    }

    #[test]
    fn status_filter_admits() {
        assert!(StatusFilter::All.admits(ClientStatus::Inactive));
        assert!(StatusFilter::Active.admits(ClientStatus::Active));
        assert!(!StatusFilter::Active.admits(ClientStatus::Inactive));
    }
}
