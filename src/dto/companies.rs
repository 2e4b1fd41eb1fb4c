//! DTOs exchanged with the company dashboards.

use serde::{Deserialize, Serialize};

use crate::domain::company::CompanyRecord;
use crate::domain::filter::ClientStatus;
use crate::domain::types::CategoryId;
use crate::engine::CategorySummary;
use crate::forms::filter::FilterSpecPayload;
use crate::pagination::Paginated;

/// Body accepted by `POST /api/v1/companies`.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CompaniesQuery {
    /// Free-text search applied to company names.
    #[serde(default)]
    pub search: Option<String>,
    /// Filter dialog state; absent means no category restriction.
    #[serde(default)]
    pub filter: Option<FilterSpecPayload>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub per_page: Option<usize>,
    /// Pins "now" for the status evaluation (ISO date or datetime).
    #[serde(default)]
    pub as_of: Option<String>,
}

/// Membership of one company in one category.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct CategoryMembership {
    pub category: CategoryId,
    pub status: ClientStatus,
}

/// One table row: the record plus its resolved statuses.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CompanyListItem {
    #[serde(flatten)]
    pub company: CompanyRecord,
    pub memberships: Vec<CategoryMembership>,
}

/// Result payload returned by [`crate::services::companies::list_companies`].
#[derive(Debug, Serialize)]
pub struct CompaniesResponse {
    pub search_query: Option<String>,
    pub companies: Paginated<CompanyListItem>,
}

/// Single company view.
pub type CompanyDetail = CompanyListItem;

#[derive(Debug, Serialize)]
pub struct CategorySummaryResponse {
    /// Number of companies in the registry snapshot.
    pub total: usize,
    pub categories: Vec<CategorySummary>,
}
