//! Company listing workflows behind the dashboards.

use chrono::NaiveDateTime;

use crate::domain::company::CompanyRecord;
use crate::domain::filter::FilterSpec;
use crate::domain::types::CompanyId;
use crate::dto::companies::{
    CategoryMembership, CategorySummaryResponse, CompaniesQuery, CompaniesResponse, CompanyDetail,
    CompanyListItem,
};
use crate::engine::FilterEngine;
use crate::forms::filter::parse_as_of;
use crate::pagination::{Paginated, Pagination};
use crate::repository::CompanyReader;
use crate::services::{ServiceError, ServiceResult};

/// `as_of` wins over the caller's clock reading when supplied.
fn reference_instant(as_of: Option<&str>, now: NaiveDateTime) -> ServiceResult<NaiveDateTime> {
    match as_of.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Ok(parse_as_of(raw).map_err(|err| {
            log::error!("Failed to parse as_of: {err}");
            err
        })?),
        None => Ok(now),
    }
}

fn to_list_item(
    engine: &FilterEngine,
    company: CompanyRecord,
    now: NaiveDateTime,
) -> CompanyListItem {
    let memberships = engine
        .category_statuses(&company, now)
        .into_iter()
        .map(|(category, status)| CategoryMembership { category, status })
        .collect();

    CompanyListItem {
        company,
        memberships,
    }
}

fn load_companies<R>(repo: &R, engine: &FilterEngine) -> ServiceResult<Vec<CompanyRecord>>
where
    R: CompanyReader + ?Sized,
{
    let records = repo.list_companies().map_err(|err| {
        log::error!("Failed to load companies: {err}");
        err
    })?;
    engine.report_unparseable_dates(&records);
    Ok(records)
}

/// Searches, filters and paginates the company registry.
pub fn list_companies<R>(
    repo: &R,
    engine: &FilterEngine,
    query: CompaniesQuery,
    now: NaiveDateTime,
) -> ServiceResult<CompaniesResponse>
where
    R: CompanyReader + ?Sized,
{
    let now = reference_instant(query.as_of.as_deref(), now)?;

    let spec = match query.filter {
        Some(payload) => FilterSpec::try_from(payload).map_err(|err| {
            log::error!("Failed to validate filter: {err}");
            err
        })?,
        None => FilterSpec::unrestricted(),
    };

    let search_query = query
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let records = load_companies(repo, engine)?;
    let matching = engine.filter_companies(
        &records,
        &spec,
        search_query.as_deref().unwrap_or_default(),
        now,
    );

    let pagination = Pagination::new(query.page, query.per_page);
    let companies = Paginated::from_items(matching, pagination)
        .map(|record| to_list_item(engine, record.clone(), now));

    Ok(CompaniesResponse {
        search_query,
        companies,
    })
}

/// Badge counts for every configured category.
pub fn summarize_categories<R>(
    repo: &R,
    engine: &FilterEngine,
    as_of: Option<&str>,
    now: NaiveDateTime,
) -> ServiceResult<CategorySummaryResponse>
where
    R: CompanyReader + ?Sized,
{
    let now = reference_instant(as_of, now)?;
    let records = load_companies(repo, engine)?;

    Ok(CategorySummaryResponse {
        total: records.len(),
        categories: engine.summarize(&records, now),
    })
}

/// Loads one company with its category memberships.
pub fn show_company<R>(
    repo: &R,
    engine: &FilterEngine,
    company_id: i64,
    as_of: Option<&str>,
    now: NaiveDateTime,
) -> ServiceResult<CompanyDetail>
where
    R: CompanyReader + ?Sized,
{
    let company_id = CompanyId::new(company_id)?;
    let now = reference_instant(as_of, now)?;

    let company = repo
        .get_company_by_id(company_id)
        .map_err(|err| {
            log::error!("Failed to load company {company_id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)?;
    engine.report_unparseable_dates(std::slice::from_ref(&company));

    Ok(to_list_item(engine, company, now))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::domain::filter::ClientStatus;
    use crate::repository::errors::{RepositoryError, RepositoryResult};

    #[derive(Default)]
    struct MemoryRepo {
        companies: Vec<CompanyRecord>,
        loads: Cell<usize>,
        fail: bool,
    }

    impl CompanyReader for MemoryRepo {
        fn list_companies(&self) -> RepositoryResult<Vec<CompanyRecord>> {
            self.loads.set(self.loads.get() + 1);
            if self.fail {
                return Err(RepositoryError::Io("export unavailable".to_string()));
            }
            Ok(self.companies.clone())
        }

        fn get_company_by_id(&self, id: CompanyId) -> RepositoryResult<Option<CompanyRecord>> {
            Ok(self.companies.iter().find(|c| c.id == Some(id)).cloned())
        }
    }

    fn june_first() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn repo() -> MemoryRepo {
        let companies = vec![
            CompanyRecord::new("Acme Ltd")
                .with_id(CompanyId::new(1).unwrap())
                .with_field("acc_client_effective_from", "01/01/2023")
                .with_field("acc_client_effective_to", "31/12/2099"),
            CompanyRecord::new("Baraka Traders")
                .with_id(CompanyId::new(2).unwrap())
                .with_field("acc_client_effective_from", "2020-01-01")
                .with_field("acc_client_effective_to", "2021-12-31")
                .with_field("audit_client_effective_from", "2024-01-01"),
            CompanyRecord::new("Acme Logistics")
                .with_id(CompanyId::new(3).unwrap())
                .with_field("imm_client_effective_from", "2024-07-01"),
        ];
        MemoryRepo {
            companies,
            ..Default::default()
        }
    }

    fn names(response: &CompaniesResponse) -> Vec<&str> {
        response
            .companies
            .items
            .iter()
            .map(|item| item.company.company_name.as_str())
            .collect()
    }

    #[test]
    fn list_without_filter_returns_everything_in_order() {
        let repo = repo();
        let response =
            list_companies(&repo, &FilterEngine::default(), CompaniesQuery::default(), june_first())
                .unwrap();

        assert_eq!(names(&response), vec!["Acme Ltd", "Baraka Traders", "Acme Logistics"]);
        assert_eq!(response.companies.total, 3);
        assert_eq!(response.search_query, None);
        assert_eq!(repo.loads.get(), 1);
    }

    #[test]
    fn list_applies_search_and_filter() {
        let query: CompaniesQuery = serde_json::from_value(json!({
            "search": "  acme ",
            "filter": {
                "categories": {"acc": true},
                "statusByCategory": {"acc": {"active": true}}
            }
        }))
        .unwrap();

        let response =
            list_companies(&repo(), &FilterEngine::default(), query, june_first()).unwrap();

        assert_eq!(names(&response), vec!["Acme Ltd"]);
        assert_eq!(response.search_query.as_deref(), Some("acme"));
        assert_eq!(
            response.companies.items[0].memberships,
            vec![CategoryMembership {
                category: "acc".parse().unwrap(),
                status: ClientStatus::Active,
            }]
        );
    }

    #[test]
    fn as_of_overrides_clock() {
        let query = CompaniesQuery {
            filter: Some(
                serde_json::from_value(json!({
                    "categories": {"imm": true},
                    "statusByCategory": {"imm": {"active": true}}
                }))
                .unwrap(),
            ),
            as_of: Some("2024-07-01".to_string()),
            ..Default::default()
        };

        let response =
            list_companies(&repo(), &FilterEngine::default(), query, june_first()).unwrap();
        assert_eq!(names(&response), vec!["Acme Logistics"]);
    }

    #[test]
    fn invalid_as_of_is_a_form_error() {
        let query = CompaniesQuery {
            as_of: Some("someday".to_string()),
            ..Default::default()
        };

        let result = list_companies(&repo(), &FilterEngine::default(), query, june_first());
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn repository_failure_is_propagated() {
        let repo = MemoryRepo {
            fail: true,
            ..Default::default()
        };

        let result = list_companies(
            &repo,
            &FilterEngine::default(),
            CompaniesQuery::default(),
            june_first(),
        );
        assert!(matches!(
            result,
            Err(ServiceError::Repository(RepositoryError::Io(_)))
        ));
    }

    #[test]
    fn pagination_reports_total_of_all_matches() {
        let query = CompaniesQuery {
            page: Some(2),
            per_page: Some(2),
            ..Default::default()
        };

        let response =
            list_companies(&repo(), &FilterEngine::default(), query, june_first()).unwrap();
        assert_eq!(names(&response), vec!["Acme Logistics"]);
        assert_eq!(response.companies.total, 3);
        assert_eq!(response.companies.total_pages, 2);
    }

    #[test]
    fn summary_counts_members() {
        let summary =
            summarize_categories(&repo(), &FilterEngine::default(), None, june_first()).unwrap();

        assert_eq!(summary.total, 3);
        let acc = &summary.categories[0];
        assert_eq!((acc.members, acc.active, acc.inactive), (2, 1, 1));
        let imm = &summary.categories[3];
        assert_eq!((imm.members, imm.active, imm.inactive), (1, 0, 1));
    }

    #[test]
    fn show_company_handles_missing_and_invalid_ids() {
        let repo = repo();
        let engine = FilterEngine::default();

        let detail = show_company(&repo, &engine, 2, None, june_first()).unwrap();
        assert_eq!(detail.company.company_name, "Baraka Traders");
        assert_eq!(detail.memberships.len(), 2);

        assert!(matches!(
            show_company(&repo, &engine, 42, None, june_first()),
            Err(ServiceError::NotFound)
        ));
        assert!(matches!(
            show_company(&repo, &engine, 0, None, june_first()),
            Err(ServiceError::TypeConstraint(_))
        ));
    }
}
