use crate::{
    domain::{company::CompanyRecord, types::CompanyId},
    repository::errors::RepositoryResult,
};

pub mod csv_export;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use crate::repository::csv_export::CsvCompanyRepository;

/// Read side of the company registry.
///
/// Implementations return full snapshots in source order; filtering is the
/// engine's job.
pub trait CompanyReader {
    fn list_companies(&self) -> RepositoryResult<Vec<CompanyRecord>>;
    fn get_company_by_id(&self, id: CompanyId) -> RepositoryResult<Option<CompanyRecord>>;
}

impl<T: CompanyReader + ?Sized> CompanyReader for std::sync::Arc<T> {
    fn list_companies(&self) -> RepositoryResult<Vec<CompanyRecord>> {
        (**self).list_companies()
    }

    fn get_company_by_id(&self, id: CompanyId) -> RepositoryResult<Option<CompanyRecord>> {
        (**self).get_company_by_id(id)
    }
}
