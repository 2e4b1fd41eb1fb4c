//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::company::CompanyRecord;
use crate::domain::types::CompanyId;
use crate::repository::CompanyReader;
use crate::repository::errors::RepositoryResult;

mock! {
    pub Repository {}

    impl CompanyReader for Repository {
        fn list_companies(&self) -> RepositoryResult<Vec<CompanyRecord>>;
        fn get_company_by_id(&self, id: CompanyId) -> RepositoryResult<Option<CompanyRecord>>;
    }
}
