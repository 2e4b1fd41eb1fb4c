//! Company registry read from a CSV export of the companies table.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::domain::company::{CompanyRecord, FieldValue};
use crate::domain::types::CompanyId;
use crate::repository::CompanyReader;
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub const DEFAULT_NAME_COLUMN: &str = "company_name";
const ID_COLUMN: &str = "id";

/// CSV-backed implementation of [`CompanyReader`].
///
/// The file is re-read on every call so each request sees the latest export.
#[derive(Clone, Debug)]
pub struct CsvCompanyRepository {
    path: PathBuf,
    name_column: String,
}

impl CsvCompanyRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            name_column: DEFAULT_NAME_COLUMN.to_string(),
        }
    }

    #[must_use]
    pub fn with_name_column(mut self, column: impl Into<String>) -> Self {
        self.name_column = column.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> RepositoryResult<Vec<CompanyRecord>> {
        let file = File::open(&self.path)?;
        parse_companies(file, &self.name_column)
    }
}

/// Parses a CSV export with a header row into company records.
///
/// Every column other than the id and name columns is kept as a field. Empty
/// cells become [`FieldValue::Null`]. Rows without a name are skipped.
pub fn parse_companies<R: Read>(
    reader: R,
    name_column: &str,
) -> RepositoryResult<Vec<CompanyRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if !headers.iter().any(|header| header == name_column) {
        return Err(RepositoryError::ValidationError(format!(
            "missing `{name_column}` column"
        )));
    }

    let mut companies = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let line = row.position().map_or(0, |pos| pos.line());
        let mut company = CompanyRecord::default();

        for (i, cell) in row.iter().enumerate() {
            match headers.get(i) {
                Some(header) if header == name_column => company.company_name = cell.to_string(),
                Some(ID_COLUMN) => {
                    if cell.is_empty() {
                        continue;
                    }
                    match cell.parse::<i64>().ok().and_then(|id| CompanyId::new(id).ok()) {
                        Some(id) => company.id = Some(id),
                        None => log::warn!("Ignoring invalid company id {cell:?} on line {line}"),
                    }
                }
                Some(header) if header.is_empty() => continue,
                Some(header) => {
                    let value = if cell.is_empty() {
                        FieldValue::Null
                    } else {
                        FieldValue::Text(cell.to_string())
                    };
                    company.fields.insert(header.to_string(), value);
                }
                None => continue,
            }
        }

        if company.company_name.is_empty() {
            log::warn!("Skipping company without a name on line {line}");
            continue;
        }
        companies.push(company);
    }

    Ok(companies)
}

impl CompanyReader for CsvCompanyRepository {
    fn list_companies(&self) -> RepositoryResult<Vec<CompanyRecord>> {
        self.load()
    }

    fn get_company_by_id(&self, id: CompanyId) -> RepositoryResult<Option<CompanyRecord>> {
        Ok(self
            .load()?
            .into_iter()
            .find(|company| company.id == Some(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\
id,company_name,kra_pin,acc_client_effective_from,acc_client_effective_to
1,Acme Ltd,P051111111A,01/01/2023,31/12/2099
2, Baraka Traders ,P052222222B,2024-02-01,
x,Chui Holdings,,,
3,,P053333333C,2024-01-01,
";

    #[test]
    fn parses_rows_in_file_order() {
        let companies = parse_companies(EXPORT.as_bytes(), DEFAULT_NAME_COLUMN).unwrap();

        let names: Vec<_> = companies.iter().map(|c| c.company_name.as_str()).collect();
        assert_eq!(names, vec!["Acme Ltd", "Baraka Traders", "Chui Holdings"]);

        assert_eq!(companies[0].id, Some(CompanyId::new(1).unwrap()));
        assert_eq!(
            companies[0].fields["acc_client_effective_to"],
            FieldValue::Text("31/12/2099".to_string())
        );
        assert_eq!(companies[1].fields["acc_client_effective_to"], FieldValue::Null);
        assert_eq!(companies[2].id, None);
        assert!(!companies[0].fields.contains_key("company_name"));
    }

    #[test]
    fn missing_name_column_is_a_validation_error() {
        let result = parse_companies("id,name\n1,Acme\n".as_bytes(), DEFAULT_NAME_COLUMN);
        assert!(matches!(result, Err(RepositoryError::ValidationError(_))));

        let renamed = parse_companies("id,name\n1,Acme\n".as_bytes(), "name").unwrap();
        assert_eq!(renamed[0].company_name, "Acme");
    }
}
