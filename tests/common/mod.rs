#![allow(dead_code)]

use std::io::Write;

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::NamedTempFile;

use company_registry::repository::CsvCompanyRepository;

pub const EXPORT: &str = "\
id,company_name,kra_pin,acc_client_effective_from,acc_client_effective_to,audit_client_effective_from,audit_client_effective_to,sheria_client_effective_from,sheria_client_effective_to
1,Acme Ltd,P051111111A,01/01/2023,31/12/2099,,,,
2,Baraka Traders,P052222222B,2020-01-01,2021-12-31,2024-01-01,,,
3,Chui Holdings,P053333333C,,,,,15 March 2022,
4,Acme Logistics,P054444444D,2024-02-01T00:00:00,,not-a-date,,,
";

/// Temporary CSV export removed when dropped.
pub struct TestExport {
    file: NamedTempFile,
}

impl TestExport {
    pub fn new(contents: &str) -> Self {
        let mut file = NamedTempFile::new().expect("create temp export");
        file.write_all(contents.as_bytes()).expect("write temp export");
        file.flush().expect("flush temp export");
        Self { file }
    }

    pub fn repository(&self) -> CsvCompanyRepository {
        CsvCompanyRepository::new(self.file.path())
    }
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, s))
        .expect("valid timestamp")
}
