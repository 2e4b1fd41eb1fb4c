//! Configuration model loaded from external sources.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::dates::{DateParser, DateStrategy};
use crate::domain::category::{CategoryFields, CategoryTable};
use crate::domain::types::CategoryId;
use crate::engine::{FilterEngine, MissingEndDate};
use crate::repository::csv_export::DEFAULT_NAME_COLUMN;

fn default_name_column() -> String {
    DEFAULT_NAME_COLUMN.to_string()
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// CSV export of the companies table.
    pub companies_csv: String,
    #[serde(default = "default_name_column")]
    pub name_column: String,
    #[serde(default)]
    pub filter: FilterConfig,
}

/// One entry of the category table. Column names follow the
/// `<id>_client_effective_from/_to` convention unless overridden.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CategoryConfig {
    pub id: CategoryId,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub from_field: Option<String>,
    #[serde(default)]
    pub to_field: Option<String>,
}

impl From<&CategoryConfig> for CategoryFields {
    fn from(value: &CategoryConfig) -> Self {
        let label = value
            .label
            .clone()
            .unwrap_or_else(|| value.id.as_str().to_string());
        let mut fields = CategoryFields::conventional(value.id.clone(), label);
        if let Some(from_field) = &value.from_field {
            fields.from_field = from_field.clone();
        }
        if let Some(to_field) = &value.to_field {
            fields.to_field = to_field.clone();
        }
        fields
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct FilterConfig {
    #[serde(default)]
    pub missing_end_date: MissingEndDate,
    /// Upper bound used for open-ended ranges; defaults to 9999-12-31.
    #[serde(default)]
    pub far_future: Option<NaiveDate>,
    /// Parser strategy order; empty keeps the built-in order.
    #[serde(default)]
    pub date_formats: Vec<DateStrategy>,
    /// Empty keeps the standard acc/audit/sheria/imm table.
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
}

impl FilterConfig {
    pub fn category_table(&self) -> CategoryTable {
        if self.categories.is_empty() {
            CategoryTable::standard()
        } else {
            CategoryTable::new(self.categories.iter().map(CategoryFields::from))
        }
    }

    /// Builds the engine shared by all request handlers.
    pub fn build_engine(&self) -> FilterEngine {
        let engine = FilterEngine::new(self.category_table())
            .with_parser(DateParser::new(self.date_formats.clone()))
            .with_missing_end(self.missing_end_date);
        match self.far_future {
            Some(far_future) => engine.with_far_future(far_future),
            None => engine,
        }
    }
}
