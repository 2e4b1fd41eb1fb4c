use std::collections::BTreeMap;
use std::fmt::Display;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::CompanyId;

/// A single column value as supplied by the data-access layer.
///
/// JSON strings in ISO form become native dates; every other string is kept as
/// text and left to the date parser.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl FieldValue {
    /// Null and whitespace-only text count as "no value".
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Date(date) => write!(f, "{date}"),
            FieldValue::DateTime(datetime) => write!(f, "{datetime}"),
            FieldValue::Bool(value) => write!(f, "{value}"),
            FieldValue::Number(value) => write!(f, "{value}"),
            FieldValue::Text(text) => write!(f, "{text}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::DateTime(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Read-only snapshot of one row of the company registry.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct CompanyRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CompanyId>,
    /// Display name used by the search box.
    pub company_name: String,
    /// Every other column, including the per-category effective dates.
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl CompanyRecord {
    #[must_use]
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            id: None,
            company_name: company_name.into(),
            fields: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: CompanyId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn with_field(mut self, column: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(column.into(), value.into());
        self
    }

    /// Returns the value of `column` unless it is missing or blank.
    pub fn present_field(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column).filter(|value| !value.is_blank())
    }

    /// Case-insensitive substring match on the display name.
    ///
    /// `needle` must already be lower-cased.
    pub fn name_contains(&self, needle: &str) -> bool {
        needle.is_empty() || self.company_name.to_lowercase().contains(needle)
    }
}
