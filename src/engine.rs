//! Date-range based client category/status filtering.
//!
//! A company is an *active* client of a category when "now" falls within the
//! inclusive `[from, to]` range stored on its record for that category. The
//! [`FilterEngine`] composes that primitive into the multi-category filter used
//! by the dashboards. Evaluation never fails: a malformed date makes the
//! company a non-member of that category, and
//! [`FilterEngine::report_unparseable_dates`] puts the offending cells in the log.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::dates::{DateParser, ParsedDate};
use crate::domain::category::{CategoryFields, CategoryTable};
use crate::domain::company::CompanyRecord;
use crate::domain::filter::{ClientStatus, FilterSpec};
use crate::domain::types::CategoryId;

/// How to read a category range that has a start date but no end date.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MissingEndDate {
    /// Membership runs indefinitely (until the far-future sentinel).
    #[default]
    OpenEnded,
    /// Without an end date the company is not a member of the category.
    NotMember,
}

/// Per-category badge counts.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: CategoryId,
    pub label: String,
    pub members: usize,
    pub active: usize,
    pub inactive: usize,
}

pub fn default_far_future() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Stateless evaluator shared by every request.
#[derive(Clone, Debug)]
pub struct FilterEngine {
    categories: CategoryTable,
    parser: DateParser,
    missing_end: MissingEndDate,
    far_future: NaiveDate,
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new(CategoryTable::standard())
    }
}

impl FilterEngine {
    pub fn new(categories: CategoryTable) -> Self {
        Self {
            categories,
            parser: DateParser::default(),
            missing_end: MissingEndDate::default(),
            far_future: default_far_future(),
        }
    }

    #[must_use]
    pub fn with_parser(mut self, parser: DateParser) -> Self {
        self.parser = parser;
        self
    }

    #[must_use]
    pub fn with_missing_end(mut self, policy: MissingEndDate) -> Self {
        self.missing_end = policy;
        self
    }

    #[must_use]
    pub fn with_far_future(mut self, far_future: NaiveDate) -> Self {
        self.far_future = far_future;
        self
    }

    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    pub fn missing_end(&self) -> MissingEndDate {
        self.missing_end
    }

    /// Whether the record is a member of `category`: its range dates are
    /// present and parseable, whether or not "now" falls inside them.
    pub fn company_belongs_to_category(
        &self,
        record: &CompanyRecord,
        category: &CategoryId,
    ) -> bool {
        match self.categories.get(category) {
            Some(fields) => self.effective_range(record, fields).is_some(),
            None => false,
        }
    }

    /// Inclusive `[from, to]` range, or `None` when the record is not a member.
    fn effective_range(
        &self,
        record: &CompanyRecord,
        fields: &CategoryFields,
    ) -> Option<(NaiveDate, NaiveDate)> {
        let ParsedDate::Valid(from) = self.read_date(record, fields, &fields.from_field) else {
            return None;
        };

        let to = match self.read_date(record, fields, &fields.to_field) {
            ParsedDate::Valid(date) => date,
            ParsedDate::Absent => match self.missing_end {
                MissingEndDate::OpenEnded => self.far_future,
                MissingEndDate::NotMember => return None,
            },
            ParsedDate::Invalid => return None,
        };

        Some((from, to))
    }

    /// Status of a member, `None` for a non-member.
    fn evaluate(
        &self,
        record: &CompanyRecord,
        fields: &CategoryFields,
        now: NaiveDateTime,
    ) -> Option<ClientStatus> {
        let (from, to) = self.effective_range(record, fields)?;
        let today = now.date();
        if from <= today && today <= to {
            Some(ClientStatus::Active)
        } else {
            Some(ClientStatus::Inactive)
        }
    }

    /// Active when `from <= now <= to`, both bounds inclusive by calendar day.
    pub fn resolve_category_status(
        &self,
        record: &CompanyRecord,
        category: &CategoryId,
        now: NaiveDateTime,
    ) -> ClientStatus {
        match self.categories.get(category) {
            Some(fields) => self
                .evaluate(record, fields, now)
                .unwrap_or(ClientStatus::Inactive),
            None => ClientStatus::Inactive,
        }
    }

    fn read_date(
        &self,
        record: &CompanyRecord,
        fields: &CategoryFields,
        column: &str,
    ) -> ParsedDate {
        let value = record.fields.get(column);
        let parsed = self.parser.parse_value(value);
        if parsed == ParsedDate::Invalid {
            if let Some(raw) = value {
                log::debug!(
                    "Treating company {:?} as outside category {}: unparseable {column} {raw}",
                    record.company_name,
                    fields.id
                );
            }
        }
        parsed
    }

    /// Logs every unparseable date cell once at `warn` and returns how many
    /// were found. Evaluation itself only logs at `debug`.
    pub fn report_unparseable_dates(&self, records: &[CompanyRecord]) -> usize {
        let mut found = 0;
        for record in records {
            for fields in self.categories.iter() {
                for column in [&fields.from_field, &fields.to_field] {
                    let value = record.fields.get(column.as_str());
                    if self.parser.parse_value(value) != ParsedDate::Invalid {
                        continue;
                    }
                    found += 1;
                    if let Some(raw) = value {
                        log::warn!(
                            "Unparseable {column} for company {:?} in category {}: {raw}",
                            record.company_name,
                            fields.id
                        );
                    }
                }
            }
        }
        found
    }

    /// Evaluates the multi-category predicate: every selected category must pass.
    pub fn matches_filter(
        &self,
        record: &CompanyRecord,
        spec: &FilterSpec,
        now: NaiveDateTime,
    ) -> bool {
        if spec.is_unrestricted() {
            return true;
        }

        spec.selected_categories().all(|category| {
            let Some(fields) = self.categories.get(category) else {
                log::debug!("Ignoring unknown category {category} in filter");
                return true;
            };

            if spec.accepts_any_status(category) {
                return true;
            }

            match self.evaluate(record, fields, now) {
                Some(status) => spec
                    .statuses_for(category)
                    .any(|accepted| accepted.admits(status)),
                None => false,
            }
        })
    }

    /// Name search followed by [`Self::matches_filter`], preserving input order.
    pub fn filter_companies<'a>(
        &self,
        records: &'a [CompanyRecord],
        spec: &FilterSpec,
        search_term: &str,
        now: NaiveDateTime,
    ) -> Vec<&'a CompanyRecord> {
        let needle = search_term.trim().to_lowercase();
        records
            .iter()
            .filter(|record| record.name_contains(&needle))
            .filter(|record| self.matches_filter(record, spec, now))
            .collect()
    }

    pub fn count_matching(
        &self,
        records: &[CompanyRecord],
        spec: &FilterSpec,
        search_term: &str,
        now: NaiveDateTime,
    ) -> usize {
        self.filter_companies(records, spec, search_term, now).len()
    }

    /// Categories the record belongs to, in table order, with their status.
    pub fn category_statuses(
        &self,
        record: &CompanyRecord,
        now: NaiveDateTime,
    ) -> Vec<(CategoryId, ClientStatus)> {
        self.categories
            .iter()
            .filter_map(|fields| {
                self.evaluate(record, fields, now)
                    .map(|status| (fields.id.clone(), status))
            })
            .collect()
    }

    pub fn summarize(&self, records: &[CompanyRecord], now: NaiveDateTime) -> Vec<CategorySummary> {
        self.categories
            .iter()
            .map(|fields| {
                let mut summary = CategorySummary {
                    category: fields.id.clone(),
                    label: fields.label.clone(),
                    members: 0,
                    active: 0,
                    inactive: 0,
                };
                for record in records {
                    match self.evaluate(record, fields, now) {
                        Some(ClientStatus::Active) => summary.active += 1,
                        Some(ClientStatus::Inactive) => summary.inactive += 1,
                        None => continue,
                    }
                    summary.members += 1;
                }
                summary
            })
            .collect()
    }
}
