//! Filter panel payloads.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::filter::{FilterSpec, StatusFilter};
use crate::domain::types::{ALL_CATEGORIES_KEY, CategoryId};
use crate::forms::FormError;

/// Checkbox state exactly as the filter dialog keeps it.
///
/// ```json
/// {"categories": {"acc": true}, "statusByCategory": {"acc": {"active": true}}}
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpecPayload {
    #[serde(default)]
    pub categories: BTreeMap<String, bool>,
    #[serde(default)]
    pub status_by_category: BTreeMap<String, BTreeMap<String, bool>>,
}

fn is_all_key(key: &str) -> bool {
    key.trim().eq_ignore_ascii_case(ALL_CATEGORIES_KEY)
}

impl TryFrom<FilterSpecPayload> for FilterSpec {
    type Error = FormError;

    fn try_from(payload: FilterSpecPayload) -> Result<Self, Self::Error> {
        let mut spec = FilterSpec::unrestricted();

        for (key, enabled) in &payload.categories {
            if is_all_key(key) {
                spec = spec.all_categories(*enabled);
                continue;
            }
            if !enabled {
                continue;
            }

            let id = CategoryId::new(key.as_str()).map_err(|source| FormError::InvalidCategory {
                key: key.clone(),
                source,
            })?;
            spec = spec.category(id.clone());

            let Some(flags) = payload
                .status_by_category
                .iter()
                .find(|(status_key, _)| {
                    CategoryId::new(status_key.as_str()).ok().as_ref() == Some(&id)
                })
                .map(|(_, flags)| flags)
            else {
                continue;
            };

            let mut ticked_any = false;
            let mut recognized_any = false;
            for (status_key, ticked) in flags {
                if !ticked {
                    continue;
                }
                ticked_any = true;
                match StatusFilter::from_key(status_key) {
                    Some(status) => {
                        recognized_any = true;
                        spec = spec.status(id.clone(), status);
                    }
                    None => log::debug!("Ignoring unknown status {status_key:?} for category {id}"),
                }
            }

            // Unknown statuses never match, so the category stays restrictive.
            if ticked_any && !recognized_any {
                spec = spec.unmatched_status(id.clone());
            }
        }

        Ok(spec)
    }
}

/// Parses the `as_of` reference instant. A bare date means midnight.
pub fn parse_as_of(raw: &str) -> Result<NaiveDateTime, FormError> {
    let trimmed = raw.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(with_offset.naive_local());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(datetime);
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| FormError::InvalidAsOf(raw.to_string()))
}
