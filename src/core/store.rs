//! # Record Store Derivations
//!
//! Pure functions over the record list, the country reference list and the
//! filter selection. Nothing here is cached: record counts are small, so the
//! TUI recomputes every derivation on each frame.

use std::collections::HashSet;

use crate::api::{Country, Record};
use crate::core::normalize::normalize_country;

/// Working copy of the editable fields of one record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditForm {
    pub name: String,
    pub country: String,
    pub country_id: String,
}

impl EditForm {
    /// A form may be persisted only with a non-blank name and a chosen country.
    pub fn is_submittable(&self) -> bool {
        !self.name.trim().is_empty() && !self.country_id.is_empty()
    }
}

/// Records to display for the given filter selection.
///
/// An empty selection is the identity: every record, original order.
pub fn visible_records<'a>(records: &'a [Record], selection: &HashSet<String>) -> Vec<&'a Record> {
    if selection.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|record| selection.contains(&normalize_country(&record.country)))
        .collect()
}

/// Distinct normalized non-empty country names, in first-seen order.
pub fn distinct_country_options(records: &[Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut options = Vec::new();
    for record in records {
        let normalized = normalize_country(&record.country);
        if normalized.is_empty() {
            continue;
        }
        if seen.insert(normalized.clone()) {
            options.push(normalized);
        }
    }
    options
}

/// Seeds an edit form for `record`.
///
/// The country is resolved against the reference list by `country_id` first,
/// then by exact name. If both would match different entries the id match
/// wins. With no match the record's raw values are used as-is.
pub fn seed_form(record: &Record, countries: &[Country]) -> EditForm {
    let matched = countries
        .iter()
        .find(|c| !record.country_id.is_empty() && c.id == record.country_id)
        .or_else(|| {
            countries
                .iter()
                .find(|c| !record.country.is_empty() && c.name == record.country)
        });

    match matched {
        Some(country) => EditForm {
            name: record.name.clone(),
            country: country.name.clone(),
            country_id: country.id.clone(),
        },
        None => EditForm {
            name: record.name.clone(),
            country: record.country.clone(),
            country_id: record.country_id.clone(),
        },
    }
}

/// Copy of `original` with the form's fields applied. Everything else,
/// including unknown server fields, is carried over.
pub fn merge_form(original: &Record, form: &EditForm) -> Record {
    Record {
        name: form.name.clone(),
        country: form.country.clone(),
        country_id: form.country_id.clone(),
        ..original.clone()
    }
}

/// Replaces the record with the same id. Returns false if no record matched.
pub fn replace_record(records: &mut [Record], updated: Record) -> bool {
    match records.iter_mut().find(|r| r.id == updated.id) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}
