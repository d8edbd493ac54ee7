//! Country-name normalization.
//!
//! Raw country values coming from the API are free text ("iraq", "IRAQ",
//! " Iraq "). Filtering and option generation compare the normalized form:
//! trimmed, first character uppercased, the rest lowercased.

/// Normalizes a country name for grouping and filtering.
///
/// Idempotent: `normalize_country(&normalize_country(s)) == normalize_country(s)`.
/// A first character whose uppercase form expands to several characters
/// (e.g. `ß` → `SS`) keeps only the leading one capitalized.
pub fn normalize_country(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut out = String::with_capacity(trimmed.len());
    let mut upper = first.to_uppercase();
    if let Some(head) = upper.next() {
        out.push(head);
    }
    out.extend(upper.flat_map(char::to_lowercase));
    out.extend(chars.flat_map(char::to_lowercase));
    out
}
