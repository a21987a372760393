//! Shared string normalization used by both the catalog loader and the
//! matching engine. Keys produced here must agree byte-for-byte on both
//! sides or template lookups silently miss.

/// Canonical form of a template reference: whitespace and dashes removed,
/// uppercased. Idempotent.
///
/// `"Q-227"` → `"Q227"`, `"ms-q80"` → `"MSQ80"`, `"  x24  "` → `"X24"`.
#[must_use]
pub fn normalize_ref_no(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}
