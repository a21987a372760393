//! Year range normalization and overlap checks.
//!
//! Listing years arrive in many shapes ("2016+", "2010 to present",
//! "2005 - 2012"). Everything is normalized to `YYYY-YYYY` or
//! `YYYY-present` before comparison.

use std::sync::LazyLock;

use chrono::{Datelike, Utc};
use regex::Regex;

/// Trailing `+` or `-` after a year means "to present".
static OPEN_ENDED_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})\s*(\+|-)\s*$").expect("Invalid open-ended year regex")
});

static TO_PRESENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})\s*(?:to|onwards)\s*present").expect("Invalid to-present regex")
});

static RANGE_SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[-–]\s*").expect("Invalid range separator regex"));

static YEAR_DIGITS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}").expect("Invalid year digits regex"));

/// Normalizes a raw year range into `YYYY-YYYY` / `YYYY-present` form.
///
/// Lowercases, trims, rewrites open-ended suffixes, and collapses
/// spaced or en-dash separators to a bare `-`.
#[must_use]
pub fn normalize_year_range(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let lowered = raw.trim().to_lowercase();
    let open_ended = OPEN_ENDED_REGEX.replace_all(&lowered, "${1}-present");
    let present = TO_PRESENT_REGEX.replace_all(&open_ended, "${1}-present");
    RANGE_SEPARATOR_REGEX.replace_all(&present, "-").into_owned()
}

/// Returns true when the two year ranges overlap.
///
/// Either side failing to yield at least one four-digit year makes the
/// check fail closed.
#[must_use]
pub fn check_year_match(product_year: &str, catalog_year: &str) -> bool {
    check_year_match_at(product_year, catalog_year, Utc::now().year())
}

fn check_year_match_at(product_year: &str, catalog_year: &str, current_year: i32) -> bool {
    let (Some(product), Some(catalog)) = (
        parse_year_span(product_year, current_year),
        parse_year_span(catalog_year, current_year),
    ) else {
        return false;
    };
    product.0 <= catalog.1 && catalog.0 <= product.1
}

/// Extracts the `(min, max)` year pair, resolving `present` to the
/// current year. `None` when no four-digit year is found.
fn parse_year_span(raw: &str, current_year: i32) -> Option<(i32, i32)> {
    let resolved = normalize_year_range(raw).replace("present", &current_year.to_string());
    let mut span: Option<(i32, i32)> = None;
    for found in YEAR_DIGITS_REGEX.find_iter(&resolved) {
        let Ok(year) = found.as_str().parse::<i32>() else {
            continue;
        };
        span = Some(match span {
            Some((lo, hi)) => (lo.min(year), hi.max(year)),
            None => (year, year),
        });
    }
    span
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_open_ended_suffixes() {
        assert_eq!(normalize_year_range("2016+"), "2016-present");
        assert_eq!(normalize_year_range("2016 -"), "2016-present");
        assert_eq!(normalize_year_range("2010 to present"), "2010-present");
        assert_eq!(normalize_year_range("2010 onwards present"), "2010-present");
    }

    #[test]
    fn collapses_separators() {
        assert_eq!(normalize_year_range("2005 - 2012"), "2005-2012");
        assert_eq!(normalize_year_range("2005 – 2012"), "2005-2012");
        assert_eq!(normalize_year_range("  2005-2012  "), "2005-2012");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize_year_range(""), "");
    }

    #[test]
    fn overlapping_ranges_match() {
        assert!(check_year_match_at("2010-2015", "2012-2020", 2026));
        assert!(check_year_match_at("2012-2020", "2010-2015", 2026));
        assert!(check_year_match_at("2015", "2010-2015", 2026));
    }

    #[test]
    fn disjoint_ranges_do_not_match() {
        assert!(!check_year_match_at("2010-2015", "2016-2020", 2026));
        assert!(!check_year_match_at("2021", "2010-2015", 2026));
    }

    #[test]
    fn present_resolves_to_current_year() {
        assert!(check_year_match_at("2020-present", "2024-2030", 2026));
        assert!(!check_year_match_at("2020-present", "2027-2030", 2026));
        assert!(check_year_match_at("2016+", "2018", 2026));
    }

    #[test]
    fn unparseable_side_fails_closed() {
        assert!(!check_year_match_at("", "2010-2015", 2026));
        assert!(!check_year_match_at("2010-2015", "", 2026));
        assert!(!check_year_match_at("unknown", "2010-2015", 2026));
    }
}
