//! SKU identifier extraction cascade.
//!
//! Marketplace SKUs bury the catalog template code inside free-form
//! listing text ("CT65 Q227 CVT - Black with Grey Trim"). The cascade
//! tries an ordered list of shape rules, most specific first, then
//! falls back to progressively looser searches. Rule order is
//! load-bearing: a later rule would happily truncate what an earlier
//! one captures.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

/// Carried through unchanged; the cascade would otherwise reduce it to
/// `W0212`.
const VAW_EXCEPTION: &str = "R-VAW0212";

/// Colour keywords that mark a ` - ` suffix as decorative rather than
/// part of the identifier.
const COLOR_SUFFIX_KEYWORDS: &[&str] = &[
    "BLACK", "BLUE", "GREY", "RED", "GREEN", "YELLOW", "SILVER", "WHITE", "TRIM", "SOLID",
];

/// Numeric legacy listings that map onto a current template code.
const LEGACY_REMAP: &[(&str, &str)] = &[("8435", "L2")];

static V_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(V\d+)").expect("Invalid V code regex"));

/// `R-VAW0123 001 X5` style listings: the template code is the token
/// after the batch number.
static COMPOUND_VAW_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Za-z]-VAW\d+\s+\d+\s+([A-Za-z]\d+)").expect("Invalid compound VAW regex")
});

static BNH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([A-Za-z]\d+BNH)").expect("Invalid BNH regex"));

static HOLES_ANCHORED_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([A-Za-z0-9]+-[A-Za-z0-9]*(?:HOLES|NOHOLES))")
        .expect("Invalid anchored holes regex")
});

static HOLES_SEARCH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([A-Za-z0-9]+(?:HOLES|NOHOLES))").expect("Invalid holes search regex")
});

/// A bare template code: one letter followed by digits.
static TOKEN_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[A-Za-z]\d+$").expect("Invalid token code regex"));

static ZZ_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(ZZ\d+[A-Za-z]?)").expect("Invalid ZZ regex"));

static X_DASH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(X\d+-\d+)").expect("Invalid X dash regex"));

static MS_PREFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(MS-[A-Za-z0-9]+(?:-[A-Za-z0-9])?)").expect("Invalid MS prefix regex")
});

static Q_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(Q\d+(?:-[A-Za-z0-9]+)?)").expect("Invalid Q code regex")
});

static SHORT_SUFFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([A-Za-z0-9]+-[A-Za-z0-9])").expect("Invalid short suffix regex")
});

static LETTER_NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([A-Za-z]\d+[A-Za-z]*)").expect("Invalid letter-number regex")
});

static VAW_PREFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^VAW-?([A-Za-z]\d+)").expect("Invalid VAW prefix regex")
});

static VAW_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^VAW\d+\b").expect("Invalid VAW number regex"));

static DIGIT_START_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\b").expect("Invalid digit start regex"));

static BOUNDED_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b[A-Za-z]\d+\b").expect("Invalid bounded code regex"));

static LOOSE_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[A-Za-z]\d+").expect("Invalid loose code regex"));

static ANY_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[A-Za-z]+\d+|\d+[A-Za-z]+").expect("Invalid any-code regex")
});

/// A single cascade step.
pub struct Rule {
    /// Stable rule name, used in trace logs and audits.
    pub name: &'static str,
    extract: fn(&str) -> Option<String>,
}

impl Rule {
    /// Runs this rule alone against an already trimmed SKU.
    #[must_use]
    pub fn apply(&self, sku: &str) -> Option<String> {
        (self.extract)(sku)
    }
}

static RULES: &[Rule] = &[
    Rule { name: "v-code", extract: v_code },
    Rule { name: "compound-vaw", extract: compound_vaw },
    Rule { name: "bnh-code", extract: bnh_code },
    Rule { name: "holes-anchored", extract: holes_anchored },
    Rule { name: "holes-search", extract: holes_search },
    Rule { name: "velour-last-token", extract: velour_last_token },
    Rule { name: "zz-code", extract: zz_code },
    Rule { name: "gvaw-last-token", extract: gvaw_last_token },
    Rule { name: "x-dash-number", extract: x_dash_number },
    Rule { name: "ms-prefix", extract: ms_prefix },
    Rule { name: "q-code", extract: q_code },
    Rule { name: "short-suffix", extract: short_suffix },
    Rule { name: "letter-number", extract: letter_number_code },
    Rule { name: "color-suffix", extract: color_suffix },
    Rule { name: "vaw-prefix", extract: vaw_prefix },
    Rule { name: "vaw-number-last-token", extract: vaw_number_last_token },
    Rule { name: "digit-remap", extract: digit_remap },
    Rule { name: "fallback-code-search", extract: fallback_code_search },
    Rule { name: "fallback-any-alnum", extract: fallback_any_alnum },
];

/// The ordered rule table. Evaluation stops at the first rule that
/// produces an identifier.
#[must_use]
pub fn rules() -> &'static [Rule] {
    RULES
}

/// Extracts the catalog template identifier from a raw marketplace SKU.
///
/// Always returns an uppercased identifier; when nothing in the cascade
/// fires, the trimmed input itself is uppercased and returned. Only a
/// blank input yields an empty result.
#[must_use]
pub fn extract_sku_identifier(raw_sku: &str) -> String {
    let original = raw_sku.trim();

    if original.eq_ignore_ascii_case(VAW_EXCEPTION) {
        return VAW_EXCEPTION.to_string();
    }

    let sku = strip_carpet_prefix(original);

    for rule in RULES {
        if let Some(identifier) = (rule.extract)(sku) {
            trace!(rule = rule.name, sku, identifier, "cascade rule matched");
            return identifier;
        }
    }

    trace!(sku, "no cascade rule matched, keeping raw SKU");
    original.to_uppercase()
}

/// Standard carpet listings prefix the identifier with the carpet code.
fn strip_carpet_prefix(sku: &str) -> &str {
    match sku.get(..5) {
        Some(prefix) if prefix.eq_ignore_ascii_case("CT65 ") => sku[5..].trim(),
        _ => sku,
    }
}

/// First capture group, uppercased.
fn capture_upper(regex: &Regex, sku: &str) -> Option<String> {
    regex
        .captures(sku)
        .and_then(|caps| caps.get(1))
        .map(|found| found.as_str().to_uppercase())
}

/// First capture group, uppercased, provided nothing ASCII alphanumeric
/// follows the match.
fn bounded_capture(regex: &Regex, sku: &str) -> Option<String> {
    let caps = regex.captures(sku)?;
    let found = caps.get(1)?;
    let bounded = sku[found.end()..]
        .chars()
        .next()
        .is_none_or(|c| !c.is_ascii_alphanumeric());
    bounded.then(|| found.as_str().to_uppercase())
}

fn v_code(sku: &str) -> Option<String> {
    capture_upper(&V_CODE_REGEX, sku)
}

fn compound_vaw(sku: &str) -> Option<String> {
    capture_upper(&COMPOUND_VAW_REGEX, sku)
}

fn bnh_code(sku: &str) -> Option<String> {
    capture_upper(&BNH_REGEX, sku)
}

fn holes_anchored(sku: &str) -> Option<String> {
    capture_upper(&HOLES_ANCHORED_REGEX, sku)
}

/// Unanchored rescue for HOLES variants the anchored rule missed.
fn holes_search(sku: &str) -> Option<String> {
    if !sku.to_uppercase().contains("HOLES") {
        return None;
    }
    capture_upper(&HOLES_SEARCH_REGEX, sku)
}

fn velour_last_token(sku: &str) -> Option<String> {
    prefixed_last_token(sku, "VELOUR", 3)
}

fn zz_code(sku: &str) -> Option<String> {
    capture_upper(&ZZ_REGEX, sku)
}

fn gvaw_last_token(sku: &str) -> Option<String> {
    prefixed_last_token(sku, "G-VAW", 3)
}

/// Multi-token listings under a known prefix keep the template code as
/// the final token.
fn prefixed_last_token(sku: &str, prefix: &str, min_tokens: usize) -> Option<String> {
    if !sku.to_uppercase().starts_with(prefix) {
        return None;
    }
    let parts: Vec<&str> = sku.split_whitespace().collect();
    if parts.len() < min_tokens {
        return None;
    }
    let last = parts.last()?;
    TOKEN_CODE_REGEX
        .is_match(last)
        .then(|| last.to_uppercase())
}

fn x_dash_number(sku: &str) -> Option<String> {
    capture_upper(&X_DASH_REGEX, sku)
}

fn ms_prefix(sku: &str) -> Option<String> {
    capture_upper(&MS_PREFIX_REGEX, sku)
}

fn q_code(sku: &str) -> Option<String> {
    capture_upper(&Q_CODE_REGEX, sku)
}

fn short_suffix(sku: &str) -> Option<String> {
    bounded_capture(&SHORT_SUFFIX_REGEX, sku)
}

/// Letter-number base, keeping a lone `-X` variant suffix when one
/// directly follows (`C2-E` stays distinct from `C2`).
fn letter_number_code(sku: &str) -> Option<String> {
    let caps = LETTER_NUMBER_REGEX.captures(sku)?;
    let base = caps.get(1)?;
    if let Some(suffix) = dash_suffix(sku, base.end()) {
        return Some(format!("{}{suffix}", base.as_str()).to_uppercase());
    }
    Some(base.as_str().to_uppercase())
}

fn dash_suffix(sku: &str, base_end: usize) -> Option<String> {
    let mut rest = sku[base_end..].chars();
    if rest.next() != Some('-') {
        return None;
    }
    let suffix = rest.next().filter(char::is_ascii_alphanumeric)?;
    match rest.next() {
        Some(c) if c.is_ascii_alphanumeric() => None,
        _ => Some(format!("-{suffix}")),
    }
}

/// A ` - ` suffix made of colour words is decoration; the identifier
/// lives in the part before it, so the whole cascade re-runs on that
/// prefix alone.
fn color_suffix(sku: &str) -> Option<String> {
    let (base, suffix) = sku.split_once(" - ")?;
    let suffix_upper = suffix.to_uppercase();
    if !COLOR_SUFFIX_KEYWORDS
        .iter()
        .any(|keyword| suffix_upper.contains(keyword))
    {
        return None;
    }
    Some(extract_sku_identifier(base.trim()))
}

fn vaw_prefix(sku: &str) -> Option<String> {
    capture_upper(&VAW_PREFIX_REGEX, sku)
}

fn vaw_number_last_token(sku: &str) -> Option<String> {
    if !VAW_NUMBER_REGEX.is_match(sku) || !sku.contains(' ') {
        return None;
    }
    let parts: Vec<&str> = sku.split_whitespace().collect();
    if parts.len() < 2 {
        return None;
    }
    let last = parts.last()?;
    TOKEN_CODE_REGEX
        .is_match(last)
        .then(|| last.to_uppercase())
}

/// Purely numeric listings, routed through the legacy remap table.
fn digit_remap(sku: &str) -> Option<String> {
    let caps = DIGIT_START_REGEX.captures(sku)?;
    let digits = caps.get(1)?.as_str();
    let mapped = LEGACY_REMAP
        .iter()
        .find(|(from, _)| *from == digits)
        .map_or(digits, |&(_, to)| to);
    Some(mapped.to_string())
}

/// Last letter-digits token anywhere in the SKU, preferring
/// word-bounded occurrences.
fn fallback_code_search(sku: &str) -> Option<String> {
    let last = BOUNDED_CODE_REGEX
        .find_iter(sku)
        .last()
        .or_else(|| LOOSE_CODE_REGEX.find_iter(sku).last())?;
    Some(last.as_str().to_uppercase())
}

fn fallback_any_alnum(sku: &str) -> Option<String> {
    ANY_CODE_REGEX
        .find_iter(sku)
        .last()
        .map(|found| found.as_str().to_uppercase())
}
