//! Vehicle make/model/year extraction from listing titles.
//!
//! Titles read like "Tailored Car Mats Audi Q7 2015-2020 [Black with
//! Grey Trim]". Bracketed segments and product noise words are stripped
//! first, then a single pattern pulls the make, model and year range
//! out of what remains.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::years::normalize_year_range;

/// Product wording that is never part of a vehicle name.
const NOISE_WORDS: &[&str] = &[
    "tailored",
    "carpet",
    "car mats",
    "floor mats",
    "set",
    "4pcs",
    "5pcs",
    "pc",
    "heavy duty",
    "rubber",
    "solid trim",
    "uk made",
    "custom",
    "fully",
    "black",
    "grey",
    "blue",
    "red",
    "beige",
    "with",
    "trim",
    "edge",
    "for",
    "fits",
];

static BRACKET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]").expect("Invalid bracket regex"));

static NOISE_WORDS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"(?i)\b({})\b", NOISE_WORDS.join("|"));
    Regex::new(&pattern).expect("Invalid noise words regex")
});

/// Make, then model, then a year range in one of its many shapes
/// ("2015-2020", "2016 to present", "2018+", "2019").
static VEHICLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)([A-Za-z\s\-]+?)\s+(.*?)\s+(\d{4}\s*[-–to]+\s*\d{4}|\d{4}\s*[-–to]+\s*present|\d{4}\s*\+?|\d{4})",
    )
    .expect("Invalid vehicle regex")
});

static MODEL_NOISE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(car|auto|automobile|vehicle|floor|mats)\b")
        .expect("Invalid model noise regex")
});

static MODEL_PUNCT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("Invalid model punctuation regex"));

/// Make, model and year range pulled out of a listing title.
///
/// All fields are normalized lowercase; `year` keeps the
/// `YYYY-YYYY` / `YYYY-present` form from [`normalize_year_range`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarDetails {
    pub make: String,
    pub model: String,
    pub year: String,
}

/// Extracts vehicle details from a listing title.
///
/// Returns `None` when no make/model/year shape can be found, or when
/// normalization leaves the make or model empty.
#[must_use]
pub fn extract_car_details(title: &str) -> Option<CarDetails> {
    if title.is_empty() {
        return None;
    }

    let without_brackets = BRACKET_REGEX.replace_all(title, " ");
    let without_noise = NOISE_WORDS_REGEX.replace_all(&without_brackets, " ");
    let cleaned = without_noise
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let caps = VEHICLE_REGEX.captures(&cleaned)?;
    let make = normalize_make(caps.get(1)?.as_str());
    let model = normalize_model(caps.get(2)?.as_str());
    let year = normalize_year_range(caps.get(3)?.as_str());

    if make.is_empty() || model.is_empty() {
        return None;
    }
    Some(CarDetails { make, model, year })
}

/// Canonicalizes marketplace spellings of a manufacturer name.
fn normalize_make(raw: &str) -> String {
    let make = raw.trim().to_lowercase();
    match make.as_str() {
        "vw" | "volkswagon" => "volkswagen".to_string(),
        "merc" | "mercedes-benz" | "mercedes benz" => "mercedes".to_string(),
        "landrover" | "range rover" => "land rover".to_string(),
        "alfa" | "alfa-romeo" => "alfa romeo".to_string(),
        "chevy" => "chevrolet".to_string(),
        "citreon" => "citroen".to_string(),
        _ => make,
    }
}

/// Lowercases a model and removes generic vehicle words and stray
/// punctuation.
fn normalize_model(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let without_noise = MODEL_NOISE_REGEX.replace_all(&lowered, "");
    let without_punct = MODEL_PUNCT_REGEX.replace_all(&without_noise, "");
    without_punct
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
