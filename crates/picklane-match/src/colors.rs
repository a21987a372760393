//! Carpet and trim colour classification from listing titles.
//!
//! Both colours default to Black. Rubber products pin the carpet to
//! "Rubber" and only the trim colour remains negotiable. Explicit
//! "<colour> trim" / "<colour> carpet" phrases win over the bracketed
//! "[X with Y Trim]" form, which wins over bare colour mentions.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use picklane_model::{CarpetKind, TitleAttributes};

/// Embroidery label used on double-stitched items.
pub const DOUBLE_STITCH: &str = "Double Stitch";

const DEFAULT_COLOR: &str = "Black";

const RUBBER_CARPET: &str = "Rubber";

/// Colours recognized in titles, in fallback preference order.
const ALLOWED_COLORS: &[&str] = &[
    "red", "blue", "green", "grey", "silver", "yellow", "white", "orange", "purple", "brown",
    "pink", "black", "beige", "tan",
];

const RUBBER_KEYWORDS: &[&str] = &["rubber", "rubstd", "rubhd", "5mm"];

/// Listing codes that all mean double-stitched embroidery.
const EMBROIDERY_KEYWORDS: &[&str] = &[
    "GREYDS",
    "BLACKDS",
    "REDS",
    "BLUEDS",
    "UPGRADED",
    "DOUBLE STITCH",
];

fn color_alternation() -> String {
    ALLOWED_COLORS.join("|")
}

static TRIM_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"\b({})\s+(trim|edge)\b", color_alternation());
    Regex::new(&pattern).expect("Invalid trim colour regex")
});

static CARPET_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"\b({})\s+carpet\b", color_alternation());
    Regex::new(&pattern).expect("Invalid carpet colour regex")
});

static BRACKET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]").expect("Invalid bracket regex"));

static BRACKET_COMBO_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let colors = color_alternation();
    let pattern = format!(r"\b({colors})\s+with\s+({colors})\s+trim\b");
    Regex::new(&pattern).expect("Invalid bracket combo regex")
});

static ANY_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"\b({})\b", color_alternation());
    Regex::new(&pattern).expect("Invalid colour word regex")
});

/// Extracts `(carpet colour, trim colour)` from a listing title.
#[must_use]
pub fn extract_carpet_and_trim_colors(title: &str) -> (String, String) {
    let mut carpet = DEFAULT_COLOR.to_string();
    let mut trim = DEFAULT_COLOR.to_string();
    if title.is_empty() {
        return (carpet, trim);
    }

    let lowered = title.trim().to_lowercase();
    let is_rubber = RUBBER_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword));
    if is_rubber {
        carpet = RUBBER_CARPET.to_string();
    }

    if let Some(caps) = TRIM_COLOR_REGEX.captures(&lowered)
        && let Some(color) = caps.get(1)
    {
        trim = capitalize(color.as_str());
    }

    if !is_rubber
        && let Some(caps) = CARPET_COLOR_REGEX.captures(&lowered)
        && let Some(color) = caps.get(1)
    {
        carpet = capitalize(color.as_str());
    }

    if let Some(bracket) = BRACKET_REGEX.captures(&lowered)
        && let Some(content) = bracket.get(1)
        && let Some(combo) = BRACKET_COMBO_REGEX.captures(content.as_str())
    {
        if !is_rubber && let Some(color) = combo.get(1) {
            carpet = capitalize(color.as_str());
        }
        if let Some(color) = combo.get(2) {
            trim = capitalize(color.as_str());
        }
    }

    // Bare colour mentions only fill a carpet slot nothing else claimed.
    if carpet == DEFAULT_COLOR && !is_rubber {
        let mentioned = mentioned_colors(&lowered);
        let fallback = ALLOWED_COLORS
            .iter()
            .copied()
            .filter(|color| mentioned.contains(color))
            .map(capitalize)
            .find(|color| *color != trim);
        if let Some(color) = fallback {
            carpet = color;
        }
    }

    if trim == DEFAULT_COLOR && carpet != DEFAULT_COLOR && carpet != RUBBER_CARPET {
        trim = carpet.clone();
    }

    (carpet, trim)
}

fn mentioned_colors(lowered: &str) -> HashSet<&str> {
    ANY_COLOR_REGEX
        .find_iter(lowered)
        .map(|found| found.as_str())
        .collect()
}

/// Classifies the carpet material from the listing title.
#[must_use]
pub fn determine_carpet_kind(title: &str) -> CarpetKind {
    let lowered = title.to_lowercase();
    if lowered.contains("velour") {
        CarpetKind::Velour
    } else if lowered.contains("5mm") || lowered.contains("heavy duty rubber") {
        CarpetKind::RubberHeavy
    } else if lowered.contains("rubber") {
        CarpetKind::RubberStandard
    } else {
        CarpetKind::Standard
    }
}

/// Returns the embroidery label for a title, empty when plain stitched.
#[must_use]
pub fn determine_embroidery(title: &str) -> &'static str {
    let upper = title.to_uppercase();
    if EMBROIDERY_KEYWORDS
        .iter()
        .any(|keyword| upper.contains(keyword))
    {
        DOUBLE_STITCH
    } else {
        ""
    }
}

/// Bundles colour, carpet kind and embroidery classification for one
/// listing title.
#[must_use]
pub fn classify_title(title: &str) -> TitleAttributes {
    let (carpet_colour, trim_colour) = extract_carpet_and_trim_colors(title);
    TitleAttributes {
        carpet_colour,
        trim_colour,
        carpet_kind: determine_carpet_kind(title),
        embroidery: determine_embroidery(title).to_string(),
    }
}

/// First letter uppercased, the rest lowercased.
fn capitalize(color: &str) -> String {
    let mut chars = color.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_black_on_black() {
        assert_eq!(
            extract_carpet_and_trim_colors("Tailored Car Mats"),
            ("Black".to_string(), "Black".to_string())
        );
        assert_eq!(
            extract_carpet_and_trim_colors(""),
            ("Black".to_string(), "Black".to_string())
        );
    }

    #[test]
    fn explicit_trim_phrase_sets_trim() {
        let (carpet, trim) = extract_carpet_and_trim_colors("Car Mats with Red Trim");
        assert_eq!(carpet, "Black");
        assert_eq!(trim, "Red");
    }

    #[test]
    fn bracketed_combination_sets_both() {
        let (carpet, trim) =
            extract_carpet_and_trim_colors("Audi Q7 Mats [Blue with Grey Trim]");
        assert_eq!(carpet, "Blue");
        assert_eq!(trim, "Grey");
    }

    #[test]
    fn rubber_pins_the_carpet() {
        let (carpet, trim) = extract_carpet_and_trim_colors("Rubber Mats [Blue with Grey Trim]");
        assert_eq!(carpet, "Rubber");
        assert_eq!(trim, "Grey");
    }

    #[test]
    fn bare_colour_mention_fills_the_carpet() {
        let (carpet, trim) = extract_carpet_and_trim_colors("Beige Car Mats Audi A4");
        assert_eq!(carpet, "Beige");
        assert_eq!(trim, "Beige");
    }

    #[test]
    fn trim_follows_a_coloured_carpet() {
        let (carpet, trim) = extract_carpet_and_trim_colors("Blue carpet mats");
        assert_eq!(carpet, "Blue");
        assert_eq!(trim, "Blue");
    }

    #[test]
    fn carpet_kind_keywords() {
        assert_eq!(determine_carpet_kind("Velour Mats"), CarpetKind::Velour);
        assert_eq!(determine_carpet_kind("5mm rubber"), CarpetKind::RubberHeavy);
        assert_eq!(
            determine_carpet_kind("Heavy Duty Rubber Mats"),
            CarpetKind::RubberHeavy
        );
        assert_eq!(
            determine_carpet_kind("Rubber Mats"),
            CarpetKind::RubberStandard
        );
        assert_eq!(determine_carpet_kind("Carpet Mats"), CarpetKind::Standard);
    }

    #[test]
    fn embroidery_keywords_mean_double_stitch() {
        assert_eq!(determine_embroidery("Q7 GREYDS"), DOUBLE_STITCH);
        assert_eq!(determine_embroidery("Upgraded trim"), DOUBLE_STITCH);
        assert_eq!(determine_embroidery("Plain mats"), "");
    }
}
