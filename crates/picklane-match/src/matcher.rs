//! Catalog row selection for a single order line.
//!
//! Matching runs in four fixed steps: boot mat family filter, forced
//! SKU override, extracted identifier lookup, then title fallback with
//! a year gate. The first step to produce a row wins.

use std::cmp::Ordering;
use std::collections::HashSet;

use rapidfuzz::distance::jaro_winkler;
use tracing::debug;

use picklane_model::{
    Catalog, CatalogEntry, Family, FamilyView, MatchMethod, TemplateMatch, normalize_ref_no,
};

use crate::cascade::extract_sku_identifier;
use crate::vehicle::CarDetails;
use crate::years::check_year_match;

/// Finds the catalog row for an order line, or `None` when nothing in
/// the catalog fits.
#[must_use]
pub fn find_best_match(
    sku: &str,
    title: &str,
    catalog: &Catalog,
    car_details: Option<&CarDetails>,
) -> Option<TemplateMatch> {
    let family = family_for_title(title);
    let view = catalog.family(family);
    if view.is_empty() {
        debug!(?family, "no catalog rows available for family");
        return None;
    }

    let forced_key = sku.trim().to_lowercase();
    if !forced_key.is_empty()
        && let Some(entry) = view.by_forced_sku(&forced_key)
    {
        debug!(sku, template = %entry.template, "forced match override hit");
        return Some(TemplateMatch::from_entry(entry, MatchMethod::Forced));
    }

    let identifier = extract_sku_identifier(sku);
    if !identifier.is_empty() {
        let key = normalize_ref_no(&identifier);
        if let Some(entry) = view.by_template_key(&key) {
            debug!(sku, identifier, template = %entry.template, "identifier match");
            return Some(TemplateMatch::from_entry(entry, MatchMethod::Identifier));
        }
    }

    let details = car_details?;
    let entry = title_fallback(view, details)?;
    debug!(sku, template = %entry.template, "title fallback match");
    Some(TemplateMatch::from_entry(entry, MatchMethod::TitleFallback))
}

/// Boot mat bundles match only against MS- templates; every other
/// title excludes the boot mat families outright.
fn family_for_title(title: &str) -> Family {
    let lowered = title.to_lowercase();
    if lowered.contains("and bootmat") || lowered.contains("with bootmat") {
        Family::BootMat
    } else {
        Family::General
    }
}

/// Word-overlap scoring of the extracted model against catalog rows of
/// the same make. Strict inequality keeps the earliest best row; a
/// zero best score means no match.
fn title_fallback<'a>(view: FamilyView<'a>, details: &CarDetails) -> Option<&'a CatalogEntry> {
    let make = details.make.to_lowercase();
    let model_words = word_set(&details.model);
    if make.is_empty() || model_words.is_empty() {
        return None;
    }

    let mut best: Option<&CatalogEntry> = None;
    let mut best_score = 0;
    for entry in view.iter() {
        if entry.company.to_lowercase() != make {
            continue;
        }
        let score = word_set(&entry.model).intersection(&model_words).count();
        if score > best_score {
            best = Some(entry);
            best_score = score;
        }
    }
    let best = best?;

    // Both sides must carry a year range for the gate to apply.
    if !details.year.is_empty()
        && !best.year.is_empty()
        && !check_year_match(&details.year, &best.year)
    {
        debug!(
            template = %best.template,
            product_year = %details.year,
            catalog_year = %best.year,
            "year ranges do not overlap, rejecting title match"
        );
        return None;
    }
    Some(best)
}

fn word_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Best fuzzy template candidate for an unmatched SKU. Diagnostic
/// only; never used to select a match.
#[must_use]
pub fn closest_template(sku: &str, catalog: &Catalog) -> Option<(String, f64)> {
    let identifier = normalize_ref_no(&extract_sku_identifier(sku));
    if identifier.is_empty() {
        return None;
    }
    catalog
        .entries()
        .iter()
        .map(|entry| {
            let similarity =
                jaro_winkler::similarity(identifier.chars(), entry.template_key.chars());
            (entry.template.clone(), similarity)
        })
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
}
