//! End-to-end matching flows against a small in-memory catalog.

use picklane_match::{CarDetails, closest_template, find_best_match};
use picklane_model::{Catalog, CatalogEntry, MatchMethod, normalize_ref_no};

fn entry(template: &str, company: &str, model: &str, year: &str) -> CatalogEntry {
    CatalogEntry {
        template: template.to_string(),
        template_key: normalize_ref_no(template),
        company: company.to_string(),
        model: model.to_string(),
        year: year.to_string(),
        mats: "5".to_string(),
        clip_count: "8".to_string(),
        clip_type: "type 1".to_string(),
        forced_sku: None,
    }
}

fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        entry("q227", "audi", "q7", "2015-2020"),
        entry("l2", "ford", "focus", "2011-2018"),
        entry("ms-q80", "bmw", "3 series", "2012-2019"),
        entry("zz126", "mini", "countryman", "2010-2016"),
    ])
}

#[test]
fn identifier_match_resolves_the_template() {
    let catalog = sample_catalog();
    let matched = find_best_match(
        "CT65 Q227 CVT - Black with Grey Trim",
        "Tailored Car Mats Audi Q7 2015-2020",
        &catalog,
        None,
    )
    .expect("identifier should resolve");

    assert_eq!(matched.template, "q227");
    assert_eq!(matched.method, MatchMethod::Identifier);
}

#[test]
fn forced_override_beats_the_identifier() {
    let mut rows = vec![
        entry("q227", "audi", "q7", "2015-2020"),
        entry("l2", "ford", "focus", "2011-2018"),
    ];
    rows[1].forced_sku = Some("ct65 q227 cvt".to_string());
    let catalog = Catalog::new(rows);

    let matched = find_best_match("CT65 Q227 CVT", "Audi Q7 Mats", &catalog, None)
        .expect("forced override should resolve");

    assert_eq!(matched.template, "l2");
    assert_eq!(matched.method, MatchMethod::Forced);
}

#[test]
fn boot_mat_titles_only_see_ms_templates() {
    let catalog = sample_catalog();

    let matched = find_best_match("MS-Q80", "Car Mats and Bootmat Set BMW", &catalog, None)
        .expect("boot mat bundle should resolve");
    assert_eq!(matched.template, "ms-q80");

    // The same SKU against a plain title has no MS- rows to land on.
    assert!(find_best_match("MS-Q80", "Car Mats BMW", &catalog, None).is_none());
}

#[test]
fn plain_titles_never_match_boot_mat_rows() {
    let catalog = Catalog::new(vec![entry("ms-q80", "bmw", "3 series", "2012-2019")]);
    assert!(find_best_match("Q80", "Car Mats BMW 3 Series", &catalog, None).is_none());
}

#[test]
fn title_fallback_needs_make_and_overlapping_words() {
    let catalog = sample_catalog();
    let details = CarDetails {
        make: "ford".to_string(),
        model: "focus estate".to_string(),
        year: "2012-2014".to_string(),
    };

    let matched = find_best_match("UNKNOWN-SKU", "Ford Focus Estate Mats", &catalog, Some(&details))
        .expect("title fallback should resolve");
    assert_eq!(matched.template, "l2");
    assert_eq!(matched.method, MatchMethod::TitleFallback);
}

#[test]
fn title_fallback_rejects_disjoint_years() {
    let catalog = Catalog::new(vec![entry("l2", "ford", "focus", "2016-2020")]);
    let details = CarDetails {
        make: "ford".to_string(),
        model: "focus".to_string(),
        year: "2010-2015".to_string(),
    };

    assert!(find_best_match("UNKNOWN-SKU", "Ford Focus Mats", &catalog, Some(&details)).is_none());
}

#[test]
fn title_fallback_accepts_missing_year() {
    let catalog = Catalog::new(vec![entry("l2", "ford", "focus", "")]);
    let details = CarDetails {
        make: "ford".to_string(),
        model: "focus".to_string(),
        year: "2010-2015".to_string(),
    };

    let matched = find_best_match("UNKNOWN-SKU", "Ford Focus Mats", &catalog, Some(&details))
        .expect("missing catalog year skips the gate");
    assert_eq!(matched.template, "l2");
}

#[test]
fn no_details_and_no_identifier_means_no_match() {
    let catalog = sample_catalog();
    assert!(find_best_match("UNKNOWN-SKU", "Some Mats", &catalog, None).is_none());
}

#[test]
fn closest_template_reports_a_near_miss() {
    let catalog = sample_catalog();
    let (template, similarity) =
        closest_template("Q22", &catalog).expect("identifier extracts from Q22");

    assert_eq!(template, "q227");
    assert!(similarity > 0.9, "similarity was {similarity}");
}
