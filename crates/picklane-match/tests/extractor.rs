//! Fixture coverage for the SKU identifier cascade.
//!
//! The cases are real listing shapes seen across the marketplace
//! stores, one per cascade rule plus the awkward combinations that
//! earlier rules must win.

use picklane_match::{extract_sku_identifier, rules};

#[test]
fn cascade_rule_order_is_stable() {
    let order = rules()
        .iter()
        .map(|rule| rule.name)
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(order, @r"
    v-code
    compound-vaw
    bnh-code
    holes-anchored
    holes-search
    velour-last-token
    zz-code
    gvaw-last-token
    x-dash-number
    ms-prefix
    q-code
    short-suffix
    letter-number
    color-suffix
    vaw-prefix
    vaw-number-last-token
    digit-remap
    fallback-code-search
    fallback-any-alnum
    ");
}

#[test]
fn extracts_known_listing_shapes() {
    let cases = [
        ("V94", "V94"),
        ("v94", "V94"),
        ("B4BNH", "B4BNH"),
        ("Q227 CVT", "Q227"),
        ("CT65 Q227 CVT", "Q227"),
        ("CT65 Q227 CVT - Black with Grey Trim", "Q227"),
        ("Q7 OC-Black-Carpet-Black with Grey Trim", "Q7"),
        ("Q308 - Rubber-Red Trim", "Q308"),
        ("Q43-CC", "Q43-CC"),
        ("ZZ231D", "ZZ231D"),
        ("ZZ126-4 - Black with Blue Trim - VAW", "ZZ126"),
        ("CT65 ZZ164HOLES BLACK", "ZZ164HOLES"),
        ("ct65 zz164holes black", "ZZ164HOLES"),
        ("Q80-NOHOLES", "Q80-NOHOLES"),
        ("VELOUR VAW0312 012 Z46", "Z46"),
        ("G-VAW0198 003 X5", "X5"),
        ("VAW0307 001 X205", "X205"),
        ("VAW-L3", "L3"),
        ("X205-3", "X205-3"),
        ("MS-C2-E", "MS-C2-E"),
        ("MS-Q80", "MS-Q80"),
        ("C2-E", "C2-E"),
        ("D1 - Black-Black with Blue Trim", "D1"),
        ("X100 - Black Upgraded Trim", "X100"),
        ("R-VAW0212", "R-VAW0212"),
        ("8435", "L2"),
        ("8435-grey", "L2"),
        ("8435 - Grey Trim", "L2"),
        ("1234", "1234"),
        ("Tailored fit mats A6", "A6"),
    ];

    for (raw, expected) in cases {
        assert_eq!(
            extract_sku_identifier(raw),
            expected,
            "raw SKU {raw:?} should extract to {expected:?}"
        );
    }
}

#[test]
fn unrecognized_skus_come_back_uppercased() {
    assert_eq!(extract_sku_identifier("no match at all"), "NO MATCH AT ALL");
    assert_eq!(extract_sku_identifier("  padded  "), "PADDED");
}

#[test]
fn individual_rules_only_fire_on_their_shape() {
    let by_name: std::collections::HashMap<_, _> =
        rules().iter().map(|rule| (rule.name, rule)).collect();

    assert_eq!(by_name["v-code"].apply("V94 extra"), Some("V94".to_string()));
    assert_eq!(by_name["v-code"].apply("Q227"), None);

    assert_eq!(
        by_name["q-code"].apply("Q227 CVT"),
        Some("Q227".to_string())
    );
    assert_eq!(by_name["q-code"].apply("X205"), None);

    assert_eq!(
        by_name["digit-remap"].apply("8435"),
        Some("L2".to_string())
    );
    assert_eq!(by_name["digit-remap"].apply("84A5"), None);
}
