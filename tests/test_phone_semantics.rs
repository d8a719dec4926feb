//! Phone number normalization, semantic equality and reconciliation, driven
//! through the public API.

use customer_registry::domain::{normalize_phone_number, PhoneType};
use customer_registry::models::PhoneNumber;
use customer_registry::reconcile::reconcile;
use std::collections::HashSet;

const SAMPLES: &[&str] = &[
    "",
    "+",
    "++1",
    "+1 (212) 555-2368",
    "00 44 121 234 5678",
    "tel:+1.212.555.2368",
    "ext. 42",
    "+٣٣ 1 23",
    "  +4 4  ",
];

#[test]
fn test_normalization_is_idempotent() {
    for sample in SAMPLES {
        let once = normalize_phone_number(sample);
        assert_eq!(normalize_phone_number(&once), once, "sample {:?}", sample);
        assert!(once.chars().all(|c| c == '+' || c.is_ascii_digit()));
    }
}

#[test]
fn test_formatting_variants_are_one_entry() {
    let variants = [
        "+1 (212) 555-2368",
        "+1.212.555.2368",
        "+1-212-555-2368",
        "+12125552368",
    ];
    let set: HashSet<PhoneNumber> = variants
        .iter()
        .map(|v| PhoneNumber::new(*v, PhoneType::Mobile, "US", false))
        .collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn test_reconcile_against_reformatted_copy_is_noop() {
    let existing = vec![
        PhoneNumber::new("+1 212 555 2368", PhoneType::Mobile, "US", true),
        PhoneNumber::new("+1 212 555 2369", PhoneType::Home, "US", false),
    ];
    let incoming = vec![
        PhoneNumber::new("+1-212-555-2369", PhoneType::Home, "US", false),
        PhoneNumber::new("+1-212-555-2368", PhoneType::Mobile, "US", true),
    ];

    let delta = reconcile(&existing, incoming);
    assert!(delta.is_empty());
    assert_eq!(delta.apply(&existing), existing);
}

#[test]
fn test_country_code_distinguishes_entries() {
    let existing = vec![PhoneNumber::new("+12125552368", PhoneType::Work, "US", false)];
    let incoming = vec![PhoneNumber::new("+12125552368", PhoneType::Work, "CA", false)];

    let delta = reconcile(&existing, incoming);
    assert_eq!(delta.to_add.len(), 1);
    assert_eq!(delta.to_remove.len(), 1);
    assert_eq!(delta.to_add[0].country_code, "CA");
}
