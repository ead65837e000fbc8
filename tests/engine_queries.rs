use std::cmp::Ordering;

use recyclog::{
    engine::{
        ord::{compare_record_to_name, compare_records},
        query::{binary_search_by_name, filter_by_recycled, sort_by_business_name},
    },
    record::Record,
};

fn record(name: &str, recycles: &str) -> Record {
    Record::new(name, "12 Bay Rd", "555-0101", "example.org", recycles)
}

#[test]
fn filter_sort_and_search_over_the_directory_scenario() {
    let records = vec![record("Acme", "plastic"), record("Bright", "glass,plastic")];

    let filtered = filter_by_recycled(&records, "plastic");
    let names: Vec<_> = filtered.iter().map(|r| r.business_name.as_str()).collect();
    assert_eq!(names, ["Acme", "Bright"]);

    let sorted = sort_by_business_name(&records);
    let names: Vec<_> = sorted.iter().map(|r| r.business_name.as_str()).collect();
    assert_eq!(names, ["Acme", "Bright"]);

    assert_eq!(binary_search_by_name(&sorted, "bright"), Ok(1));
    assert_eq!(binary_search_by_name(&sorted, "Zeta"), Err(2));
}

#[test]
fn empty_keyword_matches_every_record_in_order() {
    let records = vec![
        record("Clear", "paper"),
        record("Acme", "plastic"),
        record("Bright", "glass"),
    ];

    let filtered = filter_by_recycled(&records, "");
    let names: Vec<_> = filtered.iter().map(|r| r.business_name.as_str()).collect();
    assert_eq!(names, ["Clear", "Acme", "Bright"]);
}

#[test]
fn filter_matches_ignoring_case_and_preserves_order() {
    let records = vec![
        record("Clear", "PLASTIC bottles"),
        record("Acme", "tin"),
        record("Bright", "glass, plastic"),
    ];

    let filtered = filter_by_recycled(&records, "Plastic");
    let names: Vec<_> = filtered.iter().map(|r| r.business_name.as_str()).collect();
    assert_eq!(names, ["Clear", "Bright"]);
}

#[test]
fn sort_is_stable_for_equal_names_and_idempotent() {
    // The address field tags each record's original position.
    let records = vec![
        Record::new("beta", "0", "", "", ""),
        Record::new("ACME", "1", "", "", ""),
        Record::new("Beta", "2", "", "", ""),
        Record::new("acme", "3", "", "", ""),
    ];

    let sorted = sort_by_business_name(&records);
    let tags: Vec<_> = sorted
        .iter()
        .map(|r| (r.business_name.to_lowercase(), r.address.as_str()))
        .collect();
    assert_eq!(
        tags,
        [
            ("acme".to_string(), "1"),
            ("acme".to_string(), "3"),
            ("beta".to_string(), "0"),
            ("beta".to_string(), "2"),
        ]
    );

    assert_eq!(sort_by_business_name(&sorted), sorted);
}

#[test]
fn binary_search_miss_carries_the_insertion_point() {
    let sorted = sort_by_business_name(&[record("Alpha", ""), record("Gamma", "")]);

    assert_eq!(binary_search_by_name(&sorted, "beta"), Err(1));
    assert_eq!(binary_search_by_name(&sorted, "aardvark"), Err(0));
    assert_eq!(binary_search_by_name(&sorted, "zeta"), Err(2));
}

#[test]
fn comparators_ignore_case_on_business_name_only() {
    let a = record("acme", "plastic");
    let b = record("ACME", "glass");
    assert_eq!(compare_records(&a, &b), Ordering::Equal);
    assert_eq!(compare_record_to_name(&a, "Acme"), Ordering::Equal);
    assert_eq!(compare_record_to_name(&a, "bright"), Ordering::Less);
    assert_eq!(compare_record_to_name(&b, "Aardvark"), Ordering::Greater);
}
