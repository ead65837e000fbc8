use std::cmp::Ordering;

use crate::record::Record;

/// Compares two records by business name, ignoring case.
pub fn compare_records(a: &Record, b: &Record) -> Ordering {
    cmp_ignore_case(&a.business_name, &b.business_name)
}

/// Compares a record's business name against a raw name, ignoring case.
pub fn compare_record_to_name(record: &Record, name: &str) -> Ordering {
    cmp_ignore_case(&record.business_name, name)
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}
