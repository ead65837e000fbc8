use crate::{
    engine::ord::{compare_record_to_name, compare_records},
    record::Record,
    types::RecordIndex,
};

/// Records whose `recycles` field contains `keyword`, ignoring case, in
/// their original order. The empty keyword matches every record.
pub fn filter_by_recycled<'a>(records: &'a [Record], keyword: &str) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|r| r.recycles_contains(keyword))
        .collect()
}

/// Cloned variant of [`filter_by_recycled`].
pub fn filter_by_recycled_cloned(records: &[Record], keyword: &str) -> Vec<Record> {
    filter_by_recycled(records, keyword)
        .into_iter()
        .cloned()
        .collect()
}

/// New sequence sorted by business name, ignoring case.
///
/// The sort is stable, so records with equal names keep their original
/// relative order and re-sorting is idempotent.
pub fn sort_by_business_name(records: &[Record]) -> Vec<Record> {
    let mut sorted = records.to_vec();
    sorted.sort_by(compare_records);
    sorted
}

/// Binary search by business name over a sequence already sorted by
/// [`sort_by_business_name`]'s comparator.
///
/// Returns `Ok(index)` of a case-insensitive match, or `Err(insertion)`
/// with the position where `name` would belong.
pub fn binary_search_by_name(
    sorted: &[Record],
    name: &str,
) -> Result<RecordIndex, RecordIndex> {
    sorted.binary_search_by(|record| compare_record_to_name(record, name))
}
