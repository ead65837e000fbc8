//! Read-only query operations over record snapshots.

/// Case-insensitive comparators on business name.
pub mod ord;
/// Filter, stable sort, and binary search.
pub mod query;
