//! Shared primitive types and directory-wide defaults.

/// Position of a record in the live collection.
pub type RecordIndex = usize;

/// Default bound on live records, matching the original directory size.
pub const DEFAULT_CAPACITY: usize = 100;
