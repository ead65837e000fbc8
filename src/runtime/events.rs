//! Runtime event stream payloads.

use crate::types::RecordIndex;

/// Events emitted from the single-writer command loop.
///
/// A presentation layer subscribes to refresh its current-record view and
/// to surface save failures as notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryEvent {
    /// A record was appended at `index` and became current.
    Appended {
        /// Index of the new record.
        index: RecordIndex,
    },
    /// The record at `index` was overwritten.
    Updated {
        /// Index of the updated record.
        index: RecordIndex,
    },
    /// The record at `index` was removed; later records shifted left.
    Deleted {
        /// Index the record occupied.
        index: RecordIndex,
    },
    /// The cursor moved (navigation or a successful find).
    CursorMoved {
        /// New cursor index.
        index: RecordIndex,
    },
    /// The save after a mutation failed; the in-memory change stands.
    SaveFailed,
}
