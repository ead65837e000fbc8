use thiserror::Error;
use tracing::warn;

use crate::{
    core::cursor::Cursor,
    persist::{PersistError, RecordSink},
    record::Record,
    types::RecordIndex,
};

/// Rejected store mutation; the collection is unchanged when returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Append attempted past the configured bound.
    #[error("directory is full ({capacity} records)")]
    CapacityExceeded {
        /// Configured record bound.
        capacity: usize,
    },
    /// Update or delete attempted with no current record.
    #[error("no current record")]
    NoCurrentRecord,
    /// A field would break the line format.
    #[error("field `{field}` contains the delimiter or a line break")]
    FieldViolation {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// Outcome of the save that follows every mutation.
///
/// A failed save is reported here rather than rolling the mutation back:
/// the in-memory change stands and the next successful save rewrites the
/// whole file.
#[derive(Debug)]
pub enum SaveStatus {
    /// The collection reached the sink.
    Saved,
    /// The sink rejected the write; the in-memory change stands.
    Failed(PersistError),
}

impl SaveStatus {
    /// True when the collection reached the sink.
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Bounded, gap-free record collection with a cursor, kept durable through
/// a [`RecordSink`].
///
/// Insertion order is display order. The live records occupy `0..len()`
/// with no holes; the cursor is inside that range whenever the store is
/// non-empty. Every mutation saves the entire collection synchronously
/// before returning.
pub struct RecordStore {
    records: Vec<Record>,
    capacity: usize,
    cursor: Cursor,
    sink: Box<dyn RecordSink>,
}

impl RecordStore {
    /// Loads the directory from `sink`, bounded by `capacity`.
    ///
    /// A load failure is recovered by starting empty. A loaded sequence
    /// longer than `capacity` is truncated. The cursor starts on the last
    /// loaded record.
    pub fn open(mut sink: Box<dyn RecordSink>, capacity: usize) -> Self {
        let mut records = match sink.load() {
            Ok(records) => records,
            Err(err) => {
                warn!(%err, "record load failed; starting with an empty directory");
                Vec::new()
            }
        };
        if records.len() > capacity {
            warn!(
                loaded = records.len(),
                capacity, "loaded more records than the bound; truncating"
            );
            records.truncate(capacity);
        }
        let cursor = Cursor::at_last(records.len());
        Self {
            records,
            capacity,
            cursor,
            sink,
        }
    }

    /// Appends a record at the end and moves the cursor onto it.
    pub fn append(&mut self, record: Record) -> Result<(RecordIndex, SaveStatus), StoreError> {
        if self.records.len() >= self.capacity {
            return Err(StoreError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        Self::check_fields(&record)?;

        self.records.push(record);
        let index = self.records.len() - 1;
        self.cursor = Cursor::at(index);
        Ok((index, self.persist()))
    }

    /// Overwrites the current record in place.
    pub fn update(&mut self, record: Record) -> Result<SaveStatus, StoreError> {
        let index = self.cursor.index().ok_or(StoreError::NoCurrentRecord)?;
        Self::check_fields(&record)?;

        self.records[index] = record;
        Ok(self.persist())
    }

    /// Removes the current record, shifting subsequent records left.
    ///
    /// The cursor keeps its index unless the removed record was the last
    /// one, in which case it retreats by one (inactive once the store is
    /// empty).
    pub fn delete(&mut self) -> Result<SaveStatus, StoreError> {
        let index = self.cursor.index().ok_or(StoreError::NoCurrentRecord)?;
        self.records.remove(index);
        self.cursor.after_remove(self.records.len());
        Ok(self.persist())
    }

    /// Moves the cursor to the first record.
    pub fn move_first(&mut self) -> Option<RecordIndex> {
        self.cursor.first(self.records.len())
    }

    /// Moves the cursor one record back, clamped at the first.
    pub fn move_prev(&mut self) -> Option<RecordIndex> {
        self.cursor.prev(self.records.len())
    }

    /// Moves the cursor one record forward, clamped at the last.
    pub fn move_next(&mut self) -> Option<RecordIndex> {
        self.cursor.next(self.records.len())
    }

    /// Moves the cursor to the last record.
    pub fn move_last(&mut self) -> Option<RecordIndex> {
        self.cursor.last(self.records.len())
    }

    /// Moves the cursor to the first record whose business name contains
    /// `needle`, ignoring case. A miss leaves the cursor untouched.
    pub fn find_by_name(&mut self, needle: &str) -> Option<RecordIndex> {
        let hit = self.records.iter().position(|r| r.name_contains(needle))?;
        self.cursor = Cursor::at(hit);
        Some(hit)
    }

    /// The record under the cursor, `None` when the store is empty.
    pub fn current(&self) -> Option<&Record> {
        self.cursor.index().map(|i| &self.records[i])
    }

    /// Cursor position, `None` when the store is empty.
    pub fn cursor(&self) -> Option<RecordIndex> {
        self.cursor.index()
    }

    /// The record at `index`, if live.
    pub fn get(&self, index: RecordIndex) -> Option<&Record> {
        self.records.get(index)
    }

    /// Live records in display order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Owned copy of the live records for read-only queries.
    pub fn snapshot(&self) -> Vec<Record> {
        self.records.clone()
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no records are live.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Configured record bound.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn check_fields(record: &Record) -> Result<(), StoreError> {
        match record.field_violation() {
            Some(field) => Err(StoreError::FieldViolation { field }),
            None => Ok(()),
        }
    }

    fn persist(&mut self) -> SaveStatus {
        match self.sink.save(&self.records) {
            Ok(()) => SaveStatus::Saved,
            Err(err) => {
                warn!(%err, "record save failed; keeping the in-memory change");
                SaveStatus::Failed(err)
            }
        }
    }
}
