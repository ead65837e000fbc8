//! Persistence abstraction over whole-collection loads and saves.

/// Delimited-text-file sink.
pub mod delimited;

use thiserror::Error;

use crate::record::Record;

/// Persistence failure at the sink boundary.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Underlying file I/O failed.
    #[error("record file I/O: {0}")]
    Io(#[from] std::io::Error),
    /// A line did not carry exactly five fields; the whole load aborts.
    #[error("line {line}: expected 5 fields, found {found}")]
    Malformed {
        /// One-based line number.
        line: usize,
        /// Number of fields the line split into.
        found: usize,
    },
    /// A record field would break the line format.
    #[error("field `{field}` contains the delimiter or a line break")]
    UnencodableField {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// Convenience alias for sink results.
pub type PersistResult<T> = Result<T, PersistError>;

/// Whole-collection load/save backend for the record store.
///
/// `save` overwrites the previous contents; there is no incremental write.
pub trait RecordSink: Send {
    /// Reads the full record sequence.
    fn load(&mut self) -> PersistResult<Vec<Record>>;
    /// Replaces the stored sequence with `records`.
    fn save(&mut self, records: &[Record]) -> PersistResult<()>;
}

/// In-memory sink for examples and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<Record>,
}

impl MemorySink {
    /// Sink pre-loaded with `records`.
    pub fn with_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Records captured by the last save (or given at construction).
    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

impl RecordSink for MemorySink {
    fn load(&mut self) -> PersistResult<Vec<Record>> {
        Ok(self.records.clone())
    }

    fn save(&mut self, records: &[Record]) -> PersistResult<()> {
        self.records = records.to_vec();
        Ok(())
    }
}
