//! Flat delimited-text-file implementation of [`RecordSink`].
//!
//! One record per line, five fields joined by `;` in the fixed order
//! `business_name;address;phone;website;recycles`, no header and no
//! trailing delimiter.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::record::{FIELD_DELIMITER, Record};

use super::{PersistError, PersistResult, RecordSink};

/// Fields per serialized record line.
pub const FIELD_COUNT: usize = 5;

/// File-backed sink that rewrites the whole file on every save.
#[derive(Debug, Clone)]
pub struct DelimitedFile {
    path: PathBuf,
}

impl DelimitedFile {
    /// Sink backed by the file at `path`; the file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for DelimitedFile {
    fn load(&mut self) -> PersistResult<Vec<Record>> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            records.push(decode_line(&line, number + 1)?);
        }
        debug!(records = records.len(), path = %self.path.display(), "loaded record file");
        Ok(records)
    }

    fn save(&mut self, records: &[Record]) -> PersistResult<()> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        for record in records {
            writeln!(writer, "{}", encode_record(record)?)?;
        }
        writer.flush()?;
        debug!(records = records.len(), path = %self.path.display(), "wrote record file");
        Ok(())
    }
}

fn decode_line(line: &str, number: usize) -> PersistResult<Record> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if fields.len() != FIELD_COUNT {
        return Err(PersistError::Malformed {
            line: number,
            found: fields.len(),
        });
    }
    Ok(Record::new(
        fields[0], fields[1], fields[2], fields[3], fields[4],
    ))
}

fn encode_record(record: &Record) -> PersistResult<String> {
    if let Some(field) = record.field_violation() {
        return Err(PersistError::UnencodableField { field });
    }
    Ok(record.to_string())
}
