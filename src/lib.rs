//! In-memory recycler directory with cursor navigation and delimited-file
//! persistence.
//!
//! # Examples
//!
//! In-memory usage with [`core::store::RecordStore`]:
//! ```
//! use recyclog::{core::store::RecordStore, persist::MemorySink, record::Record};
//!
//! let mut store = RecordStore::open(Box::new(MemorySink::default()), 100);
//! let (index, _status) = store
//!     .append(Record::new(
//!         "Acme Salvage",
//!         "12 Bay Rd",
//!         "555-0101",
//!         "acme.example",
//!         "plastic, glass",
//!     ))
//!     .expect("append");
//! assert_eq!(index, 0);
//! assert_eq!(
//!     store.current().map(|r| r.business_name.as_str()),
//!     Some("Acme Salvage"),
//! );
//! ```
//!
//! Runtime usage with a file-backed sink:
//! ```no_run
//! use recyclog::{
//!     core::store::RecordStore,
//!     persist::delimited::DelimitedFile,
//!     record::Record,
//!     runtime::handle::{spawn_recyclog, RuntimeConfig},
//!     types::DEFAULT_CAPACITY,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let sink = DelimitedFile::new("LocalRecyclers.csv");
//! let store = RecordStore::open(Box::new(sink), DEFAULT_CAPACITY);
//! let handle = spawn_recyclog(store, RuntimeConfig::default());
//! let _index = handle
//!     .append(Record::new(
//!         "Acme Salvage",
//!         "12 Bay Rd",
//!         "555-0101",
//!         "acme.example",
//!         "plastic, glass",
//!     ))
//!     .await
//!     .expect("append");
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Cursor helper and authoritative record store.
pub mod core;
/// Stateless query operations over record snapshots.
pub mod engine;
/// Persistence abstraction and delimited-file implementation.
pub mod persist;
/// Recycler domain record.
pub mod record;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Shared primitive types and defaults.
pub mod types;
