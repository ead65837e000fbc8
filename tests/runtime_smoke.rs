use std::time::Duration;

use recyclog::{
    core::store::RecordStore,
    persist::{delimited::DelimitedFile, PersistError, PersistResult, RecordSink},
    record::Record,
    runtime::{
        events::DirectoryEvent,
        handle::{spawn_recyclog, RuntimeConfig},
    },
    types::DEFAULT_CAPACITY,
};

fn record(name: &str, recycles: &str) -> Record {
    Record::new(name, "12 Bay Rd", "555-0101", "example.org", recycles)
}

struct FailSink;

impl RecordSink for FailSink {
    fn load(&mut self) -> PersistResult<Vec<Record>> {
        Ok(Vec::new())
    }

    fn save(&mut self, _records: &[Record]) -> PersistResult<()> {
        Err(PersistError::Io(std::io::Error::other("disk full")))
    }
}

async fn next_event(sub: &mut tokio::sync::broadcast::Receiver<DirectoryEvent>) -> DirectoryEvent {
    tokio::time::timeout(Duration::from_secs(1), sub.recv())
        .await
        .expect("event timeout")
        .expect("recv")
}

#[tokio::test]
async fn commands_run_in_order_and_persist_through_shutdown() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("recyclers.csv");

    let store = RecordStore::open(Box::new(DelimitedFile::new(path.clone())), DEFAULT_CAPACITY);
    let handle = spawn_recyclog(store, RuntimeConfig::default());
    let mut sub = handle.subscribe();

    assert_eq!(handle.append(record("Acme", "plastic")).await.expect("append"), 0);
    assert_eq!(handle.append(record("Bright", "glass")).await.expect("append"), 1);
    handle.update(record("Bright Glass", "glass,plastic")).await.expect("update");

    let current = handle.current().await.expect("current").expect("record");
    assert_eq!(current.business_name, "Bright Glass");

    let first = handle.move_first().await.expect("move").expect("record");
    assert_eq!(first.business_name, "Acme");

    let sorted = handle.sorted().await.expect("sorted");
    let names: Vec<_> = sorted.iter().map(|r| r.business_name.as_str()).collect();
    assert_eq!(names, ["Acme", "Bright Glass"]);

    let filtered = handle.filter("plastic").await.expect("filter");
    let names: Vec<_> = filtered.iter().map(|r| r.business_name.as_str()).collect();
    assert_eq!(names, ["Acme", "Bright Glass"]);

    assert_eq!(handle.binary_search("acme").await.expect("search"), Ok(0));
    assert_eq!(handle.binary_search("Zeta").await.expect("search"), Err(2));
    assert_eq!(handle.find("glass").await.expect("find"), Some(1));

    assert_eq!(next_event(&mut sub).await, DirectoryEvent::Appended { index: 0 });
    assert_eq!(next_event(&mut sub).await, DirectoryEvent::Appended { index: 1 });
    assert_eq!(next_event(&mut sub).await, DirectoryEvent::Updated { index: 1 });
    assert_eq!(next_event(&mut sub).await, DirectoryEvent::CursorMoved { index: 0 });
    assert_eq!(next_event(&mut sub).await, DirectoryEvent::CursorMoved { index: 1 });

    handle.shutdown().await.expect("shutdown");

    let reopened = RecordStore::open(Box::new(DelimitedFile::new(path)), DEFAULT_CAPACITY);
    let names: Vec<_> = reopened.records().iter().map(|r| r.business_name.as_str()).collect();
    assert_eq!(names, ["Acme", "Bright Glass"]);
}

#[tokio::test]
async fn save_failure_surfaces_an_event_and_the_mutation_stands() {
    let store = RecordStore::open(Box::new(FailSink), DEFAULT_CAPACITY);
    let handle = spawn_recyclog(store, RuntimeConfig::default());
    let mut sub = handle.subscribe();

    let index = handle.append(record("Acme", "plastic")).await.expect("append");
    assert_eq!(index, 0);

    assert_eq!(next_event(&mut sub).await, DirectoryEvent::SaveFailed);
    assert_eq!(next_event(&mut sub).await, DirectoryEvent::Appended { index: 0 });

    let current = handle.current().await.expect("current").expect("record");
    assert_eq!(current.business_name, "Acme");

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn delete_events_and_empty_navigation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("recyclers.csv");

    let store = RecordStore::open(Box::new(DelimitedFile::new(path)), DEFAULT_CAPACITY);
    let handle = spawn_recyclog(store, RuntimeConfig::default());
    let mut sub = handle.subscribe();

    handle.append(record("Acme", "plastic")).await.expect("append");
    handle.delete().await.expect("delete");

    assert_eq!(next_event(&mut sub).await, DirectoryEvent::Appended { index: 0 });
    assert_eq!(next_event(&mut sub).await, DirectoryEvent::Deleted { index: 0 });

    assert_eq!(handle.current().await.expect("current"), None);
    assert_eq!(handle.move_first().await.expect("move"), None);
    assert_eq!(handle.move_next().await.expect("move"), None);
    assert!(handle.delete().await.is_err());

    handle.shutdown().await.expect("shutdown");
}
