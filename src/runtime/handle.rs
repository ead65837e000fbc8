use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};

use crate::{
    core::store::{RecordStore, SaveStatus, StoreError},
    engine::query,
    record::Record,
    types::RecordIndex,
};

use super::events::DirectoryEvent;

/// Failure surfaced through the runtime handle.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The store rejected the mutation; nothing changed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The command loop is gone.
    #[error("runtime channel closed")]
    ChannelClosed,
}

/// Channel sizing for the command loop.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Bound on queued commands.
    pub command_queue_bound: usize,
    /// Capacity of the broadcast event channel.
    pub event_channel_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 256,
            event_channel_capacity: 1024,
        }
    }
}

/// Cloneable handle onto the single-writer command loop.
///
/// Commands are processed strictly in arrival order; each mutation and its
/// save complete before the reply is sent, so no two mutations interleave.
pub struct RecyclogHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<DirectoryEvent>,
}

impl Clone for RecyclogHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

enum Command {
    Append {
        record: Record,
        resp: oneshot::Sender<Result<RecordIndex, RuntimeError>>,
    },
    Update {
        record: Record,
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    Delete {
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    MoveFirst {
        resp: oneshot::Sender<Option<Record>>,
    },
    MovePrev {
        resp: oneshot::Sender<Option<Record>>,
    },
    MoveNext {
        resp: oneshot::Sender<Option<Record>>,
    },
    MoveLast {
        resp: oneshot::Sender<Option<Record>>,
    },
    Current {
        resp: oneshot::Sender<Option<Record>>,
    },
    Find {
        name: String,
        resp: oneshot::Sender<Option<RecordIndex>>,
    },
    Sorted {
        resp: oneshot::Sender<Vec<Record>>,
    },
    Filter {
        keyword: String,
        resp: oneshot::Sender<Vec<Record>>,
    },
    BinarySearch {
        name: String,
        resp: oneshot::Sender<Result<RecordIndex, RecordIndex>>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

/// Spawns the command loop that owns `store` and returns its handle.
pub fn spawn_recyclog(store: RecordStore, config: RuntimeConfig) -> RecyclogHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound);
    let (events_tx, _) = broadcast::channel::<DirectoryEvent>(config.event_channel_capacity);

    let events_tx_loop = events_tx.clone();
    tokio::spawn(async move {
        let mut store = store;
        while let Some(cmd) = cmd_rx.recv().await {
            if handle_command(cmd, &mut store, &events_tx_loop) {
                break;
            }
        }
    });

    RecyclogHandle { cmd_tx, events_tx }
}

impl RecyclogHandle {
    /// Subscribes to the runtime event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<DirectoryEvent> {
        self.events_tx.subscribe()
    }

    /// Appends a new record and returns its index.
    pub async fn append(&self, record: Record) -> Result<RecordIndex, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Append { record, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Overwrites the current record.
    pub async fn update(&self, record: Record) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Update { record, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Deletes the current record.
    pub async fn delete(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Delete { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Moves to the first record and returns the new current record.
    pub async fn move_first(&self) -> Result<Option<Record>, RuntimeError> {
        self.navigate(|resp| Command::MoveFirst { resp }).await
    }

    /// Moves one record back and returns the new current record.
    pub async fn move_prev(&self) -> Result<Option<Record>, RuntimeError> {
        self.navigate(|resp| Command::MovePrev { resp }).await
    }

    /// Moves one record forward and returns the new current record.
    pub async fn move_next(&self) -> Result<Option<Record>, RuntimeError> {
        self.navigate(|resp| Command::MoveNext { resp }).await
    }

    /// Moves to the last record and returns the new current record.
    pub async fn move_last(&self) -> Result<Option<Record>, RuntimeError> {
        self.navigate(|resp| Command::MoveLast { resp }).await
    }

    /// The current record, `None` when the directory is empty.
    pub async fn current(&self) -> Result<Option<Record>, RuntimeError> {
        self.navigate(|resp| Command::Current { resp }).await
    }

    /// Moves the cursor to the first record whose name contains `name`.
    pub async fn find(&self, name: impl Into<String>) -> Result<Option<RecordIndex>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Find {
                name: name.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Snapshot sorted by business name, ignoring case.
    pub async fn sorted(&self) -> Result<Vec<Record>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Sorted { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Records whose `recycles` field contains `keyword`, ignoring case.
    pub async fn filter(
        &self,
        keyword: impl Into<String>,
    ) -> Result<Vec<Record>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Filter {
                keyword: keyword.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Binary search by name over a freshly sorted snapshot.
    ///
    /// `Ok(index)` is the position in the sorted view; `Err(insertion)` is
    /// where the name would belong.
    pub async fn binary_search(
        &self,
        name: impl Into<String>,
    ) -> Result<Result<RecordIndex, RecordIndex>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::BinarySearch {
                name: name.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Stops the command loop. The save implied by the last mutation has
    /// already completed by the time its reply was sent, so there is no
    /// extra flush step.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    async fn navigate(
        &self,
        make: impl FnOnce(oneshot::Sender<Option<Record>>) -> Command,
    ) -> Result<Option<Record>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

fn handle_command(
    cmd: Command,
    store: &mut RecordStore,
    events_tx: &broadcast::Sender<DirectoryEvent>,
) -> bool {
    match cmd {
        Command::Append { record, resp } => {
            let res = store.append(record).map(|(index, status)| {
                report_save(&status, events_tx);
                let _ = events_tx.send(DirectoryEvent::Appended { index });
                index
            });
            let _ = resp.send(res.map_err(RuntimeError::from));
        }
        Command::Update { record, resp } => {
            let index = store.cursor();
            let res = store.update(record).map(|status| {
                report_save(&status, events_tx);
                if let Some(index) = index {
                    let _ = events_tx.send(DirectoryEvent::Updated { index });
                }
            });
            let _ = resp.send(res.map_err(RuntimeError::from));
        }
        Command::Delete { resp } => {
            let index = store.cursor();
            let res = store.delete().map(|status| {
                report_save(&status, events_tx);
                if let Some(index) = index {
                    let _ = events_tx.send(DirectoryEvent::Deleted { index });
                }
            });
            let _ = resp.send(res.map_err(RuntimeError::from));
        }
        Command::MoveFirst { resp } => {
            emit_cursor(store.move_first(), events_tx);
            let _ = resp.send(store.current().cloned());
        }
        Command::MovePrev { resp } => {
            emit_cursor(store.move_prev(), events_tx);
            let _ = resp.send(store.current().cloned());
        }
        Command::MoveNext { resp } => {
            emit_cursor(store.move_next(), events_tx);
            let _ = resp.send(store.current().cloned());
        }
        Command::MoveLast { resp } => {
            emit_cursor(store.move_last(), events_tx);
            let _ = resp.send(store.current().cloned());
        }
        Command::Current { resp } => {
            let _ = resp.send(store.current().cloned());
        }
        Command::Find { name, resp } => {
            let hit = store.find_by_name(&name);
            emit_cursor(hit, events_tx);
            let _ = resp.send(hit);
        }
        Command::Sorted { resp } => {
            let _ = resp.send(query::sort_by_business_name(store.records()));
        }
        Command::Filter { keyword, resp } => {
            let _ = resp.send(query::filter_by_recycled_cloned(store.records(), &keyword));
        }
        Command::BinarySearch { name, resp } => {
            let sorted = query::sort_by_business_name(store.records());
            let _ = resp.send(query::binary_search_by_name(&sorted, &name));
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(());
            return true;
        }
    }

    false
}

fn report_save(status: &SaveStatus, events_tx: &broadcast::Sender<DirectoryEvent>) {
    if let SaveStatus::Failed(_) = status {
        let _ = events_tx.send(DirectoryEvent::SaveFailed);
    }
}

fn emit_cursor(index: Option<RecordIndex>, events_tx: &broadcast::Sender<DirectoryEvent>) {
    if let Some(index) = index {
        let _ = events_tx.send(DirectoryEvent::CursorMoved { index });
    }
}
