use super::Session;
use crate::{
    block::BlockRecord,
    error::Error,
    index::{IndexSnapshot, InsertOutcome},
    payload::BlockData,
    Result,
};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::debug;

enum IndexMessage {
    Insert {
        data: Box<BlockData>,
        on_insert: oneshot::Sender<Result<InsertOutcome>>,
    },
    GetBlockStats {
        number: u64,
        on_lookup: oneshot::Sender<Option<Arc<BlockRecord>>>,
    },
    Stop {
        on_stop: oneshot::Sender<()>,
    },
}

/// Sole writer of a [`Session`]. Every accepted insert publishes a new snapshot,
/// so readers holding an older `Arc` never see a half-applied block.
struct IndexActor {
    receiver: mpsc::Receiver<IndexMessage>,
    session: Session,
    publisher: watch::Sender<Arc<IndexSnapshot>>,
}

impl IndexActor {
    fn new(
        receiver: mpsc::Receiver<IndexMessage>,
        session: Session,
        publisher: watch::Sender<Arc<IndexSnapshot>>,
    ) -> Self {
        Self {
            receiver,
            session,
            publisher,
        }
    }

    async fn run(mut self) {
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                IndexMessage::Insert { data, on_insert } => {
                    let res = self.session.on_block(*data);
                    if let Ok(InsertOutcome::Inserted) = res {
                        self.publisher
                            .send_replace(Arc::new(self.session.index().snapshot()));
                    }
                    let _ = on_insert.send(res);
                }
                IndexMessage::GetBlockStats { number, on_lookup } => {
                    let block = self.session.index().get_shared(number);
                    let _ = on_lookup.send(block);
                }
                IndexMessage::Stop { on_stop } => {
                    debug!("index actor stopping");
                    let _ = on_stop.send(());
                    break;
                }
            }
        }
    }
}

/// Cheaply cloneable handle to a running index actor.
#[derive(Clone, Debug)]
pub struct IndexHandle {
    sender: mpsc::Sender<IndexMessage>,
    snapshots: watch::Receiver<Arc<IndexSnapshot>>,
}

impl IndexHandle {
    /// Moves the session onto its own task. Must be called within a tokio runtime.
    pub fn spawn(session: Session) -> Self {
        let (sender, receiver) = mpsc::channel(64);
        let (publisher, snapshots) = watch::channel(Arc::new(session.index().snapshot()));
        let actor = IndexActor::new(receiver, session, publisher);
        tokio::task::spawn(actor.run());
        Self { sender, snapshots }
    }

    pub async fn insert(&self, data: BlockData) -> Result<InsertOutcome> {
        let (on_insert, res) = oneshot::channel();
        self.sender
            .send(IndexMessage::Insert {
                data: Box::new(data),
                on_insert,
            })
            .await
            .map_err(|_| Error::SessionClosed)?;
        res.await.map_err(|_| Error::SessionClosed)?
    }

    pub async fn get_block_stats(&self, number: u64) -> Result<Option<Arc<BlockRecord>>> {
        let (on_lookup, res) = oneshot::channel();
        self.sender
            .send(IndexMessage::GetBlockStats { number, on_lookup })
            .await
            .map_err(|_| Error::SessionClosed)?;
        res.await.map_err(|_| Error::SessionClosed)
    }

    /// Most recently published snapshot.
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        self.snapshots.borrow().clone()
    }

    /// Receiver that is notified after every accepted block.
    pub fn subscribe(&self) -> watch::Receiver<Arc<IndexSnapshot>> {
        self.snapshots.clone()
    }

    pub async fn stop(&self) -> Result<()> {
        let (on_stop, res) = oneshot::channel();
        self.sender
            .send(IndexMessage::Stop { on_stop })
            .await
            .map_err(|_| Error::SessionClosed)?;
        res.await.map_err(|_| Error::SessionClosed)
    }
}
