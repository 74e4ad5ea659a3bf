//! # Collection Actor
//!
//! `CollectionActor<T>` owns one named collection. It processes requests
//! sequentially, so the record map needs no locking, and it republishes the
//! whole collection to subscribers after every accepted write.

use crate::client::CollectionClient;
use crate::error::StoreError;
use crate::feed::{Snapshot, Subscription};
use crate::key::{PushKey, PushKeyGenerator};
use crate::message::{CollectionRequest, CollectionStats};
use crate::record::Record;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// The actor that manages one collection of records.
///
/// # Usage Pattern
///
/// 1. **Create**: `CollectionActor::new(name, capacity)` returns the actor and a client.
/// 2. **Wire**: pass the record's `Context` into `actor.run(context)`.
/// 3. **Run**: spawn the run loop; clone the client wherever it is needed.
///
/// The loop ends once every client clone has been dropped.
///
/// # Storage
///
/// Records live in an `Arc<BTreeMap>` ordered by key. A write goes through
/// `Arc::make_mut`, which copies the map only while an older snapshot is still
/// held by some subscriber, and then the new map is published as the next
/// [`Snapshot`].
pub struct CollectionActor<T: Record> {
    name: Arc<str>,
    receiver: mpsc::Receiver<CollectionRequest<T>>,
    records: Arc<BTreeMap<PushKey, T>>,
    keys: PushKeyGenerator,
    feed: watch::Sender<Snapshot<T>>,
    version: u64,
}

impl<T: Record> CollectionActor<T> {
    /// Creates a new `CollectionActor` and its associated `CollectionClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; clients wait when
    /// it is full. It must be greater than zero.
    pub fn new(name: impl Into<Arc<str>>, buffer_size: usize) -> (Self, CollectionClient<T>) {
        let name = name.into();
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (feed, _) = watch::channel(Snapshot::empty());
        let actor = Self {
            name: Arc::clone(&name),
            receiver,
            records: Arc::new(BTreeMap::new()),
            keys: PushKeyGenerator::new(),
            feed,
            version: 0,
        };
        let client = CollectionClient::new(name, sender);
        (actor, client)
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// The `context` is handed to [`Record::on_write`] for every write.
    pub async fn run(mut self, context: T::Context) {
        let collection = Arc::clone(&self.name);
        info!(%collection, "Collection started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CollectionRequest::Push { draft, respond_to } => {
                    debug!(%collection, ?draft, "Push");
                    let key = self.keys.next_key();

                    let mut record = match T::from_draft(key.clone(), draft) {
                        Ok(record) => record,
                        Err(e) => {
                            warn!(%collection, error = %e, "Push rejected");
                            let _ = respond_to.send(Err(StoreError::Rejected(Box::new(e))));
                            continue;
                        }
                    };
                    if let Err(e) = record.on_write(&context).await {
                        warn!(%collection, %key, error = %e, "on_write failed");
                        let _ = respond_to.send(Err(StoreError::Rejected(Box::new(e))));
                        continue;
                    }
                    self.store(key.clone(), record);
                    info!(%collection, %key, size = self.records.len(), "Pushed");
                    let _ = respond_to.send(Ok(key));
                }
                CollectionRequest::ReserveKey { respond_to } => {
                    let key = self.keys.next_key();
                    debug!(%collection, %key, "Reserved key");
                    let _ = respond_to.send(Ok(key));
                }
                CollectionRequest::Set {
                    key,
                    mut record,
                    respond_to,
                } => {
                    debug!(%collection, %key, ?record, "Set");
                    if record.key() != &key {
                        warn!(%collection, %key, record_key = %record.key(), "Key mismatch");
                        let _ = respond_to.send(Err(StoreError::KeyMismatch {
                            record: record.key().clone(),
                            key,
                        }));
                        continue;
                    }
                    if let Err(e) = record.on_write(&context).await {
                        warn!(%collection, %key, error = %e, "on_write failed");
                        let _ = respond_to.send(Err(StoreError::Rejected(Box::new(e))));
                        continue;
                    }
                    self.store(key.clone(), record);
                    info!(%collection, %key, size = self.records.len(), "Set");
                    let _ = respond_to.send(Ok(()));
                }
                CollectionRequest::Get { key, respond_to } => {
                    let record = self.records.get(&key).cloned();
                    debug!(%collection, %key, found = record.is_some(), "Get");
                    let _ = respond_to.send(Ok(record));
                }
                CollectionRequest::Snapshot { respond_to } => {
                    debug!(%collection, version = self.version, "Snapshot");
                    let _ = respond_to.send(Ok(self.snapshot()));
                }
                CollectionRequest::Subscribe { respond_to } => {
                    let subscription = Subscription::new(self.feed.subscribe());
                    info!(
                        %collection,
                        subscribers = self.feed.receiver_count(),
                        "Subscribed"
                    );
                    let _ = respond_to.send(Ok(subscription));
                }
                CollectionRequest::Stats { respond_to } => {
                    let _ = respond_to.send(Ok(CollectionStats {
                        records: self.records.len(),
                        subscribers: self.feed.receiver_count(),
                        version: self.version,
                    }));
                }
            }
        }

        info!(%collection, size = self.records.len(), "Shutdown");
    }

    fn snapshot(&self) -> Snapshot<T> {
        Snapshot::new(self.version, Arc::clone(&self.records))
    }

    /// Inserts the record and publishes the new contents.
    fn store(&mut self, key: PushKey, record: T) {
        Arc::make_mut(&mut self.records).insert(key, record);
        self.version += 1;
        let snapshot = self.snapshot();
        self.feed.send_replace(snapshot);
    }
}
