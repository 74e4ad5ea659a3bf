//! # Snapshots & Live Subscriptions
//!
//! Every write to a collection publishes a new [`Snapshot`]: the complete,
//! key-ordered contents of the collection at that point. Subscribers receive
//! whole snapshots, never diffs, so a subscriber that falls behind simply sees
//! the latest state on its next read.
//!
//! Snapshots share their storage through an `Arc`, so handing one to many
//! subscribers costs a reference-count bump.

use crate::error::StoreError;
use crate::key::PushKey;
use crate::record::Record;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::watch;

/// Full contents of a collection at one version.
#[derive(Debug)]
pub struct Snapshot<T> {
    version: u64,
    records: Arc<BTreeMap<PushKey, T>>,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            version: self.version,
            records: Arc::clone(&self.records),
        }
    }
}

impl<T> Snapshot<T> {
    pub fn empty() -> Self {
        Self {
            version: 0,
            records: Arc::new(BTreeMap::new()),
        }
    }

    pub(crate) fn new(version: u64, records: Arc<BTreeMap<PushKey, T>>) -> Self {
        Self { version, records }
    }

    /// Number of writes the collection had accepted when this snapshot was taken.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, key: &PushKey) -> Option<&T> {
        self.records.get(key)
    }

    /// Records in key order (write order for generated keys).
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.records.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PushKey, &T)> {
        self.records.iter()
    }
}

impl<T: Record> Snapshot<T> {
    /// Builds a snapshot from loose records, keyed by [`Record::key`].
    pub fn from_records(version: u64, records: impl IntoIterator<Item = T>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.key().clone(), record))
            .collect();
        Self::new(version, Arc::new(records))
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.records.values().cloned().collect()
    }
}

/// A standing request for a collection's snapshots.
///
/// The first call to [`Subscription::next`] returns the current snapshot
/// immediately; every later call waits for the next write. Dropping the
/// subscription unsubscribes.
#[derive(Debug)]
pub struct Subscription<T> {
    receiver: watch::Receiver<Snapshot<T>>,
    primed: bool,
}

impl<T> Subscription<T> {
    pub(crate) fn new(receiver: watch::Receiver<Snapshot<T>>) -> Self {
        Self {
            receiver,
            primed: false,
        }
    }

    /// The latest snapshot, without waiting and without marking it seen.
    pub fn current(&self) -> Snapshot<T> {
        self.receiver.borrow().clone()
    }

    /// Waits for the next snapshot.
    ///
    /// Returns [`StoreError::ActorClosed`] once the collection has shut down.
    pub async fn next(&mut self) -> Result<Snapshot<T>, StoreError> {
        if !self.primed {
            self.primed = true;
            return Ok(self.receiver.borrow_and_update().clone());
        }
        self.receiver
            .changed()
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        Ok(self.receiver.borrow_and_update().clone())
    }
}
