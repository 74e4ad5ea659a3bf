//! # Collection Client
//!
//! The cloneable handle used to talk to a `CollectionActor`.

use crate::error::StoreError;
use crate::feed::{Snapshot, Subscription};
use crate::key::PushKey;
use crate::message::{CollectionRequest, CollectionStats};
use crate::record::Record;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `CollectionActor`.
///
/// Holds only a sender and the collection name, so cloning is cheap. Every
/// method sends one request and awaits the actor's reply on a oneshot channel.
pub struct CollectionClient<T: Record> {
    name: Arc<str>,
    sender: mpsc::Sender<CollectionRequest<T>>,
}

impl<T: Record> Clone for CollectionClient<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            sender: self.sender.clone(),
        }
    }
}

impl<T: Record> CollectionClient<T> {
    pub fn new(name: impl Into<Arc<str>>, sender: mpsc::Sender<CollectionRequest<T>>) -> Self {
        Self {
            name: name.into(),
            sender,
        }
    }

    /// The collection path, e.g. `"products"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, StoreError>>) -> CollectionRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    /// Appends a record built from `draft` under a freshly generated key.
    pub async fn push(&self, draft: T::Draft) -> Result<PushKey, StoreError> {
        self.request(|respond_to| CollectionRequest::Push { draft, respond_to })
            .await
    }

    /// Allocates a key without writing, so the key can be embedded in the
    /// record before it is `set`.
    pub async fn reserve_key(&self) -> Result<PushKey, StoreError> {
        self.request(|respond_to| CollectionRequest::ReserveKey { respond_to })
            .await
    }

    pub async fn set(&self, key: PushKey, record: T) -> Result<(), StoreError> {
        self.request(|respond_to| CollectionRequest::Set {
            key,
            record,
            respond_to,
        })
        .await
    }

    pub async fn get(&self, key: PushKey) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| CollectionRequest::Get { key, respond_to })
            .await
    }

    pub async fn snapshot(&self) -> Result<Snapshot<T>, StoreError> {
        self.request(|respond_to| CollectionRequest::Snapshot { respond_to })
            .await
    }

    /// Opens a live feed of snapshots; see [`Subscription`].
    pub async fn subscribe(&self) -> Result<Subscription<T>, StoreError> {
        self.request(|respond_to| CollectionRequest::Subscribe { respond_to })
            .await
    }

    pub async fn stats(&self) -> Result<CollectionStats, StoreError> {
        self.request(|respond_to| CollectionRequest::Stats { respond_to })
            .await
    }
}
