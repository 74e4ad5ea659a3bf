//! # CollectionHandle Trait
//!
//! Common interface for domain clients that wrap a `CollectionClient`, adding
//! default read and watch methods mapped into the domain's own error type.
use crate::{CollectionClient, PushKey, Record, StoreError, Subscription};
use async_trait::async_trait;

/// Trait for domain clients to inherit the standard read operations.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use live_collections::{CollectionClient, CollectionHandle, PushKey, Record, StoreError};
///
/// #[derive(Clone, Debug)]
/// struct Note { key: PushKey, text: String }
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// impl Record for Note {
///     type Draft = String; type Context = (); type Error = NoteError;
///     fn from_draft(key: PushKey, text: String) -> Result<Self, NoteError> { Ok(Self { key, text }) }
///     fn key(&self) -> &PushKey { &self.key }
/// }
///
/// struct NoteClient { inner: CollectionClient<Note> }
///
/// #[async_trait]
/// impl CollectionHandle<Note> for NoteClient {
///     type Error = NoteError;
///     fn inner(&self) -> &CollectionClient<Note> { &self.inner }
///     fn map_error(_: StoreError) -> NoteError { NoteError }
/// }
/// ```
#[async_trait]
pub trait CollectionHandle<T: Record>: Send + Sync {
    /// The domain error type.
    type Error: Send + Sync;

    /// Access the inner generic client.
    fn inner(&self) -> &CollectionClient<T>;

    /// Map store errors to the domain error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch one record by key.
    #[tracing::instrument(skip(self))]
    async fn get(&self, key: PushKey) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(key).await.map_err(Self::map_error)
    }

    /// All records, in key order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        let snapshot = self.inner().snapshot().await.map_err(Self::map_error)?;
        Ok(snapshot.to_vec())
    }

    /// Opens a live feed of the whole collection.
    #[tracing::instrument(skip(self))]
    async fn watch(&self) -> Result<Subscription<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().subscribe().await.map_err(Self::map_error)
    }
}
