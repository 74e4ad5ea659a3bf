//! # Record Trait
//!
//! The `Record` trait is the contract every document type (Product, Sale, ...)
//! implements to be stored in a `CollectionActor`. It names the draft payload
//! used by `push`, the context injected into hooks, and the record's own error
//! type, and it provides the `on_write` hook that runs before every write.
//!
//! # Write Path
//! - `push(draft)`: the actor allocates a [`PushKey`], calls
//!   [`Record::from_draft`], then [`Record::on_write`], then stores the record.
//! - `set(key, record)`: the caller supplies a complete record (typically built
//!   around a key obtained from `reserve_key`). The record's own
//!   [`Record::key`] must equal `key`; then only `on_write` runs.
//!
//! A hook error rejects the write and leaves the collection untouched.

use crate::key::PushKey;
use async_trait::async_trait;
use std::fmt::Debug;

/// Trait that any document type must implement to be stored in a collection.
///
/// # Async & Context
/// `on_write` is async so a record can consult other collections through the
/// injected `Context` before it is accepted. Use `()` when no dependencies are
/// needed.
#[async_trait]
pub trait Record: Clone + Debug + Send + Sync + 'static {
    /// The payload accepted by `push`.
    type Draft: Send + Sync + Debug;

    /// Runtime dependencies passed to `CollectionActor::run`.
    type Context: Send + Sync;

    /// The error type for this record.
    ///
    /// One enum per record type; `StoreError::Rejected` boxes it on the way
    /// back to the client.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the full record from its allocated key and the draft payload.
    fn from_draft(key: PushKey, draft: Self::Draft) -> Result<Self, Self::Error>;

    /// The key this record is stored under.
    fn key(&self) -> &PushKey;

    /// Called before the record is stored, for both `push` and `set`.
    async fn on_write(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
