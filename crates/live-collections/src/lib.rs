//! # Live Collections
//!
//! An in-process document store shaped like a hosted realtime database: named
//! collections of records stored under time-ordered push keys, with live
//! subscriptions that deliver the *whole* collection after every write.
//!
//! ## Architecture
//!
//! Each collection is a [`CollectionActor`] running in its own Tokio task.
//! Requests arrive over an mpsc channel and are processed one at a time, so a
//! collection's state needs no locks. Writers and readers talk to it through a
//! cheap, cloneable [`CollectionClient`].
//!
//! 1. **Record layer** ([`Record`]): what a document is and how it is validated.
//! 2. **Runtime layer** ([`CollectionActor`]): key allocation, storage, publication.
//! 3. **Interface layer** ([`CollectionClient`], [`CollectionHandle`]): typed requests.
//!
//! ## Keys
//!
//! [`PushKey`]s are 20 characters: 8 encode the write time in milliseconds and
//! 12 are random. They sort lexicographically in creation order, so iterating
//! a [`Snapshot`] yields records oldest first.
//!
//! ## Subscriptions
//!
//! ```rust
//! use live_collections::{CollectionActor, PushKey, Record};
//!
//! #[derive(Clone, Debug)]
//! struct Note { key: PushKey, text: String }
//! #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
//!
//! impl Record for Note {
//!     type Draft = String; type Context = (); type Error = NoteError;
//!     fn from_draft(key: PushKey, text: String) -> Result<Self, NoteError> { Ok(Self { key, text }) }
//!     fn key(&self) -> &PushKey { &self.key }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, notes) = CollectionActor::<Note>::new("notes", 16);
//!     tokio::spawn(actor.run(()));
//!
//!     let mut feed = notes.subscribe().await.unwrap();
//!     assert!(feed.next().await.unwrap().is_empty());
//!
//!     notes.push("hello".to_string()).await.unwrap();
//!     let snapshot = feed.next().await.unwrap();
//!     assert_eq!(snapshot.values().next().unwrap().text, "hello");
//! }
//! ```
//!
//! Dropping a [`Subscription`] unsubscribes. A subscriber that misses several
//! writes sees only the latest snapshot on its next read.
//!
//! ## Testing
//!
//! See the [`mock`] module for a scripted client that needs no actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod feed;
pub mod key;
pub mod message;
pub mod mock;
pub mod record;
pub mod tracing;

pub use actor::CollectionActor;
pub use client::CollectionClient;
pub use client_trait::CollectionHandle;
pub use error::StoreError;
pub use feed::{Snapshot, Subscription};
pub use key::{PushKey, PushKeyGenerator};
pub use message::{CollectionRequest, CollectionStats, Response};
pub use record::Record;
