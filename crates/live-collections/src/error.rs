//! # Store Errors
//!
//! Errors shared by every collection actor and client.

use crate::key::PushKey;

/// Errors that can occur within the collection store itself.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Collection actor closed")]
    ActorClosed,
    #[error("Collection actor dropped response channel")]
    ActorDropped,
    #[error("Record key {record} does not match storage key {key}")]
    KeyMismatch { key: PushKey, record: PushKey },
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Write rejected: {0}")]
    Rejected(Box<dyn std::error::Error + Send + Sync>),
}
