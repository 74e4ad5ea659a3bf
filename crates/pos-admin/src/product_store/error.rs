//! Error types for the product store.

use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The store refused the write.
    #[error("Product write rejected: {0}")]
    Rejected(String),

    /// An error occurred while communicating with the collection actor.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
