//! Error types for the sale store.

use thiserror::Error;

/// Errors that can occur while recording a sale.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SaleError {
    /// The store refused the write.
    #[error("Sale write rejected: {0}")]
    Rejected(String),

    /// An error occurred while communicating with the collection actor.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
