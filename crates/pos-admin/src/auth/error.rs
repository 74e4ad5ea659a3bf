//! Error types for authentication.

use thiserror::Error;

/// Errors that can occur during registration and sign-in.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Password must be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("Email already in use: {0}")]
    EmailAlreadyInUse(String),

    /// Unknown email or wrong password; deliberately not distinguished.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Auth state channel closed")]
    Closed,

    /// An error occurred while communicating with the operators collection.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
