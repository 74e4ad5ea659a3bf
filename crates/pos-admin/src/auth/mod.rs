//! # Auth
//!
//! Operator accounts and the process-wide sign-in state.
//!
//! Accounts live in the "operators" collection with argon2 password hashes.
//! [`AuthService`] publishes an [`AuthState`] on a watch channel; pages
//! observe it through an [`AuthWatch`] and gate themselves on it.
//!
//! The state starts as [`AuthState::Pending`] until either a sign-in happens
//! or [`AuthService::resolve`] declares that no session was restored. Pages
//! treat `Pending` as "wait", never as "signed out".

pub mod entity;
pub mod error;
pub mod password;
pub mod service;
pub mod state;

pub use error::*;
pub use service::AuthService;
pub use state::{AuthState, AuthWatch, Session};

use crate::model::Operator;
use live_collections::{CollectionActor, CollectionClient};

/// Collection path for operator accounts.
pub const OPERATORS: &str = "operators";

/// Creates a new Operator actor and its client.
pub fn new(capacity: usize) -> (CollectionActor<Operator>, CollectionClient<Operator>) {
    CollectionActor::new(OPERATORS, capacity)
}
