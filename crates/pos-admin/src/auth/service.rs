//! # Auth Service
//!
//! Registration, sign-in and sign-out over the "operators" collection.

use super::password::{hash_password, verify_password};
use super::{AuthError, AuthState, AuthWatch, Session};
use crate::model::{Operator, OperatorDraft};
use live_collections::{CollectionClient, CollectionHandle, PushKey, StoreError};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Owns the sign-in state and the operator accounts.
///
/// Cloning is cheap; every clone publishes to the same state.
#[derive(Clone)]
pub struct AuthService {
    operators: CollectionClient<Operator>,
    state: Arc<watch::Sender<AuthState>>,
}

impl CollectionHandle<Operator> for AuthService {
    type Error = AuthError;

    fn inner(&self) -> &CollectionClient<Operator> {
        &self.operators
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e {
            StoreError::Rejected(inner) => AuthError::PasswordHash(inner.to_string()),
            other => AuthError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl AuthService {
    /// Starts in [`AuthState::Pending`].
    pub fn new(operators: CollectionClient<Operator>) -> Self {
        let (state, _) = watch::channel(AuthState::Pending);
        Self {
            operators,
            state: Arc::new(state),
        }
    }

    /// Creates an operator account. Does not sign in.
    ///
    /// Emails are compared case-insensitively. The duplicate check and the
    /// write are two separate requests, so two concurrent registrations of
    /// the same address can both succeed.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        email: &str,
        display_name: &str,
        password: &str,
    ) -> Result<PushKey, AuthError> {
        let email = normalize_email(email)?;
        let existing = self.list().await?;
        if existing.iter().any(|op| op.email == email) {
            warn!(%email, "Email already registered");
            return Err(AuthError::EmailAlreadyInUse(email));
        }

        let password_hash = hash_password(password)?;
        let draft = OperatorDraft {
            email,
            display_name: display_name.trim().to_string(),
            password_hash,
        };
        debug!("Sending request");
        let uid = self
            .operators
            .push(draft)
            .await
            .map_err(Self::map_error)?;
        info!(%uid, "Operator registered");
        Ok(uid)
    }

    /// Verifies the credentials and publishes [`AuthState::SignedIn`].
    ///
    /// A failed attempt leaves the current state untouched.
    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = normalize_email(email).map_err(|_| AuthError::InvalidCredentials)?;
        let operators = self.list().await?;
        let operator = operators
            .into_iter()
            .find(|op| op.email == email)
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&operator.password_hash, password)? {
            warn!(%email, "Wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let session = Session {
            uid: operator.id,
            email: operator.email,
            display_name: operator.display_name,
        };
        info!(uid = %session.uid, "Signed in");
        self.state.send_replace(AuthState::SignedIn(session.clone()));
        Ok(session)
    }

    pub fn sign_out(&self) {
        info!("Signed out");
        self.state.send_replace(AuthState::SignedOut);
    }

    /// Declares that no session was restored: `Pending` becomes `SignedOut`.
    /// Any other state is left alone.
    pub fn resolve(&self) {
        let changed = self.state.send_if_modified(|state| {
            if *state == AuthState::Pending {
                *state = AuthState::SignedOut;
                true
            } else {
                false
            }
        });
        if changed {
            info!("Auth resolved with no session");
        }
    }

    pub fn current(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Opens a feed of sign-in state changes, current state first.
    pub fn observe(&self) -> AuthWatch {
        AuthWatch::new(self.state.subscribe())
    }
}

fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(AuthError::InvalidEmail(email)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use live_collections::mock::MockCollection;

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  Ada@Example.COM ").unwrap(),
            "ada@example.com"
        );
        assert!(normalize_email("ada").is_err());
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("ada@localhost").is_err());
    }

    #[tokio::test]
    async fn test_resolve_only_moves_pending() {
        let mock = MockCollection::<Operator>::new("operators");
        let auth = AuthService::new(mock.client());
        assert_eq!(auth.current(), AuthState::Pending);

        auth.resolve();
        assert_eq!(auth.current(), AuthState::SignedOut);

        let session = Session {
            uid: PushKey::from("op1"),
            email: "ada@example.com".into(),
            display_name: "Ada".into(),
        };
        auth.state.send_replace(AuthState::SignedIn(session.clone()));
        auth.resolve();
        assert_eq!(auth.current(), AuthState::SignedIn(session));
    }

    #[tokio::test]
    async fn test_store_outage_surfaces_as_communication_error() {
        let mut mock = MockCollection::<Operator>::new("operators");
        mock.expect_snapshot()
            .return_err(StoreError::Unavailable("offline".into()));
        let auth = AuthService::new(mock.client());

        let result = auth.sign_in("ada@example.com", "secret1").await;
        assert!(matches!(result, Err(AuthError::ActorCommunicationError(_))));
        assert_eq!(auth.current(), AuthState::Pending);
        mock.verify();
    }
}
