use super::AuthError;
use live_collections::PushKey;
use tokio::sync::watch;

/// The signed-in operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub uid: PushKey,
    pub email: String,
    pub display_name: String,
}

/// Sign-in state as seen by the pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    /// The provider has not reported yet.
    #[default]
    Pending,
    SignedOut,
    SignedIn(Session),
}

impl AuthState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::SignedIn(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_signed_out(&self) -> bool {
        matches!(self, AuthState::SignedOut)
    }
}

/// A live feed of [`AuthState`] changes.
///
/// Like a collection subscription, the first [`AuthWatch::next`] returns the
/// current state immediately. Dropping the watch unsubscribes.
#[derive(Debug)]
pub struct AuthWatch {
    receiver: watch::Receiver<AuthState>,
    primed: bool,
}

impl AuthWatch {
    pub(crate) fn new(receiver: watch::Receiver<AuthState>) -> Self {
        Self {
            receiver,
            primed: false,
        }
    }

    pub fn current(&self) -> AuthState {
        self.receiver.borrow().clone()
    }

    pub async fn next(&mut self) -> Result<AuthState, AuthError> {
        if !self.primed {
            self.primed = true;
            return Ok(self.receiver.borrow_and_update().clone());
        }
        self.receiver
            .changed()
            .await
            .map_err(|_| AuthError::Closed)?;
        Ok(self.receiver.borrow_and_update().clone())
    }
}
