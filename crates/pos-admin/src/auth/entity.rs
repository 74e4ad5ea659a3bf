//! Record trait implementation for the [`Operator`] type.

use super::AuthError;
use crate::model::{Operator, OperatorDraft};
use async_trait::async_trait;
use live_collections::{PushKey, Record};

#[async_trait]
impl Record for Operator {
    type Draft = OperatorDraft;
    type Context = ();
    type Error = AuthError;

    fn from_draft(key: PushKey, draft: OperatorDraft) -> Result<Self, Self::Error> {
        Ok(Self {
            id: key,
            email: draft.email,
            display_name: draft.display_name,
            password_hash: draft.password_hash,
        })
    }

    fn key(&self) -> &PushKey {
        &self.id
    }

    /// Refuses anything that is not a PHC hash string, so a plain password
    /// can never be stored by mistake.
    async fn on_write(&mut self, _ctx: &()) -> Result<(), Self::Error> {
        if !self.password_hash.starts_with("$argon2") {
            return Err(AuthError::PasswordHash(
                "stored password must be an argon2 hash".to_string(),
            ));
        }
        Ok(())
    }
}
