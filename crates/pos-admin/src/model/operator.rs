use live_collections::PushKey;
use serde::{Deserialize, Serialize};

/// A registered operator account.
///
/// Only the auth service reads or writes these. `password_hash` is an argon2
/// PHC string; the plain password is never stored.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    #[serde(skip)]
    pub id: PushKey,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
}

impl std::fmt::Debug for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operator")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, PartialEq)]
pub struct OperatorDraft {
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
}

impl std::fmt::Debug for OperatorDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorDraft")
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .finish_non_exhaustive()
    }
}
