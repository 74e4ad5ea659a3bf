//! Record trait implementation for the [`Sale`] type.

use super::SaleError;
use crate::model::{Sale, SaleDraft};
use live_collections::{PushKey, Record};

impl Record for Sale {
    type Draft = SaleDraft;
    type Context = ();
    type Error = SaleError;

    fn from_draft(key: PushKey, draft: SaleDraft) -> Result<Self, Self::Error> {
        Ok(Sale::new(key, draft))
    }

    fn key(&self) -> &PushKey {
        &self.id
    }
}
