//! Record trait implementation for the [`Product`] type.
//!
//! Products carry no store-side checks: the form validates before pushing,
//! and the store accepts whatever arrives.

use super::ProductError;
use crate::model::{Product, ProductDraft};
use live_collections::{PushKey, Record};

impl Record for Product {
    type Draft = ProductDraft;
    type Context = ();
    type Error = ProductError;

    fn from_draft(key: PushKey, draft: ProductDraft) -> Result<Self, Self::Error> {
        Ok(Product::new(key, draft))
    }

    fn key(&self) -> &PushKey {
        &self.id
    }
}
