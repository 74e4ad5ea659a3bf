use live_collections::PushKey;
use serde::{Deserialize, Serialize};

/// A catalog entry available for sale.
///
/// # Storage
/// Stored in the "products" collection. The `id` is the push key the store
/// assigned on insert; it is also the map key, so it is not repeated in the
/// serialized body.
///
/// See [`crate::product_store`] for the write path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(skip)]
    pub id: PushKey,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub created_at: String,
}

impl Product {
    pub fn new(id: PushKey, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            created_at: draft.created_at,
        }
    }
}

/// The payload pushed by the add-product form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub created_at: String,
}
