//! # Product Store
//!
//! The "products" collection: the catalog the add-product page writes and the
//! sell page watches.
//!
//! ## Structure
//!
//! - [`entity`] - [`Record`](live_collections::Record) implementation for [`Product`]
//! - [`error`] - [`ProductError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use pos_admin::clients::ProductClient;
//! use pos_admin::model::{timestamp_now, ProductDraft};
//! use pos_admin::product_store;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = product_store::new(32);
//!     let products = ProductClient::new(generic_client);
//!     tokio::spawn(actor.run(()));
//!
//!     let key = products
//!         .add_product(ProductDraft {
//!             name: "Widget".into(),
//!             description: "Blue, medium".into(),
//!             price: 49.5,
//!             created_at: timestamp_now(),
//!         })
//!         .await?;
//!     assert_eq!(key.as_str().len(), 20);
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Product;
use live_collections::{CollectionActor, CollectionClient};

/// Collection path for catalog entries.
pub const PRODUCTS: &str = "products";

/// Creates a new Product actor and its client.
pub fn new(capacity: usize) -> (CollectionActor<Product>, CollectionClient<Product>) {
    CollectionActor::new(PRODUCTS, capacity)
}
