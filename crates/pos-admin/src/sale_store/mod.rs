//! # Sale Store
//!
//! The "sales" collection. Sales are written in two steps: a key is reserved
//! first so it can be embedded in the record as `id`, then the complete
//! record is `set` under that key. See
//! [`SaleClient::record_sale`](crate::clients::SaleClient::record_sale).

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Sale;
use live_collections::{CollectionActor, CollectionClient};

/// Collection path for sale records.
pub const SALES: &str = "sales";

/// Creates a new Sale actor and its client.
pub fn new(capacity: usize) -> (CollectionActor<Sale>, CollectionClient<Sale>) {
    CollectionActor::new(SALES, capacity)
}
