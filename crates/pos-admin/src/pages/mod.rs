//! # Pages
//!
//! Headless view-models for the two admin screens. Each page owns exactly the
//! state its form needs and exposes one method per user event; rendering is
//! somebody else's job.
//!
//! Submission is split in two so the in-flight state is observable:
//! `begin_submit` validates and marks the page as submitting, the returned
//! pending write is sent, and `finish_submit` applies the result. `submit`
//! runs all three. While a write is in flight further submits are refused,
//! which is what the disabled submit button does in a browser.

pub mod add_product;
pub mod sell;

pub use add_product::{AddProductOutcome, AddProductPage, PendingProduct};
pub use sell::{PendingSale, SellOutcome, SellPage, SellPhase, SyncEvent};

use crate::auth::AuthService;
use crate::clients::{ProductClient, SaleClient};

/// Everything a page needs from the running system.
#[derive(Clone)]
pub struct PageServices {
    pub products: ProductClient,
    pub sales: SaleClient,
    pub auth: AuthService,
    pub login_route: String,
}
