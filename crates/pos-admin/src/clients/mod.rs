//! Domain clients wrapping the generic collection clients.

pub mod product_client;
pub mod sale_client;

pub use product_client::ProductClient;
pub use sale_client::SaleClient;
