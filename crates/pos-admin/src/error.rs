//! Top-level error for the binary.

use crate::auth::AuthError;
use crate::config::ConfigError;
use crate::product_store::ProductError;
use crate::sale_store::SaleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Product error: {0}")]
    Product(#[from] ProductError),

    #[error("Sale error: {0}")]
    Sale(#[from] SaleError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Shutdown failed: {0}")]
    Shutdown(String),
}
