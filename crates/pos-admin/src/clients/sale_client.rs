//! # Sale Client
//!
//! High-level API for the "sales" collection.
use crate::model::{Sale, SaleDraft};
use crate::sale_store::SaleError;
use live_collections::{CollectionClient, CollectionHandle, Record, StoreError};
use tracing::{debug, info, instrument};

/// Client for recording sales.
#[derive(Clone)]
pub struct SaleClient {
    inner: CollectionClient<Sale>,
}

impl SaleClient {
    pub fn new(inner: CollectionClient<Sale>) -> Self {
        Self { inner }
    }
}

impl CollectionHandle<Sale> for SaleClient {
    type Error = SaleError;

    fn inner(&self) -> &CollectionClient<Sale> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e {
            StoreError::Rejected(inner) => SaleError::Rejected(inner.to_string()),
            err @ StoreError::KeyMismatch { .. } => SaleError::Rejected(err.to_string()),
            other => SaleError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl SaleClient {
    /// Writes one sale with its own key embedded as `id`.
    ///
    /// Two requests: reserve a key, then `set` the complete record under it.
    /// If the second fails the reserved key is simply never used.
    #[instrument(skip(self, draft), fields(product_id = %draft.product_id))]
    pub async fn record_sale(&self, draft: SaleDraft) -> Result<Sale, SaleError> {
        debug!(?draft, "record_sale called");
        let key = self.inner.reserve_key().await.map_err(Self::map_error)?;
        let sale = Sale::from_draft(key.clone(), draft)?;
        self.inner
            .set(key.clone(), sale.clone())
            .await
            .map_err(Self::map_error)?;
        info!(%key, "Sale recorded");
        Ok(sale)
    }
}
