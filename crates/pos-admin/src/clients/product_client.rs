//! # Product Client
//!
//! High-level API for the "products" collection. Wraps a
//! `CollectionClient<Product>`; reads and watches come from
//! [`CollectionHandle`].
use crate::model::{Product, ProductDraft};
use crate::product_store::ProductError;
use live_collections::{CollectionClient, CollectionHandle, PushKey, StoreError};
use tracing::{debug, info, instrument};

/// Client for the product catalog.
#[derive(Clone)]
pub struct ProductClient {
    inner: CollectionClient<Product>,
}

impl ProductClient {
    pub fn new(inner: CollectionClient<Product>) -> Self {
        Self { inner }
    }
}

impl CollectionHandle<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &CollectionClient<Product> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e {
            StoreError::Rejected(inner) => ProductError::Rejected(inner.to_string()),
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl ProductClient {
    /// Appends a product; the store assigns its key.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn add_product(&self, draft: ProductDraft) -> Result<PushKey, ProductError> {
        debug!(?draft, "add_product called");
        let key = self.inner.push(draft).await.map_err(Self::map_error)?;
        info!(%key, "Product added");
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use live_collections::mock::{create_mock_client, expect_push};

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Widget".into(),
            description: "Blue".into(),
            price: 49.5,
            created_at: "2024-05-01T09:00:00.000Z".into(),
        }
    }

    #[tokio::test]
    async fn test_add_product_pushes_draft() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let products = ProductClient::new(client);

        let task = tokio::spawn(async move { products.add_product(draft()).await });

        let (pushed, responder) = expect_push(&mut receiver)
            .await
            .expect("Expected Push request");
        assert_eq!(pushed, draft());
        responder.send(Ok(PushKey::from("-Prod0001"))).unwrap();

        let key = task.await.unwrap().unwrap();
        assert_eq!(key, PushKey::from("-Prod0001"));
    }

    #[tokio::test]
    async fn test_add_product_maps_store_failure() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let products = ProductClient::new(client);

        let task = tokio::spawn(async move { products.add_product(draft()).await });

        let (_, responder) = expect_push(&mut receiver).await.unwrap();
        responder
            .send(Err(StoreError::Unavailable("offline".into())))
            .unwrap();

        let result = task.await.unwrap();
        assert!(matches!(
            result,
            Err(ProductError::ActorCommunicationError(msg)) if msg.contains("offline")
        ));
    }
}
