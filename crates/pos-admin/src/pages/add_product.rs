//! # Add-Product Page
//!
//! Name, description and price fields plus a "keep me logged in" checkbox.
//! Every outcome is reported with a blocking alert.

use super::PageServices;
use crate::clients::ProductClient;
use crate::model::{timestamp_now, ProductDraft};
use crate::product_store::ProductError;
use crate::ui::Notifier;
use crate::validation::{product_draft, FormError};
use live_collections::PushKey;
use tracing::{error, info};

pub const PRODUCT_ADDED: &str = "Product added successfully!";
pub const PRODUCT_ADD_FAILED: &str = "Failed to add product. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum AddProductOutcome {
    Saved(PushKey),
    Invalid(FormError),
    Failed(ProductError),
    /// A previous submit is still in flight.
    Busy,
}

/// A validated product waiting to be pushed.
pub struct PendingProduct {
    draft: ProductDraft,
    products: ProductClient,
}

impl PendingProduct {
    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub async fn send(self) -> Result<PushKey, ProductError> {
        self.products.add_product(self.draft).await
    }
}

pub struct AddProductPage<N: Notifier> {
    products: ProductClient,
    notifier: N,
    name: String,
    description: String,
    price: String,
    keep_logged_in: bool,
    submitting: bool,
}

impl<N: Notifier> AddProductPage<N> {
    pub fn new(services: &PageServices, notifier: N) -> Self {
        Self {
            products: services.products.clone(),
            notifier,
            name: String::new(),
            description: String::new(),
            price: String::new(),
            keep_logged_in: false,
            submitting: false,
        }
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.description = value.into();
    }

    /// The price is kept as typed and only parsed on submit.
    pub fn set_price(&mut self, value: impl Into<String>) {
        self.price = value.into();
    }

    pub fn set_keep_logged_in(&mut self, value: bool) {
        self.keep_logged_in = value;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> &str {
        &self.price
    }

    pub fn keep_logged_in(&self) -> bool {
        self.keep_logged_in
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validates the form and marks the page as submitting.
    ///
    /// On a validation failure the alert is shown here and nothing changes.
    pub fn begin_submit(&mut self) -> Result<PendingProduct, AddProductOutcome> {
        if self.submitting {
            return Err(AddProductOutcome::Busy);
        }

        let draft = match product_draft(&self.name, &self.description, &self.price, timestamp_now())
        {
            Ok(draft) => draft,
            Err(e) => {
                info!(error = %e, "Add product rejected by validation");
                self.notifier.alert(&e.to_string());
                return Err(AddProductOutcome::Invalid(e));
            }
        };

        self.submitting = true;
        Ok(PendingProduct {
            draft,
            products: self.products.clone(),
        })
    }

    /// Applies the result of the write: alert, then reset on success.
    pub fn finish_submit(&mut self, result: Result<PushKey, ProductError>) -> AddProductOutcome {
        self.submitting = false;
        match result {
            Ok(key) => {
                self.notifier.alert(PRODUCT_ADDED);
                self.reset();
                AddProductOutcome::Saved(key)
            }
            Err(e) => {
                error!(error = %e, "Error adding product");
                self.notifier.alert(PRODUCT_ADD_FAILED);
                AddProductOutcome::Failed(e)
            }
        }
    }

    pub async fn submit(&mut self) -> AddProductOutcome {
        match self.begin_submit() {
            Ok(pending) => {
                let result = pending.send().await;
                self.finish_submit(result)
            }
            Err(outcome) => outcome,
        }
    }

    fn reset(&mut self) {
        self.name.clear();
        self.description.clear();
        self.price.clear();
        self.keep_logged_in = false;
    }
}
