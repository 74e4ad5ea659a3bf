//! # Sell Page
//!
//! Type-ahead product search over the live catalog, then a short sale form
//! for the chosen product.
//!
//! ## Phases
//!
//! ```text
//!  Browsing --select_product--> Selected --begin_submit--> Submitting
//!     ^                            |  ^                        |
//!     +-------clear_search---------+  +-------failure----------+
//!     ^                                                        |
//!     +----------------------success---------------------------+
//! ```
//!
//! The phase is derived from the selection and the in-flight flag, so it can
//! never disagree with them.
//!
//! ## Live data
//!
//! `mount` opens two feeds: the "products" collection and the sign-in state.
//! [`SellPage::sync`] waits for whichever changes next and applies it. Every
//! product snapshot replaces the whole list.

use super::PageServices;
use crate::auth::{AuthError, AuthState, AuthWatch};
use crate::clients::SaleClient;
use crate::model::{timestamp_now, PaymentMethod, Product, Sale, SaleDraft};
use crate::sale_store::SaleError;
use crate::ui::{Navigator, Notifier, ToastLevel};
use crate::validation::{validate_phone_number, FieldError};
use live_collections::{CollectionHandle, PushKey, Snapshot, StoreError, Subscription};
use tracing::{debug, error, info, warn};

pub const FETCH_FAILED: &str = "Error fetching products. Please try again.";
pub const NO_SELECTION: &str = "Please select a product to sell.";
pub const PRODUCT_SOLD: &str = "Product sold successfully.";
pub const SALE_FAILED: &str = "Failed to sell product. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SellPhase {
    Browsing,
    Selected,
    Submitting,
}

/// What [`SellPage::sync`] applied.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// A new catalog snapshot with this many products.
    Products(usize),
    /// The catalog feed failed and was dropped.
    ProductsFailed,
    Auth(AuthState),
    AuthClosed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SellOutcome {
    Sold(Sale),
    NoSelection,
    InvalidPhone(FieldError),
    Failed(SaleError),
    /// A previous submit is still in flight.
    Busy,
}

/// A validated sale waiting to be written.
pub struct PendingSale {
    draft: SaleDraft,
    sales: SaleClient,
}

impl PendingSale {
    pub fn draft(&self) -> &SaleDraft {
        &self.draft
    }

    pub async fn send(self) -> Result<Sale, SaleError> {
        self.sales.record_sale(self.draft).await
    }
}

enum Feed {
    Products(Result<Snapshot<Product>, StoreError>),
    Auth(Result<AuthState, AuthError>),
}

pub struct SellPage<N: Notifier, V: Navigator> {
    sales: SaleClient,
    notifier: N,
    navigator: V,
    login_route: String,

    catalog_feed: Option<Subscription<Product>>,
    auth_feed: Option<AuthWatch>,
    auth_state: AuthState,

    products: Vec<Product>,
    loading: bool,
    search: String,
    show_dropdown: bool,
    selected: Option<Product>,
    phone_number: String,
    payment_method: PaymentMethod,
    phone_error: Option<FieldError>,
    submitting: bool,
}

impl<N: Notifier, V: Navigator> SellPage<N, V> {
    /// Opens the catalog and sign-in feeds.
    ///
    /// If the catalog cannot be subscribed to, the failure toast is shown
    /// and the page starts with an empty, settled list.
    pub async fn mount(services: &PageServices, notifier: N, navigator: V) -> Self {
        let mut page = Self {
            sales: services.sales.clone(),
            notifier,
            navigator,
            login_route: services.login_route.clone(),
            catalog_feed: None,
            auth_feed: Some(services.auth.observe()),
            auth_state: AuthState::Pending,
            products: Vec::new(),
            loading: true,
            search: String::new(),
            show_dropdown: false,
            selected: None,
            phone_number: String::new(),
            payment_method: PaymentMethod::default(),
            phone_error: None,
            submitting: false,
        };

        match services.products.watch().await {
            Ok(feed) => page.catalog_feed = Some(feed),
            Err(e) => page.catalog_failed(&e.to_string()),
        }
        info!("Sell page mounted");
        page
    }

    /// Waits for the next catalog snapshot or sign-in change and applies it.
    ///
    /// Returns `None` once both feeds are gone. Sign-in changes are preferred
    /// when both are ready, so a redirect happens before data is shown.
    pub async fn sync(&mut self) -> Option<SyncEvent> {
        if self.catalog_feed.is_none() && self.auth_feed.is_none() {
            return None;
        }

        let feed = {
            let catalog = next_snapshot(&mut self.catalog_feed);
            let auth = next_auth_state(&mut self.auth_feed);
            tokio::select! {
                biased;
                state = auth => Feed::Auth(state),
                snapshot = catalog => Feed::Products(snapshot),
            }
        };

        let event = match feed {
            Feed::Products(Ok(snapshot)) => {
                self.products = snapshot.to_vec();
                self.loading = false;
                debug!(count = self.products.len(), version = snapshot.version(), "Catalog updated");
                SyncEvent::Products(self.products.len())
            }
            Feed::Products(Err(e)) => {
                self.catalog_feed = None;
                self.catalog_failed(&e.to_string());
                SyncEvent::ProductsFailed
            }
            Feed::Auth(Ok(state)) => {
                self.on_auth_state(state.clone());
                SyncEvent::Auth(state)
            }
            Feed::Auth(Err(e)) => {
                warn!(error = %e, "Auth feed closed");
                self.auth_feed = None;
                SyncEvent::AuthClosed
            }
        };
        Some(event)
    }

    /// Gates the page on the sign-in state. Only a definite sign-out
    /// redirects; an unresolved state waits.
    pub fn on_auth_state(&mut self, state: AuthState) {
        match &state {
            AuthState::SignedOut => {
                warn!(route = %self.login_route, "Not signed in, redirecting");
                self.navigator.redirect(&self.login_route);
            }
            AuthState::Pending => debug!("Auth state pending"),
            AuthState::SignedIn(session) => debug!(uid = %session.uid, "Auth state signed in"),
        }
        self.auth_state = state;
    }

    /// Drops both feeds.
    pub fn unmount(&mut self) {
        self.catalog_feed = None;
        self.auth_feed = None;
        info!("Sell page unmounted");
    }

    // --- Search ---

    pub fn on_search_input(&mut self, value: impl Into<String>) {
        if self.submitting {
            return;
        }
        self.search = value.into();
        self.show_dropdown = true;
    }

    pub fn on_search_focus(&mut self) {
        if !self.filtered_products().is_empty() {
            self.show_dropdown = true;
        }
    }

    pub fn on_outside_click(&mut self) {
        self.show_dropdown = false;
    }

    /// Products whose name starts with the query, ignoring case. An empty
    /// query matches nothing.
    pub fn filtered_products(&self) -> Vec<&Product> {
        if self.search.is_empty() {
            return Vec::new();
        }
        let query = self.search.to_lowercase();
        self.products
            .iter()
            .filter(|product| product.name.to_lowercase().starts_with(&query))
            .collect()
    }

    /// What the dropdown shows right now.
    pub fn dropdown_items(&self) -> Vec<&Product> {
        if self.show_dropdown {
            self.filtered_products()
        } else {
            Vec::new()
        }
    }

    /// Picks a product from the current list. Returns `false` if `id` is
    /// not in the list or a sale is in flight.
    pub fn select_product(&mut self, id: &PushKey) -> bool {
        if self.submitting {
            return false;
        }
        let Some(product) = self.products.iter().find(|p| &p.id == id).cloned() else {
            return false;
        };
        debug!(product_id = %product.id, "Product selected");
        self.search = product.name.clone();
        self.selected = Some(product);
        self.show_dropdown = false;
        self.phone_error = None;
        true
    }

    /// The search box's clear button.
    pub fn clear_search(&mut self) {
        if self.submitting {
            return;
        }
        self.search.clear();
        self.selected = None;
        self.show_dropdown = false;
    }

    // --- Sale form ---
    //
    // Inputs are frozen while a sale is in flight.

    pub fn set_phone_number(&mut self, value: impl Into<String>) {
        if !self.submitting {
            self.phone_number = value.into();
        }
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        if !self.submitting {
            self.payment_method = method;
        }
    }

    /// Validates and marks the page as submitting.
    ///
    /// Field errors are recomputed on every attempt.
    pub fn begin_submit(&mut self) -> Result<PendingSale, SellOutcome> {
        if self.submitting {
            return Err(SellOutcome::Busy);
        }
        let Some(product) = &self.selected else {
            self.notifier.toast(ToastLevel::Error, NO_SELECTION);
            return Err(SellOutcome::NoSelection);
        };

        self.phone_error = validate_phone_number(&self.phone_number).err();
        if let Some(e) = self.phone_error {
            info!(error = %e, "Sale rejected by validation");
            return Err(SellOutcome::InvalidPhone(e));
        }

        let draft = SaleDraft::for_product(
            product,
            &self.phone_number,
            self.payment_method,
            timestamp_now(),
        );
        self.submitting = true;
        Ok(PendingSale {
            draft,
            sales: self.sales.clone(),
        })
    }

    /// Applies the result of the write. Success resets the form to browsing;
    /// failure only clears the in-flight flag.
    pub fn finish_submit(&mut self, result: Result<Sale, SaleError>) -> SellOutcome {
        self.submitting = false;
        match result {
            Ok(sale) => {
                self.notifier.toast(ToastLevel::Success, PRODUCT_SOLD);
                self.selected = None;
                self.phone_number.clear();
                self.payment_method = PaymentMethod::Cash;
                self.search.clear();
                self.phone_error = None;
                SellOutcome::Sold(sale)
            }
            Err(e) => {
                error!(error = %e, "Error selling product");
                self.notifier.toast(ToastLevel::Error, SALE_FAILED);
                SellOutcome::Failed(e)
            }
        }
    }

    pub async fn submit(&mut self) -> SellOutcome {
        match self.begin_submit() {
            Ok(pending) => {
                let result = pending.send().await;
                self.finish_submit(result)
            }
            Err(outcome) => outcome,
        }
    }

    // --- State ---

    pub fn phase(&self) -> SellPhase {
        match (self.submitting, &self.selected) {
            (true, _) => SellPhase::Submitting,
            (false, Some(_)) => SellPhase::Selected,
            (false, None) => SellPhase::Browsing,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.show_dropdown
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.selected.as_ref()
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn phone_error(&self) -> Option<FieldError> {
        self.phone_error
    }

    pub fn auth_state(&self) -> &AuthState {
        &self.auth_state
    }

    fn catalog_failed(&mut self, reason: &str) {
        error!(error = reason, "Error fetching products");
        self.notifier.toast(ToastLevel::Error, FETCH_FAILED);
        self.loading = false;
    }
}

async fn next_snapshot(
    feed: &mut Option<Subscription<Product>>,
) -> Result<Snapshot<Product>, StoreError> {
    match feed {
        Some(feed) => feed.next().await,
        None => std::future::pending().await,
    }
}

async fn next_auth_state(feed: &mut Option<AuthWatch>) -> Result<AuthState, AuthError> {
    match feed {
        Some(feed) => feed.next().await,
        None => std::future::pending().await,
    }
}
