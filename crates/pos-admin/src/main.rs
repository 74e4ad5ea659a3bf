//! # POS Admin demo
//!
//! Runs the whole flow in one process:
//! 1. Start the [`PosSystem`] and sign an operator in.
//! 2. Add products through the add-product page.
//! 3. Search, select and sell one through the sell page.
//! 4. Shut down.
//!
//! ```bash
//! RUST_LOG=info cargo run -p pos-admin
//! ```

use live_collections::tracing::setup_tracing;
use live_collections::CollectionHandle;
use pos_admin::config::AppConfig;
use pos_admin::error::AppError;
use pos_admin::lifecycle::PosSystem;
use pos_admin::model::PaymentMethod;
use pos_admin::pages::{AddProductOutcome, AddProductPage, SellOutcome, SellPage, SyncEvent};
use pos_admin::ui::{TracingNavigator, TracingNotifier};
use tracing::{info, warn, Instrument};

const CATALOG: &[(&str, &str, &str)] = &[
    ("Widget", "Blue, medium", "49.50"),
    ("Widget Pro", "Blue, large", "89"),
    ("Gadget", "Pocket size", "15.25"),
];

#[tokio::main]
async fn main() -> Result<(), AppError> {
    setup_tracing();
    let config = AppConfig::from_env()?;
    let system = PosSystem::new(&config);

    let span = tracing::info_span!("sign_in");
    async {
        system
            .auth
            .register("admin@example.com", "Admin", "change-me")
            .await?;
        let session = system.auth.sign_in("admin@example.com", "change-me").await?;
        info!(uid = %session.uid, "Operator signed in");
        Ok::<_, AppError>(())
    }
    .instrument(span)
    .await?;

    let services = system.services();

    let span = tracing::info_span!("add_products");
    async {
        let mut page = AddProductPage::new(&services, TracingNotifier);
        for (name, description, price) in CATALOG {
            page.set_name(*name);
            page.set_description(*description);
            page.set_price(*price);
            if let AddProductOutcome::Failed(e) = page.submit().await {
                return Err(AppError::from(e));
            }
        }
        Ok::<_, AppError>(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("sell");
    async {
        let mut page = SellPage::mount(&services, TracingNotifier, TracingNavigator).await;
        while page.is_loading() {
            match page.sync().await {
                Some(SyncEvent::ProductsFailed) | None => break,
                _ => {}
            }
        }

        page.on_search_input("wid");
        let picked = page.dropdown_items().first().map(|p| p.id.clone());
        match picked {
            Some(id) => {
                page.select_product(&id);
            }
            None => warn!("No product matched the search"),
        }
        page.set_phone_number("9876543210");
        page.set_payment_method(PaymentMethod::Online);

        match page.submit().await {
            SellOutcome::Sold(sale) => {
                println!("{}", serde_json::to_string_pretty(&sale)?);
            }
            SellOutcome::Failed(e) => return Err(AppError::from(e)),
            other => warn!(?other, "Sale not recorded"),
        }
        page.unmount();
        Ok::<_, AppError>(())
    }
    .instrument(span)
    .await?;

    let sales = services.sales.list().await?;
    info!(count = sales.len(), "Sales recorded");

    drop(services);
    system.shutdown().await.map_err(AppError::Shutdown)?;
    Ok(())
}
