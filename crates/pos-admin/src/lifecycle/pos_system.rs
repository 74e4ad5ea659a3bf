use crate::auth::{self, AuthService};
use crate::clients::{ProductClient, SaleClient};
use crate::config::AppConfig;
use crate::pages::PageServices;
use crate::{product_store, sale_store};
use tracing::{error, info};

/// Runs the three collections ("products", "sales", "operators") and hands
/// out the clients the pages use.
///
/// # Example
///
/// ```rust
/// use pos_admin::config::AppConfig;
/// use pos_admin::lifecycle::PosSystem;
///
/// #[tokio::main]
/// async fn main() {
///     let system = PosSystem::new(&AppConfig::default());
///     let services = system.services();
///     // ... mount pages with `services` ...
///     drop(services);
///     system.shutdown().await.unwrap();
/// }
/// ```
pub struct PosSystem {
    pub product_client: ProductClient,
    pub sale_client: SaleClient,
    pub auth: AuthService,
    login_route: String,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl PosSystem {
    /// Spawns one actor per collection. Must be called inside a runtime.
    pub fn new(config: &AppConfig) -> Self {
        let capacity = config.channel_capacity;
        let (product_actor, product_client) = product_store::new(capacity);
        let (sale_actor, sale_client) = sale_store::new(capacity);
        let (operator_actor, operator_client) = auth::new(capacity);

        let handles = vec![
            tokio::spawn(product_actor.run(())),
            tokio::spawn(sale_actor.run(())),
            tokio::spawn(operator_actor.run(())),
        ];
        info!(capacity, "POS system started");

        Self {
            product_client: ProductClient::new(product_client),
            sale_client: SaleClient::new(sale_client),
            auth: AuthService::new(operator_client),
            login_route: config.login_route.clone(),
            handles,
        }
    }

    pub fn services(&self) -> PageServices {
        PageServices {
            products: self.product_client.clone(),
            sales: self.sale_client.clone(),
            auth: self.auth.clone(),
            login_route: self.login_route.clone(),
        }
    }

    /// Drops the system's clients and waits for every actor to stop.
    ///
    /// Actors stop only when *every* client clone is gone, so pages and
    /// [`PageServices`] handed out earlier must be dropped first or this
    /// waits forever.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.product_client);
        drop(self.sale_client);
        drop(self.auth);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
