//! inventoryd - serves a durable products table over HTTP.
//!
//! ```text
//! INVENTORY_DATA_DIR=/var/lib/inventory INVENTORY_HTTP_ADDR=0.0.0.0:8080 inventoryd
//! ```

use std::error::Error;
use std::sync::Arc;

use inventory_store::service::{self, InventoryService};
use inventory_store::{Config, FileProductStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    tracing::info!(
        data_dir = %config.data_dir.display(),
        http_addr = %config.http_addr,
        "starting inventoryd"
    );

    let store = FileProductStore::open(config.database_path())?;
    let service = Arc::new(InventoryService::new(store));

    service::serve(service, &config.http_addr).await?;
    Ok(())
}
