//! Console wiring demo: fetch the catalog from a running store and
//! print the snapshot with its statistics.
//!
//! ```sh
//! STOCKROOM_BASE_URL=http://localhost:8000 cargo run -p stockroom-app --example console
//! ```

use std::sync::Arc;

use stockroom_app::{NoticeLevel, ProductManager};
use stockroom_client::ClientConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let base_url = std::env::var("STOCKROOM_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:8000".to_string());
    let gateway = Arc::new(ClientConfig::new(base_url).build_gateway());

    let manager = ProductManager::new(gateway);
    let mut notices = manager.notices.subscribe();
    tokio::spawn(async move {
        while let Ok(notice) = notices.recv().await {
            let tag = match notice.level {
                NoticeLevel::Success => "ok",
                NoticeLevel::Warning => "warn",
                NoticeLevel::Error => "error",
            };
            println!("[{tag}] {}", notice.message);
        }
    });

    manager.start().await;

    let snapshot = manager.inventory.snapshot();
    for product in snapshot.iter() {
        println!(
            "{:>6}  {:<28} {:<14} {:>10}  x{}",
            product.id,
            product.name,
            product.category.as_deref().unwrap_or("-"),
            product.price,
            product.quantity,
        );
    }

    let stats = manager.inventory.stats();
    println!(
        "{} products, total value {}, {} low stock, {} categories",
        stats.total_products,
        stats.total_value_display(),
        stats.low_stock,
        stats.categories,
    );

    manager.shutdown();
    Ok(())
}
