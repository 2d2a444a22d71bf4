use std::sync::Arc;

use tracing::error;
use tracing_subscriber::EnvFilter;

use wares::{Config, ProductDraft, ProductStore, Server};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    let store = Arc::new(ProductStore::new());
    seed(&store);

    let app = wares::router(&config);

    if let Err(e) = Server::bind(&config.bind_addr).serve(app, store).await {
        error!("server error: {e}");
        std::process::exit(1);
    }
}

/// Sample catalog so the service answers usefully out of the box.
fn seed(store: &ProductStore) {
    let samples = [
        ProductDraft {
            name: "Laptop".to_owned(),
            description: Some("High-performance laptop with 16GB RAM".to_owned()),
            price: 1200.0,
            category: Some("electronics".to_owned()),
            in_stock: true,
        },
        ProductDraft {
            name: "Smartphone".to_owned(),
            description: Some("Latest model with 128GB storage".to_owned()),
            price: 800.0,
            category: Some("electronics".to_owned()),
            in_stock: true,
        },
        ProductDraft {
            name: "Coffee Maker".to_owned(),
            description: Some("Programmable coffee maker with timer".to_owned()),
            price: 50.0,
            category: Some("kitchen".to_owned()),
            in_stock: false,
        },
    ];
    for draft in samples {
        store.create(draft);
    }
}
