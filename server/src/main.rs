use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use todos_server::service::TodoService;
use todos_server::store::MongoStore;
use todos_server::{app, config, run};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    // A store we cannot reach is fatal — nothing works without it.
    let uri = config::mongo_uri();
    let store = MongoStore::connect(&uri)
        .await
        .context("failed to connect to MongoDB")?;
    let service = TodoService::new(Arc::new(store));

    let listener = TcpListener::bind(config::BIND_ADDR)
        .await
        .with_context(|| format!("failed to bind {}", config::BIND_ADDR))?;
    info!(addr = config::BIND_ADDR, "listening");

    run(listener, app(service)).await
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todos_server=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
