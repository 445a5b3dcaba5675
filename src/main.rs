//! HyperLocal Market - pincode-scoped marketplace service

use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hyperlocal_market::feed::OrderFeed;
use hyperlocal_market::store::PgStore;
use hyperlocal_market::{router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = PgStore::connect(&std::env::var("DATABASE_URL")?).await?;
    store.migrate().await?;

    // One feed per server process; torn down with it.
    let feed = OrderFeed::new();
    let state = AppState::new(Arc::new(store), feed);
    let app = router(state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "4000".to_string());
    tracing::info!("hyperlocal-market listening on 0.0.0.0:{}", port);
    axum::serve(tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?, app).await?;
    Ok(())
}
