use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use storefront::config::Config;
use storefront::handlers;
use storefront::identity::NullIdentityProvider;
use storefront::payments::StripeClient;
use storefront::state::AppState;
use storefront::store::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("storefront=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    if config.dev_mode {
        tracing::warn!("running in dev mode");
    }
    if config.stripe_webhook_secret.is_none() {
        tracing::warn!("STRIPE_WEBHOOK_SECRET not set, webhook signatures are not verified");
    }

    // The document store is deployment-specific; the in-memory store backs
    // local runs. A managed-store implementation plugs in through the same
    // traits.
    let store = Arc::new(MemoryStore::new());
    let processor = Arc::new(StripeClient::new(config.stripe_secret_key.clone()));

    let addr = config.addr();
    let state = AppState::new(
        config,
        store.clone(),
        store.clone(),
        store.clone(),
        store,
        processor,
        Arc::new(NullIdentityProvider),
    );

    let app = handlers::app(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
