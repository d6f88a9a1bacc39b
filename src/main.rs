use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use salon_relay::config::AppConfig;
use salon_relay::handlers;
use salon_relay::services::forwarding::make::MakeWebhook;
use salon_relay::state::AppState;
use salon_relay::store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    anyhow::ensure!(
        !config.make_webhook_url.is_empty(),
        "MAKE_WEBHOOK_URL must be set"
    );

    let store = store::from_config(&config)?;
    let forwarder = MakeWebhook::new(config.make_webhook_url.clone());

    let state = Arc::new(AppState {
        store,
        forwarder: Box::new(forwarder),
    });

    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
