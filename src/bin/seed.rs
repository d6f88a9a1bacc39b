use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use salon_relay::config::AppConfig;
use salon_relay::services::seed;
use salon_relay::store;

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    let store = store::from_config(&config)?;

    let report = seed::seed_store(store.as_ref()).await?;
    tracing::info!(
        services = report.services,
        bookings = report.bookings,
        "sample content seeded"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "seeding failed");
            ExitCode::FAILURE
        }
    }
}
