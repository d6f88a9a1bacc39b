pub mod rest;
pub mod sqlite;

use async_trait::async_trait;

use crate::config::{AppConfig, StoreProvider};
use crate::models::{Booking, NewBookingLog, SalonService};

/// System of record for bookings and their audit trail.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Returns the booking only if it exists and its status is `confirmed`
    /// at the time of the call.
    async fn find_confirmed_booking(&self, id: &str) -> anyhow::Result<Option<Booking>>;

    async fn append_log(&self, entry: &NewBookingLog) -> anyhow::Result<()>;

    async fn seed_services(&self, services: &[SalonService]) -> anyhow::Result<usize>;

    async fn seed_bookings(&self, bookings: &[Booking]) -> anyhow::Result<usize>;
}

/// Opens the backend selected by `STORE_PROVIDER`.
pub fn from_config(config: &AppConfig) -> anyhow::Result<Box<dyn BookingStore>> {
    match config.store_provider {
        StoreProvider::Rest => {
            anyhow::ensure!(
                !config.supabase_url.is_empty(),
                "SUPABASE_URL must be set when STORE_PROVIDER=rest"
            );
            anyhow::ensure!(
                !config.supabase_service_key.is_empty(),
                "SUPABASE_SERVICE_ROLE_KEY must be set when STORE_PROVIDER=rest"
            );
            tracing::info!("using REST booking store (url: {})", config.supabase_url);
            Ok(Box::new(rest::RestStore::new(
                config.supabase_url.clone(),
                config.supabase_service_key.clone(),
            )))
        }
        StoreProvider::Sqlite => {
            tracing::info!("using SQLite booking store (path: {})", config.database_url);
            Ok(Box::new(sqlite::SqliteStore::open(&config.database_url)?))
        }
    }
}
