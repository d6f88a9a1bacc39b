use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::Connection;

use super::BookingStore;
use crate::db::queries;
use crate::models::{Booking, NewBookingLog, SalonService};

#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    pub fn open(path: &str) -> anyhow::Result<Self> {
        Ok(Self::new(crate::db::init_db(path)?))
    }

    /// Direct access to the connection for admin tooling and tests.
    pub fn conn(&self) -> anyhow::Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))
    }
}

#[async_trait]
impl BookingStore for SqliteStore {
    async fn find_confirmed_booking(&self, id: &str) -> anyhow::Result<Option<Booking>> {
        let db = self.conn()?;
        queries::get_confirmed_booking(&db, id)
    }

    async fn append_log(&self, entry: &NewBookingLog) -> anyhow::Result<()> {
        let db = self.conn()?;
        let id = queries::insert_booking_log(&db, entry)?;
        tracing::debug!(log_id = %id, booking_id = %entry.booking_id, action = %entry.action, "booking log appended");
        Ok(())
    }

    async fn seed_services(&self, services: &[SalonService]) -> anyhow::Result<usize> {
        let db = self.conn()?;
        for service in services {
            queries::upsert_service(&db, service)?;
        }
        Ok(services.len())
    }

    async fn seed_bookings(&self, bookings: &[Booking]) -> anyhow::Result<usize> {
        let db = self.conn()?;
        for booking in bookings {
            queries::upsert_booking(&db, booking)?;
        }
        Ok(bookings.len())
    }
}
