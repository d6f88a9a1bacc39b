use anyhow::Context;
use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::Serialize;

use super::BookingStore;
use crate::models::{Booking, BookingStatus, NewBookingLog, SalonService};

/// Hosted PostgREST store (Supabase), authenticated with the service key.
pub struct RestStore {
    base_url: String,
    service_key: String,
    client: reqwest::Client,
}

impl RestStore {
    pub fn new(base_url: String, service_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
            client: reqwest::Client::new(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    async fn insert<T: Serialize + Sync>(
        &self,
        table: &str,
        rows: &T,
        upsert: bool,
    ) -> anyhow::Result<()> {
        let prefer = if upsert {
            "resolution=merge-duplicates,return=minimal"
        } else {
            "return=minimal"
        };

        let resp = self
            .authed(self.client.post(self.table_url(table)))
            .header("Prefer", prefer)
            .json(rows)
            .send()
            .await
            .with_context(|| format!("failed to insert into {table}"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("store rejected insert into {table} ({status}): {body}");
        }
        Ok(())
    }
}

#[async_trait]
impl BookingStore for RestStore {
    async fn find_confirmed_booking(&self, id: &str) -> anyhow::Result<Option<Booking>> {
        let id_filter = format!("eq.{id}");
        let status_filter = format!("eq.{}", BookingStatus::Confirmed.as_str());

        let resp = self
            .authed(self.client.get(self.table_url("bookings")))
            .query(&[
                ("id", id_filter.as_str()),
                ("status", status_filter.as_str()),
                ("select", "*"),
                ("limit", "1"),
            ])
            .send()
            .await
            .context("failed to query bookings")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("store rejected booking query ({status}): {body}");
        }

        let mut rows: Vec<Booking> = resp
            .json()
            .await
            .context("failed to parse bookings response")?;

        Ok(if rows.is_empty() { None } else { Some(rows.remove(0)) })
    }

    async fn append_log(&self, entry: &NewBookingLog) -> anyhow::Result<()> {
        self.insert("booking_logs", entry, false).await
    }

    async fn seed_services(&self, services: &[SalonService]) -> anyhow::Result<usize> {
        self.insert("services", &services, true).await?;
        Ok(services.len())
    }

    async fn seed_bookings(&self, bookings: &[Booking]) -> anyhow::Result<usize> {
        self.insert("bookings", &bookings, true).await?;
        Ok(bookings.len())
    }
}
