use anyhow::Context;
use async_trait::async_trait;

use super::{BookingForwarder, ForwardOutcome};
use crate::models::MakePayload;

pub const PROVIDER: &str = "make.com";

pub struct MakeWebhook {
    url: String,
    client: reqwest::Client,
}

impl MakeWebhook {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl BookingForwarder for MakeWebhook {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn forward(&self, payload: &MakePayload) -> anyhow::Result<ForwardOutcome> {
        let resp = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .context("failed to call Make.com webhook")?;

        let status = resp.status();
        if status.is_success() {
            return Ok(ForwardOutcome::Delivered);
        }

        let body = resp.text().await.unwrap_or_default();
        Ok(ForwardOutcome::Rejected {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            body,
        })
    }
}
