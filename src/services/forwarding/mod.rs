pub mod make;

use async_trait::async_trait;

use crate::models::MakePayload;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardOutcome {
    Delivered,
    Rejected {
        status: u16,
        status_text: String,
        body: String,
    },
}

/// Outbound notification of a confirmed booking. One call, one attempt.
#[async_trait]
pub trait BookingForwarder: Send + Sync {
    /// Name recorded in the audit log.
    fn provider(&self) -> &'static str;

    /// Transport failures are errors; a non-success answer is a
    /// `ForwardOutcome::Rejected`.
    async fn forward(&self, payload: &MakePayload) -> anyhow::Result<ForwardOutcome>;
}
