use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ACTION_WEBHOOK_SENT: &str = "webhook_sent";

/// A persisted audit row. Rows are only ever appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingLogEntry {
    pub id: String,
    pub booking_id: String,
    pub action: String,
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewBookingLog {
    pub booking_id: String,
    pub action: String,
    pub details: serde_json::Value,
}

impl NewBookingLog {
    pub fn webhook_sent(booking_id: &str, provider: &str) -> Self {
        Self {
            booking_id: booking_id.to_string(),
            action: ACTION_WEBHOOK_SENT.to_string(),
            details: serde_json::json!({
                "provider": provider,
                "success": true,
            }),
        }
    }
}
