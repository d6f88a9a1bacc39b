use serde::{Deserialize, Serialize};

/// An entry of the salon's service catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalonService {
    pub id: String,
    pub name: String,
    pub description: String,
    pub duration_minutes: i32,
    pub price_cents: i64,
}
