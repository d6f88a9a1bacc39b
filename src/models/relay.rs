use serde::{Deserialize, Serialize};

pub const SUCCESS_MESSAGE: &str = "Booking sent to Make.com";

/// Body posted by the booking flow once a booking has been confirmed.
///
/// Every field is optional on the wire so that a missing `bookingId` is
/// reported by the relay itself instead of by the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingWebhookRequest {
    pub booking_id: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub service: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl BookingWebhookRequest {
    /// The booking id, treating an empty string as absent.
    pub fn booking_id(&self) -> Option<&str> {
        self.booking_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Outbound body for the Make.com scenario, using the field names the
/// scenario was built with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MakePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vardas: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefonas: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paslauga: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub laikas: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pabaiga: Option<String>,
    pub rezervacijos_id: String,
}

impl MakePayload {
    pub fn from_request(req: &BookingWebhookRequest, booking_id: &str) -> Self {
        Self {
            vardas: req.customer_name.clone(),
            telefonas: req.customer_phone.clone(),
            paslauga: req.service.clone(),
            laikas: req.start_time.clone(),
            pabaiga: req.end_time.clone(),
            rezervacijos_id: booking_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelayResponse {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: Some(SUCCESS_MESSAGE.to_string()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_reads_camel_case_fields() {
        let req: BookingWebhookRequest = serde_json::from_str(
            r#"{"bookingId":"b1","customerName":"Jonas","customerPhone":"+37060000000","service":"Haircut","startTime":"2025-01-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(req.booking_id(), Some("b1"));
        assert_eq!(req.customer_name.as_deref(), Some("Jonas"));
        assert!(req.end_time.is_none());
    }

    #[test]
    fn test_empty_booking_id_counts_as_missing() {
        let req: BookingWebhookRequest = serde_json::from_str(r#"{"bookingId":""}"#).unwrap();
        assert_eq!(req.booking_id(), None);
    }

    #[test]
    fn test_payload_uses_make_field_names() {
        let req = BookingWebhookRequest {
            booking_id: Some("b1".to_string()),
            customer_name: Some("Jonas".to_string()),
            customer_phone: Some("+37060000000".to_string()),
            service: Some("Haircut".to_string()),
            start_time: Some("2025-01-01T10:00:00Z".to_string()),
            end_time: Some("2025-01-01T11:00:00Z".to_string()),
        };
        let value = serde_json::to_value(MakePayload::from_request(&req, "b1")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "vardas": "Jonas",
                "telefonas": "+37060000000",
                "paslauga": "Haircut",
                "laikas": "2025-01-01T10:00:00Z",
                "pabaiga": "2025-01-01T11:00:00Z",
                "rezervacijos_id": "b1",
            })
        );
    }

    #[test]
    fn test_payload_omits_missing_end_time() {
        let req = BookingWebhookRequest {
            booking_id: Some("b2".to_string()),
            customer_name: Some("Ona".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(MakePayload::from_request(&req, "b2")).unwrap();
        assert!(value.get("pabaiga").is_none());
        assert_eq!(value["rezervacijos_id"], "b2");
    }

    #[test]
    fn test_response_shapes() {
        let ok = serde_json::to_value(RelayResponse::sent()).unwrap();
        assert_eq!(ok, serde_json::json!({"success": true, "message": "Booking sent to Make.com"}));

        let err = serde_json::to_value(RelayResponse::failed("boom")).unwrap();
        assert_eq!(err, serde_json::json!({"success": false, "error": "boom"}));
    }
}
