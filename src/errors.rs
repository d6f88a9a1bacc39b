use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::handlers::cors::cors_headers;
use crate::models::RelayResponse;

pub const NOT_CONFIRMED_MESSAGE: &str = "Booking not found or not confirmed";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Booking ID is required")]
    MissingBookingId,

    #[error("Invalid request body: {0}")]
    InvalidPayload(String),

    #[error("booking lookup failed: {0:#}")]
    Lookup(anyhow::Error),

    #[error("Booking not found or not confirmed")]
    NotConfirmed,

    #[error("Make.com webhook failed: {status_text}")]
    ForwardRejected {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("{0:#}")]
    Transport(anyhow::Error),

    #[error("{0}")]
    Unexpected(String),
}

impl RelayError {
    /// Text sent back to the caller. Lookup failures read the same as a
    /// missing or unconfirmed booking; the distinction stays in the logs.
    pub fn client_message(&self) -> String {
        match self {
            RelayError::Lookup(_) => NOT_CONFIRMED_MESSAGE.to_string(),
            RelayError::Unexpected(msg) if msg.is_empty() => UNKNOWN_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            cors_headers(),
            Json(RelayResponse::failed(self.client_message())),
        )
            .into_response()
    }
}
