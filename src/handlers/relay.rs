use std::any::Any;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::cors::cors_headers;
use crate::errors::{RelayError, UNKNOWN_ERROR_MESSAGE};
use crate::models::{BookingWebhookRequest, RelayResponse};
use crate::services::relay::relay_booking;
use crate::state::AppState;

// OPTIONS /functions/booking-webhook
pub async fn preflight() -> Response {
    (StatusCode::OK, cors_headers()).into_response()
}

// POST /functions/booking-webhook (and any other non-OPTIONS method)
pub async fn booking_webhook(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let req: BookingWebhookRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            tracing::warn!(error = %e, "unreadable booking webhook body");
            return RelayError::InvalidPayload(e.to_string()).into_response();
        }
    };

    match relay_booking(state.store.as_ref(), state.forwarder.as_ref(), &req).await {
        Ok(()) => (StatusCode::OK, cors_headers(), Json(RelayResponse::sent())).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "booking webhook failed");
            e.into_response()
        }
    }
}

/// Last-resort boundary: a panic in the handler still answers with the
/// uniform failure body.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        UNKNOWN_ERROR_MESSAGE.to_string()
    };

    tracing::error!(panic = %message, "booking webhook panicked");
    RelayError::Unexpected(message).into_response()
}
