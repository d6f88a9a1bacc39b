pub mod cors;
pub mod health;
pub mod relay;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub const RELAY_PATH: &str = "/functions/booking-webhook";

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            RELAY_PATH,
            post(relay::booking_webhook)
                .options(relay::preflight)
                .fallback(relay::booking_webhook),
        )
        .layer(CatchPanicLayer::custom(relay::panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
