pub mod booking;
pub mod booking_log;
pub mod relay;
pub mod service;

pub use booking::{Booking, BookingStatus};
pub use booking_log::{BookingLogEntry, NewBookingLog, ACTION_WEBHOOK_SENT};
pub use relay::{BookingWebhookRequest, MakePayload, RelayResponse};
pub use service::SalonService;
