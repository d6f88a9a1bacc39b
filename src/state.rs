use crate::services::forwarding::BookingForwarder;
use crate::store::BookingStore;

pub struct AppState {
    pub store: Box<dyn BookingStore>,
    pub forwarder: Box<dyn BookingForwarder>,
}
