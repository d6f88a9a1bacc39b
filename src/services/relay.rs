use crate::errors::RelayError;
use crate::models::{BookingWebhookRequest, MakePayload, NewBookingLog};
use crate::services::forwarding::{BookingForwarder, ForwardOutcome};
use crate::store::BookingStore;

/// Verifies the booking against the store, forwards it once, then appends
/// the audit row.
///
/// The status read happens here, after the request arrived; the caller's
/// claim that the booking is confirmed is never trusted. Nothing is retried.
pub async fn relay_booking(
    store: &dyn BookingStore,
    forwarder: &dyn BookingForwarder,
    req: &BookingWebhookRequest,
) -> Result<(), RelayError> {
    let booking_id = req.booking_id().ok_or(RelayError::MissingBookingId)?;

    tracing::info!(booking_id = %booking_id, "relaying confirmed booking");

    let booking = match store.find_confirmed_booking(booking_id).await {
        Ok(Some(booking)) => booking,
        Ok(None) => {
            tracing::warn!(booking_id = %booking_id, "booking not found or not confirmed");
            return Err(RelayError::NotConfirmed);
        }
        Err(e) => {
            tracing::error!(booking_id = %booking_id, error = %e, "booking lookup failed");
            return Err(RelayError::Lookup(e));
        }
    };

    let payload = MakePayload::from_request(req, &booking.id);

    match forwarder.forward(&payload).await {
        Ok(ForwardOutcome::Delivered) => {
            tracing::info!(booking_id = %booking_id, provider = forwarder.provider(), "booking forwarded");
        }
        Ok(ForwardOutcome::Rejected {
            status,
            status_text,
            body,
        }) => {
            tracing::error!(
                booking_id = %booking_id,
                status,
                body = %body,
                "forwarding endpoint rejected booking"
            );
            let status_text = if status_text.is_empty() {
                status.to_string()
            } else {
                status_text
            };
            return Err(RelayError::ForwardRejected {
                status,
                status_text,
                body,
            });
        }
        Err(e) => {
            tracing::error!(booking_id = %booking_id, error = %e, "forwarding request failed");
            return Err(RelayError::Transport(e));
        }
    }

    let entry = NewBookingLog::webhook_sent(booking_id, forwarder.provider());
    if let Err(e) = store.append_log(&entry).await {
        tracing::warn!(booking_id = %booking_id, error = %e, "failed to write booking log");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::models::{Booking, BookingStatus, SalonService};

    #[derive(Default)]
    struct MockStore {
        bookings: HashMap<String, BookingStatus>,
        fail_lookup: bool,
        fail_log: bool,
        lookups: Mutex<Vec<String>>,
        logs: Mutex<Vec<NewBookingLog>>,
    }

    impl MockStore {
        fn with(id: &str, status: BookingStatus) -> Self {
            let mut store = Self::default();
            store.bookings.insert(id.to_string(), status);
            store
        }
    }

    #[async_trait]
    impl BookingStore for MockStore {
        async fn find_confirmed_booking(&self, id: &str) -> anyhow::Result<Option<Booking>> {
            self.lookups.lock().unwrap().push(id.to_string());
            if self.fail_lookup {
                anyhow::bail!("connection reset");
            }
            Ok(self
                .bookings
                .get(id)
                .filter(|s| **s == BookingStatus::Confirmed)
                .map(|status| Booking {
                    id: id.to_string(),
                    status: *status,
                    customer_name: "Jonas".to_string(),
                    customer_phone: "+37060000000".to_string(),
                    service: "Haircut".to_string(),
                    start_time: Utc::now(),
                    end_time: None,
                    created_at: Utc::now(),
                }))
        }

        async fn append_log(&self, entry: &NewBookingLog) -> anyhow::Result<()> {
            self.logs.lock().unwrap().push(entry.clone());
            if self.fail_log {
                anyhow::bail!("insert failed");
            }
            Ok(())
        }

        async fn seed_services(&self, services: &[SalonService]) -> anyhow::Result<usize> {
            Ok(services.len())
        }

        async fn seed_bookings(&self, bookings: &[Booking]) -> anyhow::Result<usize> {
            Ok(bookings.len())
        }
    }

    struct MockForwarder {
        outcome: ForwardOutcome,
        sent: Mutex<Vec<MakePayload>>,
    }

    impl MockForwarder {
        fn returning(outcome: ForwardOutcome) -> Self {
            Self {
                outcome,
                sent: Mutex::new(vec![]),
            }
        }
    }

    #[async_trait]
    impl BookingForwarder for MockForwarder {
        fn provider(&self) -> &'static str {
            "make.com"
        }

        async fn forward(&self, payload: &MakePayload) -> anyhow::Result<ForwardOutcome> {
            self.sent.lock().unwrap().push(payload.clone());
            Ok(self.outcome.clone())
        }
    }

    fn request(id: Option<&str>) -> BookingWebhookRequest {
        BookingWebhookRequest {
            booking_id: id.map(str::to_string),
            customer_name: Some("Jonas".to_string()),
            customer_phone: Some("+37060000000".to_string()),
            service: Some("Haircut".to_string()),
            start_time: Some("2025-01-01T10:00:00Z".to_string()),
            end_time: None,
        }
    }

    #[tokio::test]
    async fn test_missing_id_touches_nothing() {
        let store = MockStore::with("b1", BookingStatus::Confirmed);
        let forwarder = MockForwarder::returning(ForwardOutcome::Delivered);

        let err = relay_booking(&store, &forwarder, &request(None)).await.unwrap_err();

        assert!(matches!(err, RelayError::MissingBookingId));
        assert!(store.lookups.lock().unwrap().is_empty());
        assert!(forwarder.sent.lock().unwrap().is_empty());
        assert!(store.logs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pending_booking_not_forwarded() {
        let store = MockStore::with("b1", BookingStatus::Pending);
        let forwarder = MockForwarder::returning(ForwardOutcome::Delivered);

        let err = relay_booking(&store, &forwarder, &request(Some("b1"))).await.unwrap_err();

        assert!(matches!(err, RelayError::NotConfirmed));
        assert_eq!(err.client_message(), "Booking not found or not confirmed");
        assert!(forwarder.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_error_is_distinct_but_not_forwarded() {
        let store = MockStore {
            fail_lookup: true,
            ..MockStore::with("b1", BookingStatus::Confirmed)
        };
        let forwarder = MockForwarder::returning(ForwardOutcome::Delivered);

        let err = relay_booking(&store, &forwarder, &request(Some("b1"))).await.unwrap_err();

        assert!(matches!(err, RelayError::Lookup(_)));
        assert_eq!(err.client_message(), "Booking not found or not confirmed");
        assert!(forwarder.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_confirmed_booking_forwarded_and_logged() {
        let store = MockStore::with("b1", BookingStatus::Confirmed);
        let forwarder = MockForwarder::returning(ForwardOutcome::Delivered);

        relay_booking(&store, &forwarder, &request(Some("b1"))).await.unwrap();

        let sent = forwarder.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].rezervacijos_id, "b1");
        assert_eq!(sent[0].vardas.as_deref(), Some("Jonas"));

        let logs = store.logs.lock().unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].action, "webhook_sent");
        assert_eq!(logs[0].details["provider"], "make.com");
    }

    #[tokio::test]
    async fn test_log_failure_keeps_success() {
        let store = MockStore {
            fail_log: true,
            ..MockStore::with("b1", BookingStatus::Confirmed)
        };
        let forwarder = MockForwarder::returning(ForwardOutcome::Delivered);

        assert!(relay_booking(&store, &forwarder, &request(Some("b1"))).await.is_ok());
        assert_eq!(store.logs.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_forward_fails_without_log() {
        let store = MockStore::with("b1", BookingStatus::Confirmed);
        let forwarder = MockForwarder::returning(ForwardOutcome::Rejected {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: "scenario disabled".to_string(),
        });

        let err = relay_booking(&store, &forwarder, &request(Some("b1"))).await.unwrap_err();

        assert_eq!(err.client_message(), "Make.com webhook failed: Internal Server Error");
        assert_eq!(forwarder.sent.lock().unwrap().len(), 1);
        assert!(store.logs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_forward_without_reason_uses_status_code() {
        let store = MockStore::with("b1", BookingStatus::Confirmed);
        let forwarder = MockForwarder::returning(ForwardOutcome::Rejected {
            status: 599,
            status_text: String::new(),
            body: String::new(),
        });

        let err = relay_booking(&store, &forwarder, &request(Some("b1"))).await.unwrap_err();
        assert_eq!(err.client_message(), "Make.com webhook failed: 599");
    }
}
