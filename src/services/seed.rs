use anyhow::Context;
use chrono::{Duration, Utc};

use crate::models::{Booking, BookingStatus, SalonService};
use crate::store::BookingStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub services: usize,
    pub bookings: usize,
}

pub fn sample_services() -> Vec<SalonService> {
    [
        ("womens-haircut", "Women's haircut", "Wash, cut and blow-dry", 60, 3500),
        ("mens-haircut", "Men's haircut", "Clipper and scissor cut", 30, 2000),
        ("coloring", "Coloring", "Single-process color with toner", 120, 7000),
        ("highlights", "Highlights", "Foil highlights, partial or full head", 150, 9000),
        ("styling", "Event styling", "Updo or waves for special occasions", 45, 4000),
    ]
    .into_iter()
    .map(|(id, name, description, duration_minutes, price_cents)| SalonService {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        duration_minutes,
        price_cents,
    })
    .collect()
}

/// Demo bookings, one per status, scheduled relative to now.
pub fn sample_bookings() -> Vec<Booking> {
    let now = Utc::now();
    let tomorrow = now + Duration::days(1);

    [
        ("demo-confirmed", BookingStatus::Confirmed, "Jonas Jonaitis", "+37060000001", "Men's haircut", 0, 30),
        ("demo-pending", BookingStatus::Pending, "Ona Onaite", "+37060000002", "Coloring", 2, 120),
        ("demo-cancelled", BookingStatus::Cancelled, "Petras Petraitis", "+37060000003", "Event styling", 5, 45),
    ]
    .into_iter()
    .map(|(id, status, name, phone, service, offset_hours, minutes)| {
        let start_time = tomorrow + Duration::hours(offset_hours);
        Booking {
            id: id.to_string(),
            status,
            customer_name: name.to_string(),
            customer_phone: phone.to_string(),
            service: service.to_string(),
            start_time,
            end_time: Some(start_time + Duration::minutes(minutes)),
            created_at: now,
        }
    })
    .collect()
}

pub async fn seed_store(store: &dyn BookingStore) -> anyhow::Result<SeedReport> {
    let services = store
        .seed_services(&sample_services())
        .await
        .context("failed to seed services")?;
    tracing::info!(count = services, "seeded services");

    let bookings = store
        .seed_bookings(&sample_bookings())
        .await
        .context("failed to seed bookings")?;
    tracing::info!(count = bookings, "seeded bookings");

    Ok(SeedReport { services, bookings })
}
