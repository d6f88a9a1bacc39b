use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};

use crate::models::{Booking, BookingLogEntry, BookingStatus, NewBookingLog, SalonService};

fn fmt_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Accepts RFC 3339 as well as SQLite's own `datetime()` output, which
/// other writers of the table may still use. Naive values are UTC.
fn parse_ts(s: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| anyhow::anyhow!("unrecognised timestamp: {s:?}"))
}

fn ts_or_now(id: &str, column: &str, s: &str) -> DateTime<Utc> {
    parse_ts(s).unwrap_or_else(|e| {
        tracing::warn!(booking_id = %id, column, error = %e, "unreadable booking timestamp");
        Utc::now()
    })
}

// ── Bookings ──

pub fn upsert_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO bookings (id, status, customer_name, customer_phone, service, start_time, end_time, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(id) DO UPDATE SET
           status = excluded.status,
           customer_name = excluded.customer_name,
           customer_phone = excluded.customer_phone,
           service = excluded.service,
           start_time = excluded.start_time,
           end_time = excluded.end_time",
        params![
            booking.id,
            booking.status.as_str(),
            booking.customer_name,
            booking.customer_phone,
            booking.service,
            fmt_ts(&booking.start_time),
            booking.end_time.as_ref().map(fmt_ts),
            fmt_ts(&booking.created_at),
        ],
    )?;
    Ok(())
}

pub fn get_confirmed_booking(conn: &Connection, id: &str) -> anyhow::Result<Option<Booking>> {
    let result = conn.query_row(
        "SELECT id, status, customer_name, customer_phone, service, start_time, end_time, created_at \
         FROM bookings WHERE id = ?1 AND status = ?2",
        params![id, BookingStatus::Confirmed.as_str()],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(booking) => Ok(Some(booking?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn update_booking_status(
    conn: &Connection,
    id: &str,
    status: BookingStatus,
) -> anyhow::Result<bool> {
    let updated = conn.execute(
        "UPDATE bookings SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(updated > 0)
}

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let id: String = row.get(0)?;
    let status_str: String = row.get(1)?;
    let customer_name: String = row.get(2)?;
    let customer_phone: String = row.get(3)?;
    let service: String = row.get(4)?;
    let start_time_str: String = row.get(5)?;
    let end_time_str: Option<String> = row.get(6)?;
    let created_at_str: String = row.get(7)?;

    // Timestamps are informational here; a malformed one must not hide
    // the row from the status lookup.
    let start_time = ts_or_now(&id, "start_time", &start_time_str);
    let end_time = end_time_str.as_deref().and_then(|s| match parse_ts(s) {
        Ok(ts) => Some(ts),
        Err(e) => {
            tracing::warn!(booking_id = %id, column = "end_time", error = %e, "unreadable booking timestamp");
            None
        }
    });
    let created_at = ts_or_now(&id, "created_at", &created_at_str);

    Ok(Booking {
        id,
        status: BookingStatus::parse(&status_str),
        customer_name,
        customer_phone,
        service,
        start_time,
        end_time,
        created_at,
    })
}

// ── Booking logs ──

pub fn insert_booking_log(conn: &Connection, entry: &NewBookingLog) -> anyhow::Result<String> {
    let id = uuid::Uuid::new_v4().to_string();
    let details = serde_json::to_string(&entry.details)?;

    conn.execute(
        "INSERT INTO booking_logs (id, booking_id, action, details, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![id, entry.booking_id, entry.action, details, fmt_ts(&Utc::now())],
    )?;
    Ok(id)
}

pub fn get_logs_for_booking(
    conn: &Connection,
    booking_id: &str,
) -> anyhow::Result<Vec<BookingLogEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, booking_id, action, details, created_at
         FROM booking_logs WHERE booking_id = ?1 ORDER BY created_at ASC",
    )?;

    let rows = stmt.query_map(params![booking_id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
        ))
    })?;

    let mut entries = vec![];
    for row in rows {
        let (id, booking_id, action, details, created_at) = row?;
        entries.push(BookingLogEntry {
            id,
            booking_id,
            action,
            details: serde_json::from_str(&details)?,
            created_at: parse_ts(&created_at)?,
        });
    }
    Ok(entries)
}

// ── Services ──

pub fn upsert_service(conn: &Connection, service: &SalonService) -> anyhow::Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO services (id, name, description, duration_minutes, price_cents)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            service.id,
            service.name,
            service.description,
            service.duration_minutes,
            service.price_cents,
        ],
    )?;
    Ok(())
}

pub fn list_services(conn: &Connection) -> anyhow::Result<Vec<SalonService>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description, duration_minutes, price_cents FROM services ORDER BY name ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(SalonService {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            duration_minutes: row.get(3)?,
            price_cents: row.get(4)?,
        })
    })?;

    let mut services = vec![];
    for row in rows {
        services.push(row?);
    }
    Ok(services)
}
