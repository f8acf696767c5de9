use anyhow::Context;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{Attendee, Booking, BookingRecord, BookingStatus, HostUser};

const BOOKING_COLUMNS: &str = "id, uid, event_type_id, user_id, start_time, end_time, status, \
     cancellation_reason, rescheduled, from_reschedule, recurring_event_id, location, \
     no_show_host, responses";

// ── Bookings ──

pub fn get_by_id(conn: &Connection, id: i64) -> anyhow::Result<Option<Booking>> {
    let result = conn.query_row(
        &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"),
        params![id],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(booking) => Ok(Some(booking?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_by_uid(conn: &Connection, uid: &str) -> anyhow::Result<Option<Booking>> {
    let result = conn.query_row(
        &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE uid = ?1"),
        params![uid],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(booking) => Ok(Some(booking?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_by_id_with_attendees_and_user(
    conn: &Connection,
    id: i64,
) -> anyhow::Result<Option<BookingRecord>> {
    match get_by_id(conn, id)? {
        Some(booking) => Ok(Some(load_record(conn, booking)?)),
        None => Ok(None),
    }
}

pub fn get_by_uid_with_attendees(
    conn: &Connection,
    uid: &str,
) -> anyhow::Result<Option<BookingRecord>> {
    match get_by_uid(conn, uid)? {
        Some(booking) => Ok(Some(load_record(conn, booking)?)),
        None => Ok(None),
    }
}

/// All bookings in a recurrence group, relations loaded. Returns an empty
/// list for an unknown group key.
pub fn get_recurring_by_uid_with_attendees(
    conn: &Connection,
    recurring_event_id: &str,
) -> anyhow::Result<Vec<BookingRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE recurring_event_id = ?1 ORDER BY id ASC"
    ))?;

    let rows = stmt.query_map(params![recurring_event_id], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }

    let mut records = Vec::with_capacity(bookings.len());
    for booking in bookings {
        records.push(load_record(conn, booking)?);
    }
    Ok(records)
}

/// The booking created by rescheduling the booking with the given uid.
pub fn get_by_from_reschedule(
    conn: &Connection,
    from_reschedule: &str,
) -> anyhow::Result<Option<BookingRecord>> {
    let result = conn.query_row(
        &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE from_reschedule = ?1 LIMIT 1"),
        params![from_reschedule],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(booking) => Ok(Some(load_record(conn, booking?)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Inserts (seeding and tests) ──

pub fn insert_user(conn: &Connection, name: Option<&str>, email: &str) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO users (name, email) VALUES (?1, ?2)",
        params![name, email],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<i64> {
    let responses = serde_json::to_string(&booking.responses)?;
    conn.execute(
        "INSERT INTO bookings (uid, event_type_id, user_id, start_time, end_time, status, \
         cancellation_reason, rescheduled, from_reschedule, recurring_event_id, location, \
         no_show_host, responses)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            booking.uid,
            booking.event_type_id,
            booking.user_id,
            booking.start_time.to_rfc3339(),
            booking.end_time.to_rfc3339(),
            booking.status.as_str(),
            booking.cancellation_reason,
            booking.rescheduled as i32,
            booking.from_reschedule,
            booking.recurring_event_id,
            booking.location,
            booking.no_show_host as i32,
            responses,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_attendee(conn: &Connection, attendee: &Attendee) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO attendees (booking_id, name, email, time_zone, locale, no_show)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            attendee.booking_id,
            attendee.name,
            attendee.email,
            attendee.time_zone,
            attendee.locale,
            attendee.no_show as i32,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── Row parsing ──

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let id: i64 = row.get(0)?;
    let uid: String = row.get(1)?;
    let event_type_id: i64 = row.get(2)?;
    let user_id: Option<i64> = row.get(3)?;
    let start_time_str: String = row.get(4)?;
    let end_time_str: String = row.get(5)?;
    let status_str: String = row.get(6)?;
    let cancellation_reason: Option<String> = row.get(7)?;
    let rescheduled: bool = row.get::<_, i32>(8)? != 0;
    let from_reschedule: Option<String> = row.get(9)?;
    let recurring_event_id: Option<String> = row.get(10)?;
    let location: Option<String> = row.get(11)?;
    let no_show_host: bool = row.get::<_, i32>(12)? != 0;
    let responses_str: String = row.get(13)?;

    // A blob that is not even JSON parses as an empty object, which the
    // responses schema validation then rejects for missing keys.
    let responses: serde_json::Value =
        serde_json::from_str(&responses_str).unwrap_or_else(|_| serde_json::json!({}));

    Ok(Booking {
        id: Some(id),
        uid,
        event_type_id,
        user_id,
        start_time: parse_timestamp(&start_time_str)?,
        end_time: parse_timestamp(&end_time_str)?,
        status: BookingStatus::parse(&status_str),
        cancellation_reason,
        rescheduled,
        from_reschedule,
        recurring_event_id,
        location,
        no_show_host,
        responses,
    })
}

fn parse_timestamp(s: &str) -> anyhow::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("invalid timestamp in bookings row: {s}"))
}

fn load_record(conn: &Connection, booking: Booking) -> anyhow::Result<BookingRecord> {
    let booking_id = booking.id.context("booking row is missing its id")?;
    let attendees = get_attendees(conn, booking_id)?;
    let user = match booking.user_id {
        Some(user_id) => get_host_user(conn, user_id)?,
        None => None,
    };
    Ok(BookingRecord {
        booking,
        attendees,
        user,
    })
}

fn get_attendees(conn: &Connection, booking_id: i64) -> anyhow::Result<Vec<Attendee>> {
    let mut stmt = conn.prepare(
        "SELECT id, booking_id, name, email, time_zone, locale, no_show
         FROM attendees WHERE booking_id = ?1 ORDER BY id ASC",
    )?;

    let rows = stmt.query_map(params![booking_id], |row| {
        Ok(Attendee {
            id: Some(row.get(0)?),
            booking_id: row.get(1)?,
            name: row.get(2)?,
            email: row.get(3)?,
            time_zone: row.get(4)?,
            locale: row.get(5)?,
            no_show: row.get::<_, i32>(6)? != 0,
        })
    })?;

    let mut attendees = vec![];
    for row in rows {
        attendees.push(row?);
    }
    Ok(attendees)
}

fn get_host_user(conn: &Connection, user_id: i64) -> anyhow::Result<Option<HostUser>> {
    let result = conn.query_row(
        "SELECT id, name, email FROM users WHERE id = ?1",
        params![user_id],
        |row| {
            Ok(HostUser {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
            })
        },
    );

    match result {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
