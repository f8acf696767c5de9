use rusqlite::Connection;
use validator::Validate;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{
    Attendee, AttendeeOutput, Booking, BookingLanguage, BookingOutput, BookingRecord,
    BookingResponses, HostOutput, OutputStatus, RecurringBookingOutput, RescheduledBookingOutput,
};

/// Maps a fetched booking to its public single-booking representation.
pub fn to_standard_output(record: &BookingRecord) -> Result<BookingOutput, AppError> {
    let booking = &record.booking;
    let responses = BookingResponses::parse(&booking.responses)?;
    require_primary_attendee(&record.attendees, &responses)?;

    let output = BookingOutput {
        id: require_id(booking)?,
        uid: booking.uid.clone(),
        hosts: map_hosts(record),
        status: output_status(booking),
        cancellation_reason: non_empty(&booking.cancellation_reason),
        rescheduling_reason: responses.rescheduled_reason,
        rescheduled_from_uid: non_empty(&booking.from_reschedule),
        start: booking.start_time,
        end: booking.end_time,
        duration: duration_minutes(booking),
        event_type_id: booking.event_type_id,
        attendees: map_attendees(&record.attendees),
        guests: responses.guests,
        meeting_url: booking.location.clone(),
        absent_host: booking.no_show_host,
    };

    output.validate()?;
    Ok(output)
}

/// Maps the outcome of a reschedule. Timing, identity and attendees come
/// from the OLD booking; the forward link and the rescheduling reason come
/// from the NEW one (the old booking never carried a reschedule reason).
pub fn to_rescheduled_output(
    old: &BookingRecord,
    new: &BookingRecord,
) -> Result<RescheduledBookingOutput, AppError> {
    let booking = &old.booking;
    let responses = BookingResponses::parse(&booking.responses)?;
    let new_responses = BookingResponses::parse(&new.booking.responses)?;
    require_primary_attendee(&old.attendees, &responses)?;

    let output = RescheduledBookingOutput {
        id: require_id(booking)?,
        uid: booking.uid.clone(),
        hosts: map_hosts(old),
        status: output_status(booking),
        cancellation_reason: non_empty(&booking.cancellation_reason),
        rescheduling_reason: new_responses.rescheduled_reason,
        rescheduled_from_uid: non_empty(&booking.from_reschedule),
        rescheduled_to_uid: new.booking.uid.clone(),
        recurring_booking_uid: non_empty(&new.booking.recurring_event_id),
        start: booking.start_time,
        end: booking.end_time,
        duration: duration_minutes(booking),
        event_type_id: booking.event_type_id,
        attendees: map_attendees(&old.attendees),
        guests: responses.guests,
        meeting_url: booking.location.clone(),
        absent_host: booking.no_show_host,
    };

    output.validate()?;
    Ok(output)
}

/// Maps one instance of a recurring group. The status is never remapped to
/// "rescheduled" here and the recurrence uid is mandatory.
pub fn to_recurring_output(record: &BookingRecord) -> Result<RecurringBookingOutput, AppError> {
    let booking = &record.booking;
    let responses = BookingResponses::parse(&booking.responses)?;
    require_primary_attendee(&record.attendees, &responses)?;

    let recurring_booking_uid = non_empty(&booking.recurring_event_id).ok_or_else(|| {
        AppError::SchemaValidation("recurring booking is missing its recurrence uid".to_string())
    })?;

    let output = RecurringBookingOutput {
        id: require_id(booking)?,
        uid: booking.uid.clone(),
        hosts: map_hosts(record),
        status: booking.status,
        cancellation_reason: non_empty(&booking.cancellation_reason),
        start: booking.start_time,
        end: booking.end_time,
        duration: duration_minutes(booking),
        event_type_id: booking.event_type_id,
        recurring_booking_uid,
        attendees: map_attendees(&record.attendees),
        guests: responses.guests,
        meeting_url: booking.location.clone(),
        absent_host: booking.no_show_host,
    };

    output.validate()?;
    Ok(output)
}

/// Batch variant for a recurrence group. The input may be partial or stale
/// (e.g. straight out of a bulk create), so every booking is re-fetched with
/// its relations before transformation. The first failure aborts the whole
/// batch; results are sorted ascending by start time.
pub fn to_recurring_output_batch(
    conn: &Connection,
    bookings: &[Booking],
) -> Result<Vec<RecurringBookingOutput>, AppError> {
    // every element must be persisted before the first lookup happens
    let ids = bookings
        .iter()
        .map(|b| b.id.ok_or(AppError::BookingNotPersisted))
        .collect::<Result<Vec<i64>, AppError>>()?;

    let mut outputs = Vec::with_capacity(ids.len());
    for id in ids {
        let record = queries::get_by_id_with_attendees_and_user(conn, id)?
            .ok_or(AppError::BookingNotFound(id))?;
        outputs.push(to_recurring_output(&record)?);
    }

    // stable sort keeps input order for equal start times
    outputs.sort_by(|a, b| a.start.cmp(&b.start));
    Ok(outputs)
}

fn require_id(booking: &Booking) -> Result<i64, AppError> {
    booking.id.ok_or(AppError::BookingNotPersisted)
}

fn require_primary_attendee<'a>(
    attendees: &'a [Attendee],
    responses: &BookingResponses,
) -> Result<&'a Attendee, AppError> {
    attendees
        .iter()
        .find(|a| a.email == responses.email)
        .ok_or(AppError::AttendeeNotFound)
}

fn duration_minutes(booking: &Booking) -> i64 {
    let seconds = booking
        .end_time
        .signed_duration_since(booking.start_time)
        .num_seconds();
    (seconds as f64 / 60.0).round() as i64
}

fn output_status(booking: &Booking) -> OutputStatus {
    if booking.rescheduled && non_empty(&booking.cancellation_reason).is_none() {
        OutputStatus::Rescheduled
    } else {
        booking.status.into()
    }
}

fn map_hosts(record: &BookingRecord) -> Vec<Option<HostOutput>> {
    vec![record.user.as_ref().map(|u| HostOutput {
        id: u.id,
        name: u.name.clone(),
        email: u.email.clone(),
    })]
}

fn map_attendees(attendees: &[Attendee]) -> Vec<AttendeeOutput> {
    attendees
        .iter()
        .map(|a| AttendeeOutput {
            name: a.name.clone(),
            email: a.email.clone(),
            time_zone: a.time_zone.clone(),
            language: a.locale.as_deref().and_then(BookingLanguage::from_locale),
            absent: a.no_show,
        })
        .collect()
}

/// Empty strings stored in nullable text columns count as absent.
fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
