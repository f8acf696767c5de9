use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingOutput, RecurringBookingOutput, RescheduledBookingOutput};
use crate::services::output;
use crate::state::AppState;

// GET /api/bookings/:uid
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<Json<BookingOutput>, AppError> {
    let db = state.db.lock().unwrap();

    let record = queries::get_by_uid_with_attendees(&db, &uid)?
        .ok_or_else(|| AppError::NotFound(format!("booking with uid={uid}")))?;

    Ok(Json(output::to_standard_output(&record)?))
}

// GET /api/bookings/:uid/rescheduled
//
// The new booking carries a back-reference to the uid it was rescheduled
// from, which is how the forward link is resolved.
pub async fn get_rescheduled_booking(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<Json<RescheduledBookingOutput>, AppError> {
    let db = state.db.lock().unwrap();

    let old = queries::get_by_uid_with_attendees(&db, &uid)?
        .ok_or_else(|| AppError::NotFound(format!("booking with uid={uid}")))?;
    let new = queries::get_by_from_reschedule(&db, &uid)?
        .ok_or_else(|| AppError::NotFound(format!("no booking rescheduled from uid={uid}")))?;

    Ok(Json(output::to_rescheduled_output(&old, &new)?))
}

// GET /api/bookings/recurring/:uid
pub async fn get_recurring_bookings(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<Json<Vec<RecurringBookingOutput>>, AppError> {
    let db = state.db.lock().unwrap();

    let records = queries::get_recurring_by_uid_with_attendees(&db, &uid)?;
    let bookings: Vec<Booking> = records.into_iter().map(|r| r.booking).collect();

    Ok(Json(output::to_recurring_output_batch(&db, &bookings)?))
}
