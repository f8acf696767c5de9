use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw booking row as persisted. `id` is `None` until the row has been
/// inserted, which is what the batch transform guards against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Option<i64>,
    pub uid: String,
    pub event_type_id: i64,
    pub user_id: Option<i64>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub cancellation_reason: Option<String>,
    pub rescheduled: bool,
    pub from_reschedule: Option<String>,
    pub recurring_event_id: Option<String>,
    pub location: Option<String>,
    pub no_show_host: bool,
    pub responses: serde_json::Value,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Cancelled,
    Accepted,
    Rejected,
    Pending,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Accepted => "accepted",
            BookingStatus::Rejected => "rejected",
            BookingStatus::Pending => "pending",
        }
    }

    /// Case-insensitive so legacy rows stored as e.g. "ACCEPTED" still parse.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "cancelled" => BookingStatus::Cancelled,
            "accepted" => BookingStatus::Accepted,
            "rejected" => BookingStatus::Rejected,
            _ => BookingStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendee {
    pub id: Option<i64>,
    pub booking_id: i64,
    pub name: String,
    pub email: String,
    pub time_zone: String,
    pub locale: Option<String>,
    pub no_show: bool,
}

/// The owning user of a booking. Bookings may have no owner at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostUser {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
}

/// A booking with its relations eagerly loaded, the shape every output
/// transformation consumes.
#[derive(Debug, Clone)]
pub struct BookingRecord {
    pub booking: Booking,
    pub attendees: Vec<Attendee>,
    pub user: Option<HostUser>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_lowercase() {
        assert_eq!(BookingStatus::parse("cancelled"), BookingStatus::Cancelled);
        assert_eq!(BookingStatus::parse("accepted"), BookingStatus::Accepted);
        assert_eq!(BookingStatus::parse("rejected"), BookingStatus::Rejected);
        assert_eq!(BookingStatus::parse("pending"), BookingStatus::Pending);
    }

    #[test]
    fn test_status_parse_uppercase_legacy() {
        assert_eq!(BookingStatus::parse("ACCEPTED"), BookingStatus::Accepted);
        assert_eq!(BookingStatus::parse("Cancelled"), BookingStatus::Cancelled);
    }

    #[test]
    fn test_status_parse_unknown_defaults_to_pending() {
        assert_eq!(BookingStatus::parse("awaiting"), BookingStatus::Pending);
        assert_eq!(BookingStatus::parse(""), BookingStatus::Pending);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&BookingStatus::Accepted).unwrap();
        assert_eq!(json, "\"accepted\"");
    }
}
