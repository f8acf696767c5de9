use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::{BookingLanguage, BookingStatus};

/// Public status vocabulary for single and rescheduled bookings. Recurring
/// outputs reuse the raw `BookingStatus` instead, which is what keeps the
/// "rescheduled" state out of that variant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputStatus {
    Cancelled,
    Accepted,
    Rejected,
    Pending,
    Rescheduled,
}

impl From<BookingStatus> for OutputStatus {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Cancelled => OutputStatus::Cancelled,
            BookingStatus::Accepted => OutputStatus::Accepted,
            BookingStatus::Rejected => OutputStatus::Rejected,
            BookingStatus::Pending => OutputStatus::Pending,
        }
    }
}

/// Host reference exposed on every output variant. The hosts list holds a
/// single element that is null when the booking has no owning user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostOutput {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeOutput {
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom = "validate_time_zone")]
    pub time_zone: String,
    pub language: Option<BookingLanguage>,
    pub absent: bool,
}

/// Output shape for a single booking. Only the fields declared here ever
/// reach a caller, whatever extra data the source row carried.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookingOutput {
    pub id: i64,
    pub uid: String,
    pub hosts: Vec<Option<HostOutput>>,
    pub status: OutputStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rescheduling_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rescheduled_from_uid: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration: i64,
    pub event_type_id: i64,
    #[validate]
    pub attendees: Vec<AttendeeOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub meeting_url: Option<String>,
    pub absent_host: bool,
}

/// Output shape describing the outcome of a reschedule: everything the
/// standard shape carries plus the forward link to the new booking.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RescheduledBookingOutput {
    pub id: i64,
    pub uid: String,
    pub hosts: Vec<Option<HostOutput>>,
    pub status: OutputStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rescheduling_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rescheduled_from_uid: Option<String>,
    pub rescheduled_to_uid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_booking_uid: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration: i64,
    pub event_type_id: i64,
    #[validate]
    pub attendees: Vec<AttendeeOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub meeting_url: Option<String>,
    pub absent_host: bool,
}

/// Output shape for one instance of a recurring group. No reschedule-chain
/// fields exist here and the recurrence uid is mandatory; status is the raw
/// enum, so "rescheduled" is unrepresentable.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecurringBookingOutput {
    pub id: i64,
    pub uid: String,
    pub hosts: Vec<Option<HostOutput>>,
    pub status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration: i64,
    pub event_type_id: i64,
    pub recurring_booking_uid: String,
    #[validate]
    pub attendees: Vec<AttendeeOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub meeting_url: Option<String>,
    pub absent_host: bool,
}

pub fn validate_time_zone(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<chrono_tz::Tz>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid time zone"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn attendee() -> AttendeeOutput {
        AttendeeOutput {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            time_zone: "Europe/Riga".to_string(),
            language: Some(BookingLanguage::En),
            absent: false,
        }
    }

    fn output() -> BookingOutput {
        BookingOutput {
            id: 1,
            uid: "uid-1".to_string(),
            hosts: vec![Some(HostOutput {
                id: 10,
                name: Some("Owner".to_string()),
                email: "owner@example.com".to_string(),
            })],
            status: OutputStatus::Accepted,
            cancellation_reason: None,
            rescheduling_reason: None,
            rescheduled_from_uid: None,
            start: Utc.with_ymd_and_hms(2025, 6, 16, 10, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 6, 16, 11, 0, 0).unwrap(),
            duration: 60,
            event_type_id: 5,
            attendees: vec![attendee()],
            guests: None,
            meeting_url: Some("https://meet.example.com/abc".to_string()),
            absent_host: false,
        }
    }

    #[test]
    fn test_valid_output_passes() {
        assert!(output().validate().is_ok());
    }

    #[test]
    fn test_invalid_attendee_email_rejected() {
        let mut out = output();
        out.attendees[0].email = "not-an-email".to_string();
        assert!(out.validate().is_err());
    }

    #[test]
    fn test_invalid_time_zone_rejected() {
        let mut out = output();
        out.attendees[0].time_zone = "Mars/Olympus".to_string();
        assert!(out.validate().is_err());
    }

    #[test]
    fn test_invalid_meeting_url_rejected() {
        let mut out = output();
        out.meeting_url = Some("in person".to_string());
        assert!(out.validate().is_err());
    }

    #[test]
    fn test_absent_meeting_url_is_fine() {
        let mut out = output();
        out.meeting_url = None;
        assert!(out.validate().is_ok());
    }

    #[test]
    fn test_absent_options_are_omitted_from_json() {
        let value = serde_json::to_value(output()).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("cancellationReason"));
        assert!(!obj.contains_key("reschedulingReason"));
        assert!(!obj.contains_key("rescheduledFromUid"));
        assert!(!obj.contains_key("guests"));
        // language is locale-or-null, so the key is always present
        let attendee = value["attendees"][0].as_object().unwrap();
        assert!(attendee.contains_key("language"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(output()).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("eventTypeId"));
        assert!(obj.contains_key("absentHost"));
        assert!(obj.contains_key("meetingUrl"));
        assert!(value["attendees"][0].as_object().unwrap().contains_key("timeZone"));
    }

    #[test]
    fn test_null_host_serializes_inside_list() {
        let mut out = output();
        out.hosts = vec![None];
        let value = serde_json::to_value(out).unwrap();
        assert_eq!(value["hosts"], serde_json::json!([null]));
    }
}
