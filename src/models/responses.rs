use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// The validated shape of the freeform `responses` blob stored on a booking.
/// Unknown keys in the blob are ignored; missing or mistyped required keys
/// fail the whole transformation for that booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponses {
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests: Option<Vec<String>>,
    #[serde(rename = "rescheduledReason", skip_serializing_if = "Option::is_none")]
    pub rescheduled_reason: Option<String>,
}

impl BookingResponses {
    pub fn parse(value: &serde_json::Value) -> Result<Self, AppError> {
        serde_json::from_value(value.clone()).map_err(|e| AppError::SchemaValidation(e.to_string()))
    }
}
