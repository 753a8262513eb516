use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use utoipa::ToSchema;

/// Enrolled sensor slots on the capture hardware.
pub const DEVICE_ID_RANGE: RangeInclusive<i64> = 1..=20;

/// One attendance row joined with the user directory. Rows without a
/// registered user keep their name fields null.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: i64,
    pub device_id: i64,
    /// Caller-supplied ISO-8601 text, stored as-is.
    pub event_timestamp: String,
    pub login_method: String,
    pub device_ip: Option<String>,
    pub received_at: String,
    pub name: Option<String>,
    pub employee_id: Option<String>,
    pub department: Option<String>,
}
