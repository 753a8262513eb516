use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::model::attendance::AttendanceRecord;
use crate::store::attendance::query_attendance;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_records: i64,
    pub today_records: i64,
    pub total_users: i64,
    pub recent_attendance: Vec<AttendanceRecord>,
}

/// Four independent aggregate reads; "today" compares the event's calendar
/// date against DATE('now').
pub async fn compute_stats(pool: &SqlitePool) -> Result<Stats, sqlx::Error> {
    let total_records: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendance")
        .fetch_one(pool)
        .await?;

    let today_records: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM attendance WHERE DATE(event_timestamp) = DATE('now')",
    )
    .fetch_one(pool)
    .await?;

    let total_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let recent_attendance = query_attendance(pool, 5, None, None).await?;

    Ok(Stats {
        total_records,
        today_records,
        total_users,
        recent_attendance,
    })
}
