use chrono::Local;
use sqlx::SqlitePool;

use crate::model::attendance::AttendanceRecord;

/// Outcome of an ingestion attempt. Re-submitting an already stored
/// (device_id, event_timestamp) pair is not an error.
#[derive(Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    Recorded(i64),
    Duplicate,
}

pub async fn insert_attendance(
    pool: &SqlitePool,
    device_id: i64,
    event_timestamp: &str,
    login_method: &str,
    device_ip: Option<&str>,
) -> Result<InsertOutcome, sqlx::Error> {
    let received_at = Local::now().to_rfc3339();

    let result = sqlx::query(
        r#"
        INSERT INTO attendance (device_id, event_timestamp, login_method, device_ip, received_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(device_id)
    .bind(event_timestamp)
    .bind(login_method)
    .bind(device_ip)
    .bind(&received_at)
    .execute(pool)
    .await;

    match result {
        Ok(res) => Ok(InsertOutcome::Recorded(res.last_insert_rowid())),
        Err(sqlx::Error::Database(db_err))
            if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
        {
            Ok(InsertOutcome::Duplicate)
        }
        Err(e) => Err(e),
    }
}

/// Fetch records newest first, joined with the user directory. Rows without
/// a registered user are kept with null name fields.
pub async fn query_attendance(
    pool: &SqlitePool,
    limit: i64,
    device_id: Option<i64>,
    date: Option<&str>,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    // ---------- build WHERE clause dynamically ----------
    let mut sql = String::from(
        "SELECT a.id, a.device_id, a.event_timestamp, a.login_method, a.device_ip, a.received_at, \
         u.name, u.employee_id, u.department \
         FROM attendance a \
         LEFT JOIN users u ON a.device_id = u.device_id \
         WHERE 1=1",
    );

    if device_id.is_some() {
        sql.push_str(" AND a.device_id = ?");
    }
    if date.is_some() {
        sql.push_str(" AND DATE(a.event_timestamp) = ?");
    }
    sql.push_str(" ORDER BY a.event_timestamp DESC LIMIT ?");

    let mut query = sqlx::query_as::<_, AttendanceRecord>(&sql);
    if let Some(id) = device_id {
        query = query.bind(id);
    }
    if let Some(date) = date {
        query = query.bind(date);
    }
    query = query.bind(limit);

    query.fetch_all(pool).await
}
