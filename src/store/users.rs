use chrono::Local;
use sqlx::SqlitePool;

use crate::model::user::User;

/// Insert-or-fully-replace keyed on device_id. created_at is reset on every
/// call, whether or not the row existed.
pub async fn upsert_user(
    pool: &SqlitePool,
    device_id: i64,
    name: &str,
    employee_id: Option<&str>,
    department: Option<&str>,
) -> Result<(), sqlx::Error> {
    let created_at = Local::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT OR REPLACE INTO users (device_id, name, employee_id, department, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(device_id)
    .bind(name)
    .bind(employee_id)
    .bind(department)
    .bind(&created_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT device_id, name, employee_id, department, created_at FROM users ORDER BY name ASC",
    )
    .fetch_all(pool)
    .await
}
