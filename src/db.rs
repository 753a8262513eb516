use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub async fn init_db(database_path: &str) -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(database_path)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .expect("Failed to open database");

    init_schema(&pool)
        .await
        .expect("Failed to initialize database schema");

    pool
}

/// Safe to run on every startup.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            device_id INTEGER NOT NULL,
            event_timestamp TEXT NOT NULL,
            login_method TEXT NOT NULL,
            device_ip TEXT,
            received_at TEXT NOT NULL,
            UNIQUE(device_id, event_timestamp)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            device_id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            employee_id TEXT,
            department TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_event_timestamp ON attendance(event_timestamp)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_device_id ON attendance(device_id)")
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    // single connection keeps the in-memory database alive for the test
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    init_schema(&pool)
        .await
        .expect("Failed to initialize schema");

    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn schema_init_is_idempotent() {
        let pool = test_pool().await;

        init_schema(&pool).await.expect("second init failed");
        init_schema(&pool).await.expect("third init failed");

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendance")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(total, 0);
    }
}
