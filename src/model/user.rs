use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub device_id: i64,
    pub name: String,
    pub employee_id: Option<String>,
    pub department: Option<String>,
    /// Reset on every upsert, so effectively "last updated".
    pub created_at: String,
}
