use crate::api::attendance::{AttendanceListResponse, RecordAttendance, RecordAttendanceResponse};
use crate::api::stats::StatsResponse;
use crate::api::users::{UpsertUser, UserListResponse};
use crate::model::attendance::AttendanceRecord;
use crate::model::user::User;
use crate::store::stats::Stats;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance System API",
        version = "1.0.0",
        description = r#"
## Attendance System Server

Receives attendance events from embedded capture devices and stores them in a
local SQLite database.

### 🔹 Key Features
- **Attendance Ingestion**
  - Idempotent: re-submitting a (deviceId, eventTimestamp) pair is reported
    as a duplicate, never stored twice
- **Attendance Queries**
  - Newest-first listing with device and calendar-date filters
- **User Directory**
  - Map sensor slots (1-20) to names, employee ids and departments
- **Statistics**
  - Totals, today's count and the most recent activity for the dashboard

### 📦 Response Format
- JSON-based RESTful responses, camelCase keys

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::record_attendance,
        crate::api::attendance::list_attendance,

        crate::api::users::add_user,
        crate::api::users::list_users,

        crate::api::stats::get_stats,
        crate::api::health::health_check
    ),
    components(
        schemas(
            RecordAttendance,
            RecordAttendanceResponse,
            AttendanceListResponse,
            AttendanceRecord,
            UpsertUser,
            UserListResponse,
            User,
            StatsResponse,
            Stats
        )
    ),
    tags(
        (name = "Attendance", description = "Attendance ingestion and query APIs"),
        (name = "Users", description = "Sensor-slot user directory APIs"),
        (name = "Stats", description = "Aggregate statistics APIs"),
        (name = "System", description = "Health check APIs"),
    )
)]
pub struct ApiDoc;
