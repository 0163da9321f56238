use crate::api::attendance::{
    CheckInRequest, CheckOutRequest, RecordListResponse, RecordResponse, StatusResponse,
};
use crate::error::ErrorBody;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::role::Role;
use crate::model::user::PublicUser;
use crate::models::{LoginReqDto, LoginResponse, UserListResponse};
use crate::service::analytics::{AnalyticsReport, DailyAttendance, Statistics, UserSummary};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Tracker API",
        version = "0.1.0",
        description = r#"
## Employee Attendance Tracker

Employees check in and out once per day; administrators browse records and
attendance statistics.

### 🔹 Key Features
- **Attendance**
  - Daily check-in and check-out, status derived from the work start time
  - Today's status per user, full record listing with an optional date range
- **Users**
  - List of regular users, lookup by id
- **Analytics**
  - Last 7 days breakdown, per-user attendance rate, overall statistics

### 🔐 Security
Login is a plain email/password check and issues no token. Keep this service
on a trusted network.

### 📦 Response Format
- JSON bodies with camelCase fields
- Errors are `{"error": "..."}` with status 400, 401, 404 or 500

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::auth::login,

        crate::api::attendance::check_in,
        crate::api::attendance::check_out,
        crate::api::attendance::status,
        crate::api::attendance::list_all,

        crate::api::users::list_users,
        crate::api::users::get_user,

        crate::api::analytics::analytics
    ),
    components(
        schemas(
            LoginReqDto,
            LoginResponse,
            PublicUser,
            Role,
            UserListResponse,
            AttendanceRecord,
            AttendanceStatus,
            CheckInRequest,
            CheckOutRequest,
            RecordResponse,
            StatusResponse,
            RecordListResponse,
            AnalyticsReport,
            DailyAttendance,
            UserSummary,
            Statistics,
            ErrorBody
        )
    ),
    tags(
        (name = "Auth", description = "Login"),
        (name = "Attendance", description = "Check-in, check-out and record listing"),
        (name = "Users", description = "User directory"),
        (name = "Analytics", description = "Attendance statistics"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/auth/login",
            "/api/attendance/check-in",
            "/api/attendance/check-out",
            "/api/attendance/status",
            "/api/attendance/all",
            "/api/users",
            "/api/users/{user_id}",
            "/api/analytics",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {expected}");
        }
    }

    #[test]
    fn error_and_report_bodies_resolve() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schemas = &doc["components"]["schemas"];
        assert!(schemas["ErrorBody"].is_object());
        assert!(schemas["AnalyticsReport"].is_object());

        let login_401 = &doc["paths"]["/api/auth/login"]["post"]["responses"]["401"];
        assert_eq!(
            login_401["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/ErrorBody"
        );
    }
}
