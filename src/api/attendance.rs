use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::{
    config::Config,
    error::ApiError,
    model::attendance::AttendanceRecord,
    service::attendance::{self as rules, CheckIn},
    store::{DateRange, RecordStore},
    utils::time::{Bound, parse_bound},
};

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    #[schema(example = "2")]
    pub user_id: Option<String>,
    #[schema(example = "John Doe")]
    pub user_name: Option<String>,
    #[schema(example = "Office")]
    pub location: Option<String>,
    #[schema(example = "Dentist at 4pm")]
    pub notes: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutRequest {
    #[schema(example = "2")]
    pub user_id: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct RecordResponse {
    #[schema(example = true)]
    pub success: bool,
    pub record: AttendanceRecord,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct StatusQuery {
    /// User whose record for today is wanted
    pub user_id: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct StatusResponse {
    /// Today's record, `null` when the user has not checked in
    pub record: Option<AttendanceRecord>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct RecordFilter {
    /// Earliest check-in, RFC 3339 or YYYY-MM-DD (start of that day)
    pub start_date: Option<String>,
    /// Latest check-in, RFC 3339 or YYYY-MM-DD (end of that day)
    pub end_date: Option<String>,
}

impl RecordFilter {
    fn range(&self) -> Result<DateRange, ApiError> {
        let start = self
            .start_date
            .as_deref()
            .map(|v| {
                parse_bound(v, Bound::Start)
                    .ok_or_else(|| ApiError::bad_request(format!("Invalid startDate: {v}")))
            })
            .transpose()?;
        let end = self
            .end_date
            .as_deref()
            .map(|v| {
                parse_bound(v, Bound::End)
                    .ok_or_else(|| ApiError::bad_request(format!("Invalid endDate: {v}")))
            })
            .transpose()?;
        Ok(DateRange { start, end })
    }
}

#[derive(Serialize, ToSchema)]
pub struct RecordListResponse {
    pub records: Vec<AttendanceRecord>,
}

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/api/attendance/check-in",
    request_body = CheckInRequest,
    responses(
        (status = 200, description = "Checked in successfully", body = RecordResponse),
        (status = 400, description = "Missing field or already checked in today", body = crate::error::ErrorBody, example = json!({
            "error": "Already checked in today"
        })),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Attendance"
)]
pub async fn check_in(
    store: web::Data<dyn RecordStore>,
    config: web::Data<Config>,
    payload: web::Json<CheckInRequest>,
) -> actix_web::Result<impl Responder, ApiError> {
    let payload = payload.into_inner();
    let request = CheckIn {
        user_id: payload.user_id.unwrap_or_default(),
        user_name: payload.user_name.unwrap_or_default(),
        location: payload.location,
        notes: payload.notes,
    };

    let record = rules::check_in(store.get_ref(), request, Utc::now(), config.work_start).await?;

    Ok(HttpResponse::Ok().json(RecordResponse {
        success: true,
        record,
    }))
}

/// Check-out endpoint
#[utoipa::path(
    post,
    path = "/api/attendance/check-out",
    request_body = CheckOutRequest,
    responses(
        (status = 200, description = "Checked out successfully", body = RecordResponse),
        (status = 400, description = "Missing user id, no check-in today, or already checked out", body = crate::error::ErrorBody, example = json!({
            "error": "No check-in record found for today"
        })),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Attendance"
)]
pub async fn check_out(
    store: web::Data<dyn RecordStore>,
    payload: web::Json<CheckOutRequest>,
) -> actix_web::Result<impl Responder, ApiError> {
    let user_id = payload.into_inner().user_id.unwrap_or_default();
    let record = rules::check_out(store.get_ref(), &user_id, Utc::now()).await?;

    Ok(HttpResponse::Ok().json(RecordResponse {
        success: true,
        record,
    }))
}

/// Today's record for a user
#[utoipa::path(
    get,
    path = "/api/attendance/status",
    params(StatusQuery),
    responses(
        (status = 200, description = "Today's record or null", body = StatusResponse),
        (status = 400, description = "User ID is required", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Attendance"
)]
pub async fn status(
    store: web::Data<dyn RecordStore>,
    query: web::Query<StatusQuery>,
) -> actix_web::Result<impl Responder, ApiError> {
    let user_id = query.user_id.as_deref().unwrap_or_default();
    let record = rules::today_status(store.get_ref(), user_id, Utc::now()).await?;

    Ok(HttpResponse::Ok().json(StatusResponse { record }))
}

/// All attendance records, newest first
#[utoipa::path(
    get,
    path = "/api/attendance/all",
    params(RecordFilter),
    responses(
        (status = 200, description = "Attendance records", body = RecordListResponse),
        (status = 400, description = "Unparseable date bound", body = crate::error::ErrorBody, example = json!({
            "error": "Invalid startDate: last week"
        })),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Attendance"
)]
pub async fn list_all(
    store: web::Data<dyn RecordStore>,
    query: web::Query<RecordFilter>,
) -> actix_web::Result<impl Responder, ApiError> {
    let range = query.range()?;
    debug!(?range, "Listing attendance records");

    let records = rules::list_records(store.get_ref(), range).await?;

    Ok(HttpResponse::Ok().json(RecordListResponse { records }))
}
