use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use tracing::debug;

use crate::{
    error::ApiError,
    service::analytics,
    store::RecordStore,
    utils::time::local_date,
};

/// Daily, per-user and overall attendance statistics
#[utoipa::path(
    get,
    path = "/api/analytics",
    responses(
        (status = 200, description = "Aggregated attendance statistics", body = crate::service::analytics::AnalyticsReport),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Analytics"
)]
pub async fn analytics(
    store: web::Data<dyn RecordStore>,
) -> actix_web::Result<impl Responder, ApiError> {
    let records = store.get_all().await?;
    let users = store.list_users().await?;
    debug!(records = records.len(), users = users.len(), "Computing analytics");

    let report = analytics::summarize(&records, &users, local_date(Utc::now()));

    Ok(HttpResponse::Ok().json(report))
}
