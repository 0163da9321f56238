//! Attendance rules: one check-in per user per local day, one check-out per
//! check-in, status fixed at check-in time.
//!
//! Every function takes `now` explicitly so callers decide what "today" is.

use chrono::{DateTime, Local, NaiveTime, Utc};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::model::attendance::{
    AttendancePatch, AttendanceRecord, AttendanceStatus, NewAttendanceRecord,
};
use crate::store::{DateRange, RecordStore};
use crate::utils::time::local_date;

pub struct CheckIn {
    pub user_id: String,
    pub user_name: String,
    pub location: Option<String>,
    pub notes: Option<String>,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub async fn check_in(
    store: &dyn RecordStore,
    request: CheckIn,
    now: DateTime<Utc>,
    cutoff: NaiveTime,
) -> Result<AttendanceRecord, ApiError> {
    if is_blank(&request.user_id) || is_blank(&request.user_name) {
        return Err(ApiError::bad_request("User ID and name are required"));
    }

    let today = local_date(now);
    if store
        .get_today_by_user_id(&request.user_id, today)
        .await?
        .is_some()
    {
        warn!(user_id = %request.user_id, %today, "Duplicate check-in rejected");
        return Err(ApiError::bad_request("Already checked in today"));
    }

    let status = AttendanceStatus::at_check_in(now.with_timezone(&Local).time(), cutoff);

    let record = store
        .create(NewAttendanceRecord {
            user_id: request.user_id,
            user_name: request.user_name,
            check_in: now,
            check_out: None,
            status,
            location: request.location,
            notes: request.notes,
        })
        .await?;

    info!(record_id = %record.id, user_id = %record.user_id, status = %record.status, "Checked in");
    Ok(record)
}

pub async fn check_out(
    store: &dyn RecordStore,
    user_id: &str,
    now: DateTime<Utc>,
) -> Result<AttendanceRecord, ApiError> {
    if is_blank(user_id) {
        return Err(ApiError::bad_request("User ID is required"));
    }

    let today = local_date(now);
    let Some(record) = store.get_today_by_user_id(user_id, today).await? else {
        warn!(user_id, %today, "Check-out without check-in rejected");
        return Err(ApiError::bad_request("No check-in record found for today"));
    };

    if record.is_checked_out() {
        warn!(user_id, record_id = %record.id, "Second check-out rejected");
        return Err(ApiError::bad_request("Already checked out today"));
    }

    let patch = AttendancePatch {
        check_out: Some(now),
        ..Default::default()
    };

    // The record was just read, so a miss here means the store lost it.
    let updated = store.update(&record.id, patch).await?.ok_or_else(|| {
        tracing::error!(record_id = %record.id, "Record vanished during check-out");
        ApiError::Internal
    })?;

    info!(record_id = %updated.id, user_id, "Checked out");
    Ok(updated)
}

pub async fn today_status(
    store: &dyn RecordStore,
    user_id: &str,
    now: DateTime<Utc>,
) -> Result<Option<AttendanceRecord>, ApiError> {
    if is_blank(user_id) {
        return Err(ApiError::bad_request("User ID is required"));
    }
    Ok(store.get_today_by_user_id(user_id, local_date(now)).await?)
}

/// All records, or only those checked in within `range` (inclusive), newest first.
pub async fn list_records(
    store: &dyn RecordStore,
    range: DateRange,
) -> Result<Vec<AttendanceRecord>, ApiError> {
    let mut records = if range.is_unbounded() {
        store.get_all().await?
    } else {
        store.get_by_date_range(range).await?
    };
    records.sort_by(|a, b| b.check_in.cmp(&a.check_in));
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_work_start;
    use crate::store::MemoryStore;
    use crate::utils::time::local_to_utc;
    use chrono::{Duration, NaiveDate};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        let naive = NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap();
        local_to_utc(naive)
    }

    fn request(user_id: &str) -> CheckIn {
        CheckIn {
            user_id: user_id.to_string(),
            user_name: "John Doe".to_string(),
            location: Some("Office".to_string()),
            notes: None,
        }
    }

    #[actix_web::test]
    async fn early_check_in_is_present() {
        let store = MemoryStore::default();
        let record = check_in(&store, request("2"), at(8, 45), default_work_start())
            .await
            .unwrap();

        assert_eq!(record.status, AttendanceStatus::Present);
        assert_eq!(record.check_in, at(8, 45));
        assert_eq!(record.location.as_deref(), Some("Office"));
        assert!(record.check_out.is_none());
    }

    #[actix_web::test]
    async fn check_in_at_cutoff_is_late() {
        let store = MemoryStore::default();
        let record = check_in(&store, request("2"), at(9, 0), default_work_start())
            .await
            .unwrap();
        assert_eq!(record.status, AttendanceStatus::Late);
    }

    #[actix_web::test]
    async fn second_check_in_same_day_fails() {
        let store = MemoryStore::default();
        check_in(&store, request("2"), at(8, 0), default_work_start())
            .await
            .unwrap();

        let err = check_in(&store, request("2"), at(12, 0), default_work_start())
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::bad_request("Already checked in today"));

        // another user is unaffected
        check_in(&store, request("3"), at(12, 0), default_work_start())
            .await
            .unwrap();
        assert_eq!(store.get_all().await.unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn check_in_next_day_is_allowed() {
        let store = MemoryStore::default();
        check_in(&store, request("2"), at(8, 0), default_work_start())
            .await
            .unwrap();
        check_in(&store, request("2"), at(8, 0) + Duration::days(1), default_work_start())
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn check_in_requires_id_and_name() {
        let store = MemoryStore::default();
        let mut missing_name = request("2");
        missing_name.user_name = "  ".to_string();

        let err = check_in(&store, missing_name, at(8, 0), default_work_start())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn check_out_without_check_in_fails() {
        let store = MemoryStore::default();
        let err = check_out(&store, "2", at(17, 0)).await.unwrap_err();
        assert_eq!(err, ApiError::bad_request("No check-in record found for today"));
    }

    #[actix_web::test]
    async fn check_out_sets_time_once() {
        let store = MemoryStore::default();
        check_in(&store, request("2"), at(8, 30), default_work_start())
            .await
            .unwrap();

        let record = check_out(&store, "2", at(17, 30)).await.unwrap();
        assert_eq!(record.check_out, Some(at(17, 30)));

        let err = check_out(&store, "2", at(18, 0)).await.unwrap_err();
        assert_eq!(err, ApiError::bad_request("Already checked out today"));
        assert_eq!(
            store.get_all().await.unwrap()[0].check_out,
            Some(at(17, 30))
        );
    }

    #[actix_web::test]
    async fn status_reports_todays_record() {
        let store = MemoryStore::default();
        assert!(today_status(&store, "2", at(7, 0)).await.unwrap().is_none());

        let created = check_in(&store, request("2"), at(9, 30), default_work_start())
            .await
            .unwrap();
        let found = today_status(&store, "2", at(10, 0)).await.unwrap();
        assert_eq!(found, Some(created));

        assert!(
            today_status(&store, "2", at(10, 0) + Duration::days(1))
                .await
                .unwrap()
                .is_none()
        );
        assert!(today_status(&store, "", at(10, 0)).await.is_err());
    }

    #[actix_web::test]
    async fn listing_is_newest_first() {
        let store = MemoryStore::seeded();
        check_in(&store, request("2"), at(8, 0), default_work_start())
            .await
            .unwrap();

        let records = list_records(&store, DateRange::default()).await.unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.windows(2).all(|w| w[0].check_in >= w[1].check_in));
        assert_eq!(records[0].check_in, at(8, 0));

        let ranged = list_records(&store, DateRange::between(at(0, 0), at(23, 59)))
            .await
            .unwrap();
        assert_eq!(ranged.len(), 1);
    }
}
