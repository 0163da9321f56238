//! Attendance statistics, recomputed from the full record list on every call.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::user::User;
use crate::utils::time::local_date;

/// Number of calendar days in the daily breakdown, today included.
pub const DAILY_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyAttendance {
    /// Short label such as "Jan 15"
    #[schema(example = "Jan 15")]
    pub date: String,
    #[schema(example = "2024-01-15", format = "date", value_type = String)]
    pub day: NaiveDate,
    pub present: usize,
    pub late: usize,
    pub total: usize,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: String,
    pub user_name: String,
    pub total_days: usize,
    pub present_count: usize,
    pub late_count: usize,
    /// Percentage of days on time, 0 when the user has no records
    #[schema(example = 80)]
    pub attendance_rate: u32,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_records: usize,
    pub total_users: usize,
    pub total_present: usize,
    pub total_late: usize,
    pub overall_attendance_rate: u32,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub daily_attendance: Vec<DailyAttendance>,
    pub user_summary: Vec<UserSummary>,
    pub statistics: Statistics,
}

/// `part / total` as a whole percentage, rounding halves up.
pub fn rate(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u32
}

fn count(records: &[&AttendanceRecord], status: AttendanceStatus) -> usize {
    records.iter().filter(|r| r.status == status).count()
}

pub fn summarize(records: &[AttendanceRecord], users: &[User], today: NaiveDate) -> AnalyticsReport {
    let all: Vec<&AttendanceRecord> = records.iter().collect();

    let daily_attendance = (0..DAILY_WINDOW_DAYS)
        .rev()
        .map(|offset| today - Duration::days(offset))
        .map(|day| {
            let bucket: Vec<&AttendanceRecord> = records
                .iter()
                .filter(|r| local_date(r.check_in) == day)
                .collect();
            DailyAttendance {
                date: day.format("%b %-d").to_string(),
                day,
                present: count(&bucket, AttendanceStatus::Present),
                late: count(&bucket, AttendanceStatus::Late),
                total: bucket.len(),
            }
        })
        .collect();

    let user_summary = users
        .iter()
        .map(|user| {
            let own: Vec<&AttendanceRecord> =
                records.iter().filter(|r| r.user_id == user.id).collect();
            let present_count = count(&own, AttendanceStatus::Present);
            UserSummary {
                user_id: user.id.clone(),
                user_name: user.name.clone(),
                total_days: own.len(),
                present_count,
                late_count: count(&own, AttendanceStatus::Late),
                attendance_rate: rate(present_count, own.len()),
            }
        })
        .collect();

    let total_present = count(&all, AttendanceStatus::Present);
    let statistics = Statistics {
        total_records: records.len(),
        total_users: users.len(),
        total_present,
        total_late: count(&all, AttendanceStatus::Late),
        overall_attendance_rate: rate(total_present, records.len()),
    };

    AnalyticsReport {
        daily_attendance,
        user_summary,
        statistics,
    }
}
