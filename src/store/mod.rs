//! Persistence for users and attendance records.
//!
//! Handlers only see [`RecordStore`]; the server picks [`MemoryStore`] or
//! [`MySqlStore`] at startup depending on whether a database is configured.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::error::StoreError;
use crate::model::attendance::{AttendancePatch, AttendanceRecord, NewAttendanceRecord};
use crate::model::user::User;

pub mod memory;
pub mod mysql;
pub mod seed;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// Accounts with the `user` role; administrators are left out.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    /// Assigns a fresh id and appends the record.
    async fn create(&self, record: NewAttendanceRecord) -> Result<AttendanceRecord, StoreError>;

    /// Merges `patch` into the record; `Ok(None)` when no record has this id.
    async fn update(
        &self,
        id: &str,
        patch: AttendancePatch,
    ) -> Result<Option<AttendanceRecord>, StoreError>;

    async fn get_all(&self) -> Result<Vec<AttendanceRecord>, StoreError>;

    /// Records whose check-in lies in `range`, both ends inclusive.
    async fn get_by_date_range(
        &self,
        range: DateRange,
    ) -> Result<Vec<AttendanceRecord>, StoreError>;

    /// First record of `user_id` checked in during the local calendar day `today`.
    async fn get_today_by_user_id(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError>;
}

/// Inclusive check-in window. A missing bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| at >= start) && self.end.is_none_or(|end| at <= end)
    }
}

pub(crate) fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
