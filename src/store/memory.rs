use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use tracing::debug;

use super::{DateRange, RecordStore, new_record_id, seed};
use crate::error::StoreError;
use crate::model::attendance::{AttendancePatch, AttendanceRecord, NewAttendanceRecord};
use crate::model::role::Role;
use crate::model::user::User;
use crate::utils::time::day_bounds;

/// Flat in-process lists. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    records: RwLock<Vec<AttendanceRecord>>,
}

impl MemoryStore {
    pub fn new(users: Vec<User>, records: Vec<AttendanceRecord>) -> Self {
        Self {
            users: RwLock::new(users),
            records: RwLock::new(records),
        }
    }

    /// Demo accounts plus two historical records.
    pub fn seeded() -> Self {
        Self::new(seed::users(), seed::records())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().iter().find(|u| u.id == id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self
            .users
            .read()
            .iter()
            .filter(|u| u.role == Role::User)
            .cloned()
            .collect())
    }

    async fn create(&self, record: NewAttendanceRecord) -> Result<AttendanceRecord, StoreError> {
        let record = record.with_id(new_record_id());
        self.records.write().push(record.clone());
        debug!(record_id = %record.id, user_id = %record.user_id, "Record appended");
        Ok(record)
    }

    async fn update(
        &self,
        id: &str,
        patch: AttendancePatch,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        let mut records = self.records.write();
        Ok(records.iter_mut().find(|r| r.id == id).map(|record| {
            record.apply(patch);
            record.clone()
        }))
    }

    async fn get_all(&self) -> Result<Vec<AttendanceRecord>, StoreError> {
        Ok(self.records.read().clone())
    }

    async fn get_by_date_range(
        &self,
        range: DateRange,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|r| range.contains(r.check_in))
            .cloned()
            .collect())
    }

    async fn get_today_by_user_id(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        let (start, end) = day_bounds(today);
        Ok(self
            .records
            .read()
            .iter()
            .find(|r| r.user_id == user_id && r.check_in >= start && r.check_in < end)
            .cloned())
    }
}
