use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, MySqlPool};
use std::str::FromStr;
use tracing::debug;

use super::{DateRange, RecordStore, new_record_id};
use crate::error::StoreError;
use crate::model::attendance::{
    AttendancePatch, AttendanceRecord, AttendanceStatus, NewAttendanceRecord,
};
use crate::model::role::Role;
use crate::model::user::User;
use crate::utils::time::day_bounds;

const RECORD_COLUMNS: &str =
    "id, user_id, user_name, check_in, check_out, status, location, notes";

/// Tables are created by `sql/schema.sql`.
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: String,
    email: String,
    password: String,
    name: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = Role::from_str(&row.role)
            .map_err(|_| StoreError::CorruptRow(format!("user {} has role {:?}", row.id, row.role)))?;
        Ok(User {
            id: row.id,
            email: row.email,
            password: row.password,
            name: row.name,
            role,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
struct RecordRow {
    id: String,
    user_id: String,
    user_name: String,
    check_in: DateTime<Utc>,
    check_out: Option<DateTime<Utc>>,
    status: String,
    location: Option<String>,
    notes: Option<String>,
}

impl TryFrom<RecordRow> for AttendanceRecord {
    type Error = StoreError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let status = AttendanceStatus::from_str(&row.status).map_err(|_| {
            StoreError::CorruptRow(format!("record {} has status {:?}", row.id, row.status))
        })?;
        Ok(AttendanceRecord {
            id: row.id,
            user_id: row.user_id,
            user_name: row.user_name,
            check_in: row.check_in,
            check_out: row.check_out,
            status,
            location: row.location,
            notes: row.notes,
        })
    }
}

/// `WHERE` clause for the bounds present in `range`, placeholders in
/// start-then-end order.
fn range_clause(range: &DateRange) -> String {
    let mut conditions = Vec::with_capacity(2);
    if range.start.is_some() {
        conditions.push("check_in >= ?");
    }
    if range.end.is_some() {
        conditions.push("check_in <= ?");
    }
    if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    }
}

fn into_records(rows: Vec<RecordRow>) -> Result<Vec<AttendanceRecord>, StoreError> {
    rows.into_iter().map(AttendanceRecord::try_from).collect()
}

impl MySqlStore {
    async fn find_record(&self, id: &str) -> Result<Option<AttendanceRecord>, StoreError> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM attendance_records WHERE id = ?");
        sqlx::query_as::<_, RecordRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(AttendanceRecord::try_from)
            .transpose()
    }
}

#[async_trait]
impl RecordStore for MySqlStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password, name, role, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password, name, role, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password, name, role, created_at
            FROM users
            WHERE role = ?
            ORDER BY id
            "#,
        )
        .bind(Role::User.as_ref())
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(User::try_from)
        .collect()
    }

    async fn create(&self, record: NewAttendanceRecord) -> Result<AttendanceRecord, StoreError> {
        let record = record.with_id(new_record_id());

        sqlx::query(
            r#"
            INSERT INTO attendance_records
                (id, user_id, user_name, check_in, check_out, status, location, notes)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.user_id)
        .bind(&record.user_name)
        .bind(record.check_in)
        .bind(record.check_out)
        .bind(record.status.as_ref())
        .bind(&record.location)
        .bind(&record.notes)
        .execute(&self.pool)
        .await?;

        debug!(record_id = %record.id, user_id = %record.user_id, "Record inserted");
        Ok(record)
    }

    async fn update(
        &self,
        id: &str,
        patch: AttendancePatch,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        let Some(mut record) = self.find_record(id).await? else {
            return Ok(None);
        };
        record.apply(patch);

        sqlx::query(
            r#"
            UPDATE attendance_records
            SET check_out = ?, status = ?, location = ?, notes = ?
            WHERE id = ?
            "#,
        )
        .bind(record.check_out)
        .bind(record.status.as_ref())
        .bind(&record.location)
        .bind(&record.notes)
        .bind(&record.id)
        .execute(&self.pool)
        .await?;

        Ok(Some(record))
    }

    async fn get_all(&self) -> Result<Vec<AttendanceRecord>, StoreError> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM attendance_records ORDER BY check_in");
        let rows = sqlx::query_as::<_, RecordRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        into_records(rows)
    }

    async fn get_by_date_range(
        &self,
        range: DateRange,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM attendance_records {} ORDER BY check_in",
            range_clause(&range)
        );
        let mut query = sqlx::query_as::<_, RecordRow>(&sql);
        if let Some(start) = range.start {
            query = query.bind(start);
        }
        if let Some(end) = range.end {
            query = query.bind(end);
        }
        let rows = query.fetch_all(&self.pool).await?;
        into_records(rows)
    }

    async fn get_today_by_user_id(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        let (start, end) = day_bounds(today);
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM attendance_records \
             WHERE user_id = ? AND check_in >= ? AND check_in < ? \
             ORDER BY check_in LIMIT 1"
        );
        sqlx::query_as::<_, RecordRow>(&sql)
            .bind(user_id)
            .bind(start)
            .bind(end)
            .fetch_optional(&self.pool)
            .await?
            .map(AttendanceRecord::try_from)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn unknown_status_is_corrupt() {
        let row = RecordRow {
            id: "9".to_string(),
            user_id: "2".to_string(),
            user_name: "John Doe".to_string(),
            check_in: Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
            check_out: None,
            status: "sick".to_string(),
            location: None,
            notes: None,
        };
        assert!(matches!(
            AttendanceRecord::try_from(row),
            Err(StoreError::CorruptRow(_))
        ));
    }

    #[test]
    fn range_clause_binds_only_present_bounds() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();

        assert_eq!(range_clause(&DateRange::default()), "");
        assert_eq!(
            range_clause(&DateRange {
                start: Some(at),
                end: None
            }),
            "WHERE check_in >= ?"
        );
        assert_eq!(
            range_clause(&DateRange {
                start: None,
                end: Some(at)
            }),
            "WHERE check_in <= ?"
        );
        assert_eq!(
            range_clause(&DateRange::between(at, at)),
            "WHERE check_in >= ? AND check_in <= ?"
        );
    }

    #[test]
    fn user_row_maps_role() {
        let row = UserRow {
            id: "1".to_string(),
            email: "admin@example.com".to_string(),
            password: "admin123".to_string(),
            name: "Admin User".to_string(),
            role: "admin".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };
        assert_eq!(User::try_from(row).unwrap().role, Role::Admin);
    }
}
