use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
}

impl AttendanceStatus {
    /// Status is fixed at check-in: on time strictly before the cutoff, late from it on.
    pub fn at_check_in(local_time: NaiveTime, cutoff: NaiveTime) -> Self {
        if local_time >= cutoff {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": "4b7d6b8e-3f0e-4a53-9a43-6f1f1e0c2a11",
    "userId": "2",
    "userName": "John Doe",
    "checkIn": "2024-01-15T09:00:00Z",
    "checkOut": "2024-01-15T17:30:00Z",
    "status": "present",
    "location": "Office",
    "notes": null
}))]
pub struct AttendanceRecord {
    pub id: String,
    pub user_id: String,
    /// Copied from the user at check-in
    pub user_name: String,
    #[schema(value_type = String, format = DateTime)]
    pub check_in: DateTime<Utc>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub check_out: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// A record as handed to the store, before it has an id.
#[derive(Debug, Clone)]
pub struct NewAttendanceRecord {
    pub user_id: String,
    pub user_name: String,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl NewAttendanceRecord {
    pub fn with_id(self, id: String) -> AttendanceRecord {
        AttendanceRecord {
            id,
            user_id: self.user_id,
            user_name: self.user_name,
            check_in: self.check_in,
            check_out: self.check_out,
            status: self.status,
            location: self.location,
            notes: self.notes,
        }
    }
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct AttendancePatch {
    pub check_out: Option<DateTime<Utc>>,
    pub status: Option<AttendanceStatus>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl AttendanceRecord {
    pub fn apply(&mut self, patch: AttendancePatch) {
        if let Some(check_out) = patch.check_out {
            self.check_out = Some(check_out);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(location) = patch.location {
            self.location = Some(location);
        }
        if let Some(notes) = patch.notes {
            self.notes = Some(notes);
        }
    }

    pub fn is_checked_out(&self) -> bool {
        self.check_out.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn status_before_cutoff_is_present() {
        let cutoff = time(9, 0, 0);
        assert_eq!(AttendanceStatus::at_check_in(time(8, 59, 59), cutoff), AttendanceStatus::Present);
        assert_eq!(AttendanceStatus::at_check_in(time(0, 0, 0), cutoff), AttendanceStatus::Present);
    }

    #[test]
    fn status_at_or_after_cutoff_is_late() {
        let cutoff = time(9, 0, 0);
        assert_eq!(AttendanceStatus::at_check_in(time(9, 0, 0), cutoff), AttendanceStatus::Late);
        assert_eq!(AttendanceStatus::at_check_in(time(13, 45, 0), cutoff), AttendanceStatus::Late);
    }

    #[test]
    fn patch_merges_only_given_fields() {
        let check_in = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        let mut record = NewAttendanceRecord {
            user_id: "2".to_string(),
            user_name: "John Doe".to_string(),
            check_in,
            check_out: None,
            status: AttendanceStatus::Present,
            location: Some("Office".to_string()),
            notes: None,
        }
        .with_id("r1".to_string());

        let check_out = Utc.with_ymd_and_hms(2024, 1, 15, 17, 30, 0).unwrap();
        record.apply(AttendancePatch {
            check_out: Some(check_out),
            ..Default::default()
        });

        assert_eq!(record.check_out, Some(check_out));
        assert_eq!(record.location.as_deref(), Some("Office"));
        assert_eq!(record.status, AttendanceStatus::Present);
        assert!(record.is_checked_out());
    }

    #[test]
    fn record_serializes_camel_case() {
        let record = NewAttendanceRecord {
            user_id: "3".to_string(),
            user_name: "Jane Smith".to_string(),
            check_in: Utc.with_ymd_and_hms(2024, 1, 15, 9, 15, 0).unwrap(),
            check_out: None,
            status: AttendanceStatus::Late,
            location: None,
            notes: None,
        }
        .with_id("r2".to_string());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["userId"], "3");
        assert_eq!(json["userName"], "Jane Smith");
        assert_eq!(json["status"], "late");
        assert!(json["checkOut"].is_null());
    }
}
