use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::role::Role;
use crate::model::user::User;
use crate::utils::time::local_to_utc;

fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> chrono::DateTime<Utc> {
    let naive: NaiveDateTime = NaiveDate::from_ymd_opt(y, mo, d)
        .and_then(|day| day.and_hms_opt(h, mi, 0))
        .unwrap_or_default();
    local_to_utc(naive)
}

pub fn users() -> Vec<User> {
    let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default();
    let user = |id: &str, email: &str, password: &str, name: &str, role| User {
        id: id.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        name: name.to_string(),
        role,
        created_at,
    };

    vec![
        user("1", "admin@example.com", "admin123", "Admin User", Role::Admin),
        user("2", "john@example.com", "user123", "John Doe", Role::User),
        user("3", "jane@example.com", "user123", "Jane Smith", Role::User),
    ]
}

pub fn records() -> Vec<AttendanceRecord> {
    vec![
        AttendanceRecord {
            id: "1".to_string(),
            user_id: "2".to_string(),
            user_name: "John Doe".to_string(),
            check_in: local(2024, 1, 15, 9, 0),
            check_out: Some(local(2024, 1, 15, 17, 30)),
            status: AttendanceStatus::Present,
            location: Some("Office".to_string()),
            notes: None,
        },
        AttendanceRecord {
            id: "2".to_string(),
            user_id: "3".to_string(),
            user_name: "Jane Smith".to_string(),
            check_in: local(2024, 1, 15, 9, 15),
            check_out: Some(local(2024, 1, 15, 17, 45)),
            status: AttendanceStatus::Late,
            location: Some("Office".to_string()),
            notes: None,
        },
    ]
}
