use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::role::Role;

/// Stored account. Not serializable: only [`PublicUser`] leaves the server.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": "2",
    "email": "john@example.com",
    "name": "John Doe",
    "role": "user",
    "createdAt": "2024-01-01T00:00:00Z"
}))]
pub struct PublicUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_view_drops_password() {
        let user = User {
            id: "7".to_string(),
            email: "kim@example.com".to_string(),
            password: "hunter2".to_string(),
            name: "Kim".to_string(),
            role: Role::User,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(PublicUser::from(&user)).unwrap();
        assert_eq!(json["email"], "kim@example.com");
        assert!(json.get("password").is_none());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn password_compare_is_exact() {
        let user = User {
            id: "1".to_string(),
            email: "a@example.com".to_string(),
            password: "Secret".to_string(),
            name: "A".to_string(),
            role: Role::Admin,
            created_at: Utc::now(),
        };
        assert!(user.password_matches("Secret"));
        assert!(!user.password_matches("secret"));
    }
}
