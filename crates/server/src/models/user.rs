//! User documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use seedleaf_core::UserRole;

/// A user document as stored in the `users` collection.
///
/// Never serialize this directly into a response; use [`UserProfile`],
/// which omits the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub password_hash: String,
    pub role: UserRole,
    #[serde(with = "super::rfc3339_micros")]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a new customer document from registration input.
    #[must_use]
    pub fn new_customer(
        email: String,
        name: String,
        phone: Option<String>,
        password_hash: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            name,
            phone,
            password_hash,
            role: UserRole::Customer,
            created_at: Utc::now(),
        }
    }
}

/// The response shape of a user: everything except the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: UserRole,
    #[serde(with = "super::rfc3339_micros")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            phone: user.phone,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_drops_password_hash() {
        let user = User::new_customer(
            "farmer@example.com".to_string(),
            "Farmer".to_string(),
            None,
            "$argon2id$...".to_string(),
        );
        let profile = UserProfile::from(user);
        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("password"));
        assert!(json.contains("farmer@example.com"));
    }

    #[test]
    fn new_customers_default_to_customer_role() {
        let user = User::new_customer(
            "a@b.example".to_string(),
            "A".to_string(),
            None,
            "h".to_string(),
        );
        assert_eq!(user.role, UserRole::Customer);
    }
}
