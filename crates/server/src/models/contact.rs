//! Contact-form documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contact-form submission body.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
}

/// A stored contact message, `contact_messages` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(with = "super::rfc3339_micros")]
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    #[must_use]
    pub fn from_input(input: ContactInput) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            message: input.message,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_messages_start_unread() {
        let message = ContactMessage::from_input(ContactInput {
            name: "Ravi".to_string(),
            email: "ravi@example.com".to_string(),
            phone: None,
            message: "Do you ship to Kerala?".to_string(),
        });
        assert!(!message.is_read);
        assert!(!message.id.is_empty());
    }
}
