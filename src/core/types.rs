use crate::core::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// User attributes cached per session id.
///
/// Stored as a flat hash of string fields so any key-value cache can hold it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub username: String,
    pub email: String,
    /// bcrypt hash, never the plain password.
    pub password: String,
    pub role: String,
}

impl SessionRecord {
    pub fn from_account(account: &Account) -> Self {
        SessionRecord {
            username: account.username.clone(),
            email: account.email.clone(),
            password: account.password_hash.clone(),
            role: account.role.to_string(),
        }
    }

    pub fn to_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("username", self.username.clone()),
            ("email", self.email.clone()),
            ("password", self.password.clone()),
            ("role", self.role.clone()),
        ]
    }

    /// Rebuilds a record from a stored hash.
    ///
    /// An empty hash, or one without a username, is not a session.
    pub fn from_fields(mut fields: HashMap<String, String>) -> Option<Self> {
        let username = fields.remove("username").filter(|u| !u.is_empty())?;
        Some(SessionRecord {
            username,
            email: fields.remove("email").unwrap_or_default(),
            password: fields.remove("password").unwrap_or_default(),
            role: fields.remove("role").unwrap_or_default(),
        })
    }

    pub fn role(&self) -> Option<Role> {
        self.role.parse().ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub edition: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub book_id: Uuid,
    pub author: String,
    pub rating: u8,
    pub body: String,
    pub created_at: DateTime<Utc>,
}
