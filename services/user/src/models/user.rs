//! User model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity as held in the profile document store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub uid: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub pin_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New user creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub pin_code: String,
}

impl NewUser {
    /// Display name registered with the identity service
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// User update payload; the uid selects the account to update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdate {
    pub uid: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub pin_code: String,
}

impl UserUpdate {
    /// Display name registered with the identity service
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// User login credentials
///
/// The password is carried for interface compatibility only; the identity
/// service offers no server-side password verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}
