//! Identity service account shapes
//!
//! The identity service owns account identifiers; uids are opaque strings
//! and are never parsed or coerced to numbers.

use serde::{Deserialize, Serialize};

/// Account record held by the external identity service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountRecord {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub phone_number: String,
}

/// Account creation payload sent to the identity service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub phone_number: String,
}

/// Account field update sent to the identity service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountUpdate {
    pub email: String,
    pub display_name: String,
    pub phone_number: String,
}

impl From<&AccountRecord> for AccountUpdate {
    fn from(record: &AccountRecord) -> Self {
        AccountUpdate {
            email: record.email.clone(),
            display_name: record.display_name.clone(),
            phone_number: record.phone_number.clone(),
        }
    }
}
