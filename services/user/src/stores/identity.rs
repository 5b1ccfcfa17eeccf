//! HTTP client for the external account-identity service
//!
//! Speaks the identity-toolkit style REST surface (accounts:signUp,
//! accounts:lookup, accounts:update, accounts:delete), authorized by the
//! service-account API key. Response parsing is separated from transport so
//! the upstream error mapping is testable without a live endpoint.

use async_trait::async_trait;
use common::credentials::ServiceCredentials;
use common::error::{StoreError, StoreResult};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::IdentityStore;
use crate::models::{AccountRecord, AccountUpdate, NewAccount};

/// Configuration for the identity service endpoint
#[derive(Debug, Clone)]
pub struct IdentityServiceConfig {
    /// Base URL of the identity service REST API
    pub base_url: String,
}

impl IdentityServiceConfig {
    /// Create a new IdentityServiceConfig from environment variables
    ///
    /// # Environment Variables
    /// - `IDENTITY_API_URL`: base URL of the identity service
    ///   (default: "https://identitytoolkit.googleapis.com/v1")
    pub fn from_env() -> StoreResult<Self> {
        let base_url = std::env::var("IDENTITY_API_URL")
            .unwrap_or_else(|_| "https://identitytoolkit.googleapis.com/v1".to_string());

        Ok(IdentityServiceConfig { base_url })
    }
}

/// Identity service client
pub struct HttpIdentityStore {
    client: reqwest::Client,
    base_url: String,
    credentials: ServiceCredentials,
}

impl HttpIdentityStore {
    /// Create a new identity service client
    pub fn new(config: IdentityServiceConfig, credentials: ServiceCredentials) -> Self {
        HttpIdentityStore {
            client: reqwest::Client::new(),
            base_url: config.base_url,
            credentials,
        }
    }

    fn endpoint(&self, operation: &str) -> String {
        format!(
            "{}/accounts:{}?key={}",
            self.base_url, operation, self.credentials.api_key
        )
    }

    /// Issue one call against the identity service and hand back the raw
    /// status and body for parsing
    async fn post(&self, operation: &str, body: serde_json::Value) -> StoreResult<(StatusCode, String)> {
        let response = self
            .client
            .post(self.endpoint(operation))
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok((status, text))
    }
}

#[derive(Debug, Deserialize)]
struct SignUpResponse {
    #[serde(rename = "localId")]
    local_id: String,
}

#[derive(Debug, Deserialize)]
struct RawAccount {
    #[serde(rename = "localId")]
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default, rename = "displayName")]
    display_name: String,
    #[serde(default, rename = "phoneNumber")]
    phone_number: String,
}

impl From<RawAccount> for AccountRecord {
    fn from(raw: RawAccount) -> Self {
        AccountRecord {
            uid: raw.local_id,
            email: raw.email,
            display_name: raw.display_name,
            phone_number: raw.phone_number,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<RawAccount>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Map a non-success identity service response onto the store taxonomy
fn error_from_response(status: StatusCode, body: &str, subject: &str) -> StoreError {
    let code = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_default();

    match code.as_str() {
        "EMAIL_EXISTS" | "DUPLICATE_EMAIL" | "PHONE_NUMBER_EXISTS" => {
            StoreError::Conflict(subject.to_string())
        }
        "EMAIL_NOT_FOUND" | "USER_NOT_FOUND" => StoreError::NotFound,
        "INVALID_EMAIL" | "INVALID_PHONE_NUMBER" | "WEAK_PASSWORD" => StoreError::Validation(code),
        _ if code.is_empty() => {
            StoreError::Unavailable(format!("Identity service answered {}", status))
        }
        _ => StoreError::Unavailable(code),
    }
}

fn parse_body<T: for<'de> Deserialize<'de>>(text: &str) -> StoreResult<T> {
    serde_json::from_str(text)
        .map_err(|e| StoreError::Unavailable(format!("Malformed identity service response: {}", e)))
}

#[async_trait]
impl IdentityStore for HttpIdentityStore {
    async fn create_account(&self, new_account: &NewAccount) -> StoreResult<AccountRecord> {
        info!("Creating identity account for {}", new_account.email);

        let body = json!({
            "email": new_account.email,
            "password": new_account.password,
            "displayName": new_account.display_name,
            "phoneNumber": new_account.phone_number,
            "returnSecureToken": false,
        });

        let (status, text) = self.post("signUp", body).await?;
        if !status.is_success() {
            return Err(error_from_response(status, &text, &new_account.email));
        }

        let parsed: SignUpResponse = parse_body(&text)?;
        Ok(AccountRecord {
            uid: parsed.local_id,
            email: new_account.email.clone(),
            display_name: new_account.display_name.clone(),
            phone_number: new_account.phone_number.clone(),
        })
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<AccountRecord> {
        info!("Looking up identity account by email");

        let (status, text) = self.post("lookup", json!({ "email": [email] })).await?;
        if !status.is_success() {
            return Err(error_from_response(status, &text, email));
        }

        let parsed: LookupResponse = parse_body(&text)?;
        parsed
            .users
            .into_iter()
            .next()
            .map(AccountRecord::from)
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_uid(&self, uid: &str) -> StoreResult<AccountRecord> {
        info!("Looking up identity account {}", uid);

        let (status, text) = self.post("lookup", json!({ "localId": [uid] })).await?;
        if !status.is_success() {
            return Err(error_from_response(status, &text, uid));
        }

        let parsed: LookupResponse = parse_body(&text)?;
        parsed
            .users
            .into_iter()
            .next()
            .map(AccountRecord::from)
            .ok_or(StoreError::NotFound)
    }

    async fn update_account(
        &self,
        uid: &str,
        update: &AccountUpdate,
    ) -> StoreResult<AccountRecord> {
        info!("Updating identity account {}", uid);

        let body = json!({
            "localId": uid,
            "email": update.email,
            "displayName": update.display_name,
            "phoneNumber": update.phone_number,
        });

        let (status, text) = self.post("update", body).await?;
        if !status.is_success() {
            return Err(error_from_response(status, &text, &update.email));
        }

        Ok(AccountRecord {
            uid: uid.to_string(),
            email: update.email.clone(),
            display_name: update.display_name.clone(),
            phone_number: update.phone_number.clone(),
        })
    }

    async fn delete_account(&self, uid: &str) -> StoreResult<()> {
        info!("Deleting identity account {}", uid);

        let (status, text) = self.post("delete", json!({ "localId": uid })).await?;
        if !status.is_success() {
            return Err(error_from_response(status, &text, uid));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> HttpIdentityStore {
        let config = IdentityServiceConfig {
            base_url: "https://identity.example.com/v1".to_string(),
        };
        let credentials = ServiceCredentials {
            project_id: "job-portal-test".to_string(),
            api_key: "test-key".to_string(),
            client_email: "svc@job-portal-test.iam.example.com".to_string(),
        };
        HttpIdentityStore::new(config, credentials)
    }

    #[test]
    fn test_endpoint_format() {
        let store = test_store();
        assert_eq!(
            store.endpoint("signUp"),
            "https://identity.example.com/v1/accounts:signUp?key=test-key"
        );
    }

    #[test]
    fn test_error_mapping_conflict() {
        let body = r#"{"error": {"code": 400, "message": "EMAIL_EXISTS"}}"#;
        let err = error_from_response(StatusCode::BAD_REQUEST, body, "jane@example.com");
        assert!(matches!(err, StoreError::Conflict(email) if email == "jane@example.com"));
    }

    #[test]
    fn test_error_mapping_not_found() {
        let body = r#"{"error": {"code": 400, "message": "EMAIL_NOT_FOUND"}}"#;
        let err = error_from_response(StatusCode::BAD_REQUEST, body, "jane@example.com");
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    fn test_error_mapping_unknown_code_is_unavailable() {
        let body = r#"{"error": {"code": 400, "message": "TOO_MANY_ATTEMPTS_TRY_LATER"}}"#;
        let err = error_from_response(StatusCode::BAD_REQUEST, body, "jane@example.com");
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_error_mapping_unparseable_body() {
        let err = error_from_response(StatusCode::INTERNAL_SERVER_ERROR, "<html>", "subject");
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_parse_signup_response() {
        let parsed: SignUpResponse =
            parse_body(r#"{"kind": "identitytoolkit#SignupNewUserResponse", "localId": "u-123"}"#)
                .expect("Failed to parse signUp response");
        assert_eq!(parsed.local_id, "u-123");
    }

    #[test]
    fn test_parse_lookup_response_empty() {
        let parsed: LookupResponse = parse_body(r#"{"kind": "identitytoolkit#GetAccountInfoResponse"}"#)
            .expect("Failed to parse lookup response");
        assert!(parsed.users.is_empty());
    }

    #[test]
    fn test_parse_lookup_response_account() {
        let parsed: LookupResponse = parse_body(
            r#"{"users": [{"localId": "u-123", "email": "jane@example.com", "displayName": "Jane Doe", "phoneNumber": "+14155550101"}]}"#,
        )
        .expect("Failed to parse lookup response");

        let record = AccountRecord::from(parsed.users.into_iter().next().expect("One account"));
        assert_eq!(record.uid, "u-123");
        assert_eq!(record.email, "jane@example.com");
        assert_eq!(record.display_name, "Jane Doe");
    }
}
