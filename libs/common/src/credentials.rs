//! Service-account credentials for the external identity platform
//!
//! The identity service authenticates callers with a service-account key
//! file. The file is read once at startup and the parsed credentials are
//! injected into the identity client, so no handler ever touches the
//! filesystem or ambient global state.

use crate::error::{StoreError, StoreResult};
use serde::Deserialize;
use std::fs;
use tracing::info;

/// Configuration for locating the service-account key file
#[derive(Debug, Clone)]
pub struct CredentialsConfig {
    /// Path to the service-account key file (JSON)
    pub path: String,
}

impl CredentialsConfig {
    /// Create a new CredentialsConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SERVICE_ACCOUNT_KEY_PATH`: path to the key file (default: "serviceAccountKey.json")
    pub fn from_env() -> StoreResult<Self> {
        let path = std::env::var("SERVICE_ACCOUNT_KEY_PATH")
            .unwrap_or_else(|_| "serviceAccountKey.json".to_string());

        Ok(CredentialsConfig { path })
    }
}

/// Parsed service-account credentials
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceCredentials {
    /// Identity platform project the account belongs to
    pub project_id: String,
    /// API key presented on every identity service call
    pub api_key: String,
    /// Service-account email, kept for diagnostics
    pub client_email: String,
}

impl ServiceCredentials {
    /// Load credentials from the configured key file
    pub fn load(config: &CredentialsConfig) -> StoreResult<Self> {
        let raw = fs::read_to_string(&config.path).map_err(|e| {
            StoreError::Configuration(format!(
                "Failed to read service-account key file {}: {}",
                config.path, e
            ))
        })?;

        let credentials: ServiceCredentials = serde_json::from_str(&raw).map_err(|e| {
            StoreError::Configuration(format!(
                "Invalid service-account key file {}: {}",
                config.path, e
            ))
        })?;

        info!(
            "Loaded service-account credentials for project {}",
            credentials.project_id
        );

        Ok(credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_key_file(name: &str, contents: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("{}-{}", std::process::id(), name));
        fs::write(&path, contents).expect("Failed to write key file");
        path
    }

    #[test]
    fn test_load_credentials() {
        let path = write_key_file(
            "service_account_ok.json",
            r#"{
                "project_id": "job-portal-test",
                "api_key": "test-api-key",
                "client_email": "svc@job-portal-test.iam.example.com"
            }"#,
        );

        let config = CredentialsConfig {
            path: path.to_string_lossy().into_owned(),
        };
        let credentials = ServiceCredentials::load(&config).expect("Failed to load credentials");
        assert_eq!(credentials.project_id, "job-portal-test");
        assert_eq!(credentials.api_key, "test-api-key");

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_credentials_missing_file() {
        let config = CredentialsConfig {
            path: "does-not-exist.json".to_string(),
        };
        let err = ServiceCredentials::load(&config).unwrap_err();
        assert!(matches!(err, StoreError::Configuration(_)));
    }

    #[test]
    fn test_load_credentials_malformed_file() {
        let path = write_key_file("service_account_bad.json", "not json at all");

        let config = CredentialsConfig {
            path: path.to_string_lossy().into_owned(),
        };
        let err = ServiceCredentials::load(&config).unwrap_err();
        assert!(matches!(err, StoreError::Configuration(_)));

        let _ = fs::remove_file(path);
    }
}
