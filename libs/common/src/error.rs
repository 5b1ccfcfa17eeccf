//! Custom error types for the common library
//!
//! This module defines the store-level error taxonomy shared by the identity
//! service client and the profile document store.

use redis::RedisError;
use thiserror::Error;

/// Custom error type for external store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// No account exists for the given email or identifier
    #[error("Account not found")]
    NotFound,

    /// An account already exists for the given email
    #[error("Account already exists: {0}")]
    Conflict(String),

    /// The request payload failed validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The identity service could not be reached or answered with a fault
    #[error("Identity service unavailable: {0}")]
    Unavailable(String),

    /// Error surfaced by the profile document store
    #[error("Profile store error: {0}")]
    Profile(#[from] RedisError),

    /// Configuration or credential error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;
