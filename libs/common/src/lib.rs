//! Common library for the job-portal backend
//!
//! This crate provides shared infrastructure used by the user service:
//! service-account credential loading, the profile document store, and the
//! store error taxonomy.

pub mod credentials;
pub mod documents;
pub mod error;

/// Example usage of the documents module
///
/// ```rust,no_run
/// use common::documents::{DocumentStore, DocumentStoreConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DocumentStoreConfig::from_env()?;
///     let store = DocumentStore::new(&config).await?;
///     let is_healthy = store.health_check().await?;
///     println!("Profile store health check: {}", is_healthy);
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
