use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod error;
mod models;
mod repositories;
mod routes;
mod service;
mod state;
mod stores;
mod validation;

use common::credentials::{CredentialsConfig, ServiceCredentials};
use common::documents::{DocumentStore, DocumentStoreConfig};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::{
    repositories::UserRepository,
    service::UserService,
    state::AppState,
    stores::{HttpIdentityStore, IdentityServiceConfig},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting user service");

    // Load identity platform credentials
    let credentials_config = CredentialsConfig::from_env()?;
    let credentials = ServiceCredentials::load(&credentials_config)?;

    // Initialize the identity service client
    let identity_config = IdentityServiceConfig::from_env()?;
    let identity_store = HttpIdentityStore::new(identity_config, credentials);

    // Initialize the profile document store
    let store_config = DocumentStoreConfig::from_env()?;
    let document_store = DocumentStore::new(&store_config).await?;

    // Check profile store connectivity
    if document_store.health_check().await? {
        info!("Profile store connection successful");
    } else {
        anyhow::bail!("Failed to connect to profile store");
    }

    info!("User service initialized successfully");

    let user_repository = UserRepository::new(Arc::new(identity_store), Arc::new(document_store));
    let user_service = UserService::new(user_repository);

    let app_state = AppState { user_service };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind("0.0.0.0:3000").await?;
    info!("User service listening on 0.0.0.0:3000");

    axum::serve(listener, app).await?;

    Ok(())
}
