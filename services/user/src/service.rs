//! Application service for user operations
//!
//! Stateless forwarding layer between the HTTP surface and the repository;
//! each endpoint maps to exactly one repository call.

use common::error::StoreResult;
use tracing::info;

use crate::models::{AccountRecord, NewUser, User, UserUpdate};
use crate::repositories::UserRepository;

/// User service
#[derive(Clone)]
pub struct UserService {
    repository: UserRepository,
}

impl UserService {
    /// Create a new user service
    pub fn new(repository: UserRepository) -> Self {
        UserService { repository }
    }

    /// Register a new user with the identity service and profile store
    pub async fn create_user(&self, new_user: &NewUser) -> StoreResult<User> {
        info!("Create user request for {}", new_user.email);
        self.repository.create(new_user).await
    }

    /// Resolve the account registered for an email
    pub async fn login_user(&self, email: &str, password: &str) -> StoreResult<AccountRecord> {
        info!("Login request for {}", email);
        self.repository.login(email, password).await
    }

    /// Update an existing user across both stores
    pub async fn update_user(&self, update: &UserUpdate) -> StoreResult<AccountRecord> {
        info!("Update user request for {}", update.uid);
        self.repository.update(update).await
    }
}
