//! User repository bridging the identity service and the profile store
//!
//! Every logical operation touches two external systems with no shared
//! transaction: the identity service is written first, the profile document
//! store second. When the second write fails the identity change is
//! compensated (the account is deleted on create, the previous fields are
//! restored on update) so the stores do not drift apart silently. The
//! compensation itself is best-effort; if it fails the original error is
//! still returned and the failure logged.

use chrono::Utc;
use common::error::{StoreError, StoreResult};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::models::{AccountRecord, AccountUpdate, NewAccount, NewUser, User, UserUpdate};
use crate::stores::{IdentityStore, ProfileStore};
use crate::validation::{validate_email, validate_password, validate_phone_number};

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    identity: Arc<dyn IdentityStore>,
    profiles: Arc<dyn ProfileStore>,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(identity: Arc<dyn IdentityStore>, profiles: Arc<dyn ProfileStore>) -> Self {
        UserRepository { identity, profiles }
    }

    /// Create a new user: identity account first, profile document second
    pub async fn create(&self, new_user: &NewUser) -> StoreResult<User> {
        validate_email(&new_user.email).map_err(StoreError::Validation)?;
        validate_password(&new_user.password).map_err(StoreError::Validation)?;
        validate_phone_number(&new_user.phone_number).map_err(StoreError::Validation)?;

        info!("Creating user: {}", new_user.email);

        let account = self
            .identity
            .create_account(&NewAccount {
                email: new_user.email.clone(),
                password: new_user.password.clone(),
                display_name: new_user.display_name(),
                phone_number: new_user.phone_number.clone(),
            })
            .await?;

        let now = Utc::now();
        let user = User {
            uid: account.uid,
            email: new_user.email.clone(),
            first_name: new_user.first_name.clone(),
            last_name: new_user.last_name.clone(),
            phone_number: new_user.phone_number.clone(),
            street: new_user.street.clone(),
            city: new_user.city.clone(),
            state: new_user.state.clone(),
            country: new_user.country.clone(),
            pin_code: new_user.pin_code.clone(),
            created_at: now,
            updated_at: now,
        };

        if let Err(err) = self.profiles.put_fields(&user.uid, &profile_fields(&user)).await {
            warn!(
                "Profile write failed for {}, rolling back identity account",
                user.uid
            );
            if let Err(rollback_err) = self.identity.delete_account(&user.uid).await {
                error!(
                    "Failed to roll back identity account {}: {}",
                    user.uid, rollback_err
                );
            }
            return Err(err);
        }

        Ok(user)
    }

    /// Look up the account registered for an email
    ///
    /// The identity service offers no server-side password verification, so
    /// login only asserts that an account exists; the password is accepted
    /// unchecked.
    pub async fn login(&self, email: &str, _password: &str) -> StoreResult<AccountRecord> {
        info!("Login attempt for {}", email);
        self.identity.find_by_email(email).await
    }

    /// Update identity fields and profile fields for an existing user
    pub async fn update(&self, update: &UserUpdate) -> StoreResult<AccountRecord> {
        validate_email(&update.email).map_err(StoreError::Validation)?;
        validate_phone_number(&update.phone_number).map_err(StoreError::Validation)?;

        info!("Updating user: {}", update.uid);

        // Read the current record up front so a failed profile write can be
        // compensated by restoring the old identity fields
        let previous = self.identity.find_by_uid(&update.uid).await?;

        let account = self
            .identity
            .update_account(
                &update.uid,
                &AccountUpdate {
                    email: update.email.clone(),
                    display_name: update.display_name(),
                    phone_number: update.phone_number.clone(),
                },
            )
            .await?;

        if let Err(err) = self
            .profiles
            .merge_fields(&update.uid, &update_fields(update))
            .await
        {
            warn!(
                "Profile write failed for {}, restoring previous identity fields",
                update.uid
            );
            if let Err(restore_err) = self
                .identity
                .update_account(&update.uid, &AccountUpdate::from(&previous))
                .await
            {
                error!(
                    "Failed to restore identity account {}: {}",
                    update.uid, restore_err
                );
            }
            return Err(err);
        }

        Ok(account)
    }
}

/// Full profile document for a freshly created user
fn profile_fields(user: &User) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    fields.insert("email".to_string(), user.email.clone());
    fields.insert("first_name".to_string(), user.first_name.clone());
    fields.insert("last_name".to_string(), user.last_name.clone());
    fields.insert("phone_number".to_string(), user.phone_number.clone());
    fields.insert("street".to_string(), user.street.clone());
    fields.insert("city".to_string(), user.city.clone());
    fields.insert("state".to_string(), user.state.clone());
    fields.insert("country".to_string(), user.country.clone());
    fields.insert("pin_code".to_string(), user.pin_code.clone());
    fields.insert("created_at".to_string(), user.created_at.to_rfc3339());
    fields.insert("updated_at".to_string(), user.updated_at.to_rfc3339());
    fields
}

/// Changed profile fields for an update; created_at is never touched
fn update_fields(update: &UserUpdate) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    fields.insert("email".to_string(), update.email.clone());
    fields.insert("first_name".to_string(), update.first_name.clone());
    fields.insert("last_name".to_string(), update.last_name.clone());
    fields.insert("phone_number".to_string(), update.phone_number.clone());
    fields.insert("street".to_string(), update.street.clone());
    fields.insert("city".to_string(), update.city.clone());
    fields.insert("state".to_string(), update.state.clone());
    fields.insert("country".to_string(), update.country.clone());
    fields.insert("pin_code".to_string(), update.pin_code.clone());
    fields.insert("updated_at".to_string(), Utc::now().to_rfc3339());
    fields
}
