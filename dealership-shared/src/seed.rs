/// Bootstrap seeding of the administrator account
///
/// Runs once at startup, before the listener accepts traffic. If the
/// configured admin username already exists nothing is touched, so restarting
/// with a different `ADMIN_PASSWORD` never overwrites the stored credentials.

use tracing::{debug, info};

use crate::auth::password::{self, PasswordError};
use crate::models::user::{CreateUser, Role};
use crate::store::{StoreError, UserStore};

/// Error type for seeding
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to hash admin password: {0}")]
    Password(#[from] PasswordError),

    #[error("Failed to store admin account: {0}")]
    Store(#[from] StoreError),
}

/// Administrator credentials to seed
#[derive(Clone)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Default for AdminSeed {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        }
    }
}

/// Creates the administrator if no user with that name exists
///
/// Returns `true` if an account was created. A concurrent insert that wins the
/// race on the unique username counts as "already exists".
pub async fn seed_admin(users: &dyn UserStore, seed: &AdminSeed) -> Result<bool, SeedError> {
    if users.exists_by_username(&seed.username).await? {
        debug!(username = %seed.username, "Admin account already present");
        return Ok(false);
    }

    let password = seed.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(|e| PasswordError::HashError(format!("Hashing task failed: {}", e)))??;

    match users
        .create(CreateUser {
            username: seed.username.clone(),
            password_hash,
            role: Role::Admin,
        })
        .await
    {
        Ok(user) => {
            info!(username = %user.username, user_id = %user.id, "Admin account created");
            Ok(true)
        }
        Err(StoreError::Conflict(_)) => {
            debug!(username = %seed.username, "Admin account created concurrently");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}
