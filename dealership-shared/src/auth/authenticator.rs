/// Login credential check
///
/// The authenticator looks a username up in the credential store and checks
/// the candidate password against the stored hash. Both failure paths, unknown
/// user and wrong password, produce the same [`AuthenticationError::InvalidCredentials`]
/// and both run one Argon2 verification, so neither the response nor its
/// latency tells a caller which usernames exist.
///
/// # Example
///
/// ```no_run
/// use dealership_shared::auth::authenticator::Authenticator;
/// use dealership_shared::store::postgres::PgUserStore;
/// use sqlx::PgPool;
/// use std::sync::Arc;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let authenticator = Authenticator::new(Arc::new(PgUserStore::new(pool)));
/// let identity = authenticator.authenticate("admin", "admin123").await?;
/// println!("{} logged in as {}", identity.username, identity.role);
/// # Ok(())
/// # }
/// ```

use std::sync::{Arc, OnceLock};
use tracing::{error, warn};

use super::password::{self, PasswordError};
use crate::models::user::Role;
use crate::store::{StoreError, UserStore};

/// Error type for login attempts
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    /// Unknown username or wrong password, deliberately indistinguishable
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Credential store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Stored hash could not be used
    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// Who logged in and with which role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub role: Role,
}

/// Hash verified against when the username does not exist
///
/// Computed once; `None` only if hashing itself is broken, in which case the
/// unknown-user path simply skips the extra work.
fn dummy_hash() -> Option<&'static str> {
    static DUMMY: OnceLock<Option<String>> = OnceLock::new();
    DUMMY
        .get_or_init(|| password::hash_password("dealership-dummy-password").ok())
        .as_deref()
}

/// Validates username/password pairs against a [`UserStore`]
#[derive(Clone)]
pub struct Authenticator {
    users: Arc<dyn UserStore>,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Checks a login attempt
    ///
    /// Argon2 verification is CPU-bound, so it runs on the blocking pool.
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` for an unknown user or a wrong password
    /// - `Store` / `Password` for infrastructure failures, which the API maps
    ///   to a generic 500
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Identity, AuthenticationError> {
        let user = self.users.find_by_username(username).await?;

        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        let candidate = password.to_string();
        let verified = tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => password::verify_password(&candidate, &hash),
            None => {
                if let Some(hash) = dummy_hash() {
                    let _ = password::verify_password(&candidate, hash);
                }
                Ok(false)
            }
        })
        .await
        .map_err(|e| PasswordError::VerifyError(format!("Verification task failed: {}", e)))?;

        let verified = verified.map_err(|e| {
            error!(username, error = %e, "Stored password hash is unusable");
            e
        })?;

        match user {
            Some(user) if verified => Ok(Identity {
                username: user.username,
                role: user.role,
            }),
            _ => {
                warn!(username, "Rejected login attempt");
                Err(AuthenticationError::InvalidCredentials)
            }
        }
    }
}
