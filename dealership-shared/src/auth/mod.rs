/// Authentication and authorization
///
/// The login path and the request gate, leaf-first:
///
/// - [`password`]: Argon2id hashing and constant-time verification
/// - [`jwt`]: HS256 session tokens carrying username and role
/// - [`authenticator`]: username/password check against the credential store
/// - [`authorization`]: Bearer-token gate that admits only a required role
///
/// # Example
///
/// ```no_run
/// use dealership_shared::auth::{authenticator::Authenticator, jwt::TokenIssuer};
/// use dealership_shared::store::memory::MemoryUserStore;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let authenticator = Authenticator::new(Arc::new(MemoryUserStore::new()));
/// let issuer = TokenIssuer::new("an-example-secret-of-at-least-32-bytes", 24);
///
/// let identity = authenticator.authenticate("admin", "admin123").await?;
/// let token = issuer.issue(&identity.username, identity.role)?;
/// # Ok(())
/// # }
/// ```

pub mod authenticator;
pub mod authorization;
pub mod jwt;
pub mod password;
