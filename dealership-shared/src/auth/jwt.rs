/// Session token issuance and validation
///
/// Tokens are HS256-signed JWTs. The payload carries the username as `sub` and
/// the user's role; the role is trusted verbatim on every request, so the
/// signing secret is the whole security boundary.
///
/// # Claims
///
/// - `sub`: username
/// - `role`: `ADMIN` or `CLIENT`
/// - `iss`: always `"dealership"`
/// - `iat` / `nbf`: issue time
/// - `exp`: expiry
///
/// # Validation order
///
/// 1. Signature (and token structure). Any failure is [`TokenError::Invalid`].
/// 2. Issuer and not-before. Failure is [`TokenError::Invalid`].
/// 3. Expiry, with zero leeway. Failure is [`TokenError::Expired`].
///
/// A token whose payload was altered is therefore reported as invalid even if
/// it is also past its expiry.
///
/// # Example
///
/// ```
/// use dealership_shared::auth::jwt::TokenIssuer;
/// use dealership_shared::models::user::Role;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let issuer = TokenIssuer::new("an-example-secret-of-at-least-32-bytes", 24);
/// let token = issuer.issue("admin", Role::Admin)?;
///
/// let claims = issuer.validate(&token)?;
/// assert_eq!(claims.sub, "admin");
/// assert_eq!(claims.role, Role::Admin);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::models::user::Role;

/// Value of the `iss` claim on every token this service mints
pub const ISSUER: &str = "dealership";

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Malformed token, bad signature, wrong issuer or not yet valid
    #[error("Invalid token: {0}")]
    Invalid(String),

    /// Correctly signed but past its expiry
    #[error("Token has expired")]
    Expired,
}

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - username
    pub sub: String,

    /// Role at the time of issue
    pub role: Role,

    /// Issuer - always [`ISSUER`]
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Builds claims valid from now for `ttl`
    ///
    /// Fails with [`TokenError::CreateError`] if the expiry falls outside the
    /// representable date range.
    pub fn new(username: impl Into<String>, role: Role, ttl: Duration) -> Result<Self, TokenError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::CreateError("Token lifetime out of range".to_string()))?;

        Ok(Self {
            sub: username.into(),
            role,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: exp.timestamp(),
        })
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Signs and verifies session tokens with a single shared secret
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    // None when the configured hours overflow a Duration
    ttl: Option<Duration>,
}

impl TokenIssuer {
    /// Creates an issuer whose tokens live for `ttl_hours`
    ///
    /// The secret should be at least 32 bytes and the lifetime bounded; the
    /// API config enforces both. An out-of-range lifetime makes every
    /// [`TokenIssuer::issue`] fail instead of panicking.
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::try_hours(ttl_hours),
        }
    }

    /// Lifetime of tokens minted by [`TokenIssuer::issue`]
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Mints a token for `username` with the default lifetime
    pub fn issue(&self, username: &str, role: Role) -> Result<String, TokenError> {
        let ttl = self
            .ttl
            .ok_or_else(|| TokenError::CreateError("Token lifetime out of range".to_string()))?;
        self.issue_with_ttl(username, role, ttl)
    }

    /// Mints a token with an explicit lifetime
    ///
    /// A negative `ttl` yields a token that is already expired.
    pub fn issue_with_ttl(
        &self,
        username: &str,
        role: Role,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(username, role, ttl)?;

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::CreateError(format!("Token encoding failed: {}", e)))
    }

    /// Verifies a token and returns its claims
    ///
    /// # Errors
    ///
    /// - [`TokenError::Invalid`] for anything that is not a well-formed token
    ///   signed by this issuer
    /// - [`TokenError::Expired`] for a genuine token past its expiry
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub"]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })?
            .claims;

        // jsonwebtoken accepts exp == now; expiry must be strictly in the future.
        if claims.is_expired() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
