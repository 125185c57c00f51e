/// Authorization gate for protected operations
///
/// Every mutating inventory request goes through [`authorize`] before its
/// handler runs. Per request there are two states, unauthenticated and
/// authenticated-with-a-role, and three outcomes:
///
/// ```text
/// header ──► Bearer token? ──no──► Unauthorized
///                 │
///                yes
///                 ▼
///          token validates? ──no──► Unauthorized
///                 │
///                yes
///                 ▼
///         role == required? ──no──► Forbidden
///                 │
///                yes
///                 ▼
///               Allow(AuthContext)
/// ```
///
/// No state is carried between requests.
///
/// # Example
///
/// ```
/// use dealership_shared::auth::authorization::{authorize, GateError};
/// use dealership_shared::auth::jwt::TokenIssuer;
/// use dealership_shared::models::user::Role;
///
/// let issuer = TokenIssuer::new("an-example-secret-of-at-least-32-bytes", 24);
/// let token = issuer.issue("maria", Role::Client).unwrap();
/// let header = format!("Bearer {}", token);
///
/// assert!(matches!(
///     authorize(&issuer, Some(header.as_str()), Role::Admin),
///     Err(GateError::Forbidden { .. })
/// ));
/// assert!(matches!(authorize(&issuer, None, Role::Admin), Err(GateError::MissingCredentials)));
/// ```

use serde::{Deserialize, Serialize};

use super::jwt::{TokenError, TokenIssuer};
use crate::models::user::Role;

/// Authenticated caller, added to request extensions on Allow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Username from the token subject
    pub username: String,

    /// Role from the token payload
    pub role: Role,
}

/// Why the gate rejected a request
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// No Authorization header
    #[error("Missing credentials")]
    MissingCredentials,

    /// Authorization header is not `Bearer <token>`
    #[error("Expected Bearer token")]
    InvalidFormat,

    /// Token failed validation
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Valid token, wrong role
    #[error("Requires role {required}, token has {actual}")]
    Forbidden { required: Role, actual: Role },
}

impl GateError {
    /// True for outcomes that map to 401 rather than 403
    pub fn is_unauthorized(&self) -> bool {
        !matches!(self, GateError::Forbidden { .. })
    }
}

/// Extracts the token from an `Authorization` header value
///
/// The scheme is matched case-insensitively, per RFC 7235.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Decides whether a request may proceed
///
/// `authorization_header` is the raw header value, if any.
pub fn authorize(
    issuer: &TokenIssuer,
    authorization_header: Option<&str>,
    required: Role,
) -> Result<AuthContext, GateError> {
    let header = authorization_header.ok_or(GateError::MissingCredentials)?;
    let token = bearer_token(header).ok_or(GateError::InvalidFormat)?;

    let claims = issuer.validate(token)?;

    if claims.role != required {
        return Err(GateError::Forbidden {
            required,
            actual: claims.role,
        });
    }

    Ok(AuthContext {
        username: claims.sub,
        role: claims.role,
    })
}
