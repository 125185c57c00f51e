/// Login endpoint
///
/// Exchanges a username and password for a signed session token. The token
/// carries the user's role and is sent back as `Authorization: Bearer <token>`
/// on admin-only requests.
///
/// # Endpoint
///
/// - `POST /login` - Login and get a token

use crate::{app::AppState, error::ApiResult};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use dealership_shared::models::user::Role;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

/// Login request
///
/// Missing fields deserialize as empty strings so they fail validation (422)
/// instead of body parsing (400).
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed session token
    pub token: String,

    /// Username the token was issued to
    pub username: String,

    /// Role embedded in the token
    pub role: Role,
}

/// Login handler
///
/// # Request
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// {
///   "username": "admin",
///   "password": "admin123"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "token": "eyJ...",
///   "username": "admin",
///   "role": "ADMIN"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Body is not JSON
/// - `401 Unauthorized`: Unknown username or wrong password (same body for both)
/// - `422 Unprocessable Entity`: Empty username or password
/// - `500 Internal Server Error`: Store failure
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let identity = state
        .authenticator
        .authenticate(&req.username, &req.password)
        .await?;

    let token = state.tokens.issue(&identity.username, identity.role)?;

    info!(username = %identity.username, role = %identity.role, "User logged in");

    Ok(Json(LoginResponse {
        token,
        username: identity.username,
        role: identity.role,
    }))
}
