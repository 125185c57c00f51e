/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use dealership_api::{app::AppState, config::Config};
/// use dealership_shared::store::postgres::{PgUserStore, PgVehicleStore};
/// use sqlx::PgPool;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(
///     Arc::new(PgUserStore::new(pool.clone())),
///     Arc::new(PgVehicleStore::new(pool)),
///     config,
/// );
/// let app = dealership_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
    Router,
};
use dealership_shared::{
    auth::{authenticator::Authenticator, authorization, jwt::TokenIssuer},
    models::user::Role,
    store::{UserStore, VehicleStore},
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, Level};

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor; every field
/// is an `Arc` or wraps one.
#[derive(Clone)]
pub struct AppState {
    /// Credential store
    pub users: Arc<dyn UserStore>,

    /// Vehicle inventory
    pub vehicles: Arc<dyn VehicleStore>,

    /// Login credential check
    pub authenticator: Authenticator,

    /// Token signing and validation
    pub tokens: TokenIssuer,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires the stores and the JWT secret into request-handling state
    pub fn new(
        users: Arc<dyn UserStore>,
        vehicles: Arc<dyn VehicleStore>,
        config: Config,
    ) -> Self {
        let tokens = TokenIssuer::new(&config.jwt.secret, config.jwt.expiration_hours);

        Self {
            authenticator: Authenticator::new(users.clone()),
            users,
            vehicles,
            tokens,
            config: Arc::new(config),
        }
    }
}

/// State of the role-gate middleware: the issuer to validate with and the
/// role a request must carry
#[derive(Clone)]
pub struct RoleGate {
    tokens: TokenIssuer,
    required: Role,
}

impl RoleGate {
    pub fn new(tokens: TokenIssuer, required: Role) -> Self {
        Self { tokens, required }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET    /health            # Health check (public)
/// ├── POST   /login             # Username/password login (public)
/// ├── GET    /vehicles[?q=]     # List or search inventory (public)
/// ├── GET    /vehicles/:id      # Single vehicle (public)
/// ├── POST   /vehicles          # Create (ADMIN)
/// ├── PUT    /vehicles/:id      # Replace (ADMIN)
/// └── DELETE /vehicles/:id      # Remove (ADMIN)
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Role gate (on the ADMIN methods only, so unknown paths still 404 and
///    unsupported methods still 405)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let admin_gate = middleware::from_fn_with_state(
        RoleGate::new(state.tokens.clone(), Role::Admin),
        require_role,
    );

    let router = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/login", post(routes::auth::login))
        .route(
            "/vehicles",
            get(routes::vehicles::list_vehicles)
                .merge(post(routes::vehicles::create_vehicle).route_layer(admin_gate.clone())),
        )
        .route(
            "/vehicles/:id",
            get(routes::vehicles::get_vehicle).merge(
                put(routes::vehicles::update_vehicle)
                    .delete(routes::vehicles::delete_vehicle)
                    .route_layer(admin_gate),
            ),
        );

    let cors = if state.config.api.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600))
    };

    router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Role-gate middleware
///
/// Validates the bearer token and checks its role against the gate's
/// required role. On success the caller's `AuthContext` is inserted into
/// request extensions; otherwise the request ends with 401 or 403 and the
/// handler never runs.
async fn require_role(
    State(gate): State<RoleGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let context = authorization::authorize(&gate.tokens, auth_header, gate.required).map_err(|e| {
        debug!(error = %e, path = %req.uri().path(), "Request rejected by role gate");
        e
    })?;

    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}
