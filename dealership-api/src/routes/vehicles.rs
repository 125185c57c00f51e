/// Vehicle inventory endpoints
///
/// Reads are public. Writes sit behind the ADMIN role gate installed in
/// [`crate::app::build_router`], which also puts the caller's `AuthContext`
/// into request extensions for audit logging here.
///
/// # Endpoints
///
/// - `GET /vehicles[?q=term]` - List, optionally filtered by brand/model
/// - `GET /vehicles/:id` - Get one vehicle
/// - `POST /vehicles` - Create (ADMIN)
/// - `PUT /vehicles/:id` - Replace (ADMIN)
/// - `DELETE /vehicles/:id` - Delete (ADMIN)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use dealership_shared::{
    auth::authorization::AuthContext,
    models::vehicle::{Vehicle, VehicleInput},
};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

/// Query parameters for listing
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring of brand or model
    pub q: Option<String>,
}

impl ListQuery {
    /// Search term, if any; blank counts as none
    fn term(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

fn not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Vehicle {} not found", id))
}

/// List vehicles
///
/// # Endpoint
///
/// ```text
/// GET /vehicles?q=toyota
/// ```
///
/// # Response
///
/// JSON array of vehicles ordered by id.
pub async fn list_vehicles(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Vehicle>>> {
    let Query(query) = query?;

    let vehicles = state.vehicles.list(query.term()).await?;

    Ok(Json(vehicles))
}

/// Get a vehicle by ID
///
/// # Errors
///
/// - `400 Bad Request`: ID is not an integer
/// - `404 Not Found`: No vehicle with this ID
pub async fn get_vehicle(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vehicle>> {
    let Path(id) = id?;

    let vehicle = state
        .vehicles
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(vehicle))
}

/// Create a vehicle
///
/// # Endpoint
///
/// ```text
/// POST /vehicles
/// Authorization: Bearer <admin token>
/// Content-Type: application/json
///
/// {
///   "brand": "Toyota",
///   "model": "Corolla",
///   "year": 2020,
///   "price": 18500.0,
///   "mileage": 42000,
///   "fuel_type": "Hybrid",
///   "description": "One owner",
///   "image_urls": ["https://cdn.example.com/corolla-1.jpg"]
/// }
/// ```
///
/// # Response
///
/// `200 OK` with the stored vehicle, including its assigned `id`.
///
/// # Errors
///
/// - `401 Unauthorized` / `403 Forbidden`: From the role gate
/// - `422 Unprocessable Entity`: Validation failed; nothing is stored
pub async fn create_vehicle(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthContext>,
    payload: Result<Json<VehicleInput>, JsonRejection>,
) -> ApiResult<Json<Vehicle>> {
    let Json(input) = payload?;
    input.validate()?;

    let vehicle = state.vehicles.create(&input).await?;

    info!(
        vehicle_id = vehicle.id,
        brand = %vehicle.brand,
        model = %vehicle.model,
        by = %caller.username,
        "Vehicle created"
    );

    Ok(Json(vehicle))
}

/// Replace a vehicle
///
/// Every mutable field is overwritten; `updated_at` is bumped.
///
/// # Errors
///
/// - `401 Unauthorized` / `403 Forbidden`: From the role gate
/// - `404 Not Found`: No vehicle with this ID
/// - `422 Unprocessable Entity`: Validation failed; nothing is changed
pub async fn update_vehicle(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthContext>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<VehicleInput>, JsonRejection>,
) -> ApiResult<Json<Vehicle>> {
    let Path(id) = id?;
    let Json(input) = payload?;
    input.validate()?;

    let vehicle = state
        .vehicles
        .update(id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    info!(vehicle_id = id, by = %caller.username, "Vehicle updated");

    Ok(Json(vehicle))
}

/// Delete a vehicle
///
/// # Response
///
/// `204 No Content`
///
/// # Errors
///
/// - `401 Unauthorized` / `403 Forbidden`: From the role gate
/// - `404 Not Found`: No vehicle with this ID
pub async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthContext>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;

    if !state.vehicles.delete(id).await? {
        return Err(not_found(id));
    }

    info!(vehicle_id = id, by = %caller.username, "Vehicle deleted");

    Ok(StatusCode::NO_CONTENT)
}
