/// Postgres-backed stores
///
/// Thin wrappers that delegate to the SQL in [`crate::models`].

use async_trait::async_trait;
use sqlx::PgPool;

use super::{StoreResult, UserStore, VehicleStore};
use crate::db::pool::health_check;
use crate::models::user::{CreateUser, User};
use crate::models::vehicle::{Vehicle, VehicleInput};

/// Credential store over the `users` table
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_username(&self.pool, username).await?)
    }

    async fn exists_by_username(&self, username: &str) -> StoreResult<bool> {
        Ok(User::exists_by_username(&self.pool, username).await?)
    }

    async fn create(&self, data: CreateUser) -> StoreResult<User> {
        Ok(User::create(&self.pool, data).await?)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(health_check(&self.pool).await?)
    }
}

/// Inventory over the `vehicles` table
#[derive(Clone)]
pub struct PgVehicleStore {
    pool: PgPool,
}

impl PgVehicleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleStore for PgVehicleStore {
    async fn list(&self, search: Option<&str>) -> StoreResult<Vec<Vehicle>> {
        Ok(Vehicle::list(&self.pool, search).await?)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Vehicle>> {
        Ok(Vehicle::find_by_id(&self.pool, id).await?)
    }

    async fn create(&self, data: &VehicleInput) -> StoreResult<Vehicle> {
        Ok(Vehicle::create(&self.pool, data).await?)
    }

    async fn update(&self, id: i64, data: &VehicleInput) -> StoreResult<Option<Vehicle>> {
        Ok(Vehicle::update(&self.pool, id, data).await?)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(Vehicle::delete(&self.pool, id).await?)
    }
}
