/// Storage seams for users and vehicles
///
/// The API layer never touches `PgPool` directly. It holds an
/// `Arc<dyn UserStore>` and an `Arc<dyn VehicleStore>` so that the same router
/// can run against Postgres in production and against the in-memory stores in
/// tests.
///
/// # Implementations
///
/// - [`postgres`]: `PgUserStore`, `PgVehicleStore` backed by `sqlx::PgPool`
/// - [`memory`]: `MemoryUserStore`, `MemoryVehicleStore` backed by `tokio::sync::RwLock`
///
/// # Example
///
/// ```no_run
/// use dealership_shared::store::{postgres::PgVehicleStore, VehicleStore};
/// use sqlx::PgPool;
/// use std::sync::Arc;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let vehicles: Arc<dyn VehicleStore> = Arc::new(PgVehicleStore::new(pool));
/// let all = vehicles.list(None).await?;
/// println!("{} vehicles in stock", all.len());
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::models::user::{CreateUser, User};
use crate::models::vehicle::{Vehicle, VehicleInput};

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint was violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or("unique").to_string();
                return StoreError::Conflict(constraint);
            }
        }
        StoreError::Database(err)
    }
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Credential store
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Finds a user by exact username
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Checks whether a username is taken
    async fn exists_by_username(&self, username: &str) -> StoreResult<bool>;

    /// Creates a user; fails with `Conflict` if the username is taken
    async fn create(&self, data: CreateUser) -> StoreResult<User>;

    /// Cheap liveness check used by the health endpoint
    async fn ping(&self) -> StoreResult<()>;
}

/// Vehicle inventory
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Lists vehicles ordered by id, optionally filtered by brand/model substring
    async fn list(&self, search: Option<&str>) -> StoreResult<Vec<Vehicle>>;

    /// Finds a vehicle by id
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Vehicle>>;

    /// Inserts a vehicle; `data` must already be validated
    async fn create(&self, data: &VehicleInput) -> StoreResult<Vehicle>;

    /// Replaces a vehicle; `None` if the id does not exist
    async fn update(&self, id: i64, data: &VehicleInput) -> StoreResult<Option<Vehicle>>;

    /// Deletes a vehicle; false if the id does not exist
    async fn delete(&self, id: i64) -> StoreResult<bool>;
}
