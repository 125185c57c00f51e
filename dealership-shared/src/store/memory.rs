/// In-memory stores for tests
///
/// These mirror the Postgres semantics closely enough to drive the HTTP
/// router end to end without a database: unique usernames, auto-incrementing
/// vehicle ids starting at 1, `updated_at` bumped on replace, and the same
/// case-insensitive brand/model search.
///
/// # Example
///
/// ```
/// use dealership_shared::store::{memory::MemoryVehicleStore, VehicleStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryVehicleStore::new();
/// assert!(store.list(None).await?.is_empty());
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, StoreResult, UserStore, VehicleStore};
use crate::models::user::{CreateUser, User};
use crate::models::vehicle::{Vehicle, VehicleInput};

/// Credential store keyed by username
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> StoreResult<bool> {
        Ok(self.users.read().await.contains_key(username))
    }

    async fn create(&self, data: CreateUser) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.contains_key(&data.username) {
            return Err(StoreError::Conflict("users_username_key".to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: data.username,
            password_hash: data.password_hash,
            role: data.role,
            created_at: Utc::now(),
        };
        users.insert(user.username.clone(), user.clone());

        Ok(user)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[derive(Default)]
struct VehicleTable {
    next_id: i64,
    rows: BTreeMap<i64, Vehicle>,
}

/// Vehicle inventory ordered by id
#[derive(Default)]
pub struct MemoryVehicleStore {
    table: RwLock<VehicleTable>,
}

impl MemoryVehicleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_search(vehicle: &Vehicle, term: &str) -> bool {
    let term = term.to_lowercase();
    vehicle.brand.to_lowercase().contains(&term) || vehicle.model.to_lowercase().contains(&term)
}

#[async_trait]
impl VehicleStore for MemoryVehicleStore {
    async fn list(&self, search: Option<&str>) -> StoreResult<Vec<Vehicle>> {
        let table = self.table.read().await;
        let vehicles = table
            .rows
            .values()
            .filter(|v| search.map_or(true, |term| matches_search(v, term)))
            .cloned()
            .collect();

        Ok(vehicles)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Vehicle>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, data: &VehicleInput) -> StoreResult<Vehicle> {
        let mut table = self.table.write().await;
        table.next_id += 1;

        let now = Utc::now();
        let vehicle = Vehicle {
            id: table.next_id,
            brand: data.brand.clone(),
            model: data.model.clone(),
            year: data.year,
            price: data.price,
            mileage: data.mileage,
            fuel_type: data.fuel_type.clone(),
            description: data.description.clone(),
            image_urls: data.image_urls.clone(),
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(vehicle.id, vehicle.clone());

        Ok(vehicle)
    }

    async fn update(&self, id: i64, data: &VehicleInput) -> StoreResult<Option<Vehicle>> {
        let mut table = self.table.write().await;
        let Some(vehicle) = table.rows.get_mut(&id) else {
            return Ok(None);
        };

        vehicle.brand = data.brand.clone();
        vehicle.model = data.model.clone();
        vehicle.year = data.year;
        vehicle.price = data.price;
        vehicle.mileage = data.mileage;
        vehicle.fuel_type = data.fuel_type.clone();
        vehicle.description = data.description.clone();
        vehicle.image_urls = data.image_urls.clone();
        vehicle.updated_at = Utc::now();

        Ok(Some(vehicle.clone()))
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;

    fn input(brand: &str, model: &str) -> VehicleInput {
        VehicleInput {
            brand: brand.to_string(),
            model: model.to_string(),
            year: 2019,
            price: 15000.0,
            mileage: 60000,
            fuel_type: "Diesel".to_string(),
            description: None,
            image_urls: vec!["https://img.example.com/1.jpg".to_string()],
        }
    }

    #[tokio::test]
    async fn test_user_store_rejects_duplicate_username() {
        let store = MemoryUserStore::new();
        let data = CreateUser {
            username: "admin".to_string(),
            password_hash: "hash".to_string(),
            role: Role::Admin,
        };

        store.create(data.clone()).await.unwrap();
        let result = store.create(data).await;

        assert!(matches!(result, Err(StoreError::Conflict(_))));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_vehicle_ids_increment() {
        let store = MemoryVehicleStore::new();

        let first = store.create(&input("Toyota", "Corolla")).await.unwrap();
        let second = store.create(&input("Ford", "Focus")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_vehicle_search_is_case_insensitive() {
        let store = MemoryVehicleStore::new();
        store.create(&input("Toyota", "Corolla")).await.unwrap();
        store.create(&input("Ford", "Focus")).await.unwrap();
        store.create(&input("Volkswagen", "Golf")).await.unwrap();

        let found = store.list(Some("FO")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].brand, "Ford");

        let found = store.list(Some("coro")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].model, "Corolla");

        assert_eq!(store.list(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_vehicle_update_and_delete_missing() {
        let store = MemoryVehicleStore::new();

        assert!(store.update(42, &input("Seat", "Leon")).await.unwrap().is_none());
        assert!(!store.delete(42).await.unwrap());
    }

    #[tokio::test]
    async fn test_vehicle_update_replaces_fields() {
        let store = MemoryVehicleStore::new();
        let created = store.create(&input("Seat", "Leon")).await.unwrap();

        let mut change = input("Seat", "Leon FR");
        change.image_urls.clear();
        let updated = store.update(created.id, &change).await.unwrap().unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.model, "Leon FR");
        assert!(updated.image_urls.is_empty());
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
    }
}
