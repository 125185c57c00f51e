/// Database models for the dealership
///
/// Each model carries its own SQL as associated functions taking a `&PgPool`.
/// The storage traits in [`crate::store`] wrap these for the API layer.
///
/// # Models
///
/// - `user`: Accounts, password hashes and roles (the credential store)
/// - `vehicle`: Inventory listings and the request body used to write them

pub mod user;
pub mod vehicle;
