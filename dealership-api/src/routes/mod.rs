/// API route handlers
///
/// Handlers are organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Login
/// - `vehicles`: Inventory reads (public) and writes (ADMIN)

pub mod auth;
pub mod health;
pub mod vehicles;
