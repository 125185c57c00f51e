/// Database layer
///
/// - `pool`: Postgres connection pool with a startup health check
/// - `migrations`: embedded schema migrations
///
/// Models and their SQL are in [`crate::models`].

pub mod migrations;
pub mod pool;
