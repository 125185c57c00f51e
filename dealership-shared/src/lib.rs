//! # Dealership Shared Library
//!
//! Domain types, storage and authentication used by the dealership API.
//!
//! ## Module Organization
//!
//! - `models`: Users, vehicles and their SQL
//! - `store`: Storage traits with Postgres and in-memory implementations
//! - `auth`: Password hashing, session tokens, login check and role gate
//! - `seed`: Bootstrap administrator account
//! - `db`: Connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;
pub mod seed;
pub mod store;
