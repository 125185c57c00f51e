//! # Dealership API Server Library
//!
//! HTTP surface of the dealership inventory service: login, public inventory
//! reads, and admin-only inventory writes.
//!
//! ## Modules
//!
//! - `app`: Application state, router builder and role-gate middleware
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
