//! FitTrack backend library
//!
//! Exposes the backend modules for the binary and integration tests.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod rate_limit;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
