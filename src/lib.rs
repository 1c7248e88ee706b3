// Library crate for integration tests.
// main.rs has its own mod declarations; this re-exports all modules.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod server;
pub mod sources;
pub mod state;
pub mod telemetry_cache;
