// Library interface for testing

// Declare all modules
pub mod config;
pub mod constants;
pub mod db;
pub mod models;
pub mod queries;
pub mod schema;
pub mod serve;
pub mod sessions;
pub mod store;
pub mod validation;

// Re-export the expected database version for convenience
pub use constants::EXPECTED_DB_VERSION;
