// Library exports for testing
pub mod api;
pub mod config;
pub mod errors;
pub mod generator;
