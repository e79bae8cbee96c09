//! Logging initialization shared by the binaries.
pub mod config;
pub mod tracing;

pub use config::Config;
