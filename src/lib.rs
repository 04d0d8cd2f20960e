/// The current version of zipic-mcp, sourced from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod app;
pub mod compress;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod mcp;
