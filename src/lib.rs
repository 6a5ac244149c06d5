//! SftpToS3 console - web administration for the SFTP-to-S3 bridge
//!
//! This crate serves the operator console: list grids, forms and the
//! monitoring dashboard, all backed by the bridge server's REST API.

pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod grid;
pub mod handlers;
pub mod middleware;
pub mod model;
pub mod monitor;
pub mod routes;
pub mod services;
pub mod state;
pub mod task;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
