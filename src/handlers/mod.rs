//! Request handlers module

use serde::Deserialize;

pub mod admin;
pub mod auth;
pub mod monitor;
pub mod s3;
pub mod user;

/// Row delete action
#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub id: String,
}
