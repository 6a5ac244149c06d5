use std::sync::Arc;

use crate::client::BridgeClient;
use crate::config::Config;
use crate::error::AppResult;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,
    /// Bridge backend client
    pub client: BridgeClient,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config) -> AppResult<Self> {
        let client = BridgeClient::new(&config.backend)?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }
}
