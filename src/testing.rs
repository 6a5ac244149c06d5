//! Test helpers: fake bridge backends served on an ephemeral port

use axum::Router;
use tokio::net::TcpListener;

use crate::client::BridgeClient;
use crate::config::BackendConfig;

/// Serve `router` on 127.0.0.1 and return its backend config
pub async fn spawn_backend_config(router: Router) -> BackendConfig {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    BackendConfig {
        base_url: format!("http://{}", addr),
        timeout_secs: 5,
        ..BackendConfig::default()
    }
}

/// Serve `router` on 127.0.0.1 and return a client pointed at it
pub async fn spawn_backend(router: Router) -> BridgeClient {
    let config = spawn_backend_config(router).await;
    BridgeClient::new(&config).unwrap()
}
