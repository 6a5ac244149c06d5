//! Dashboard websocket
//!
//! Each connection owns one poller that pushes a snapshot immediately and then
//! once per monitor interval. The poller is cancelled when the socket closes.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    Extension,
};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tower_sessions::Session;
use uuid::Uuid;

use super::{BackendSource, Dashboard, DashboardSnapshot};
use crate::middleware::AuthContext;
use crate::routes::pages::LOGIN_ROUTE;
use crate::state::AppState;
use crate::task::{Flow, ScheduledTask};

/// Messages pushed to the dashboard
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    #[serde(rename = "snapshot")]
    Snapshot(Box<DashboardSnapshot>),
    /// Carries the route the dashboard should navigate to
    #[serde(rename = "sessionExpired")]
    SessionExpired(String),
    #[serde(rename = "pong")]
    Pong,
}

/// Messages sent by the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    #[serde(rename = "refresh")]
    Refresh,
    #[serde(rename = "ping")]
    Ping,
}

/// GET /api/monitor/ws
pub async fn serve_ws(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    session: Session,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, auth, session))
}

async fn handle_socket(socket: WebSocket, state: AppState, auth: AuthContext, session: Session) {
    let conn_id = Uuid::new_v4();
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    tracing::debug!("Monitor websocket {} opened by {}", conn_id, auth.username);

    let source = BackendSource::new(&state, auth.credentials.clone());
    let dashboard = Arc::new(Dashboard::new(source));

    let poll_tx = tx.clone();
    let poller = ScheduledTask::spawn(
        format!("monitor-{}", conn_id),
        state.config.monitor.interval(),
        move || {
            let dashboard = dashboard.clone();
            let tx = poll_tx.clone();
            let session = session.clone();
            async move { poll(&dashboard, &tx, &session).await }
        },
    );

    // Outgoing messages
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let text = match serde_json::to_string(&msg) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!("Failed to encode monitor message: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    // Incoming messages
    let recv = async {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(ClientMessage::Refresh) => poller.trigger(),
                    Ok(ClientMessage::Ping) => {
                        let _ = tx.send(ServerMessage::Pong);
                    }
                    Err(_) => tracing::debug!("Ignoring monitor message: {}", text),
                },
                Message::Close(_) => break,
                _ => {}
            }
        }
    };

    tokio::select! {
        _ = &mut send_task => {}
        _ = recv => {}
    }

    poller.cancel();
    send_task.abort();
    tracing::debug!("Monitor websocket {} closed", conn_id);
}

/// One poll: push the new snapshot, or end the session on expiry
async fn poll(
    dashboard: &Dashboard<BackendSource>,
    tx: &mpsc::UnboundedSender<ServerMessage>,
    session: &Session,
) -> Flow {
    match dashboard.refresh().await {
        Ok(snapshot) => {
            if tx.send(ServerMessage::Snapshot(Box::new(snapshot))).is_err() {
                return Flow::Stop;
            }
            Flow::Continue
        }
        Err(e) => {
            tracing::info!("Monitor poller stopped: {}", e);
            if let Err(e) = session.flush().await {
                tracing::warn!("Failed to clear session: {}", e);
            }
            let _ = tx.send(ServerMessage::SessionExpired(LOGIN_ROUTE.to_string()));
            Flow::Stop
        }
    }
}
