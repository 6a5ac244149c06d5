//! Authentication middleware
//!
//! The console session holds the backend bearer token; every protected API
//! route gets it as an [`AuthContext`] request extension.

use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::client::Credentials;
use crate::error::{AppError, AppResult, ClearSession};

/// Session keys
pub const SESSION_TOKEN_KEY: &str = "token";
pub const SESSION_TOKEN_TYPE_KEY: &str = "token_type";
pub const SESSION_USER_INFO_KEY: &str = "userInfo";

/// Logged-in operator as kept in the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
}

/// Extension carrying the current operator's backend credentials
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub credentials: Credentials,
    pub username: String,
}

/// Store a successful login, replacing the session id
pub async fn store_login(
    session: &Session,
    credentials: &Credentials,
    user: &UserInfo,
) -> AppResult<()> {
    session.cycle_id().await?;
    session.insert(SESSION_TOKEN_KEY, &credentials.token).await?;
    session
        .insert(SESSION_TOKEN_TYPE_KEY, &credentials.token_type)
        .await?;
    session.insert(SESSION_USER_INFO_KEY, user).await?;
    Ok(())
}

/// Credentials of the session; `None` unless token and token type are both set
pub async fn load_context(session: &Session) -> AppResult<Option<AuthContext>> {
    let token: Option<String> = session.get(SESSION_TOKEN_KEY).await?;
    let token_type: Option<String> = session.get(SESSION_TOKEN_TYPE_KEY).await?;
    let (Some(token), Some(token_type)) = (token, token_type) else {
        return Ok(None);
    };

    let credentials = Credentials::new(token, token_type);
    if credentials.authorization().is_none() {
        return Ok(None);
    }

    let user: Option<UserInfo> = session.get(SESSION_USER_INFO_KEY).await?;
    Ok(Some(AuthContext {
        credentials,
        username: user.map(|u| u.username).unwrap_or_default(),
    }))
}

/// Drop the session and its stored record
pub async fn clear_session(session: &Session) -> AppResult<()> {
    session.flush().await?;
    Ok(())
}

/// Paths that don't require authentication
fn is_public_path(path: &str) -> bool {
    // Everything outside /api is the static bundle
    if !path.starts_with("/api") {
        return true;
    }
    matches!(path, "/api/health" | "/api/login" | "/api/logout")
}

/// Authentication middleware
pub async fn auth_layer(session: Session, mut request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path().to_string();

    if !is_public_path(&path) {
        match load_context(&session).await {
            Ok(Some(ctx)) => {
                request.extensions_mut().insert(ctx);
            }
            Ok(None) => {
                tracing::debug!("Unauthenticated request to {}", path);
                return AppError::Unauthorized.into_response();
            }
            Err(e) => return e.into_response(),
        }
    }

    let response = next.run(request).await;

    if response.extensions().get::<ClearSession>().is_some() {
        tracing::info!("Backend rejected credentials on {}, clearing session", path);
        if let Err(e) = clear_session(&session).await {
            tracing::warn!("Failed to clear session: {}", e);
        }
    }
    response
}
