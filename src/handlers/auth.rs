//! Authentication handlers
//!
//! Implements login, logout, current session and the page table

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{clear_session, store_login, AuthContext, UserInfo};
use crate::routes::pages::{self, PageRoute, Resolution};
use crate::routes::ApiResponse;
use crate::services;
use crate::state::AppState;

/// Every console operator is a bridge administrator
const CAN_ADMIN: bool = true;

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Current operator
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub username: String,
    pub can_admin: bool,
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<SessionInfo>>> {
    let username = req.username.trim();
    if username.is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest("请输入用户名和密码".to_string()));
    }

    let result = services::auth::login(&state.client.api(None), username, &req.password)
        .await
        .inspect_err(|e| tracing::warn!("Login failed for {}: {}", username, e))?;

    let user = UserInfo {
        id: result.id,
        username: result.username.clone(),
    };
    store_login(&session, &result.credentials(), &user).await?;
    tracing::info!("Operator {} logged in", user.username);

    Ok(Json(
        ApiResponse::success(SessionInfo {
            username: user.username,
            can_admin: CAN_ADMIN,
        })
        .with_message("登录成功"),
    ))
}

/// POST /api/logout
pub async fn logout(session: Session) -> AppResult<Json<ApiResponse<()>>> {
    clear_session(&session).await?;
    Ok(Json(ApiResponse::success_msg("已成功登出")))
}

/// GET /api/session
pub async fn current_session(
    Extension(auth): Extension<AuthContext>,
) -> Json<ApiResponse<SessionInfo>> {
    Json(ApiResponse::success(SessionInfo {
        username: auth.username,
        can_admin: CAN_ADMIN,
    }))
}

#[derive(Debug, Deserialize)]
pub struct RoutesQuery {
    pub path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RoutesView {
    pub routes: &'static [PageRoute],
    pub menu: Vec<PageRoute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<Resolution>,
}

/// GET /api/routes
pub async fn page_routes(Query(query): Query<RoutesQuery>) -> Json<ApiResponse<RoutesView>> {
    Json(ApiResponse::success(RoutesView {
        routes: pages::ROUTES,
        menu: pages::menu_for(CAN_ADMIN),
        resolved: query.path.as_deref().map(|p| pages::resolve(p, CAN_ADMIN)),
    }))
}
