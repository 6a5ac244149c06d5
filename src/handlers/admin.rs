//! Administrator handlers

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::client::Api;
use crate::error::{AppError, AppResult};
use crate::forms::admin::{AdminCreateForm, AdminDeleteForm, AdminPasswordForm};
use crate::forms::parse_id;
use crate::grid::{GridParams, GridResponse};
use crate::middleware::AuthContext;
use crate::model::{AdminRow, SYSTEM_ADMIN};
use crate::routes::ApiResponse;
use crate::services;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AdminFilter {
    pub username: Option<String>,
}

/// GET /api/admins
pub async fn query_admins(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<GridParams>,
    Query(filter): Query<AdminFilter>,
) -> AppResult<Json<GridResponse<AdminRow>>> {
    let api = state.client.api(Some(&auth.credentials));
    let username = filter.username.as_deref();
    let grid = GridResponse::fetch(params, move |p| async move {
        services::admin::query_admins(&api, &p, username)
            .await
            .map(|page| page.map(AdminRow::from))
    })
    .await?;
    Ok(Json(grid))
}

/// POST /api/admins/create
pub async fn create_admin(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(form): Json<AdminCreateForm>,
) -> AppResult<Json<ApiResponse<()>>> {
    let payload = form.into_payload()?;
    let api = state.client.api(Some(&auth.credentials));
    services::admin::create_admin(&api, &payload).await?;

    tracing::info!("{} created administrator {}", auth.username, payload.username);
    Ok(Json(ApiResponse::action("管理员添加成功")))
}

/// POST /api/admins/update
pub async fn update_admin(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(form): Json<AdminPasswordForm>,
) -> AppResult<Json<ApiResponse<()>>> {
    let payload = form.into_payload()?;
    let api = state.client.api(Some(&auth.credentials));
    services::admin::update_admin(&api, &payload).await?;

    tracing::info!("{} changed password of administrator {}", auth.username, payload.id);
    Ok(Json(ApiResponse::action("管理员密码修改成功")))
}

/// Whether `id` is the built-in administrator, as listed by the backend
async fn is_system_admin(api: &Api<'_>, id: i64) -> AppResult<bool> {
    let page =
        services::admin::query_admins(api, &GridParams::new(1, 100), Some(SYSTEM_ADMIN)).await?;
    Ok(page.items.iter().any(|admin| admin.id == id && admin.is_system()))
}

/// POST /api/admins/remove
pub async fn delete_admin(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(form): Json<AdminDeleteForm>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = parse_id(&form.id)?;
    let api = state.client.api(Some(&auth.credentials));
    if form.username == SYSTEM_ADMIN || is_system_admin(&api, id).await? {
        return Err(AppError::business(None, "系统默认管理员不可删除"));
    }
    services::admin::delete_admin(&api, id).await?;

    tracing::info!("{} deleted administrator {}", auth.username, id);
    Ok(Json(ApiResponse::action("管理员删除成功")))
}
