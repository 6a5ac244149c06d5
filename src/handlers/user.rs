//! User handlers
//!
//! User grid, form view and row actions

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use super::DeleteRequest;
use crate::client::Api;
use crate::error::AppResult;
use crate::forms::parse_id;
use crate::forms::user::{UserForm, UserFormView};
use crate::grid::{GridParams, GridResponse};
use crate::middleware::AuthContext;
use crate::model::{S3NameOption, User};
use crate::routes::ApiResponse;
use crate::services;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct UserFilter {
    pub username: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserFormQuery {
    pub id: Option<String>,
}

/// GET /api/users
pub async fn query_users(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<GridParams>,
    Query(filter): Query<UserFilter>,
) -> AppResult<Json<GridResponse<User>>> {
    let api = state.client.api(Some(&auth.credentials));
    let username = filter.username.as_deref();
    let grid = GridResponse::fetch(params, move |p| async move {
        services::user::query_users(&api, &p, username).await
    })
    .await?;
    Ok(Json(grid))
}

/// S3 options for the form; a failed fetch leaves the list empty
async fn s3_options(api: &Api<'_>) -> AppResult<(Vec<S3NameOption>, Option<String>)> {
    match services::s3::get_s3_names(api).await {
        Ok(options) => Ok((options, None)),
        Err(e) if e.is_session_expired() => Err(e),
        Err(e) => {
            tracing::warn!("Failed to load S3 names: {}", e);
            Ok((Vec::new(), Some(e.to_string())))
        }
    }
}

/// GET /api/users/form
///
/// Without `id` this is the create form; with `id` the edit form, prefilled
/// from the user's details and with its s3Link matched against the options.
pub async fn user_form(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<UserFormQuery>,
) -> AppResult<Json<ApiResponse<UserFormView>>> {
    let api = state.client.api(Some(&auth.credentials));

    let view = match query.id.as_deref().filter(|id| !id.trim().is_empty()) {
        None => {
            let (options, options_error) = s3_options(&api).await?;
            UserFormView::create(&options, options_error)
        }
        Some(id) => {
            let id = parse_id(id)?;
            let (user, options) = tokio::join!(
                services::user::get_user_details(&api, id),
                s3_options(&api)
            );
            let (options, options_error) = options?;
            UserFormView::edit(&user?, &options, options_error)
        }
    };
    Ok(Json(ApiResponse::success(view)))
}

/// POST /api/users/create
pub async fn create_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(form): Json<UserForm>,
) -> AppResult<Json<ApiResponse<()>>> {
    let payload = form.into_create_payload()?;
    let api = state.client.api(Some(&auth.credentials));
    services::user::create_user(&api, &payload).await?;

    tracing::info!("{} created user {}", auth.username, payload.username);
    Ok(Json(ApiResponse::action("添加用户成功")))
}

/// POST /api/users/update
pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(form): Json<UserForm>,
) -> AppResult<Json<ApiResponse<()>>> {
    let payload = form.into_update_payload()?;
    let api = state.client.api(Some(&auth.credentials));
    services::user::update_user(&api, &payload).await?;

    tracing::info!("{} updated user {}", auth.username, payload.id);
    Ok(Json(ApiResponse::action("编辑用户成功")))
}

/// POST /api/users/remove
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<DeleteRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = parse_id(&req.id)?;
    let api = state.client.api(Some(&auth.credentials));
    services::user::delete_user(&api, id).await?;

    tracing::info!("{} deleted user {}", auth.username, id);
    Ok(Json(ApiResponse::action("删除用户成功")))
}
