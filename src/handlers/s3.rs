//! S3 storage configuration handlers

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use super::DeleteRequest;
use crate::error::AppResult;
use crate::forms::s3::S3Form;
use crate::forms::{parse_id, FormMode};
use crate::grid::{GridParams, GridResponse};
use crate::middleware::AuthContext;
use crate::model::{S3ConfigRow, SelectOption};
use crate::routes::ApiResponse;
use crate::services;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Filter {
    pub s3_name: Option<String>,
}

/// GET /api/s3
pub async fn query_s3_storages(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<GridParams>,
    Query(filter): Query<S3Filter>,
) -> AppResult<Json<GridResponse<S3ConfigRow>>> {
    let api = state.client.api(Some(&auth.credentials));
    let s3_name = filter.s3_name.as_deref();
    let grid = GridResponse::fetch(params, move |p| async move {
        services::s3::query_s3_storages(&api, &p, s3_name)
            .await
            .map(|page| page.map(S3ConfigRow::from))
    })
    .await?;
    Ok(Json(grid))
}

/// GET /api/s3/names
pub async fn s3_names(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> AppResult<Json<ApiResponse<Vec<SelectOption>>>> {
    let api = state.client.api(Some(&auth.credentials));
    let names = services::s3::get_s3_names(&api).await?;
    Ok(Json(ApiResponse::success(
        names.iter().map(SelectOption::from).collect(),
    )))
}

/// POST /api/s3/create
pub async fn create_s3_storage(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(form): Json<S3Form>,
) -> AppResult<Json<ApiResponse<()>>> {
    let config = form.into_config(FormMode::Create)?;
    let api = state.client.api(Some(&auth.credentials));
    services::s3::create_s3_storage(&api, &config).await?;

    tracing::info!("{} created S3 config {}", auth.username, config.s3_name);
    Ok(Json(ApiResponse::action("添加S3配置成功")))
}

/// POST /api/s3/update
pub async fn update_s3_storage(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(form): Json<S3Form>,
) -> AppResult<Json<ApiResponse<()>>> {
    let config = form.into_config(FormMode::Edit)?;
    let api = state.client.api(Some(&auth.credentials));
    services::s3::update_s3_storage(&api, &config).await?;

    tracing::info!("{} updated S3 config {}", auth.username, config.s3_name);
    Ok(Json(ApiResponse::action("编辑S3配置成功")))
}

/// POST /api/s3/remove
pub async fn delete_s3_storage(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<DeleteRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = parse_id(&req.id)?;
    let api = state.client.api(Some(&auth.credentials));
    services::s3::delete_s3_storage(&api, id).await?;

    tracing::info!("{} deleted S3 config {}", auth.username, id);
    Ok(Json(ApiResponse::action("删除S3配置成功")))
}
