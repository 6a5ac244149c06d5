//! Monitor dashboard handlers

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthContext;
use crate::model::TrafficPoint;
use crate::monitor::{BackendSource, Dashboard, DashboardSnapshot};
use crate::routes::ApiResponse;
use crate::services;
use crate::state::AppState;

/// GET /api/monitor
///
/// Manual refresh. Feeds that failed are listed in `feedErrors`; when none of
/// them loaded the refresh is answered as a failure, so the dashboard keeps
/// what it shows.
pub async fn snapshot(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> AppResult<Json<ApiResponse<DashboardSnapshot>>> {
    let source = BackendSource::new(&state, auth.credentials);
    let snapshot = Dashboard::new(source).refresh().await?;
    if snapshot.is_unavailable() {
        let message = snapshot.last_error.unwrap_or_default();
        return Err(AppError::business(None, message));
    }
    Ok(Json(ApiResponse::success(snapshot)))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficQuery {
    pub time_type: Option<String>,
}

/// GET /api/monitor/traffic
pub async fn traffic(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<TrafficQuery>,
) -> AppResult<Json<ApiResponse<Vec<TrafficPoint>>>> {
    let api = state.client.api(Some(&auth.credentials));
    let points = services::audit::traffic(&api, query.time_type.as_deref()).await?;
    Ok(Json(ApiResponse::success(points)))
}
