use super::page_query;
use crate::client::{Api, PageData, Query};
use crate::error::AppResult;
use crate::grid::{GridParams, Page};
use crate::model::{ClientSession, DailyStats, DailyStatsRecord, FileOperation, TrafficPoint};

/// GET /api/audit/client/list
pub async fn query_client_sessions(
    api: &Api<'_>,
    params: &GridParams,
    username: Option<&str>,
) -> AppResult<Page<ClientSession>> {
    let query = page_query(params).set_opt("username", username);
    let data: Option<PageData<ClientSession>> = api
        .get("/api/audit/client/list", &query, "获取客户端连接记录失败")
        .await?;
    Ok(Page::from_data(data.unwrap_or_default()))
}

/// GET /api/audit/opt/list
pub async fn query_file_operations(
    api: &Api<'_>,
    params: &GridParams,
    client_name: Option<&str>,
) -> AppResult<Page<FileOperation>> {
    let query = page_query(params).set_opt("clientName", client_name);
    let data: Option<PageData<FileOperation>> = api
        .get("/api/audit/opt/list", &query, "获取文件操作记录失败")
        .await?;
    Ok(Page::from_data(data.unwrap_or_default()))
}

/// GET `path`, `backend.daily_stats_path` in the config
pub async fn daily_stats(api: &Api<'_>, path: &str) -> AppResult<DailyStats> {
    let record: Option<DailyStatsRecord> = api
        .get(path, &Query::new(), "获取统计数据失败")
        .await?;
    Ok(record.unwrap_or_default().into())
}

/// GET /api/audit/statistics/traffic
pub async fn traffic(api: &Api<'_>, time_type: Option<&str>) -> AppResult<Vec<TrafficPoint>> {
    let query = Query::new().set_opt("timeType", time_type);
    let points: Option<Vec<TrafficPoint>> = api
        .get("/api/audit/statistics/traffic", &query, "获取流量统计失败")
        .await?;
    Ok(points.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AuthStatus, Counter};
    use crate::testing::spawn_backend;
    use axum::{extract::Query as QueryParams, routing::get, Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_client_sessions_and_operations() {
        let router = Router::new()
            .route(
                "/api/audit/client/list",
                get(|QueryParams(q): QueryParams<HashMap<String, String>>| async move {
                    assert_eq!(q["page"], "0");
                    Json(json!({
                        "code": 200,
                        "data": {
                            "content": [{"id": 1, "username": "alice", "clientIp": "10.0.0.5", "authStatus": 1}],
                            "totalElements": 1
                        }
                    }))
                }),
            )
            .route(
                "/api/audit/opt/list",
                get(|QueryParams(q): QueryParams<HashMap<String, String>>| async move {
                    assert_eq!(q["clientName"], "alice");
                    Json(json!({"code": 200, "data": {"content": [], "totalElements": 0}}))
                }),
            );
        let client = spawn_backend(router).await;
        let api = client.api(None);

        let sessions = query_client_sessions(&api, &GridParams::default(), None)
            .await
            .unwrap();
        assert_eq!(sessions.items[0].auth_status, AuthStatus::Success);

        let ops = query_file_operations(&api, &GridParams::default(), Some("alice"))
            .await
            .unwrap();
        assert_eq!(ops.total, 0);
        assert!(ops.items.is_empty());
    }

    #[tokio::test]
    async fn test_daily_stats_and_traffic() {
        let router = Router::new()
            .route(
                "/api/audit/statistics/now",
                get(|| async {
                    Json(json!({
                        "code": 200,
                        "data": {"uploadCountVal": 4, "uploadSuccessVal": 3, "uploadFailureVal": 1}
                    }))
                }),
            )
            .route(
                "/api/audit/statistics/traffic",
                get(|QueryParams(q): QueryParams<HashMap<String, String>>| async move {
                    assert_eq!(q["timeType"], "day");
                    Json(json!({
                        "code": 200,
                        "data": [{"timeLabel": "10:00", "uploadSize": "12", "downloadSize": "3"}]
                    }))
                }),
            );
        let client = spawn_backend(router).await;
        let api = client.api(None);

        let stats = daily_stats(&api, "/api/audit/statistics/now").await.unwrap();
        assert_eq!(stats.upload, Counter { total: 4, success: 3, failed: 1 });

        let points = traffic(&api, Some("day")).await.unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].upload_size, "12");
    }
}
