use serde::de::IgnoredAny;

use super::{id_query, page_query};
use crate::client::{Api, PageData};
use crate::error::AppResult;
use crate::grid::{GridParams, Page};
use crate::model::{Admin, CreateAdminPayload, UpdateAdminPayload};

/// GET /api/admin/list
pub async fn query_admins(
    api: &Api<'_>,
    params: &GridParams,
    username: Option<&str>,
) -> AppResult<Page<Admin>> {
    let query = page_query(params).set_opt("username", username);
    let data: Option<PageData<Admin>> = api
        .get("/api/admin/list", &query, "获取管理员列表失败")
        .await?;
    Ok(Page::from_data(data.unwrap_or_default()))
}

/// POST /api/admin/create
pub async fn create_admin(api: &Api<'_>, payload: &CreateAdminPayload) -> AppResult<()> {
    let _: IgnoredAny = api
        .post("/api/admin/create", payload, "管理员添加失败")
        .await?;
    Ok(())
}

/// POST /api/admin/update
pub async fn update_admin(api: &Api<'_>, payload: &UpdateAdminPayload) -> AppResult<()> {
    let _: IgnoredAny = api
        .post("/api/admin/update", payload, "管理员密码修改失败")
        .await?;
    Ok(())
}

/// POST /api/admin/remove?id=
pub async fn delete_admin(api: &Api<'_>, id: i64) -> AppResult<()> {
    let _: IgnoredAny = api
        .post_query("/api/admin/remove", &id_query(id), "管理员删除失败")
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::spawn_backend;
    use axum::{extract::Query, routing::{get, post}, Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_query_admins_is_zero_based() {
        let router = Router::new().route(
            "/api/admin/list",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                assert_eq!(q["page"], "1");
                assert_eq!(q["size"], "20");
                assert_eq!(q["username"], "op");
                Json(json!({
                    "code": 200,
                    "success": true,
                    "data": {
                        "content": [{"id": 2, "username": "ops", "passwd": "hash"}],
                        "totalElements": 21
                    }
                }))
            }),
        );
        let client = spawn_backend(router).await;

        let page = query_admins(&client.api(None), &GridParams::new(2, 20), Some("op"))
            .await
            .unwrap();
        assert_eq!(page.total, 21);
        assert_eq!(page.items[0].username, "ops");
    }

    #[tokio::test]
    async fn test_delete_admin_sends_id_in_query() {
        let router = Router::new().route(
            "/api/admin/remove",
            post(|Query(q): Query<HashMap<String, String>>| async move {
                assert_eq!(q["id"], "4");
                Json(json!({"code": 200, "success": true, "data": null}))
            }),
        );
        let client = spawn_backend(router).await;
        delete_admin(&client.api(None), 4).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_admin_failure_uses_server_message() {
        let router = Router::new().route(
            "/api/admin/update",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["id"], 4);
                Json(json!({"code": 1005, "success": false, "message": "admin管理员禁止删除"}))
            }),
        );
        let client = spawn_backend(router).await;

        let payload = UpdateAdminPayload {
            id: 4,
            passwd: "secret1".to_string(),
        };
        let err = update_admin(&client.api(None), &payload).await.unwrap_err();
        assert_eq!(err.code(), Some(1005));
        assert_eq!(err.to_string(), "admin管理员禁止删除");
    }
}
