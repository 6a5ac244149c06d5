use serde::de::IgnoredAny;

use super::{id_query, page_query};
use crate::client::{Api, PageData};
use crate::error::AppResult;
use crate::grid::{GridParams, Page};
use crate::model::{BackendUser, CreateUserPayload, UpdateUserPayload, User};

/// GET /api/user/list, newest first
pub async fn query_users(
    api: &Api<'_>,
    params: &GridParams,
    username: Option<&str>,
) -> AppResult<Page<User>> {
    let query = page_query(params)
        .set("sort", "createTime")
        .set_opt("username", username);
    let data: Option<PageData<BackendUser>> = api
        .get("/api/user/list", &query, "获取用户列表失败")
        .await?;
    Ok(Page::from_data(data.unwrap_or_default()))
}

/// GET /api/user/details?id=
pub async fn get_user_details(api: &Api<'_>, id: i64) -> AppResult<User> {
    let user: BackendUser = api
        .get("/api/user/details", &id_query(id), "获取用户详情失败")
        .await?;
    Ok(user.into())
}

pub async fn create_user(api: &Api<'_>, payload: &CreateUserPayload) -> AppResult<()> {
    let _: IgnoredAny = api
        .post("/api/user/create", payload, "创建用户失败")
        .await?;
    Ok(())
}

pub async fn update_user(api: &Api<'_>, payload: &UpdateUserPayload) -> AppResult<()> {
    let _: IgnoredAny = api
        .post("/api/user/update", payload, "更新用户失败")
        .await?;
    Ok(())
}

pub async fn delete_user(api: &Api<'_>, id: i64) -> AppResult<()> {
    let _: IgnoredAny = api
        .post_query("/api/user/remove", &id_query(id), "删除用户失败")
        .await?;
    Ok(())
}
