use serde::de::IgnoredAny;

use super::{id_query, page_query};
use crate::client::{Api, PageData};
use crate::error::{AppError, AppResult};
use crate::grid::{GridParams, Page};
use crate::model::{S3Config, S3NameOption};

/// Backend code for a config still referenced by users
pub const CODE_CONFIG_IN_USE: i64 = 1007;

/// GET /s3/storage/list
pub async fn query_s3_storages(
    api: &Api<'_>,
    params: &GridParams,
    s3_name: Option<&str>,
) -> AppResult<Page<S3Config>> {
    let query = page_query(params).set_opt("s3Name", s3_name);
    let data: Option<PageData<S3Config>> = api
        .get("/s3/storage/list", &query, "获取S3存储配置列表失败")
        .await?;
    Ok(Page::from_data(data.unwrap_or_default()))
}

pub async fn create_s3_storage(api: &Api<'_>, config: &S3Config) -> AppResult<()> {
    let _: IgnoredAny = api
        .post("/s3/storage/create", config, "创建S3存储配置失败")
        .await?;
    Ok(())
}

pub async fn update_s3_storage(api: &Api<'_>, config: &S3Config) -> AppResult<()> {
    let _: IgnoredAny = api
        .post("/s3/storage/update", config, "更新S3存储配置失败")
        .await?;
    Ok(())
}

/// POST /s3/storage/remove?id=
pub async fn delete_s3_storage(api: &Api<'_>, id: i64) -> AppResult<()> {
    let result: AppResult<IgnoredAny> = api
        .post_query("/s3/storage/remove", &id_query(id), "删除S3存储配置失败")
        .await;
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.code() == Some(CODE_CONFIG_IN_USE) => Err(AppError::business(
            Some(CODE_CONFIG_IN_USE),
            "当前配置正在使用中",
        )),
        Err(e) => Err(e),
    }
}

/// POST /s3/storage/get/s3names
pub async fn get_s3_names(api: &Api<'_>) -> AppResult<Vec<S3NameOption>> {
    let names: Option<Vec<S3NameOption>> = api
        .post("/s3/storage/get/s3names", &serde_json::json!({}), "获取S3名称列表失败")
        .await?;
    Ok(names.unwrap_or_default())
}
