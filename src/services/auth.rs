use serde::Deserialize;
use serde_json::json;

use crate::client::{Api, Credentials};
use crate::error::{AppError, AppResult};

const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// Data of a successful `/api/user/login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResult {
    pub token: String,
    #[serde(rename = "type", default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
}

fn default_token_type() -> String {
    DEFAULT_TOKEN_TYPE.to_string()
}

impl LoginResult {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.token, &self.token_type)
    }
}

/// Administrator login
///
/// A 401/403 here is a rejected password, not an expired session.
pub async fn login(api: &Api<'_>, username: &str, password: &str) -> AppResult<LoginResult> {
    let body = json!({ "username": username, "passwd": password });
    match api.post("/api/user/login", &body, "登录失败").await {
        Err(AppError::SessionExpired) => Err(AppError::business(Some(401), "用户名或密码错误")),
        other => other,
    }
}
