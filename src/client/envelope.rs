//! Backend response envelope
//!
//! Every bridge endpoint answers `{code, success, message, data}`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Business code for a successful call
pub const CODE_SUCCESS: i64 = 200;

/// Raw envelope; `data` is decoded only after the envelope reports success
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Envelope {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    /// `success:true` or `code:200` both count as success
    pub fn is_success(&self) -> bool {
        self.success == Some(true) || self.code == Some(CODE_SUCCESS)
    }

    /// Server message, treating an empty string as absent
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }

    /// Normalize into the payload or a business error carrying the server message
    pub fn into_result<T: DeserializeOwned>(self, fallback: &str) -> AppResult<T> {
        if !self.is_success() {
            let message = self.message().unwrap_or(fallback).to_string();
            return Err(AppError::business(self.code, message));
        }
        serde_json::from_value(self.data).map_err(|e| AppError::Decode(e.to_string()))
    }
}

/// Spring page payload
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
}

impl<T> Default for PageData<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_by_flag_or_code() {
        let by_flag: Envelope = serde_json::from_value(json!({"success": true})).unwrap();
        let by_code: Envelope = serde_json::from_value(json!({"code": 200})).unwrap();
        let neither: Envelope =
            serde_json::from_value(json!({"code": 1001, "success": false})).unwrap();

        assert!(by_flag.is_success());
        assert!(by_code.is_success());
        assert!(!neither.is_success());
    }

    #[test]
    fn test_failure_uses_server_message() {
        let env: Envelope = serde_json::from_value(
            json!({"code": 1007, "success": false, "message": "当前配置正在使用中"}),
        )
        .unwrap();
        let err = env.into_result::<()>("删除失败").unwrap_err();
        assert_eq!(err.to_string(), "当前配置正在使用中");
        assert_eq!(err.code(), Some(1007));
    }

    #[test]
    fn test_failure_with_empty_message_uses_fallback() {
        let env: Envelope =
            serde_json::from_value(json!({"code": 500, "success": false, "message": ""}))
                .unwrap();
        let err = env.into_result::<()>("获取用户列表失败").unwrap_err();
        assert_eq!(err.to_string(), "获取用户列表失败");
    }

    #[test]
    fn test_null_data_decodes_as_unit() {
        let env: Envelope =
            serde_json::from_value(json!({"code": 200, "success": true, "data": null})).unwrap();
        env.into_result::<()>("x").unwrap();
    }

    #[test]
    fn test_page_data() {
        let page: PageData<u32> =
            serde_json::from_value(json!({"content": [1, 2, 3], "totalElements": 13})).unwrap();
        assert_eq!(page.content, vec![1, 2, 3]);
        assert_eq!(page.total_elements, 13);
    }
}
