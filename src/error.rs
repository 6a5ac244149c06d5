use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::forms::FieldErrors;
use crate::routes::pages::LOGIN_ROUTE;
use crate::routes::ApiResponse;

/// Application error types
///
/// The `Display` text of every variant is the message shown to the operator.
#[derive(Error, Debug)]
pub enum AppError {
    /// No credentials in the console session
    #[error("请先登录")]
    Unauthorized,

    /// Backend answered 401/403
    #[error("登录已过期或权限不足，请重新登录")]
    SessionExpired,

    /// Backend could not be reached or did not answer
    #[error("服务器无响应，请重试")]
    Transport(String),

    /// Backend answered with a non-2xx status other than 401/403
    #[error("网络请求错误: {0}")]
    Status(u16),

    /// Backend envelope with `success:false`
    #[error("{message}")]
    Business { code: Option<i64>, message: String },

    /// Backend body could not be decoded
    #[error("响应数据格式错误")]
    Decode(String),

    #[error("表单校验失败")]
    Validation(FieldErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Response extension telling the auth middleware to drop the session
#[derive(Debug, Clone, Copy)]
pub struct ClearSession;

impl AppError {
    /// Business failure helper used by the services
    pub fn business(code: Option<i64>, message: impl Into<String>) -> Self {
        AppError::Business {
            code,
            message: message.into(),
        }
    }

    /// Backend business code, if any
    pub fn code(&self) -> Option<i64> {
        match self {
            AppError::Business { code, .. } => *code,
            AppError::Status(status) => Some(i64::from(*status)),
            _ => None,
        }
    }

    /// Whether the error ends the operator's session
    pub fn is_session_expired(&self) -> bool {
        matches!(self, AppError::SessionExpired | AppError::Unauthorized)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();

        match self {
            AppError::Unauthorized | AppError::SessionExpired => {
                let expired = matches!(self, AppError::SessionExpired);
                let mut response = (
                    StatusCode::SEE_OTHER,
                    [(header::LOCATION, LOGIN_ROUTE)],
                    Json(ApiResponse::<()>::failure(Some(401), message)),
                )
                    .into_response();
                if expired {
                    response.extensions_mut().insert(ClearSession);
                }
                response
            }
            AppError::Business { code, .. } => {
                (StatusCode::OK, Json(ApiResponse::<()>::failure(code, message))).into_response()
            }
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::failure(Some(400), message).with_errors(errors)),
            )
                .into_response(),
            AppError::BadRequest(_) => (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::failure(Some(400), message)),
            )
                .into_response(),
            AppError::Transport(ref detail) => {
                tracing::warn!("Backend unreachable: {}", detail);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(ApiResponse::<()>::failure(None, message)),
                )
                    .into_response()
            }
            AppError::Status(status) => (
                StatusCode::BAD_GATEWAY,
                Json(ApiResponse::<()>::failure(Some(i64::from(status)), message)),
            )
                .into_response(),
            AppError::Decode(ref detail) => {
                tracing::warn!("Backend response could not be decoded: {}", detail);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(ApiResponse::<()>::failure(None, message)),
                )
                    .into_response()
            }
            other => {
                tracing::error!("Internal error: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<()>::failure(Some(500), "服务端异常，请联系管理员")),
                )
                    .into_response()
            }
        }
    }
}

/// Result type alias for application
pub type AppResult<T> = Result<T, AppError>;

/// Helper to convert anyhow errors to AppError
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_expired_redirects_and_clears() {
        let response = AppError::SessionExpired.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], LOGIN_ROUTE);
        assert!(response.extensions().get::<ClearSession>().is_some());
    }

    #[test]
    fn test_unauthorized_redirects_without_clearing() {
        let response = AppError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(response.extensions().get::<ClearSession>().is_none());
    }

    #[test]
    fn test_business_error_is_verbatim() {
        let err = AppError::business(Some(1001), "用户名已存在");
        assert_eq!(err.to_string(), "用户名已存在");
        assert_eq!(err.code(), Some(1001));
        assert_eq!(err.into_response().status(), StatusCode::OK);
    }

    #[test]
    fn test_transport_and_status_messages() {
        assert_eq!(AppError::Transport("refused".into()).to_string(), "服务器无响应，请重试");
        assert_eq!(AppError::Status(502).to_string(), "网络请求错误: 502");
        assert_eq!(
            AppError::Status(500).into_response().status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
