use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::forms::FieldErrors;
use crate::handlers;
use crate::middleware::auth_layer;
use crate::monitor;
use crate::state::AppState;

pub mod health;
pub mod pages;

/// API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Field errors of a rejected form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    /// Set after a successful row action; the grid re-fetches the same range
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub reload: bool,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: None,
            message: "success".to_string(),
            data: Some(data),
            errors: None,
            reload: false,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn failure(code: Option<i64>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code,
            message: message.into(),
            data: None,
            errors: None,
            reload: false,
        }
    }

    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = Some(errors);
        self
    }
}

impl ApiResponse<()> {
    pub fn success_msg(message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: None,
            message: message.into(),
            data: None,
            errors: None,
            reload: false,
        }
    }

    /// Successful row action
    pub fn action(message: impl Into<String>) -> Self {
        Self {
            reload: true,
            ..Self::success_msg(message)
        }
    }
}

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    // Session store (in-memory; sessions end with the process)
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(state.config.session.secure)
        .with_http_only(true);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth routes
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/session", get(handlers::auth::current_session))
        .route("/routes", get(handlers::auth::page_routes))
        // Admin routes
        .route("/admins", get(handlers::admin::query_admins))
        .route("/admins/create", post(handlers::admin::create_admin))
        .route("/admins/update", post(handlers::admin::update_admin))
        .route("/admins/remove", post(handlers::admin::delete_admin))
        // User routes
        .route("/users", get(handlers::user::query_users))
        .route("/users/form", get(handlers::user::user_form))
        .route("/users/create", post(handlers::user::create_user))
        .route("/users/update", post(handlers::user::update_user))
        .route("/users/remove", post(handlers::user::delete_user))
        // S3 storage routes
        .route("/s3", get(handlers::s3::query_s3_storages))
        .route("/s3/names", get(handlers::s3::s3_names))
        .route("/s3/create", post(handlers::s3::create_s3_storage))
        .route("/s3/update", post(handlers::s3::update_s3_storage))
        .route("/s3/remove", post(handlers::s3::delete_s3_storage))
        // Monitor routes
        .route("/monitor", get(handlers::monitor::snapshot))
        .route("/monitor/traffic", get(handlers::monitor::traffic))
        .route("/monitor/ws", get(monitor::ws::serve_ws));

    // Static file service for the console bundle, falling back to
    // index.html for client-side routing
    let static_dir = state.config.static_dir.clone();
    let serve_dir = ServeDir::new(&static_dir)
        .not_found_service(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(serve_dir)
        .layer(middleware::from_fn(auth_layer))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
