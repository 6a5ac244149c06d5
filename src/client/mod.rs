//! Bridge backend client
//!
//! Thin reqwest wrapper issuing REST calls against the SFTP-to-S3 bridge and
//! normalizing its envelopes into [`AppResult`]. Credentials are an explicit
//! argument of every call; the client itself holds no session state.

mod envelope;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::BackendConfig;
use crate::error::{AppError, AppResult};

pub use envelope::{Envelope, PageData, CODE_SUCCESS};

/// Bearer credentials issued by the backend login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub token: String,
    pub token_type: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>, token_type: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            token_type: token_type.into(),
        }
    }

    /// `Authorization` header value; only when both parts are present
    pub fn authorization(&self) -> Option<String> {
        if self.token.is_empty() || self.token_type.is_empty() {
            return None;
        }
        Some(format!("{} {}", self.token_type, self.token))
    }
}

/// Query string pairs; `None` and empty values are left out
#[derive(Debug, Clone, Default)]
pub struct Query(Vec<(&'static str, String)>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &'static str, value: impl ToString) -> Self {
        self.0.push((key, value.to_string()));
        self
    }

    pub fn set_opt<V: ToString>(self, key: &'static str, value: Option<V>) -> Self {
        match value.map(|v| v.to_string()) {
            Some(v) if !v.is_empty() => self.set(key, v),
            _ => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.0
    }
}

/// Shared HTTP client for the bridge backend
#[derive(Debug, Clone)]
pub struct BridgeClient {
    http: reqwest::Client,
    base_url: String,
}

impl BridgeClient {
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bind credentials for a sequence of calls
    pub fn api<'a>(&'a self, credentials: Option<&'a Credentials>) -> Api<'a> {
        Api {
            client: self,
            credentials,
        }
    }
}

/// Client bound to the credentials of one operator session
#[derive(Debug, Clone, Copy)]
pub struct Api<'a> {
    client: &'a BridgeClient,
    credentials: Option<&'a Credentials>,
}

impl<'a> Api<'a> {
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query,
        fallback: &str,
    ) -> AppResult<T> {
        self.send(Method::GET, path, query, None, fallback).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B, fallback: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.send(Method::POST, path, &Query::new(), Some(body), fallback)
            .await
    }

    /// POST with parameters in the query string and an empty body
    pub async fn post_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query,
        fallback: &str,
    ) -> AppResult<T> {
        self.send(Method::POST, path, query, None, fallback).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<Value>,
        fallback: &str,
    ) -> AppResult<T> {
        let url = format!("{}{}", self.client.base_url, path);
        tracing::debug!("Backend request: {} {}", method, path);

        let mut request = self
            .client
            .http
            .request(method.clone(), &url)
            .header(ACCEPT, "*/*");
        if !query.is_empty() {
            request = request.query(query.pairs());
        }
        if let Some(auth) = self.credentials.and_then(Credentials::authorization) {
            request = request.header(AUTHORIZATION, auth);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!("Backend request failed: {} {}: {}", method, path, e);
            AppError::Transport(e.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!("Backend rejected credentials: {} {} -> {}", method, path, status);
            return Err(AppError::SessionExpired);
        }
        if !status.is_success() {
            tracing::warn!("Backend error status: {} {} -> {}", method, path, status);
            return Err(AppError::Status(status.as_u16()));
        }

        let envelope: Envelope = response.json().await.map_err(|e| {
            if e.is_decode() {
                AppError::Decode(e.to_string())
            } else {
                AppError::Transport(e.to_string())
            }
        })?;

        if !envelope.is_success() {
            tracing::debug!(
                "Backend business failure: {} {} code={:?} message={:?}",
                method,
                path,
                envelope.code,
                envelope.message
            );
        }
        envelope.into_result(fallback)
    }
}
