//! Monitoring dashboard
//!
//! Three read-only audit feeds (first page of client sessions, first page of
//! file operations, today's counters) fetched concurrently into one snapshot.
//! Each feed is updated on its own: a failed feed keeps its previous data and
//! is listed in `feedErrors`. Only a session expiry is reported to the caller.

pub mod ws;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::client::{BridgeClient, Credentials};
use crate::error::{AppError, AppResult};
use crate::grid::{GridParams, Page};
use crate::model::{ClientSession, DailyStats, FileOperation};
use crate::services::audit;
use crate::state::AppState;

/// Where dashboard data comes from
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn client_sessions(&self) -> AppResult<Page<ClientSession>>;
    async fn file_operations(&self) -> AppResult<Page<FileOperation>>;
    async fn daily_stats(&self) -> AppResult<DailyStats>;
}

/// Audit endpoints of the bridge backend, on behalf of one operator
pub struct BackendSource {
    client: BridgeClient,
    credentials: Credentials,
    params: GridParams,
    daily_stats_path: String,
}

impl BackendSource {
    pub fn new(state: &AppState, credentials: Credentials) -> Self {
        Self {
            client: state.client.clone(),
            credentials,
            params: GridParams::new(1, state.config.monitor.page_size),
            daily_stats_path: state.config.backend.daily_stats_path.clone(),
        }
    }
}

#[async_trait]
impl SnapshotSource for BackendSource {
    async fn client_sessions(&self) -> AppResult<Page<ClientSession>> {
        let api = self.client.api(Some(&self.credentials));
        audit::query_client_sessions(&api, &self.params, None).await
    }

    async fn file_operations(&self) -> AppResult<Page<FileOperation>> {
        let api = self.client.api(Some(&self.credentials));
        audit::query_file_operations(&api, &self.params, None).await
    }

    async fn daily_stats(&self) -> AppResult<DailyStats> {
        let api = self.client.api(Some(&self.credentials));
        audit::daily_stats(&api, &self.daily_stats_path).await
    }
}

/// Dashboard feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Feed {
    ClientSessions,
    FileOperations,
    DailyStats,
}

/// A feed that failed in the last refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedError {
    pub feed: Feed,
    pub message: String,
}

/// Latest dashboard state
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub client_sessions: Vec<ClientSession>,
    pub client_session_total: u64,
    pub file_operations: Vec<FileOperation>,
    pub file_operation_total: u64,
    pub daily_stats: DailyStats,
    /// Time of the last refresh in which at least one feed succeeded
    pub refreshed_at: Option<DateTime<Local>>,
    /// First message of the last refresh's failures, cleared by a clean refresh
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub feed_errors: Vec<FeedError>,
}

impl DashboardSnapshot {
    /// Nothing has ever been loaded and the last refresh failed
    pub fn is_unavailable(&self) -> bool {
        self.refreshed_at.is_none() && self.last_error.is_some()
    }
}

/// Dashboard holding only the latest snapshot
pub struct Dashboard<S> {
    source: S,
    latest: RwLock<DashboardSnapshot>,
}

impl<S: SnapshotSource> Dashboard<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            latest: RwLock::new(DashboardSnapshot::default()),
        }
    }

    pub async fn latest(&self) -> DashboardSnapshot {
        self.latest.read().await.clone()
    }

    /// Fetch all feeds and return the new latest snapshot
    ///
    /// Errors only on session expiry, leaving the snapshot untouched.
    pub async fn refresh(&self) -> AppResult<DashboardSnapshot> {
        let (sessions, operations, stats) = tokio::join!(
            self.source.client_sessions(),
            self.source.file_operations(),
            self.source.daily_stats(),
        );

        let expired = [
            sessions.as_ref().err(),
            operations.as_ref().err(),
            stats.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .any(AppError::is_session_expired);
        if expired {
            return Err(AppError::SessionExpired);
        }

        let mut latest = self.latest.write().await;
        let mut errors = Vec::new();
        match sessions {
            Ok(page) => {
                latest.client_session_total = page.total;
                latest.client_sessions = page.items;
            }
            Err(e) => errors.push(feed_error(Feed::ClientSessions, e)),
        }
        match operations {
            Ok(page) => {
                latest.file_operation_total = page.total;
                latest.file_operations = page.items;
            }
            Err(e) => errors.push(feed_error(Feed::FileOperations, e)),
        }
        match stats {
            Ok(stats) => latest.daily_stats = stats,
            Err(e) => errors.push(feed_error(Feed::DailyStats, e)),
        }

        if errors.len() < 3 {
            latest.refreshed_at = Some(Local::now());
        }
        latest.last_error = errors.first().map(|e| e.message.clone());
        latest.feed_errors = errors;
        Ok(latest.clone())
    }
}

fn feed_error(feed: Feed, err: AppError) -> FeedError {
    tracing::warn!("Dashboard feed {:?} failed: {}", feed, err);
    FeedError {
        feed,
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AuthStatus, Counter};
    use std::sync::atomic::{AtomicU8, Ordering};

    const OK: u8 = 0;
    const FAIL: u8 = 1;
    const EXPIRED: u8 = 2;

    /// Client sessions follow `sessions`, the other feeds follow `rest`
    struct FakeSource {
        sessions: AtomicU8,
        rest: AtomicU8,
    }

    fn outcome<T>(mode: &AtomicU8, value: T) -> AppResult<T> {
        match mode.load(Ordering::SeqCst) {
            OK => Ok(value),
            FAIL => Err(AppError::Transport("connection refused".into())),
            _ => Err(AppError::SessionExpired),
        }
    }

    #[async_trait]
    impl SnapshotSource for FakeSource {
        async fn client_sessions(&self) -> AppResult<Page<ClientSession>> {
            let session = ClientSession {
                id: 1,
                username: "alice".into(),
                client_ip: "10.0.0.5".into(),
                client_port: Some(52144),
                connect_time: None,
                disconnect_time: None,
                auth_status: AuthStatus::Success,
                auth_failure_reason: None,
                disconnect_reason: None,
                auth_type: None,
            };
            outcome(
                &self.sessions,
                Page {
                    items: vec![session],
                    total: 1,
                },
            )
        }

        async fn file_operations(&self) -> AppResult<Page<FileOperation>> {
            outcome(&self.rest, Page::empty())
        }

        async fn daily_stats(&self) -> AppResult<DailyStats> {
            outcome(
                &self.rest,
                DailyStats {
                    login: Counter {
                        total: 3,
                        success: 2,
                        failed: 1,
                    },
                    ..DailyStats::default()
                },
            )
        }
    }

    fn dashboard() -> Dashboard<FakeSource> {
        Dashboard::new(FakeSource {
            sessions: AtomicU8::new(OK),
            rest: AtomicU8::new(OK),
        })
    }

    fn set(dashboard: &Dashboard<FakeSource>, sessions: u8, rest: u8) {
        dashboard.source.sessions.store(sessions, Ordering::SeqCst);
        dashboard.source.rest.store(rest, Ordering::SeqCst);
    }

    #[tokio::test]
    async fn test_refresh_fills_snapshot() {
        let dashboard = dashboard();
        let snapshot = dashboard.refresh().await.unwrap();

        assert_eq!(snapshot.client_sessions.len(), 1);
        assert_eq!(snapshot.client_session_total, 1);
        assert_eq!(snapshot.daily_stats.login.total, 3);
        assert!(snapshot.refreshed_at.is_some());
        assert!(snapshot.last_error.is_none());
        assert!(snapshot.feed_errors.is_empty());
        assert!(!snapshot.is_unavailable());
    }

    #[tokio::test]
    async fn test_failed_feed_keeps_its_previous_data() {
        let dashboard = dashboard();
        dashboard.refresh().await.unwrap();

        set(&dashboard, FAIL, OK);
        let partial = dashboard.refresh().await.unwrap();

        assert_eq!(partial.client_sessions.len(), 1);
        assert_eq!(partial.daily_stats.login.total, 3);
        assert!(partial.refreshed_at.is_some());
        assert_eq!(partial.last_error.as_deref(), Some("服务器无响应，请重试"));
        assert_eq!(
            partial.feed_errors,
            vec![FeedError {
                feed: Feed::ClientSessions,
                message: "服务器无响应，请重试".into(),
            }]
        );

        set(&dashboard, OK, OK);
        let clean = dashboard.refresh().await.unwrap();
        assert!(clean.last_error.is_none());
        assert!(clean.feed_errors.is_empty());
    }

    #[tokio::test]
    async fn test_all_feeds_failing_keeps_previous_snapshot() {
        let dashboard = dashboard();
        let first = dashboard.refresh().await.unwrap();

        set(&dashboard, FAIL, FAIL);
        let failed = dashboard.refresh().await.unwrap();

        assert_eq!(failed.client_sessions.len(), 1);
        assert_eq!(failed.refreshed_at, first.refreshed_at);
        assert_eq!(failed.feed_errors.len(), 3);
        assert!(!failed.is_unavailable());
    }

    #[tokio::test]
    async fn test_first_refresh_failing_is_unavailable() {
        let dashboard = dashboard();
        set(&dashboard, FAIL, FAIL);

        let snapshot = dashboard.refresh().await.unwrap();
        assert!(snapshot.is_unavailable());
        assert!(snapshot.client_sessions.is_empty());
    }

    #[tokio::test]
    async fn test_session_expiry_is_reported() {
        let dashboard = dashboard();
        set(&dashboard, OK, EXPIRED);

        let result = dashboard.refresh().await;
        assert!(matches!(result, Err(AppError::SessionExpired)));
        assert!(dashboard.latest().await.refreshed_at.is_none());
    }

    #[test]
    fn test_feed_errors_serialize_camel_case() {
        let snapshot = DashboardSnapshot {
            last_error: Some("网络请求错误: 404".into()),
            feed_errors: vec![FeedError {
                feed: Feed::DailyStats,
                message: "网络请求错误: 404".into(),
            }],
            ..DashboardSnapshot::default()
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["feedErrors"][0]["feed"], "dailyStats");
        assert_eq!(value["lastError"], "网络请求错误: 404");
    }
}
