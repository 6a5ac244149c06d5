//! Read-only audit records written by the bridge server

use serde::{Deserialize, Serialize};

/// Authentication outcome of a client connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "u8")]
pub enum AuthStatus {
    None,
    Success,
    Failure,
    Unknown,
}

impl From<u8> for AuthStatus {
    fn from(v: u8) -> Self {
        match v {
            0 => AuthStatus::None,
            1 => AuthStatus::Success,
            2 => AuthStatus::Failure,
            _ => AuthStatus::Unknown,
        }
    }
}

/// Result of a file operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "u8")]
pub enum OperateStatus {
    Success,
    Failure,
    Processing,
    Pending,
    Unknown,
}

impl From<u8> for OperateStatus {
    fn from(v: u8) -> Self {
        match v {
            1 => OperateStatus::Success,
            2 => OperateStatus::Failure,
            3 => OperateStatus::Processing,
            4 => OperateStatus::Pending,
            _ => OperateStatus::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptType {
    Upload,
    Download,
    DeleteFile,
    DeleteDir,
    Rename,
    #[serde(other)]
    Other,
}

/// Client connection audit (`/api/audit/client/list`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSession {
    #[serde(alias = "sessionId")]
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub client_ip: String,
    #[serde(default)]
    pub client_port: Option<u16>,
    #[serde(default)]
    pub connect_time: Option<String>,
    #[serde(default)]
    pub disconnect_time: Option<String>,
    pub auth_status: AuthStatus,
    #[serde(default)]
    pub auth_failure_reason: Option<String>,
    #[serde(default)]
    pub disconnect_reason: Option<String>,
    #[serde(default)]
    pub auth_type: Option<String>,
}

/// File operation audit (`/api/audit/opt/list`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOperation {
    pub id: i64,
    #[serde(default)]
    pub client_username: String,
    #[serde(default)]
    pub client_address: String,
    pub file_path: String,
    #[serde(rename = "type")]
    pub op_type: OptType,
    #[serde(default)]
    pub file_size: String,
    pub operate_result: OperateStatus,
    #[serde(default)]
    pub opt_time: Option<String>,
    #[serde(default)]
    pub error_msg: Option<String>,
}

/// Daily counters as the backend sends them
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyStatsRecord {
    pub auth_count_val: u64,
    pub auth_success_val: u64,
    pub auth_failure_val: u64,
    pub download_count_val: u64,
    pub download_success_val: u64,
    pub download_failure_val: u64,
    pub upload_count_val: u64,
    pub upload_success_val: u64,
    pub upload_failure_val: u64,
    pub del_count_val: u64,
    pub del_success_val: u64,
    pub del_failure_val: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counter {
    pub total: u64,
    pub success: u64,
    pub failed: u64,
}

/// Daily counters grouped per category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DailyStats {
    pub login: Counter,
    pub upload: Counter,
    pub download: Counter,
    pub delete: Counter,
}

impl From<DailyStatsRecord> for DailyStats {
    fn from(r: DailyStatsRecord) -> Self {
        Self {
            login: Counter {
                total: r.auth_count_val,
                success: r.auth_success_val,
                failed: r.auth_failure_val,
            },
            upload: Counter {
                total: r.upload_count_val,
                success: r.upload_success_val,
                failed: r.upload_failure_val,
            },
            download: Counter {
                total: r.download_count_val,
                success: r.download_success_val,
                failed: r.download_failure_val,
            },
            delete: Counter {
                total: r.del_count_val,
                success: r.del_success_val,
                failed: r.del_failure_val,
            },
        }
    }
}

/// One bucket of the traffic chart
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficPoint {
    #[serde(default)]
    pub time_label: String,
    #[serde(default)]
    pub upload_size: String,
    #[serde(default)]
    pub download_size: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_session_decoding() {
        let s: ClientSession = serde_json::from_value(json!({
            "id": 9,
            "username": "alice",
            "clientIp": "10.0.0.5",
            "clientPort": 52144,
            "connectTime": "2024-05-01T10:00:00",
            "authStatus": 2,
            "authFailureReason": "PASSWD_FAILED_TO_MATCH",
            "authType": "password",
        }))
        .unwrap();

        assert_eq!(s.auth_status, AuthStatus::Failure);
        assert_eq!(s.client_port, Some(52144));
        assert!(s.disconnect_time.is_none());
        assert_eq!(serde_json::to_value(&s).unwrap()["authStatus"], "failure");
    }

    #[test]
    fn test_file_operation_decoding() {
        let op: FileOperation = serde_json::from_value(json!({
            "id": 1,
            "clientUsername": "alice",
            "filePath": "/a/b.txt",
            "type": "delete_dir",
            "fileSize": "0",
            "operateResult": 1,
        }))
        .unwrap();
        assert_eq!(op.op_type, OptType::DeleteDir);
        assert_eq!(op.operate_result, OperateStatus::Success);

        let odd: FileOperation = serde_json::from_value(json!({
            "id": 2,
            "filePath": "/x",
            "type": "mkdir",
            "operateResult": 9,
        }))
        .unwrap();
        assert_eq!(odd.op_type, OptType::Other);
        assert_eq!(odd.operate_result, OperateStatus::Unknown);
    }

    #[test]
    fn test_daily_stats_grouping() {
        let record: DailyStatsRecord = serde_json::from_value(json!({
            "authCountVal": 10,
            "authSuccessVal": 8,
            "authFailureVal": 2,
            "delCountVal": 1,
            "delSuccessVal": 1,
        }))
        .unwrap();
        let stats = DailyStats::from(record);

        assert_eq!(stats.login, Counter { total: 10, success: 8, failed: 2 });
        assert_eq!(stats.delete.total, 1);
        assert_eq!(stats.upload, Counter::default());
    }
}
