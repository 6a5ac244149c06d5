use serde::{Deserialize, Serialize};

/// Where a user's SFTP root lives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    #[default]
    Local,
    S3,
}

impl StorageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::Local => "local",
            StorageType::S3 => "s3",
        }
    }
}

/// User as returned by `/api/user/list` and `/api/user/details`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub user_root_path: String,
    #[serde(default)]
    pub access_storage_type: StorageType,
    #[serde(default)]
    pub access_storage_info: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
    #[serde(default)]
    pub create_time: Option<String>,
}

/// User as the console shows it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub user_root_path: String,
    pub storage_type: StorageType,
    /// S3 config id; empty unless the storage type is s3
    pub s3_link: String,
    pub client_public_key: String,
    pub created_at: Option<String>,
}

impl From<BackendUser> for User {
    fn from(u: BackendUser) -> Self {
        let s3_link = match u.access_storage_type {
            StorageType::S3 => u.access_storage_info.unwrap_or_default(),
            StorageType::Local => String::new(),
        };
        Self {
            id: u.id.to_string(),
            username: u.username,
            user_root_path: u.user_root_path,
            storage_type: u.access_storage_type,
            s3_link,
            client_public_key: u.secret_key.unwrap_or_default(),
            created_at: u.create_time,
        }
    }
}

/// Body of `/api/user/create`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    pub username: String,
    pub passwd: String,
    pub user_root_path: String,
    pub access_storage_type: StorageType,
    pub access_storage_info: String,
    pub client_public_key: String,
}

/// Body of `/api/user/update`; an empty `passwd` keeps the stored password
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    pub id: i64,
    pub username: String,
    pub passwd: String,
    pub user_root_path: String,
    pub access_storage_type: StorageType,
    pub access_storage_info: String,
    pub secret_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_backend_user_mapping() {
        let backend: BackendUser = serde_json::from_value(json!({
            "id": 7,
            "username": "alice",
            "userRootPath": "/home/alice",
            "accessStorageType": "s3",
            "accessStorageInfo": "3",
            "secretKey": "ssh-ed25519 AAAA",
            "createTime": "2024-05-01T10:00:00",
        }))
        .unwrap();
        let user = User::from(backend);

        assert_eq!(user.id, "7");
        assert_eq!(user.storage_type, StorageType::S3);
        assert_eq!(user.s3_link, "3");
        assert_eq!(user.client_public_key, "ssh-ed25519 AAAA");
        assert_eq!(user.created_at.as_deref(), Some("2024-05-01T10:00:00"));
    }

    #[test]
    fn test_local_user_has_no_s3_link() {
        let backend: BackendUser = serde_json::from_value(json!({
            "id": 1,
            "username": "bob",
            "accessStorageType": "local",
            "accessStorageInfo": "/srv/bob",
        }))
        .unwrap();
        assert_eq!(User::from(backend).s3_link, "");
    }

    #[test]
    fn test_create_payload_wire_names() {
        let payload = CreateUserPayload {
            username: "alice".to_string(),
            passwd: "secret1".to_string(),
            user_root_path: "/alice".to_string(),
            access_storage_type: StorageType::Local,
            access_storage_info: String::new(),
            client_public_key: String::new(),
        };
        let value = serde_json::to_value(payload).unwrap();
        assert_eq!(value["accessStorageType"], "local");
        assert_eq!(value["userRootPath"], "/alice");
        assert!(value.get("clientPublicKey").is_some());
    }
}
