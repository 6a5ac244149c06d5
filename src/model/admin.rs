use serde::{Deserialize, Serialize};

/// Built-in administrator; the console never offers to delete it
pub const SYSTEM_ADMIN: &str = "admin";

/// Administrator record from `/api/admin/list`
///
/// The backend entity also carries `passwd`; it is never deserialized.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub status: Option<bool>,
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
}

impl Admin {
    pub fn is_system(&self) -> bool {
        self.username == SYSTEM_ADMIN
    }
}

/// Body of `/api/admin/create`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateAdminPayload {
    pub username: String,
    pub passwd: String,
}

/// Body of `/api/admin/update`; only the password can change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateAdminPayload {
    pub id: i64,
    pub passwd: String,
}

/// Admin grid row, also the edit-form prefill
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRow {
    pub id: String,
    pub username: String,
    pub status: Option<bool>,
    pub create_time: Option<String>,
    pub remark: Option<String>,
    pub deletable: bool,
}

impl From<Admin> for AdminRow {
    fn from(a: Admin) -> Self {
        let deletable = !a.is_system();
        Self {
            id: a.id.to_string(),
            username: a.username,
            status: a.status,
            create_time: a.create_time,
            remark: a.remark,
            deletable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_password_is_dropped() {
        let admin: Admin = serde_json::from_value(json!({
            "id": 1,
            "username": "admin",
            "passwd": "$2a$10$hash",
            "status": true,
        }))
        .unwrap();
        let row = serde_json::to_value(AdminRow::from(admin)).unwrap();

        assert!(row.get("passwd").is_none());
        assert_eq!(row["id"], "1");
        assert_eq!(row["deletable"], false);
    }

    #[test]
    fn test_regular_admin_is_deletable() {
        let admin = Admin {
            id: 2,
            username: "ops".to_string(),
            status: None,
            create_time: None,
            remark: None,
        };
        assert!(AdminRow::from(admin).deletable);
    }
}
