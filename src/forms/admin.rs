use serde::Deserialize;
use validator::Validate;

use super::{field_errors, finish, parse_id, require, FieldErrors};
use crate::error::AppResult;
use crate::model::{CreateAdminPayload, UpdateAdminPayload};

/// New administrator
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AdminCreateForm {
    #[serde(default)]
    #[validate(length(min = 3, message = "账户名长度至少为3个字符"))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "密码长度至少为6个字符"))]
    pub password: String,
}

impl AdminCreateForm {
    pub fn check(&self) -> AppResult<()> {
        let mut errors = self
            .validate()
            .err()
            .map(|e| field_errors(&e))
            .unwrap_or_default();
        require(&mut errors, "username", &self.username, "请输入账户名");
        require(&mut errors, "password", &self.password, "请输入密码");
        finish(errors)
    }

    pub fn into_payload(self) -> AppResult<CreateAdminPayload> {
        self.check()?;
        Ok(CreateAdminPayload {
            username: self.username.trim().to_string(),
            passwd: self.password,
        })
    }
}

/// Password change of an existing administrator
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AdminPasswordForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "密码长度至少为6个字符"))]
    pub password: String,
}

impl AdminPasswordForm {
    pub fn check(&self) -> AppResult<()> {
        let mut errors = self
            .validate()
            .err()
            .map(|e| field_errors(&e))
            .unwrap_or_default();
        require(&mut errors, "password", &self.password, "请输入新密码");
        check_id(&mut errors, &self.id);
        finish(errors)
    }

    pub fn into_payload(self) -> AppResult<UpdateAdminPayload> {
        self.check()?;
        Ok(UpdateAdminPayload {
            id: parse_id(&self.id)?,
            passwd: self.password,
        })
    }
}

/// Row delete action
///
/// `username` is a shortcut for the system-admin guard; the id is checked
/// against the backend either way.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminDeleteForm {
    pub id: String,
    #[serde(default)]
    pub username: String,
}

fn check_id(errors: &mut FieldErrors, id: &str) {
    if parse_id(id).is_err() {
        errors.insert("id".to_string(), "缺少管理员ID".to_string());
    }
}
