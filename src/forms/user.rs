use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{field_errors, finish, parse_id, require, FieldErrors, FormMode};
use crate::error::AppResult;
use crate::model::{
    CreateUserPayload, S3NameOption, SelectOption, StorageType, UpdateUserPayload, User,
};

const MIN_PASSWORD_LEN: usize = 6;

/// User create/edit form values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    #[validate(length(min = 3, message = "用户名长度至少为3位"))]
    pub username: String,
    /// Write-only; edit prefill leaves it empty
    #[serde(default)]
    pub passwd: String,
    #[serde(default)]
    pub client_public_key: String,
    #[serde(default)]
    pub user_root_path: String,
    #[serde(default)]
    pub storage_type: Option<StorageType>,
    #[serde(default)]
    pub s3_link: Option<String>,
}

impl UserForm {
    /// Edit-mode values for an existing user; the password is never filled in
    pub fn edit_prefill(user: &User) -> Self {
        let mut form = Self {
            id: Some(user.id.clone()),
            username: user.username.clone(),
            passwd: String::new(),
            client_public_key: user.client_public_key.clone(),
            user_root_path: user.user_root_path.clone(),
            storage_type: None,
            s3_link: Some(user.s3_link.clone()).filter(|l| !l.is_empty()),
        };
        form.set_storage_type(user.storage_type);
        form
    }

    /// Switching away from s3 drops the selected link
    pub fn set_storage_type(&mut self, storage_type: StorageType) {
        self.storage_type = Some(storage_type);
        if storage_type != StorageType::S3 {
            self.s3_link = None;
        }
    }

    fn s3_link(&self) -> &str {
        self.s3_link.as_deref().unwrap_or_default()
    }

    pub fn check(&self, mode: FormMode) -> AppResult<()> {
        let mut errors = self
            .validate()
            .err()
            .map(|e| field_errors(&e))
            .unwrap_or_default();

        require(&mut errors, "username", &self.username, "请输入用户名");
        self.check_password(&mut errors, mode);
        require(&mut errors, "userRootPath", &self.user_root_path, "请输入用户根目录");

        match self.storage_type {
            None => {
                errors.insert("storageType".to_string(), "请选择存储类型".to_string());
            }
            Some(StorageType::S3) => {
                require(&mut errors, "s3Link", self.s3_link(), "请选择s3存储链接");
            }
            Some(StorageType::Local) => {}
        }

        if mode == FormMode::Edit && parse_id(self.id.as_deref().unwrap_or_default()).is_err() {
            errors.insert("id".to_string(), "缺少用户ID".to_string());
        }

        finish(errors)
    }

    fn check_password(&self, errors: &mut FieldErrors, mode: FormMode) {
        if self.passwd.is_empty() {
            if mode == FormMode::Create {
                errors.insert("passwd".to_string(), "请输入密码".to_string());
            }
        } else if self.passwd.chars().count() < MIN_PASSWORD_LEN {
            errors.insert("passwd".to_string(), "密码长度至少为6位".to_string());
        }
    }

    fn storage_info(&self, storage_type: StorageType) -> String {
        match storage_type {
            StorageType::S3 => self.s3_link().to_string(),
            StorageType::Local => String::new(),
        }
    }

    pub fn into_create_payload(self) -> AppResult<CreateUserPayload> {
        self.check(FormMode::Create)?;
        let storage_type = self.storage_type.unwrap_or_default();
        Ok(CreateUserPayload {
            access_storage_info: self.storage_info(storage_type),
            username: self.username.trim().to_string(),
            passwd: self.passwd,
            user_root_path: self.user_root_path,
            access_storage_type: storage_type,
            client_public_key: self.client_public_key,
        })
    }

    pub fn into_update_payload(self) -> AppResult<UpdateUserPayload> {
        self.check(FormMode::Edit)?;
        let storage_type = self.storage_type.unwrap_or_default();
        Ok(UpdateUserPayload {
            id: parse_id(self.id.as_deref().unwrap_or_default())?,
            access_storage_info: self.storage_info(storage_type),
            username: self.username.trim().to_string(),
            passwd: self.passwd,
            user_root_path: self.user_root_path,
            access_storage_type: storage_type,
            secret_key: self.client_public_key,
        })
    }
}

/// Outcome of matching a stored s3Link against the current option list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct S3LinkSelection {
    pub value: Option<String>,
    pub resolved: bool,
}

/// Best-effort match of `link` against the S3 name list: by id, then by name
///
/// An unmatched link is dropped from the selection and reported unresolved;
/// the backend stays the authority on whether the reference is valid.
pub fn reconcile_s3_link(link: &str, options: &[S3NameOption]) -> S3LinkSelection {
    let link = link.trim();
    if link.is_empty() {
        return S3LinkSelection {
            value: None,
            resolved: true,
        };
    }

    let by_id = options.iter().find(|o| o.id.to_string() == link);
    let matched = by_id.or_else(|| options.iter().find(|o| o.s3_name == link));

    match matched {
        Some(option) => S3LinkSelection {
            value: Some(option.id.to_string()),
            resolved: true,
        },
        None => S3LinkSelection {
            value: None,
            resolved: false,
        },
    }
}

/// What the user form page renders
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFormView {
    pub editing: bool,
    pub values: UserForm,
    pub s3_options: Vec<SelectOption>,
    pub s3_link_resolved: bool,
    /// Set when the S3 name list could not be fetched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options_error: Option<String>,
}

impl UserFormView {
    /// Empty create form
    pub fn create(options: &[S3NameOption], options_error: Option<String>) -> Self {
        Self {
            editing: false,
            values: UserForm::default(),
            s3_options: options.iter().map(SelectOption::from).collect(),
            s3_link_resolved: true,
            options_error,
        }
    }

    /// Edit form for `user`, with its s3Link reconciled against `options`
    pub fn edit(user: &User, options: &[S3NameOption], options_error: Option<String>) -> Self {
        let mut values = UserForm::edit_prefill(user);
        let mut resolved = true;
        if values.storage_type == Some(StorageType::S3) {
            let selection = reconcile_s3_link(&user.s3_link, options);
            values.s3_link = selection.value;
            resolved = selection.resolved;
        }

        Self {
            editing: true,
            values,
            s3_options: options.iter().map(SelectOption::from).collect(),
            s3_link_resolved: resolved,
            options_error,
        }
    }
}
