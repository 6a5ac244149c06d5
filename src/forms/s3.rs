use serde::{Deserialize, Serialize};

use super::{finish, parse_id, require, FieldErrors, FormMode};
use crate::error::AppResult;
use crate::model::S3Config;

/// S3 storage create/edit form
///
/// Edit prefill comes from the grid row, whose secret is blank; the operator
/// re-enters it on every edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Form {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub s3_name: String,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub access_key: String,
    #[serde(default)]
    pub access_secret: String,
    #[serde(default)]
    pub bucket: String,
    #[serde(default)]
    pub region: Option<String>,
}

impl S3Form {
    pub fn check(&self, mode: FormMode) -> AppResult<()> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "s3Name", &self.s3_name, "请输入名称标识!");
        require(&mut errors, "endpoint", &self.endpoint, "请输入请求地址!");
        require(&mut errors, "accessKey", &self.access_key, "请输入账户!");
        require(&mut errors, "accessSecret", &self.access_secret, "请输入密码!");
        require(&mut errors, "bucket", &self.bucket, "请输入桶名称!");

        if mode == FormMode::Edit && parse_id(self.id.as_deref().unwrap_or_default()).is_err() {
            errors.insert("id".to_string(), "编辑S3配置失败：缺少配置ID".to_string());
        }
        finish(errors)
    }

    pub fn into_config(self, mode: FormMode) -> AppResult<S3Config> {
        self.check(mode)?;
        let id = match mode {
            FormMode::Create => None,
            FormMode::Edit => Some(parse_id(self.id.as_deref().unwrap_or_default())?),
        };
        Ok(S3Config {
            id,
            s3_name: self.s3_name.trim().to_string(),
            endpoint: self.endpoint.trim().to_string(),
            access_key: self.access_key,
            access_secret: self.access_secret,
            bucket: self.bucket.trim().to_string(),
            region: self.region.filter(|r| !r.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn form() -> S3Form {
        S3Form {
            id: None,
            s3_name: "minio".to_string(),
            endpoint: "http://minio:9000".to_string(),
            access_key: "ak".to_string(),
            access_secret: "sk".to_string(),
            bucket: "data".to_string(),
            region: Some(String::new()),
        }
    }

    #[test]
    fn test_required_fields() {
        match S3Form::default().check(FormMode::Create) {
            Err(AppError::Validation(errors)) => {
                assert_eq!(errors.len(), 5);
                assert_eq!(errors["bucket"], "请输入桶名称!");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_edit_requires_id_and_secret() {
        let mut edit = form();
        edit.access_secret.clear();
        match edit.check(FormMode::Edit) {
            Err(AppError::Validation(errors)) => {
                assert!(errors.contains_key("id"));
                assert!(errors.contains_key("accessSecret"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_into_config() {
        let created = form().into_config(FormMode::Create).unwrap();
        assert!(created.id.is_none());
        assert!(created.region.is_none());

        let mut edit = form();
        edit.id = Some("12".to_string());
        edit.region = Some("us-east-1".to_string());
        let updated = edit.into_config(FormMode::Edit).unwrap();
        assert_eq!(updated.id, Some(12));
        assert_eq!(updated.region.as_deref(), Some("us-east-1"));
    }
}
