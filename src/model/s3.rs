use serde::{Deserialize, Serialize};

/// S3 storage definition, wire shape of `/s3/storage/*`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub s3_name: String,
    pub endpoint: String,
    pub access_key: String,
    #[serde(default)]
    pub access_secret: String,
    pub bucket: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Grid row; also the edit-form prefill, so the secret is left out
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct S3ConfigRow {
    pub id: String,
    pub s3_name: String,
    pub endpoint: String,
    pub access_key: String,
    pub access_secret: String,
    pub bucket: String,
    pub region: Option<String>,
}

impl From<S3Config> for S3ConfigRow {
    fn from(c: S3Config) -> Self {
        Self {
            id: c.id.map(|id| id.to_string()).unwrap_or_default(),
            s3_name: c.s3_name,
            endpoint: c.endpoint,
            access_key: c.access_key,
            access_secret: String::new(),
            bucket: c.bucket,
            region: c.region,
        }
    }
}

/// Entry of `/s3/storage/get/s3names`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3NameOption {
    pub id: i64,
    pub s3_name: String,
}

/// Select option as rendered by the console
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl From<&S3NameOption> for SelectOption {
    fn from(o: &S3NameOption) -> Self {
        Self {
            value: o.id.to_string(),
            label: o.s3_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_blanks_secret() {
        let config: S3Config = serde_json::from_value(json!({
            "id": 3,
            "s3Name": "minio",
            "endpoint": "http://minio:9000",
            "accessKey": "ak",
            "accessSecret": "sk",
            "bucket": "data",
        }))
        .unwrap();
        let row = S3ConfigRow::from(config);

        assert_eq!(row.id, "3");
        assert_eq!(row.access_secret, "");
        assert!(row.region.is_none());
    }

    #[test]
    fn test_create_body_omits_missing_id() {
        let config = S3Config {
            id: None,
            s3_name: "minio".to_string(),
            endpoint: "http://minio:9000".to_string(),
            access_key: "ak".to_string(),
            access_secret: "sk".to_string(),
            bucket: "data".to_string(),
            region: None,
        };
        let value = serde_json::to_value(config).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["accessSecret"], "sk");
    }
}
