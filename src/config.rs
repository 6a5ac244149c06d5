use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Console listen address (e.g., "0.0.0.0:8000")
    #[serde(default = "default_addr")]
    pub addr: String,
    /// Directory of the built single-page bundle
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    /// Bridge backend the console talks to
    #[serde(default)]
    pub backend: BackendConfig,
    /// Monitor dashboard polling
    #[serde(default)]
    pub monitor: MonitorConfig,
    /// Session cookie settings
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL of the bridge REST API, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Endpoint serving today's audit counters; some deployments expose
    /// them as `/api/audit/daily/stats`
    #[serde(default = "default_daily_stats_path")]
    pub daily_stats_path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitorConfig {
    /// Dashboard refresh interval in seconds
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Rows fetched for each audit table on the dashboard
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Mark the session cookie `Secure` (enable behind HTTPS)
    #[serde(default)]
    pub secure: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

// Default value functions
fn default_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("webapp/dist")
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_daily_stats_path() -> String {
    "/api/audit/statistics/now".to_string()
}

fn default_interval_secs() -> u64 {
    30
}

fn default_page_size() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            static_dir: default_static_dir(),
            backend: BackendConfig::default(),
            monitor: MonitorConfig::default(),
            session: SessionConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            daily_stats_path: default_daily_stats_path(),
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            page_size: default_page_size(),
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl MonitorConfig {
    /// Polling period; zero in the file falls back to one second
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        // Paths are joined onto the base URL verbatim
        config.backend.base_url = config.backend.base_url.trim_end_matches('/').to_string();

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.addr, "0.0.0.0:8000");
        assert_eq!(config.monitor.interval(), Duration::from_secs(30));
        assert_eq!(config.backend.base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_toml_parse() {
        let toml_str = r#"
            addr = "127.0.0.1:9000"

            [backend]
            base_url = "http://bridge:8080"

            [monitor]
            interval_secs = 5
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.addr, "127.0.0.1:9000");
        assert_eq!(config.backend.base_url, "http://bridge:8080");
        assert_eq!(config.backend.timeout_secs, 15);
        assert_eq!(config.backend.daily_stats_path, "/api/audit/statistics/now");
        assert_eq!(config.monitor.interval_secs, 5);
        assert_eq!(config.monitor.page_size, 10);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_load_trims_base_url() {
        let path = std::env::temp_dir().join(format!("console-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "[backend]\nbase_url = \"http://bridge:8080/\"\ndaily_stats_path = \"/api/audit/daily/stats\"\n",
        )
        .unwrap();

        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.backend.base_url, "http://bridge:8080");
        assert_eq!(config.backend.daily_stats_path, "/api/audit/daily/stats");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let monitor = MonitorConfig {
            interval_secs: 0,
            page_size: 10,
        };
        assert_eq!(monitor.interval(), Duration::from_secs(1));
    }
}
