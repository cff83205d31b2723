use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::constants::api::{DATAJUD_BASE_URL, RESEND_BASE_URL};

const DEFAULT_ADMIN_TOKEN: &str = "change-me";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub datajud: DatajudConfig,

    pub email: EmailConfig,

    pub scheduler: SchedulerConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/docket-watch.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatajudConfig {
    pub base_url: String,

    /// Public API key, sent as `Authorization: APIKey <key>`.
    pub api_key: String,

    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u32,
}

impl Default for DatajudConfig {
    fn default() -> Self {
        Self {
            base_url: DATAJUD_BASE_URL.to_string(),
            api_key: String::new(),
            request_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Only "resend" is supported.
    pub provider: String,

    pub base_url: String,

    pub api_key: String,

    /// Sender identity, e.g. `Case Monitor <alerts@example.com>`
    pub from: String,

    /// Request timeout in seconds (default: 20)
    pub request_timeout_seconds: u32,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: "resend".to_string(),
            base_url: RESEND_BASE_URL.to_string(),
            api_key: String::new(),
            from: "Case Monitor <onboarding@resend.dev>".to_string(),
            request_timeout_seconds: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub enabled: bool,

    /// Six-field cron expression evaluated in UTC. Takes precedence over the interval.
    pub cron_expression: Option<String>,

    pub check_interval_minutes: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cron_expression: Some("0 0 8 * * *".to_string()),
            check_interval_minutes: 24 * 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub enabled: bool,

    pub port: u16,

    /// Shared secret required by `POST /v1/sync`.
    pub admin_token: String,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 8000,
            admin_token: DEFAULT_ADMIN_TOKEN.to_string(),
            cors_allowed_origins: vec!["http://localhost:8000".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub loki_enabled: bool,

    pub loki_url: String,

    pub loki_labels: HashMap<String, String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        let mut labels = HashMap::new();
        labels.insert("app".to_string(), "docket-watch".to_string());

        Self {
            metrics_enabled: true,
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
            loki_labels: labels,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            datajud: DatajudConfig::default(),
            email: EmailConfig::default(),
            scheduler: SchedulerConfig::default(),
            server: ServerConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    /// Loads the first config file found, then applies environment overrides
    /// (including a `.env` file in the working directory).
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::load_file()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        for path in &Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Overlays secrets and deployment settings from a key lookup, usually the
    /// process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = non_empty("DATAJUD_APIKEY") {
            self.datajud.api_key = v;
        }
        if let Some(v) = non_empty("EMAIL_PROVIDER") {
            self.email.provider = v.to_lowercase();
        }
        if let Some(v) = non_empty("RESEND_API_KEY") {
            self.email.api_key = v;
        }
        if let Some(v) = non_empty("EMAIL_FROM") {
            self.email.from = v;
        }
        if let Some(v) = non_empty("API_ADMIN_TOKEN") {
            self.server.admin_token = v;
        }
        if let Some(v) = non_empty("DATABASE_URL") {
            self.general.database_path = v;
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("docket-watch").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".docket-watch").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.datajud.base_url)
            .with_context(|| format!("Invalid DataJud base URL: {}", self.datajud.base_url))?;

        url::Url::parse(&self.email.base_url)
            .with_context(|| format!("Invalid email base URL: {}", self.email.base_url))?;

        if !self.email.provider.eq_ignore_ascii_case("resend") {
            anyhow::bail!("Unsupported email provider: {}", self.email.provider);
        }

        if self.scheduler.enabled
            && self.scheduler.check_interval_minutes == 0
            && self.scheduler.cron_expression.is_none()
        {
            anyhow::bail!("Scheduler interval must be > 0 or cron expression must be set");
        }

        if self.server.enabled && self.server.admin_token.trim().is_empty() {
            anyhow::bail!("server.admin_token cannot be empty when the server is enabled");
        }

        if self.server.admin_token == DEFAULT_ADMIN_TOKEN {
            warn!("server.admin_token is still the default value; set API_ADMIN_TOKEN");
        }

        if self.datajud.api_key.is_empty() {
            warn!("DataJud API key is not configured; searches will be rejected");
        }

        if self.email.api_key.is_empty() {
            warn!("Email API key is not configured; notifications will fail");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.datajud.request_timeout_seconds, 30);
        assert_eq!(config.email.request_timeout_seconds, 20);
        assert_eq!(config.email.provider, "resend");
        assert_eq!(
            config.scheduler.cron_expression.as_deref(),
            Some("0 0 8 * * *")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[datajud]"));
        assert!(toml_str.contains("[email]"));
        assert!(toml_str.contains("[scheduler]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [scheduler]
            cron_expression = "0 30 6 * * *"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(
            config.scheduler.cron_expression.as_deref(),
            Some("0 30 6 * * *")
        );

        assert_eq!(config.email.base_url, RESEND_BASE_URL);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("DATAJUD_APIKEY", "datajud-key"),
            ("RESEND_API_KEY", "re_123"),
            ("EMAIL_FROM", "Alerts <alerts@example.com>"),
            ("EMAIL_PROVIDER", "RESEND"),
            ("API_ADMIN_TOKEN", "  "),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(ToString::to_string));

        assert_eq!(config.datajud.api_key, "datajud-key");
        assert_eq!(config.email.api_key, "re_123");
        assert_eq!(config.email.from, "Alerts <alerts@example.com>");
        assert_eq!(config.email.provider, "resend");
        // Blank values do not clobber the configured token
        assert_eq!(config.server.admin_token, DEFAULT_ADMIN_TOKEN);
    }

    #[test]
    fn test_validate_rejects_unknown_provider() {
        let mut config = Config::default();
        config.email.provider = "smtp".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_requires_schedule() {
        let mut config = Config::default();
        config.scheduler.cron_expression = None;
        config.scheduler.check_interval_minutes = 0;
        assert!(config.validate().is_err());
    }
}
