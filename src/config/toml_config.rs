use crate::adapters::summary_client::{DEFAULT_SUMMARY_ENDPOINT, DEFAULT_USER_AGENT};
use crate::core::enricher::DEFAULT_CONCURRENCY;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{EnrichError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_DEADLINE_SECONDS: u64 = 20;
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub enrichment: EnrichmentConfig,
    pub catalog: CatalogConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub endpoint: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SUMMARY_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    pub concurrency: usize,
    /// 0 disables the batch deadline.
    pub deadline_seconds: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            deadline_seconds: DEFAULT_DEADLINE_SECONDS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub data_dir: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EnrichError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EnrichError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` references with environment values; unknown ones are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EnrichError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::require("source.endpoint", &self.source.endpoint)?;
        validation::summary_endpoint("source.endpoint", &self.source.endpoint)?;
        validation::require("source.user_agent", &self.source.user_agent)?;
        validation::at_least("source.timeout_seconds", self.source.timeout_seconds, 1)?;
        validation::at_least("enrichment.concurrency", self.enrichment.concurrency as u64, 1)?;
        validation::require("catalog.data_dir", &self.catalog.data_dir)?;
        validation::require("server.host", &self.server.host)?;
        validation::at_least("server.port", self.server.port.into(), 1)?;
        Ok(())
    }

    /// Resolve `server.host` (an IP literal or a hostname) and `server.port`.
    pub async fn server_addr(&self) -> Result<std::net::SocketAddr> {
        let host = self.server.host.as_str();
        let invalid = |reason: String| EnrichError::InvalidConfigValueError {
            field: "server.host".to_string(),
            value: host.to_string(),
            reason,
        };

        let mut addrs = tokio::net::lookup_host((host, self.server.port))
            .await
            .map_err(|e| invalid(format!("Cannot resolve host: {}", e)))?;
        addrs
            .next()
            .ok_or_else(|| invalid("Host resolved to no addresses".to_string()))
    }
}

impl ConfigProvider for AppConfig {
    fn summary_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn user_agent(&self) -> &str {
        &self.source.user_agent
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_seconds)
    }

    fn concurrency(&self) -> usize {
        self.enrichment.concurrency
    }

    fn batch_deadline(&self) -> Option<Duration> {
        match self.enrichment.deadline_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    fn data_dir(&self) -> &str {
        &self.catalog.data_dir
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
