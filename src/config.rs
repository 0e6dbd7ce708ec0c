use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_api_timeout")]
    pub api_timeout_secs: u64,

    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,

    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub ttl: Duration,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

// Default value functions
fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}
fn default_api_timeout() -> u64 {
    30
}
fn default_cache_ttl() -> u64 {
    300
} // 5 minutes
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "text".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_timeout_secs: default_api_timeout(),
            cache_ttl_secs: default_cache_ttl(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let config = envy::from_env::<Config>()
            .map_err(|e| AppError::Config(format!("Failed to load config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        let url = Url::parse(&self.api_base_url).map_err(|e| {
            AppError::Config(format!("API_BASE_URL is not a valid URL: {}", e))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AppError::Config(
                "API_BASE_URL must use http or https".to_string(),
            ));
        }

        if self.api_timeout_secs == 0 {
            return Err(AppError::Config("API_TIMEOUT_SECS must be > 0".to_string()));
        }

        Ok(())
    }

    // 提供嵌套结构的访问器
    pub fn api(&self) -> AppResult<ApiConfig> {
        Ok(ApiConfig {
            base_url: Url::parse(&self.api_base_url)?,
            timeout: Duration::from_secs(self.api_timeout_secs),
        })
    }

    pub fn cache(&self) -> CacheConfig {
        CacheConfig {
            ttl: Duration::from_secs(self.cache_ttl_secs),
        }
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            format: self.log_format.clone(),
        }
    }
}
