use crate::constants::{
    DEFAULT_HOST, DEFAULT_LOG_LEVEL, DEFAULT_PORT, DEFAULT_SPLITWISE_BASE_URL, DEFAULT_SPLITWISE_TIMEOUT_SECS,
    ENV_HOST, ENV_LOG_LEVEL, ENV_PORT, ENV_SPLITWISE_API_KEY, ENV_SPLITWISE_BASE_URL, ENV_SPLITWISE_TIMEOUT_SECS,
};
use crate::core::policy::CachePolicy;
use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub splitwise_api_key: Option<String>,
    pub splitwise_base_url: String,
    pub splitwise_timeout_secs: u64,
    pub cache: CachePolicy,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("splitwise_api_key", &self.splitwise_api_key.as_ref().map(|_| "<redacted>"))
            .field("splitwise_base_url", &self.splitwise_base_url)
            .field("splitwise_timeout_secs", &self.splitwise_timeout_secs)
            .field("cache", &self.cache)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: lookup(ENV_PORT)
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            log_level: lookup(ENV_LOG_LEVEL).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            splitwise_api_key: lookup(ENV_SPLITWISE_API_KEY).filter(|k| !k.trim().is_empty()),
            splitwise_base_url: lookup(ENV_SPLITWISE_BASE_URL)
                .unwrap_or_else(|| DEFAULT_SPLITWISE_BASE_URL.to_string()),
            splitwise_timeout_secs: lookup(ENV_SPLITWISE_TIMEOUT_SECS)
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SPLITWISE_TIMEOUT_SECS),
            cache: CachePolicy::from_lookup(&lookup),
        }
    }
}

// Read once at startup
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
