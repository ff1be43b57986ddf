pub mod in_memory;

use crate::core::errors::ProxyError;
use crate::core::models::audit::AppLog;
use async_trait::async_trait;

/// Structured record of cache and upstream operations.
#[async_trait]
pub trait LoggingService: Send + Sync {
    async fn log_action(
        &self,
        action: &str,
        details: serde_json::Value,
        method: Option<&str>,
    ) -> Result<(), ProxyError>;
    async fn get_logs(&self) -> Result<Vec<AppLog>, ProxyError>;
}
