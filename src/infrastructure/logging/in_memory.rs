use crate::core::errors::ProxyError;
use crate::core::models::audit::AppLog;
use crate::infrastructure::logging::LoggingService;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

const DEFAULT_CAPACITY: usize = 1000;

/// Keeps the most recent operation records, oldest evicted first.
#[derive(Clone)]
pub struct InMemoryLogging {
    logs: Arc<RwLock<VecDeque<AppLog>>>,
    capacity: usize,
}

impl InMemoryLogging {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        InMemoryLogging {
            logs: Arc::new(RwLock::new(VecDeque::new())),
            capacity: capacity.max(1),
        }
    }

    /// Actions recorded so far, oldest first.
    pub async fn actions(&self) -> Vec<String> {
        self.logs.read().await.iter().map(|l| l.action.clone()).collect()
    }
}

impl Default for InMemoryLogging {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LoggingService for InMemoryLogging {
    async fn log_action(
        &self,
        action: &str,
        details: serde_json::Value,
        method: Option<&str>,
    ) -> Result<(), ProxyError> {
        let mut logs = self.logs.write().await;
        if logs.len() == self.capacity {
            logs.pop_front();
        }
        logs.push_back(AppLog {
            id: Uuid::new_v4().to_string(),
            action: action.to_string(),
            method: method.map(String::from),
            details,
            timestamp: chrono::Utc::now(),
        });
        Ok(())
    }

    async fn get_logs(&self) -> Result<Vec<AppLog>, ProxyError> {
        let logs = self.logs.read().await;
        Ok(logs.iter().cloned().collect())
    }
}
