//! Splitwise HTTP client

use super::UpstreamClient;
use super::endpoints::{Verb, endpoint, query_pairs};
use crate::config::Config;
use crate::core::errors::ProxyError;
use crate::core::models::method::{Kwargs, Method};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Calls the Splitwise REST API with a personal API key.
pub struct SplitwiseClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SplitwiseClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProxyError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ProxyError::MissingCredentials);
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProxyError::InternalServerError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ProxyError> {
        let api_key = config
            .splitwise_api_key
            .clone()
            .ok_or(ProxyError::MissingCredentials)?;
        Self::new(
            api_key,
            config.splitwise_base_url.clone(),
            Duration::from_secs(config.splitwise_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl UpstreamClient for SplitwiseClient {
    async fn invoke(&self, method: Method, kwargs: &Kwargs) -> Result<Value, ProxyError> {
        let endpoint = endpoint(method);
        let (path, rest) = endpoint.resolve(kwargs)?;
        let url = format!("{}/{}", self.base_url, path);
        debug!("Splitwise {} -> {:?} {}", method, endpoint.verb, url);

        let request = match endpoint.verb {
            Verb::Get => self.client.get(&url).query(&query_pairs(&rest)),
            Verb::Post => self.client.post(&url).json(&rest),
        };
        let response = request
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| ProxyError::UpstreamRequest(format!("{} failed: {}", method, e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|body| error_message(&body))
                .unwrap_or(text);
            return Err(ProxyError::UpstreamStatus {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ProxyError::InvalidResponse(format!("{}: {}", method, e)))?;
        if let Some(message) = error_message(&body) {
            return Err(ProxyError::UpstreamRejected(message));
        }
        Ok(body)
    }

    fn convert(&self, method: Method, raw: Value) -> Value {
        endpoint(method).unwrap_envelope(raw)
    }
}

impl std::fmt::Debug for SplitwiseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplitwiseClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Splitwise reports failures as `{"errors": {...}}`, `{"errors": [...]}` or `{"error": "..."}`.
pub fn error_message(body: &Value) -> Option<String> {
    if let Some(error) = body.get("error").and_then(Value::as_str) {
        return Some(error.to_string());
    }
    match body.get("errors")? {
        Value::Object(map) if !map.is_empty() => Some(
            map.iter()
                .map(|(field, msgs)| format!("{}: {}", field, flatten(msgs)))
                .collect::<Vec<_>>()
                .join("; "),
        ),
        Value::Array(list) if !list.is_empty() => Some(flatten(&Value::Array(list.clone()))),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn flatten(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(flatten).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}
