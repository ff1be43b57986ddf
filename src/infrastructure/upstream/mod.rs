pub mod endpoints;
pub mod splitwise;

use crate::core::errors::ProxyError;
use crate::core::models::method::{Kwargs, Method};
use async_trait::async_trait;
use serde_json::Value;

/// Remote Splitwise operations addressed by canonical method name.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Performs the remote call and returns the raw response body.
    async fn invoke(&self, method: Method, kwargs: &Kwargs) -> Result<Value, ProxyError>;

    /// Turns a raw response into the plain data callers and the cache see.
    fn convert(&self, method: Method, raw: Value) -> Value;
}
