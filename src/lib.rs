pub mod api;
pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;

pub use crate::core::cached_client::CachedSplitwiseClient;
pub use crate::core::errors::ProxyError;
pub use crate::core::policy::{CachePolicy, TtlPolicy};
pub use infrastructure::logging::in_memory::InMemoryLogging;
pub use infrastructure::store::in_memory::InMemoryDocumentStore;
pub use infrastructure::upstream::splitwise::SplitwiseClient;

#[cfg(test)]
mod tests; // Include integration tests
