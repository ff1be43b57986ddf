pub mod cache_key;
pub mod cached_client;
pub mod clock;
pub mod errors;
pub mod models;
pub mod policy;
pub mod reports;
