// Environment variable names
pub const ENV_PORT: &str = "PORT";
pub const ENV_HOST: &str = "HOST";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_SPLITWISE_API_KEY: &str = "SPLITWISE_API_KEY";
pub const ENV_SPLITWISE_BASE_URL: &str = "SPLITWISE_BASE_URL";
pub const ENV_SPLITWISE_TIMEOUT_SECS: &str = "SPLITWISE_TIMEOUT_SECS";
pub const ENV_CACHE_ENABLED: &str = "CACHE_ENABLED";
pub const ENV_CACHE_TTL_EXPENSES_MINUTES: &str = "CACHE_TTL_EXPENSES_MINUTES";
pub const ENV_CACHE_TTL_FRIENDS_MINUTES: &str = "CACHE_TTL_FRIENDS_MINUTES";
pub const ENV_CACHE_TTL_USERS_MINUTES: &str = "CACHE_TTL_USERS_MINUTES";
pub const ENV_CACHE_TTL_GROUPS_MINUTES: &str = "CACHE_TTL_GROUPS_MINUTES";
pub const ENV_CACHE_TTL_CATEGORIES_MINUTES: &str = "CACHE_TTL_CATEGORIES_MINUTES";
pub const ENV_CACHE_TTL_CURRENCIES_MINUTES: &str = "CACHE_TTL_CURRENCIES_MINUTES";

// Defaults
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_SPLITWISE_BASE_URL: &str = "https://secure.splitwise.com/api/v3.0";
pub const DEFAULT_SPLITWISE_TIMEOUT_SECS: u64 = 30;

// TTLs in minutes
pub const DEFAULT_TTL_EXPENSES: u32 = 5;
pub const DEFAULT_TTL_FRIENDS: u32 = 5;
pub const DEFAULT_TTL_USERS: u32 = 60;
pub const DEFAULT_TTL_GROUPS: u32 = 60;
pub const DEFAULT_TTL_CATEGORIES: u32 = 1440;
pub const DEFAULT_TTL_CURRENCIES: u32 = 1440;

// Operation log actions
pub const CACHE_HIT: &str = "CACHE_HIT";
pub const CACHE_MISS: &str = "CACHE_MISS";
pub const CACHE_WRITE: &str = "CACHE_WRITE";
pub const CACHE_FALLBACK: &str = "CACHE_FALLBACK";
pub const CACHE_INVALIDATE: &str = "CACHE_INVALIDATE";
pub const CACHE_ERROR: &str = "CACHE_ERROR";
pub const CACHE_WRITE_ERROR: &str = "CACHE_WRITE_ERROR";
pub const INVALIDATE_ERROR: &str = "INVALIDATE_ERROR";
pub const API_ERROR: &str = "API_ERROR";
pub const API_CALL: &str = "API_CALL";
