use crate::constants::{
    DEFAULT_TTL_CATEGORIES, DEFAULT_TTL_CURRENCIES, DEFAULT_TTL_EXPENSES, DEFAULT_TTL_FRIENDS, DEFAULT_TTL_GROUPS,
    DEFAULT_TTL_USERS, ENV_CACHE_ENABLED, ENV_CACHE_TTL_CATEGORIES_MINUTES, ENV_CACHE_TTL_CURRENCIES_MINUTES,
    ENV_CACHE_TTL_EXPENSES_MINUTES, ENV_CACHE_TTL_FRIENDS_MINUTES, ENV_CACHE_TTL_GROUPS_MINUTES,
    ENV_CACHE_TTL_USERS_MINUTES,
};
use crate::core::models::entity::Entity;
use log::warn;

/// TTL in minutes per entity type. Zero means "never serve from cache".
///
/// Notifications have no field: they are always fresh and cannot be configured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TtlPolicy {
    pub expenses: u32,
    pub friends: u32,
    pub users: u32,
    pub groups: u32,
    pub categories: u32,
    pub currencies: u32,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        TtlPolicy {
            expenses: DEFAULT_TTL_EXPENSES,
            friends: DEFAULT_TTL_FRIENDS,
            users: DEFAULT_TTL_USERS,
            groups: DEFAULT_TTL_GROUPS,
            categories: DEFAULT_TTL_CATEGORIES,
            currencies: DEFAULT_TTL_CURRENCIES,
        }
    }
}

impl TtlPolicy {
    pub fn ttl_minutes(&self, entity: Entity) -> u32 {
        match entity {
            Entity::Expenses => self.expenses,
            Entity::Friends => self.friends,
            Entity::Users => self.users,
            Entity::Groups => self.groups,
            Entity::Categories => self.categories,
            Entity::Currencies => self.currencies,
            Entity::Notifications => 0,
        }
    }
}

/// Cache configuration fixed at startup and handed to the caching client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CachePolicy {
    pub enabled: bool,
    pub ttl: TtlPolicy,
}

impl Default for CachePolicy {
    fn default() -> Self {
        CachePolicy {
            enabled: true,
            ttl: TtlPolicy::default(),
        }
    }
}

impl CachePolicy {
    pub fn disabled() -> Self {
        CachePolicy {
            enabled: false,
            ..CachePolicy::default()
        }
    }

    /// Reads the toggle and per-entity overrides through `lookup`
    /// (normally the process environment).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = lookup(ENV_CACHE_ENABLED)
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(true);

        let ttl = |name: &str, default: u32| -> u32 {
            match lookup(name) {
                None => default,
                Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                    warn!("Ignoring invalid {}='{}', using {} minutes", name, raw, default);
                    default
                }),
            }
        };

        CachePolicy {
            enabled,
            ttl: TtlPolicy {
                expenses: ttl(ENV_CACHE_TTL_EXPENSES_MINUTES, DEFAULT_TTL_EXPENSES),
                friends: ttl(ENV_CACHE_TTL_FRIENDS_MINUTES, DEFAULT_TTL_FRIENDS),
                users: ttl(ENV_CACHE_TTL_USERS_MINUTES, DEFAULT_TTL_USERS),
                groups: ttl(ENV_CACHE_TTL_GROUPS_MINUTES, DEFAULT_TTL_GROUPS),
                categories: ttl(ENV_CACHE_TTL_CATEGORIES_MINUTES, DEFAULT_TTL_CATEGORIES),
                currencies: ttl(ENV_CACHE_TTL_CURRENCIES_MINUTES, DEFAULT_TTL_CURRENCIES),
            },
        }
    }

    pub fn ttl_minutes(&self, entity: Entity) -> u32 {
        self.ttl.ttl_minutes(entity)
    }
}
