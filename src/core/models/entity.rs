use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Cache partition. Each entity type owns one collection in the document store
/// and has its own TTL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Expenses,
    Friends,
    Users,
    Groups,
    Categories,
    Currencies,
    Notifications,
}

impl Entity {
    pub const ALL: [Entity; 7] = [
        Entity::Expenses,
        Entity::Friends,
        Entity::Users,
        Entity::Groups,
        Entity::Categories,
        Entity::Currencies,
        Entity::Notifications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Expenses => "expenses",
            Entity::Friends => "friends",
            Entity::Users => "users",
            Entity::Groups => "groups",
            Entity::Categories => "categories",
            Entity::Currencies => "currencies",
            Entity::Notifications => "notifications",
        }
    }

    /// Notifications have no partition at all: they are never written or read.
    pub fn is_stored(&self) -> bool {
        !matches!(self, Entity::Notifications)
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
