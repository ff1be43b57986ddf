use super::entity::Entity;
use crate::core::errors::ProxyError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

/// Keyword arguments of a proxied call.
pub type Kwargs = serde_json::Map<String, serde_json::Value>;

/// Filter parameters of `list_expenses`. Every one of them changes the response,
/// so every one of them is part of the cache key when present.
pub const EXPENSE_LIST_FILTERS: &[&str] = &[
    "group_id",
    "friend_id",
    "dated_after",
    "dated_before",
    "updated_after",
    "updated_before",
    "limit",
    "offset",
];

/// Which call parameters make up the cache key of a read method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyFields {
    /// The method name alone identifies the response.
    MethodOnly,
    /// Single-entity lookup; the `id` kwarg is stored under `stored_as`.
    /// Calls without an `id` are not cacheable.
    EntityId { stored_as: &'static str },
    /// Optional filters, each stored verbatim under its own name.
    Filters(&'static [&'static str]),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodKind {
    /// Cacheable retrieval belonging to one partition.
    Read { entity: Entity, key: KeyFields },
    /// Retrieval that is neither cached nor invalidating.
    Passthrough,
    /// Mutating action; on success every listed partition is cleared.
    Write { invalidates: &'static [Entity] },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    GetCurrentUser,
    ListGroups,
    GetGroup,
    ListExpenses,
    GetExpense,
    ListFriends,
    GetFriend,
    ListCategories,
    ListCurrencies,
    ListNotifications,
    GetComments,
    CreateExpense,
    UpdateExpense,
    DeleteExpense,
    UndeleteExpense,
    CreateGroup,
    DeleteGroup,
    UndeleteGroup,
    AddUserToGroup,
    RemoveUserFromGroup,
    CreateFriend,
    CreateFriends,
    DeleteFriend,
    UpdateUser,
    CreateComment,
    DeleteComment,
}

impl Method {
    pub const ALL: [Method; 26] = [
        Method::GetCurrentUser,
        Method::ListGroups,
        Method::GetGroup,
        Method::ListExpenses,
        Method::GetExpense,
        Method::ListFriends,
        Method::GetFriend,
        Method::ListCategories,
        Method::ListCurrencies,
        Method::ListNotifications,
        Method::GetComments,
        Method::CreateExpense,
        Method::UpdateExpense,
        Method::DeleteExpense,
        Method::UndeleteExpense,
        Method::CreateGroup,
        Method::DeleteGroup,
        Method::UndeleteGroup,
        Method::AddUserToGroup,
        Method::RemoveUserFromGroup,
        Method::CreateFriend,
        Method::CreateFriends,
        Method::DeleteFriend,
        Method::UpdateUser,
        Method::CreateComment,
        Method::DeleteComment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GetCurrentUser => "get_current_user",
            Method::ListGroups => "list_groups",
            Method::GetGroup => "get_group",
            Method::ListExpenses => "list_expenses",
            Method::GetExpense => "get_expense",
            Method::ListFriends => "list_friends",
            Method::GetFriend => "get_friend",
            Method::ListCategories => "list_categories",
            Method::ListCurrencies => "list_currencies",
            Method::ListNotifications => "list_notifications",
            Method::GetComments => "get_comments",
            Method::CreateExpense => "create_expense",
            Method::UpdateExpense => "update_expense",
            Method::DeleteExpense => "delete_expense",
            Method::UndeleteExpense => "undelete_expense",
            Method::CreateGroup => "create_group",
            Method::DeleteGroup => "delete_group",
            Method::UndeleteGroup => "undelete_group",
            Method::AddUserToGroup => "add_user_to_group",
            Method::RemoveUserFromGroup => "remove_user_from_group",
            Method::CreateFriend => "create_friend",
            Method::CreateFriends => "create_friends",
            Method::DeleteFriend => "delete_friend",
            Method::UpdateUser => "update_user",
            Method::CreateComment => "create_comment",
            Method::DeleteComment => "delete_comment",
        }
    }

    pub fn kind(&self) -> MethodKind {
        use MethodKind::{Passthrough, Read, Write};
        match self {
            Method::GetCurrentUser => Read {
                entity: Entity::Users,
                key: KeyFields::MethodOnly,
            },
            Method::ListGroups => Read {
                entity: Entity::Groups,
                key: KeyFields::MethodOnly,
            },
            Method::GetGroup => Read {
                entity: Entity::Groups,
                key: KeyFields::EntityId { stored_as: "group_id" },
            },
            Method::ListExpenses => Read {
                entity: Entity::Expenses,
                key: KeyFields::Filters(EXPENSE_LIST_FILTERS),
            },
            Method::GetExpense => Read {
                entity: Entity::Expenses,
                key: KeyFields::EntityId {
                    stored_as: "expense_id",
                },
            },
            Method::ListFriends => Read {
                entity: Entity::Friends,
                key: KeyFields::MethodOnly,
            },
            Method::GetFriend => Read {
                entity: Entity::Friends,
                key: KeyFields::EntityId { stored_as: "friend_id" },
            },
            Method::ListCategories => Read {
                entity: Entity::Categories,
                key: KeyFields::MethodOnly,
            },
            Method::ListCurrencies => Read {
                entity: Entity::Currencies,
                key: KeyFields::MethodOnly,
            },
            Method::ListNotifications => Read {
                entity: Entity::Notifications,
                key: KeyFields::MethodOnly,
            },
            Method::GetComments => Passthrough,
            Method::CreateExpense | Method::UpdateExpense | Method::DeleteExpense | Method::UndeleteExpense => {
                Write {
                    invalidates: &[Entity::Expenses],
                }
            }
            Method::CreateGroup
            | Method::DeleteGroup
            | Method::UndeleteGroup
            | Method::AddUserToGroup
            | Method::RemoveUserFromGroup => Write {
                invalidates: &[Entity::Groups],
            },
            Method::CreateFriend | Method::CreateFriends | Method::DeleteFriend => Write {
                invalidates: &[Entity::Friends],
            },
            Method::UpdateUser => Write {
                invalidates: &[Entity::Users],
            },
            // Expense payloads carry comment counts.
            Method::CreateComment | Method::DeleteComment => Write {
                invalidates: &[Entity::Expenses],
            },
        }
    }

    pub fn is_read(&self) -> bool {
        matches!(self.kind(), MethodKind::Read { .. })
    }

    pub fn is_write(&self) -> bool {
        matches!(self.kind(), MethodKind::Write { .. })
    }
}

impl FromStr for Method {
    type Err = ProxyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ProxyError::UnsupportedMethod(s.to_string()))
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
