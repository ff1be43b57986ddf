//! Splitwise REST v3.0 endpoint table.

use crate::core::errors::ProxyError;
use crate::core::models::method::{Kwargs, Method};
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub verb: Verb,
    pub path: &'static str,
    /// The `id` kwarg is appended as a path segment.
    pub id_in_path: bool,
    /// Top-level member wrapping the payload, e.g. `{"groups": [...]}`.
    pub envelope: Option<&'static str>,
}

const fn get(path: &'static str, id_in_path: bool, envelope: &'static str) -> Endpoint {
    Endpoint {
        verb: Verb::Get,
        path,
        id_in_path,
        envelope: Some(envelope),
    }
}

const fn post(path: &'static str, id_in_path: bool, envelope: Option<&'static str>) -> Endpoint {
    Endpoint {
        verb: Verb::Post,
        path,
        id_in_path,
        envelope,
    }
}

pub fn endpoint(method: Method) -> Endpoint {
    match method {
        Method::GetCurrentUser => get("get_current_user", false, "user"),
        Method::ListGroups => get("get_groups", false, "groups"),
        Method::GetGroup => get("get_group", true, "group"),
        Method::ListExpenses => get("get_expenses", false, "expenses"),
        Method::GetExpense => get("get_expense", true, "expense"),
        Method::ListFriends => get("get_friends", false, "friends"),
        Method::GetFriend => get("get_friend", true, "friend"),
        Method::ListCategories => get("get_categories", false, "categories"),
        Method::ListCurrencies => get("get_currencies", false, "currencies"),
        Method::ListNotifications => get("get_notifications", false, "notifications"),
        Method::GetComments => get("get_comments", false, "comments"),
        Method::CreateExpense => post("create_expense", false, Some("expenses")),
        Method::UpdateExpense => post("update_expense", true, Some("expenses")),
        Method::DeleteExpense => post("delete_expense", true, None),
        Method::UndeleteExpense => post("undelete_expense", true, None),
        Method::CreateGroup => post("create_group", false, Some("group")),
        Method::DeleteGroup => post("delete_group", true, None),
        Method::UndeleteGroup => post("undelete_group", true, None),
        Method::AddUserToGroup => post("add_user_to_group", false, None),
        Method::RemoveUserFromGroup => post("remove_user_from_group", false, None),
        Method::CreateFriend => post("create_friend", false, Some("friend")),
        Method::CreateFriends => post("create_friends", false, Some("users")),
        Method::DeleteFriend => post("delete_friend", true, None),
        Method::UpdateUser => post("update_user", true, Some("user")),
        Method::CreateComment => post("create_comment", false, Some("comment")),
        Method::DeleteComment => post("delete_comment", true, Some("comment")),
    }
}

impl Endpoint {
    /// Resolves the request path and returns the kwargs left for the query or body.
    pub fn resolve(&self, kwargs: &Kwargs) -> Result<(String, Kwargs), ProxyError> {
        let mut rest = kwargs.clone();
        if !self.id_in_path {
            return Ok((self.path.to_string(), rest));
        }
        let id = match rest.remove("id") {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) if !s.trim().is_empty() => s,
            _ => return Err(ProxyError::invalid_input("id", format!("{} requires an id", self.path))),
        };
        Ok((format!("{}/{}", self.path, id), rest))
    }

    pub fn unwrap_envelope(&self, raw: Value) -> Value {
        match (self.envelope, raw) {
            (Some(key), Value::Object(mut body)) if body.contains_key(key) => body.remove(key).unwrap_or(Value::Null),
            (_, raw) => raw,
        }
    }
}

/// Query-string pairs for a GET call. Nulls are skipped; composites are sent as JSON text.
pub fn query_pairs(kwargs: &Kwargs) -> Vec<(String, String)> {
    kwargs
        .iter()
        .filter_map(|(k, v)| {
            let rendered = match v {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                other => other.to_string(),
            };
            Some((k.clone(), rendered))
        })
        .collect()
}
