//! Cache key construction.
//!
//! A key is the method name plus every parameter that changes the upstream
//! response. Two calls share an entry only if the method and every key field
//! (including whether the field is present at all) are identical.

use crate::core::models::method::{KeyFields, Kwargs, Method, MethodKind};
use crate::infrastructure::store::Document;
use serde_json::Value;
use std::collections::BTreeMap;

/// Name of the document field holding the key fingerprint.
pub const KEY_FIELD: &str = "key";
pub const METHOD_FIELD: &str = "method";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheKey {
    method: Method,
    filters: BTreeMap<&'static str, Value>,
}

impl CacheKey {
    /// Builds the key for `method` from the call's kwargs.
    ///
    /// Returns `None` when the call is not cacheable: non-read methods, and
    /// single-entity lookups called without an `id`. JSON `null` kwargs count
    /// as absent.
    pub fn build(method: Method, kwargs: &Kwargs) -> Option<CacheKey> {
        let MethodKind::Read { key, .. } = method.kind() else {
            return None;
        };

        let mut filters = BTreeMap::new();
        match key {
            KeyFields::MethodOnly => {}
            KeyFields::EntityId { stored_as } => {
                let id = present(kwargs, "id")?;
                filters.insert(stored_as, id.clone());
            }
            KeyFields::Filters(fields) => {
                for field in fields {
                    if let Some(value) = present(kwargs, field) {
                        filters.insert(*field, value.clone());
                    }
                }
            }
        }

        Some(CacheKey { method, filters })
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn filters(&self) -> &BTreeMap<&'static str, Value> {
        &self.filters
    }

    /// Canonical string form, e.g. `list_expenses?dated_after="2025-10-01"&limit=20`.
    ///
    /// Values are JSON-encoded so `"1"` and `1` stay distinct.
    pub fn fingerprint(&self) -> String {
        if self.filters.is_empty() {
            return self.method.as_str().to_string();
        }
        let params = self
            .filters
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.method, params)
    }

    /// Exact-match lookup query for this key.
    pub fn query(&self) -> Document {
        let mut query = Document::new();
        query.insert(KEY_FIELD.to_string(), Value::String(self.fingerprint()));
        query
    }

    /// Identifying fields written into the cache document.
    pub fn fields(&self) -> Document {
        let mut fields = self.query();
        fields.insert(METHOD_FIELD.to_string(), Value::String(self.method.as_str().to_string()));
        for (name, value) in &self.filters {
            fields.insert((*name).to_string(), value.clone());
        }
        fields
    }
}

fn present<'a>(kwargs: &'a Kwargs, name: &str) -> Option<&'a Value> {
    kwargs.get(name).filter(|v| !v.is_null())
}
