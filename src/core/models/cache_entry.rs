use crate::core::cache_key::{CacheKey, METHOD_FIELD};
use crate::core::errors::ProxyError;
use crate::core::models::method::Method;
use crate::infrastructure::store::{Document, StoredDocument};
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use uuid::Uuid;

pub const RESPONSE_FIELD: &str = "response_data";
pub const UPDATED_FIELD: &str = "last_updated_date";

/// One cached upstream response.
///
/// Documents are parsed into this struct on read; anything that does not
/// parse is a malformed entry and never counts as a hit.
#[derive(Clone, Debug, PartialEq)]
pub struct CacheEntry {
    pub id: Option<Uuid>,
    pub method: Method,
    pub response_data: Value,
    pub last_updated_date: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(method: Method, response_data: Value, now: DateTime<Utc>) -> Self {
        CacheEntry {
            id: None,
            method,
            response_data,
            last_updated_date: now,
        }
    }

    /// Full document body for an upsert under `key`.
    pub fn to_document(&self, key: &CacheKey) -> Document {
        let mut doc = key.fields();
        doc.insert(RESPONSE_FIELD.to_string(), self.response_data.clone());
        doc.insert(
            UPDATED_FIELD.to_string(),
            Value::String(self.last_updated_date.to_rfc3339()),
        );
        doc
    }

    pub fn from_document(doc: &StoredDocument) -> Result<Self, ProxyError> {
        let method = doc
            .fields
            .get(METHOD_FIELD)
            .and_then(Value::as_str)
            .ok_or_else(|| ProxyError::MalformedEntry(format!("{}: missing method", doc.id)))?
            .parse::<Method>()
            .map_err(|e| ProxyError::MalformedEntry(format!("{}: {}", doc.id, e)))?;

        let response_data = stale_response(doc)
            .ok_or_else(|| ProxyError::MalformedEntry(format!("{}: missing {}", doc.id, RESPONSE_FIELD)))?;

        let raw_ts = doc
            .fields
            .get(UPDATED_FIELD)
            .and_then(Value::as_str)
            .ok_or_else(|| ProxyError::MalformedEntry(format!("{}: missing {}", doc.id, UPDATED_FIELD)))?;
        let last_updated_date = DateTime::parse_from_rfc3339(raw_ts)
            .map_err(|e| ProxyError::MalformedEntry(format!("{}: bad timestamp '{}': {}", doc.id, raw_ts, e)))?
            .with_timezone(&Utc);

        Ok(CacheEntry {
            id: Some(doc.id),
            method,
            response_data,
            last_updated_date,
        })
    }

    /// Fresh while strictly younger than the TTL. A TTL of zero is never fresh.
    pub fn is_fresh(&self, ttl_minutes: u32, now: DateTime<Utc>) -> bool {
        if ttl_minutes == 0 {
            return false;
        }
        now - self.last_updated_date < Duration::minutes(i64::from(ttl_minutes))
    }
}

/// Response payload of a document regardless of its age or timestamp.
pub fn stale_response(doc: &StoredDocument) -> Option<Value> {
    doc.fields.get(RESPONSE_FIELD).filter(|v| !v.is_null()).cloned()
}
