//! Caching wrapper around an [`UpstreamClient`].
//!
//! Read methods are served from a per-entity document store partition while
//! their entry is younger than the entity TTL. Upstream failures on reads fall
//! back to the last stored response regardless of age. Successful writes clear
//! the partitions they affect. Failures of the store itself are logged and
//! otherwise ignored.

use crate::constants::{
    API_CALL, API_ERROR, CACHE_ERROR, CACHE_FALLBACK, CACHE_HIT, CACHE_INVALIDATE, CACHE_MISS, CACHE_WRITE,
    CACHE_WRITE_ERROR, INVALIDATE_ERROR,
};
use crate::core::cache_key::CacheKey;
use crate::core::clock::{Clock, SystemClock};
use crate::core::errors::ProxyError;
use crate::core::models::audit::AppLog;
use crate::core::models::cache_entry::{CacheEntry, stale_response};
use crate::core::models::entity::Entity;
use crate::core::models::method::{Kwargs, Method, MethodKind};
use crate::core::policy::CachePolicy;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::store::{Document, DocumentStore};
use crate::infrastructure::upstream::UpstreamClient;
use log::{debug, info, warn};
use serde_json::{Value, json};
use std::sync::Arc;

/// Outcome of the normal (TTL-checked) cache lookup.
enum Lookup {
    Fresh(Value),
    /// Entry existed but was expired or malformed and has been deleted.
    /// Carries its payload, if any, for use as a stale fallback.
    Expired(Option<Value>),
    Miss,
}

pub struct CachedSplitwiseClient<U: UpstreamClient, S: DocumentStore, L: LoggingService> {
    upstream: U,
    store: S,
    logging: L,
    policy: CachePolicy,
    clock: Arc<dyn Clock>,
}

impl<U: UpstreamClient, S: DocumentStore, L: LoggingService> CachedSplitwiseClient<U, S, L> {
    pub fn new(upstream: U, store: S, logging: L, policy: CachePolicy) -> Self {
        info!(
            "Initializing cached Splitwise client (cache {})",
            if policy.enabled { "enabled" } else { "disabled" }
        );
        CachedSplitwiseClient {
            upstream,
            store,
            logging,
            policy,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, ProxyError> {
        self.logging.get_logs().await
    }

    /// Calls a Splitwise method by name. Unknown names are rejected before
    /// touching the cache or the upstream.
    pub async fn call(&self, method_name: &str, kwargs: Kwargs) -> Result<Value, ProxyError> {
        let method: Method = method_name.parse()?;
        self.call_method(method, kwargs).await
    }

    pub async fn call_method(&self, method: Method, kwargs: Kwargs) -> Result<Value, ProxyError> {
        match method.kind() {
            MethodKind::Read { entity, .. } => self.read(method, entity, kwargs).await,
            MethodKind::Passthrough => {
                let raw = self.invoke_upstream(method, &kwargs).await?;
                self.record(API_CALL, method, json!({ "cached": false })).await;
                Ok(self.upstream.convert(method, raw))
            }
            MethodKind::Write { invalidates } => {
                let raw = self.invoke_upstream(method, &kwargs).await?;
                self.invalidate(method, invalidates).await;
                Ok(raw)
            }
        }
    }

    async fn read(&self, method: Method, entity: Entity, kwargs: Kwargs) -> Result<Value, ProxyError> {
        let key = if self.policy.enabled && entity.is_stored() {
            CacheKey::build(method, &kwargs)
        } else {
            None
        };

        let mut expired = None;
        if let Some(key) = &key {
            match self.lookup(entity, key).await {
                Lookup::Fresh(data) => {
                    debug!("Cache hit for {}", key.fingerprint());
                    self.record(CACHE_HIT, method, json!({ "key": key.fingerprint(), "cached": true }))
                        .await;
                    return Ok(data);
                }
                Lookup::Expired(data) => expired = data,
                Lookup::Miss => {}
            }
        }

        match self.upstream.invoke(method, &kwargs).await {
            Ok(raw) => {
                let data = self.upstream.convert(method, raw);
                if let Some(key) = &key {
                    self.save(entity, key, &data).await;
                }
                self.record(CACHE_MISS, method, json!({ "cached": false })).await;
                Ok(data)
            }
            Err(err) => {
                if let Some(key) = &key {
                    let stale = match expired {
                        Some(data) => Some(data),
                        None => self.lookup_stale(entity, key).await,
                    };
                    if let Some(data) = stale {
                        warn!("Serving stale cache for {} after upstream error: {}", key.fingerprint(), err);
                        self.record(
                            CACHE_FALLBACK,
                            method,
                            json!({ "key": key.fingerprint(), "cached": true, "stale": true, "error": err.to_string() }),
                        )
                        .await;
                        return Ok(data);
                    }
                }
                self.record(API_ERROR, method, json!({ "error": err.to_string() })).await;
                Err(err)
            }
        }
    }

    async fn invoke_upstream(&self, method: Method, kwargs: &Kwargs) -> Result<Value, ProxyError> {
        match self.upstream.invoke(method, kwargs).await {
            Ok(raw) => Ok(raw),
            Err(err) => {
                self.record(API_ERROR, method, json!({ "error": err.to_string() })).await;
                Err(err)
            }
        }
    }

    async fn lookup(&self, entity: Entity, key: &CacheKey) -> Lookup {
        match self.try_lookup(entity, key).await {
            Ok(lookup) => lookup,
            Err(err) => {
                warn!("Cache read failed for {}: {}", key.fingerprint(), err);
                self.record(CACHE_ERROR, key.method(), json!({ "error": err.to_string() }))
                    .await;
                Lookup::Miss
            }
        }
    }

    async fn try_lookup(&self, entity: Entity, key: &CacheKey) -> Result<Lookup, ProxyError> {
        let Some(doc) = self.store.find_one(entity, &key.query()).await? else {
            return Ok(Lookup::Miss);
        };

        let ttl = self.policy.ttl_minutes(entity);
        let stale = match CacheEntry::from_document(&doc) {
            Ok(entry) if entry.is_fresh(ttl, self.clock.now()) => return Ok(Lookup::Fresh(entry.response_data)),
            Ok(entry) => Some(entry.response_data),
            Err(err) => {
                debug!("Discarding cache document for {}: {}", key.fingerprint(), err);
                stale_response(&doc)
            }
        };

        self.store.delete_one(entity, doc.id).await?;
        Ok(Lookup::Expired(stale))
    }

    /// Read-only lookup ignoring TTL. Never deletes.
    async fn lookup_stale(&self, entity: Entity, key: &CacheKey) -> Option<Value> {
        match self.store.find_one(entity, &key.query()).await {
            Ok(doc) => doc.as_ref().and_then(stale_response),
            Err(err) => {
                warn!("Stale cache read failed for {}: {}", key.fingerprint(), err);
                self.record(CACHE_ERROR, key.method(), json!({ "error": err.to_string() }))
                    .await;
                None
            }
        }
    }

    async fn save(&self, entity: Entity, key: &CacheKey, data: &Value) {
        let entry = CacheEntry::new(key.method(), data.clone(), self.clock.now());
        match self
            .store
            .update_one(entity, &key.query(), entry.to_document(key), true)
            .await
        {
            Ok(_) => {
                self.record(CACHE_WRITE, key.method(), json!({ "key": key.fingerprint(), "cached": true }))
                    .await
            }
            Err(err) => {
                warn!("Cache write failed for {}: {}", key.fingerprint(), err);
                self.record(CACHE_WRITE_ERROR, key.method(), json!({ "error": err.to_string() }))
                    .await;
            }
        }
    }

    async fn invalidate(&self, method: Method, partitions: &[Entity]) {
        if !self.policy.enabled {
            return;
        }
        for entity in partitions {
            match self.store.delete_many(*entity, &Document::new()).await {
                Ok(removed) => {
                    info!("{} invalidated {} cached {} entries", method, removed, entity);
                    self.record(CACHE_INVALIDATE, method, json!({ "entity": entity, "removed": removed }))
                        .await;
                }
                Err(err) => {
                    warn!("Cache invalidation of {} after {} failed: {}", entity, method, err);
                    self.record(INVALIDATE_ERROR, method, json!({ "entity": entity, "error": err.to_string() }))
                        .await;
                }
            }
        }
    }

    async fn record(&self, action: &str, method: Method, details: Value) {
        if let Err(err) = self.logging.log_action(action, details, Some(method.as_str())).await {
            warn!("Failed to record {} for {}: {}", action, method, err);
        }
    }

    // Helpers built on cached reads

    /// ID of the authenticated user, if the profile carries one.
    pub async fn get_current_user_id(&self) -> Result<Option<i64>, ProxyError> {
        let me = self.call_method(Method::GetCurrentUser, Kwargs::new()).await?;
        Ok(me.get("id").and_then(Value::as_i64))
    }

    /// Group whose name matches exactly (case sensitive).
    pub async fn get_group_by_name(&self, name: &str) -> Result<Option<Value>, ProxyError> {
        let groups = self.call_method(Method::ListGroups, Kwargs::new()).await?;
        Ok(groups
            .as_array()
            .and_then(|list| list.iter().find(|g| g.get("name").and_then(Value::as_str) == Some(name)))
            .cloned())
    }
}

/// Member of `group` whose first name or "first last" equals `participant_name`.
pub fn get_user_from_group(group: &Value, participant_name: &str) -> Option<Value> {
    let members = group.get("members").and_then(Value::as_array)?;
    members
        .iter()
        .find(|member| {
            let first = member.get("first_name").and_then(Value::as_str).unwrap_or("");
            let last = member.get("last_name").and_then(Value::as_str).unwrap_or("");
            let full = format!("{} {}", first, last);
            participant_name == first || participant_name == full.trim()
        })
        .cloned()
}
