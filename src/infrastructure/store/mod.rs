pub mod in_memory;

use crate::core::errors::ProxyError;
use crate::core::models::entity::Entity;
use async_trait::async_trait;
use uuid::Uuid;

/// Schemaless document body.
pub type Document = serde_json::Map<String, serde_json::Value>;

#[derive(Clone, Debug, PartialEq)]
pub struct StoredDocument {
    pub id: Uuid,
    pub fields: Document,
}

impl StoredDocument {
    /// A document matches when every query field is present with an equal value.
    /// The empty query matches everything.
    pub fn matches(&self, query: &Document) -> bool {
        query.iter().all(|(k, v)| self.fields.get(k) == Some(v))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    Inserted(Uuid),
    NotFound,
}

/// Collection-oriented store with one collection per [`Entity`] partition.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_one(&self, partition: Entity, query: &Document) -> Result<Option<StoredDocument>, ProxyError>;
    async fn find_many(&self, partition: Entity, query: &Document) -> Result<Vec<StoredDocument>, ProxyError>;
    async fn delete_one(&self, partition: Entity, id: Uuid) -> Result<bool, ProxyError>;
    async fn delete_many(&self, partition: Entity, query: &Document) -> Result<u64, ProxyError>;
    /// Merges `fields` into the first matching document, or inserts a new one
    /// when nothing matches and `upsert` is set.
    async fn update_one(
        &self,
        partition: Entity,
        query: &Document,
        fields: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, ProxyError>;
    async fn ping(&self) -> Result<(), ProxyError>;
}
