use crate::core::errors::ProxyError;
use crate::core::models::entity::Entity;
use crate::infrastructure::store::{Document, DocumentStore, StoredDocument, UpdateOutcome};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-wide document store kept in memory. Clones share the same data.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    partitions: Arc<RwLock<HashMap<Entity, Vec<StoredDocument>>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        InMemoryDocumentStore {
            partitions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Inserts a document verbatim and returns its id.
    pub async fn insert(&self, partition: Entity, fields: Document) -> Uuid {
        let id = Uuid::new_v4();
        let mut partitions = self.partitions.write().await;
        partitions
            .entry(partition)
            .or_default()
            .push(StoredDocument { id, fields });
        id
    }

    pub async fn len(&self, partition: Entity) -> usize {
        let partitions = self.partitions.read().await;
        partitions.get(&partition).map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn find_one(&self, partition: Entity, query: &Document) -> Result<Option<StoredDocument>, ProxyError> {
        let partitions = self.partitions.read().await;
        Ok(partitions
            .get(&partition)
            .and_then(|docs| docs.iter().find(|d| d.matches(query)).cloned()))
    }

    async fn find_many(&self, partition: Entity, query: &Document) -> Result<Vec<StoredDocument>, ProxyError> {
        let partitions = self.partitions.read().await;
        Ok(partitions
            .get(&partition)
            .map(|docs| docs.iter().filter(|d| d.matches(query)).cloned().collect())
            .unwrap_or_default())
    }

    async fn delete_one(&self, partition: Entity, id: Uuid) -> Result<bool, ProxyError> {
        let mut partitions = self.partitions.write().await;
        let Some(docs) = partitions.get_mut(&partition) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|d| d.id != id);
        Ok(docs.len() != before)
    }

    async fn delete_many(&self, partition: Entity, query: &Document) -> Result<u64, ProxyError> {
        let mut partitions = self.partitions.write().await;
        let Some(docs) = partitions.get_mut(&partition) else {
            return Ok(0);
        };
        let before = docs.len();
        docs.retain(|d| !d.matches(query));
        Ok((before - docs.len()) as u64)
    }

    async fn update_one(
        &self,
        partition: Entity,
        query: &Document,
        fields: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, ProxyError> {
        let mut partitions = self.partitions.write().await;
        let docs = partitions.entry(partition).or_default();

        if let Some(doc) = docs.iter_mut().find(|d| d.matches(query)) {
            doc.fields.extend(fields);
            return Ok(UpdateOutcome::Updated);
        }
        if !upsert {
            return Ok(UpdateOutcome::NotFound);
        }

        // Mongo-style upsert: the inserted document carries the query fields too.
        let mut inserted = query.clone();
        inserted.extend(fields);
        let id = Uuid::new_v4();
        docs.push(StoredDocument { id, fields: inserted });
        Ok(UpdateOutcome::Inserted(id))
    }

    async fn ping(&self) -> Result<(), ProxyError> {
        Ok(())
    }
}
