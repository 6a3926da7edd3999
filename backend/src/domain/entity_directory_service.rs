//! Entity directory service backed by the record store port.
//!
//! Creation is check-then-write against a store with no conditional writes.
//! Concurrent creates of the same path inside this process are serialised by
//! a per-path async lock; writers in other processes can still race.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::{error, info, warn};

use crate::domain::ports::{
    EntityAction, EntityDirectory, EntityOutcome, RecordStore, RecordStoreError,
};
use crate::domain::{
    BearerToken, Collection, EntityId, EntityRecord, Error, NAME_FIELD, NewEntity, StorePath,
};

fn map_store_error(error: RecordStoreError) -> Error {
    match error {
        RecordStoreError::Unauthorized { message } => {
            warn!(%message, "record store refused credentials");
            Error::unauthorized("record store refused credentials; login again")
        }
        RecordStoreError::Transport { message } | RecordStoreError::Decode { message } => {
            error!(%message, "record store call failed");
            Error::upstream(format!("record store unavailable: {message}"))
        }
    }
}

/// Name stored at `{path}/NAME`, rendered as text.
fn stored_name(value: Option<Value>) -> String {
    match value {
        Some(Value::String(name)) => name,
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Per-path locks serialising concurrent creates.
#[derive(Debug, Default)]
struct CreationLocks {
    slots: Mutex<HashMap<StorePath, Arc<AsyncMutex<()>>>>,
}

impl CreationLocks {
    async fn acquire(&self, path: &StorePath) -> OwnedMutexGuard<()> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.retain(|key, slot| key == path || Arc::strong_count(slot) > 1);
            Arc::clone(slots.entry(path.clone()).or_default())
        };
        slot.lock_owned().await
    }
}

/// Entity directory delegating to a [`RecordStore`].
pub struct EntityDirectoryService<S: ?Sized> {
    store: Arc<S>,
    creation_locks: CreationLocks,
}

impl<S: ?Sized> EntityDirectoryService<S> {
    /// Create a directory over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            creation_locks: CreationLocks::default(),
        }
    }
}

#[async_trait]
impl<S> EntityDirectory for EntityDirectoryService<S>
where
    S: RecordStore + ?Sized,
{
    async fn create_entity(
        &self,
        token: &BearerToken,
        entity: NewEntity,
    ) -> Result<EntityOutcome, Error> {
        let collection = entity.collection();
        let path = StorePath::record(collection, entity.id());
        let _guard = self.creation_locks.acquire(&path).await;

        let existing = self
            .store
            .get(&path, Some(token))
            .await
            .map_err(map_store_error)?;
        if existing.is_some() {
            warn!(%path, "refusing to overwrite existing record");
            return Err(Error::already_exists(format!(
                "{collection} {} already exists",
                entity.id()
            ))
            .with_details(json!({
                "collection": collection,
                "id": entity.id().as_str(),
            })));
        }

        let value = entity
            .record()
            .to_value()
            .map_err(|err| Error::internal(format!("failed to encode record: {err}")))?;
        self.store
            .set(&path, &value, Some(token))
            .await
            .map_err(map_store_error)?;

        let name = entity.record().display_name().to_owned();
        info!(%path, %name, "record added");
        Ok(EntityOutcome::new(
            EntityAction::Added,
            collection,
            entity.id().clone(),
            name,
        ))
    }

    async fn read_entity(
        &self,
        token: &BearerToken,
        collection: Collection,
        id: &EntityId,
    ) -> Result<EntityRecord, Error> {
        let path = StorePath::record(collection, id);
        let value = self
            .store
            .get(&path, Some(token))
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("{collection} {id} not found")))?;
        EntityRecord::from_value(collection, value).map_err(|err| {
            error!(%path, %err, "stored record does not match its collection");
            Error::upstream(format!("stored {collection} {id} is malformed: {err}"))
        })
    }

    async fn delete_entity(
        &self,
        token: &BearerToken,
        collection: Collection,
        id: &EntityId,
    ) -> Result<EntityOutcome, Error> {
        let path = StorePath::record(collection, id);
        let name = stored_name(
            self.store
                .get(&path.child(NAME_FIELD), Some(token))
                .await
                .map_err(map_store_error)?,
        );
        self.store
            .remove(&path, Some(token))
            .await
            .map_err(map_store_error)?;

        if name.is_empty() {
            warn!(%path, "removed record without a stored name");
        } else {
            info!(%path, %name, "record removed");
        }
        Ok(EntityOutcome::new(
            EntityAction::Removed,
            collection,
            id.clone(),
            name,
        ))
    }
}

#[cfg(test)]
#[path = "entity_directory_service_tests.rs"]
mod tests;
