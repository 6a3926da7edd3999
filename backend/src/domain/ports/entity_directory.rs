//! Driving port for creating, reading, and deleting entity records.
//!
//! Every operation takes the caller's [`BearerToken`] by reference, so an
//! adapter cannot reach the record store without first resolving one from
//! the session.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{BearerToken, Collection, EntityId, EntityRecord, Error, NewEntity};

/// Mutation performed on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityAction {
    /// A new record was written.
    Added,
    /// A record was deleted.
    Removed,
}

impl fmt::Display for EntityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Added => "Added",
            Self::Removed => "Removed",
        })
    }
}

/// Result of a successful create or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityOutcome {
    action: EntityAction,
    collection: Collection,
    id: EntityId,
    name: String,
}

impl EntityOutcome {
    /// Describe a completed mutation.
    pub fn new(
        action: EntityAction,
        collection: Collection,
        id: EntityId,
        name: impl Into<String>,
    ) -> Self {
        Self {
            action,
            collection,
            id,
            name: name.into(),
        }
    }

    /// Mutation that was performed.
    pub fn action(&self) -> EntityAction {
        self.action
    }

    /// Collection the record belongs to.
    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Identifier of the affected record.
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// Display name of the record; empty when a deleted record had none.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Human-readable confirmation, e.g. `Added Student: Asha`.
    ///
    /// # Examples
    /// ```
    /// use records_backend::domain::{Collection, EntityId};
    /// use records_backend::domain::ports::{EntityAction, EntityOutcome};
    ///
    /// let id = EntityId::new("S1").unwrap();
    /// let outcome = EntityOutcome::new(EntityAction::Removed, Collection::Student, id, "Asha");
    /// assert_eq!(outcome.message(), "Removed Student: Asha");
    /// ```
    pub fn message(&self) -> String {
        format!("{} {}: {}", self.action, self.collection, self.name)
    }
}

/// Domain use-case port for the record directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntityDirectory: Send + Sync {
    /// Create a record, refusing to overwrite an existing one.
    async fn create_entity(
        &self,
        token: &BearerToken,
        entity: NewEntity,
    ) -> Result<EntityOutcome, Error>;

    /// Read a record.
    async fn read_entity(
        &self,
        token: &BearerToken,
        collection: Collection,
        id: &EntityId,
    ) -> Result<EntityRecord, Error>;

    /// Delete a record, reporting the name it had.
    async fn delete_entity(
        &self,
        token: &BearerToken,
        collection: Collection,
        id: &EntityId,
    ) -> Result<EntityOutcome, Error>;
}
