//! Port for the hierarchical JSON record store.
//!
//! The store is a single JSON tree addressed by slash-delimited
//! [`StorePath`]s. Every call presents the caller's bearer token; the store
//! decides whether that token grants access.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::{BearerToken, StorePath};

use super::define_port_error;

define_port_error! {
    /// Errors raised by record store adapters.
    pub enum RecordStoreError {
        /// The store refused the presented token.
        Unauthorized { message: String } => "record store refused credentials: {message}",
        /// The store could not be reached or answered unexpectedly.
        Transport { message: String } => "record store unreachable: {message}",
        /// The store answered with a body that could not be decoded.
        Decode { message: String } => "record store response malformed: {message}",
    }
}

/// Read and write access to the record tree.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read the subtree at `path`, or `None` when nothing is stored there.
    async fn get(
        &self,
        path: &StorePath,
        token: Option<&BearerToken>,
    ) -> Result<Option<Value>, RecordStoreError>;

    /// Replace the subtree at `path` with `value`.
    async fn set(
        &self,
        path: &StorePath,
        value: &Value,
        token: Option<&BearerToken>,
    ) -> Result<(), RecordStoreError>;

    /// Remove the subtree at `path`. Removing an absent path succeeds.
    async fn remove(
        &self,
        path: &StorePath,
        token: Option<&BearerToken>,
    ) -> Result<(), RecordStoreError>;
}

/// In-memory record store used when no remote endpoint is configured.
///
/// Mirrors the hosted store's rules: any token is accepted, a missing token
/// is refused, empty objects are pruned after removal.
#[derive(Debug)]
pub struct InMemoryRecordStore {
    root: Mutex<Value>,
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self {
            root: Mutex::new(Value::Object(Map::new())),
        }
    }
}

impl InMemoryRecordStore {
    fn authorise(token: Option<&BearerToken>) -> Result<(), RecordStoreError> {
        match token {
            Some(_) => Ok(()),
            None => Err(RecordStoreError::unauthorized("auth token required")),
        }
    }

    fn root(&self) -> Result<MutexGuard<'_, Value>, RecordStoreError> {
        self.root
            .lock()
            .map_err(|_| RecordStoreError::transport("record tree lock poisoned"))
    }
}

fn lookup<'a>(root: &'a Value, path: &StorePath) -> Option<&'a Value> {
    path.segments()
        .try_fold(root, |node, segment| node.as_object()?.get(segment))
}

fn insert(root: &mut Value, path: &StorePath, value: Value) {
    let segments: Vec<&str> = path.segments().collect();
    let Some((leaf, parents)) = segments.split_last() else {
        return;
    };
    let mut node = root;
    for segment in parents {
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        let Value::Object(map) = node else {
            return;
        };
        node = map
            .entry((*segment).to_owned())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    if let Value::Object(map) = node {
        map.insert((*leaf).to_owned(), value);
    }
}

/// Remove the node at `segments` and prune parents left empty.
fn prune(node: &mut Value, segments: &[&str]) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };
    let Value::Object(map) = node else {
        return;
    };
    if rest.is_empty() {
        map.remove(*head);
        return;
    }
    let emptied = match map.get_mut(*head) {
        Some(child) => {
            prune(child, rest);
            child.as_object().is_some_and(Map::is_empty)
        }
        None => false,
    };
    if emptied {
        map.remove(*head);
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn get(
        &self,
        path: &StorePath,
        token: Option<&BearerToken>,
    ) -> Result<Option<Value>, RecordStoreError> {
        Self::authorise(token)?;
        let root = self.root()?;
        Ok(lookup(&root, path).filter(|value| !value.is_null()).cloned())
    }

    async fn set(
        &self,
        path: &StorePath,
        value: &Value,
        token: Option<&BearerToken>,
    ) -> Result<(), RecordStoreError> {
        Self::authorise(token)?;
        let mut root = self.root()?;
        if value.is_null() {
            let segments: Vec<&str> = path.segments().collect();
            prune(&mut root, &segments);
        } else {
            insert(&mut root, path, value.clone());
        }
        Ok(())
    }

    async fn remove(
        &self,
        path: &StorePath,
        token: Option<&BearerToken>,
    ) -> Result<(), RecordStoreError> {
        Self::authorise(token)?;
        let mut root = self.root()?;
        let segments: Vec<&str> = path.segments().collect();
        prune(&mut root, &segments);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;
    use crate::domain::{Collection, EntityId};

    #[fixture]
    fn token() -> BearerToken {
        BearerToken::new("fixture-token").expect("token")
    }

    fn student_path(id: &str) -> StorePath {
        StorePath::record(Collection::Student, &EntityId::new(id).expect("id"))
    }

    #[rstest]
    #[tokio::test]
    async fn set_then_get_reads_subtree_and_children(token: BearerToken) {
        let store = InMemoryRecordStore::default();
        let path = student_path("S1");
        store
            .set(&path, &json!({ "NAME": "Asha" }), Some(&token))
            .await
            .expect("set");

        let whole = store.get(&path, Some(&token)).await.expect("get");
        assert_eq!(whole, Some(json!({ "NAME": "Asha" })));
        let name = store
            .get(&path.child("NAME"), Some(&token))
            .await
            .expect("get name");
        assert_eq!(name, Some(json!("Asha")));
    }

    #[rstest]
    #[tokio::test]
    async fn remove_prunes_empty_collection(token: BearerToken) {
        let store = InMemoryRecordStore::default();
        let path = student_path("S1");
        store
            .set(&path, &json!({ "NAME": "Asha" }), Some(&token))
            .await
            .expect("set");
        store.remove(&path, Some(&token)).await.expect("remove");

        assert_eq!(store.get(&path, Some(&token)).await.expect("get"), None);
        let root = store.root().expect("lock");
        assert_eq!(*root, json!({}));
    }

    #[rstest]
    #[tokio::test]
    async fn removing_absent_path_succeeds(token: BearerToken) {
        let store = InMemoryRecordStore::default();
        store
            .remove(&student_path("ghost"), Some(&token))
            .await
            .expect("remove absent");
    }

    #[rstest]
    #[tokio::test]
    async fn missing_token_is_refused() {
        let store = InMemoryRecordStore::default();
        let err = store
            .get(&student_path("S1"), None)
            .await
            .expect_err("unauthorised");
        assert!(matches!(err, RecordStoreError::Unauthorized { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn writing_null_deletes(token: BearerToken) {
        let store = InMemoryRecordStore::default();
        let path = student_path("S1");
        store
            .set(&path, &json!({ "NAME": "Asha" }), Some(&token))
            .await
            .expect("set");
        store
            .set(&path, &Value::Null, Some(&token))
            .await
            .expect("set null");
        assert_eq!(store.get(&path, Some(&token)).await.expect("get"), None);
    }
}
