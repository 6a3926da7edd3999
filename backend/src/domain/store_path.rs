//! Slash-delimited addresses into the hierarchical record store.

use std::fmt;

use super::{Collection, EntityId};

/// Field holding a record's display name.
pub const NAME_FIELD: &str = "NAME";

/// Address of a node in the store, e.g. `Student/S1/NAME`.
///
/// Paths are only built from a [`Collection`] and a validated [`EntityId`],
/// so every segment is guaranteed free of separators.
///
/// # Examples
/// ```
/// use records_backend::domain::{Collection, EntityId, StorePath};
///
/// let id = EntityId::new("S1").unwrap();
/// let path = StorePath::record(Collection::Student, &id).child("NAME");
/// assert_eq!(path.as_str(), "Student/S1/NAME");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorePath(String);

impl StorePath {
    /// Path of a whole record.
    pub fn record(collection: Collection, id: &EntityId) -> Self {
        Self(format!("{collection}/{id}"))
    }

    /// Path of a named child node.
    #[must_use]
    pub fn child(&self, field: &str) -> Self {
        Self(format!("{}/{field}", self.0))
    }

    /// Borrow the joined path.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Iterate over the path segments from the root.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
