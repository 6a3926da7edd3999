//! Entity records kept in the remote store.
//!
//! Records are grouped into collections and addressed as
//! `{Collection}/{ID}/{Field}`. Field names are upper-case on the wire
//! because that is the layout already present in deployed stores.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Top-level grouping of records in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    /// Enrolled students.
    Student,
    /// Teaching and administrative staff.
    Faculty,
}

impl Collection {
    /// Path segment naming the collection.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Faculty => "Faculty",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Characters that would let an identifier address a different store node.
const RESERVED_ID_CHARS: [char; 6] = ['/', '.', '#', '$', '[', ']'];

/// Validation errors raised while building an [`EntityId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityIdValidationError {
    /// Identifier was blank.
    #[error("ID must not be empty")]
    Empty,
    /// Identifier has leading or trailing whitespace.
    #[error("ID must not contain surrounding whitespace")]
    SurroundingWhitespace,
    /// Identifier contains a path-significant character.
    #[error("ID must not contain '{character}'")]
    ReservedCharacter { character: char },
}

/// Identifier of a record, unique within its collection.
///
/// ## Invariants
/// - non-empty, no surrounding whitespace
/// - contains none of `/ . # $ [ ]`, so it is always exactly one path segment
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId(String);

impl EntityId {
    /// Validate a raw identifier.
    ///
    /// # Examples
    /// ```
    /// use records_backend::domain::EntityId;
    ///
    /// assert!(EntityId::new("CS2024001").is_ok());
    /// assert!(EntityId::new("S1/NAME").is_err());
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, EntityIdValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(EntityIdValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(EntityIdValidationError::SurroundingWhitespace);
        }
        if let Some(character) = raw.chars().find(|c| RESERVED_ID_CHARS.contains(c)) {
            return Err(EntityIdValidationError::ReservedCharacter { character });
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Person to contact in an emergency, nested under a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct EmergencyContact {
    /// Contact's full name.
    pub name: String,
    /// Contact's mobile number.
    pub mobile: String,
    /// Relationship to the student.
    pub relationship: String,
}

/// Student record as stored under `Student/{ID}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct StudentRecord {
    /// Full name, used as the display name.
    pub name: String,
    /// Mobile number.
    pub mobile: String,
    /// Date of birth as submitted.
    pub dob: String,
    /// Gender as submitted.
    pub gender: String,
    /// Admission category.
    pub category: String,
    /// Branch of study.
    pub branch: String,
    /// Nested emergency contact.
    pub emergency_contact: EmergencyContact,
}

/// Faculty record as stored under `Faculty/{ID}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct FacultyRecord {
    /// Full name, used as the display name.
    pub name: String,
    /// Mobile number.
    pub mobile: String,
    /// Date of birth as submitted.
    pub dob: String,
    /// Gender as submitted.
    pub gender: String,
    /// Staff access identifier.
    pub access_id: String,
}

/// Validation errors raised by [`EntityRecord::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityRecordValidationError {
    /// The display name is blank.
    #[error("NAME must not be empty")]
    EmptyName,
}

/// A record of any supported collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRecord {
    /// Record in the `Student` collection.
    Student(StudentRecord),
    /// Record in the `Faculty` collection.
    Faculty(FacultyRecord),
}

impl EntityRecord {
    /// Collection the record belongs to.
    pub fn collection(&self) -> Collection {
        match self {
            Self::Student(_) => Collection::Student,
            Self::Faculty(_) => Collection::Faculty,
        }
    }

    /// Display name used in outcome messages.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Student(record) => record.name.as_str(),
            Self::Faculty(record) => record.name.as_str(),
        }
    }

    /// Check the invariants a record must hold before it is written.
    pub fn validate(&self) -> Result<(), EntityRecordValidationError> {
        if self.display_name().trim().is_empty() {
            return Err(EntityRecordValidationError::EmptyName);
        }
        Ok(())
    }

    /// Encode the record as the JSON tree written to the store.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::Student(record) => serde_json::to_value(record),
            Self::Faculty(record) => serde_json::to_value(record),
        }
    }

    /// Decode a stored JSON tree as a record of `collection`.
    pub fn from_value(collection: Collection, value: Value) -> Result<Self, serde_json::Error> {
        match collection {
            Collection::Student => serde_json::from_value(value).map(Self::Student),
            Collection::Faculty => serde_json::from_value(value).map(Self::Faculty),
        }
    }
}

/// A validated request to create a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntity {
    id: EntityId,
    record: EntityRecord,
}

impl NewEntity {
    /// Pair an identifier with its record, validating the record.
    pub fn new(id: EntityId, record: EntityRecord) -> Result<Self, EntityRecordValidationError> {
        record.validate()?;
        Ok(Self { id, record })
    }

    /// Identifier the record will be stored under.
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// Record to write.
    pub fn record(&self) -> &EntityRecord {
        &self.record
    }

    /// Collection the record belongs to.
    pub fn collection(&self) -> Collection {
        self.record.collection()
    }
}
