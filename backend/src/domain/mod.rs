//! Domain primitives, ports, and services.
//!
//! Purpose: Define strongly typed values shared by the inbound and outbound
//! adapters and the services that implement the driving ports. Types are
//! immutable once validated; invariants and serialisation contracts are
//! documented on each type.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Credentials, BearerToken, IssuedToken: authentication values.
//! - SessionToken: the session record and its expiry rule.
//! - Collection, EntityId, EntityRecord, NewEntity: directory records.
//! - StorePath: addresses into the record store.
//! - SessionAuthenticator, EntityDirectoryService: driving port services.

pub mod auth;
pub mod entity;
pub mod entity_directory_service;
pub mod error;
pub mod ports;
pub mod session;
pub mod session_authenticator;
pub mod store_path;
pub mod trace_id;

pub use self::auth::{
    BearerToken, Credentials, CredentialsValidationError, EmptyTokenError, IssuedToken,
};
pub use self::entity::{
    Collection, EmergencyContact, EntityId, EntityIdValidationError, EntityRecord,
    EntityRecordValidationError, FacultyRecord, NewEntity, StudentRecord,
};
pub use self::entity_directory_service::EntityDirectoryService;
pub use self::error::{Error, ErrorCode};
pub use self::session::SessionToken;
pub use self::session_authenticator::SessionAuthenticator;
pub use self::store_path::{NAME_FIELD, StorePath};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
