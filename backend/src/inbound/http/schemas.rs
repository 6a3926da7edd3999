//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their structure and are registered with utoipa so
//! handlers can reference them in `#[utoipa::path]` annotations.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Credentials were not submitted as a form post.
    #[schema(rename = "method_not_allowed")]
    MethodNotAllowed,
    /// The email is already registered.
    #[schema(rename = "credential_conflict")]
    CredentialConflict,
    /// The password fails the provider's strength policy.
    #[schema(rename = "weak_credential")]
    WeakCredential,
    /// No account matches the email.
    #[schema(rename = "unknown_identity")]
    UnknownIdentity,
    /// The password does not match.
    #[schema(rename = "invalid_credential")]
    InvalidCredential,
    /// The session holds no usable token.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// A record already exists at the identifier.
    #[schema(rename = "already_exists")]
    AlreadyExists,
    /// The record does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The identity provider or record store failed.
    #[schema(rename = "upstream_error")]
    UpstreamError,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "already_exists")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Student S1 already exists")]
    message: String,
    /// Correlation identifier matching the `trace-id` response header.
    #[schema(example = "6f0d8a8e-2a5c-4c1e-9a44-0d7f1f7d2b11")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}
