//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the schema wrappers for domain
//! errors, and the session cookie security scheme. Swagger UI serves it in
//! debug builds.

use crate::inbound::http::auth::{CredentialsForm, TokenResponse};
use crate::inbound::http::entities::{EntityOutcomeResponse, EntityRecordResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /Signup/ or POST /Login/.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "College records API",
        description = "Session-authenticated access to student and faculty records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::sign_up,
        crate::inbound::http::auth::sign_in,
        crate::inbound::http::auth::sign_out,
        crate::inbound::http::entities::add_student,
        crate::inbound::http::entities::get_student,
        crate::inbound::http::entities::delete_student,
        crate::inbound::http::entities::add_faculty,
        crate::inbound::http::entities::get_faculty,
        crate::inbound::http::entities::delete_faculty,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CredentialsForm,
        TokenResponse,
        EntityOutcomeResponse,
        EntityRecordResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "auth", description = "Account sign-up, sign-in, and sign-out"),
        (name = "students", description = "Student records"),
        (name = "faculty", description = "Faculty records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
