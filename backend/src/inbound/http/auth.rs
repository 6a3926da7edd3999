//! Sign-up, sign-in, and sign-out handlers.
//!
//! ```text
//! POST /Signup/  EMAIL=admin@college.edu&PASSWORD=hunter22
//! POST /Login/   EMAIL=admin@college.edu&PASSWORD=hunter22
//! POST /Logout/
//! ```
//!
//! Credentials are only accepted as a form post; any other method is refused
//! before the identity provider is contacted.

use actix_web::{HttpRequest, HttpResponse, error::UrlencodedError, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Credentials, CredentialsValidationError, Error, IssuedToken, SessionToken};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Form body for `POST /Signup/` and `POST /Login/`.
#[derive(Default, Deserialize, utoipa::ToSchema)]
pub struct CredentialsForm {
    /// Account email; surrounding whitespace is trimmed.
    #[serde(rename = "EMAIL", default)]
    #[schema(example = "admin@college.edu")]
    pub email: String,
    /// Account password, kept verbatim.
    #[serde(rename = "PASSWORD", default)]
    #[schema(format = Password)]
    pub password: String,
}

impl TryFrom<CredentialsForm> for Credentials {
    type Error = CredentialsValidationError;

    fn try_from(value: CredentialsForm) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Token issued by a successful sign-up or sign-in.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Bearer token now bound to the session.
    pub id_token: String,
    /// Token lifetime in seconds, when the provider reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

impl From<&IssuedToken> for TokenResponse {
    fn from(issued: &IssuedToken) -> Self {
        Self {
            id_token: issued.token().as_str().to_owned(),
            expires_in: issued.expires_in().map(|ttl| ttl.as_secs()),
        }
    }
}

fn map_credentials_validation_error(err: CredentialsValidationError) -> Error {
    let field = match err {
        CredentialsValidationError::EmptyEmail => "EMAIL",
        CredentialsValidationError::EmptyPassword => "PASSWORD",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

/// Form extractor settings mapping malformed bodies to `invalid_request`.
pub fn credentials_form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err: UrlencodedError, _req: &HttpRequest| {
        Error::invalid_request(format!("invalid form body: {err}")).into()
    })
}

fn bind_session(
    state: &HttpState,
    session: &SessionContext,
    issued: &IssuedToken,
) -> ApiResult<web::Json<TokenResponse>> {
    let now = state.clock.utc();
    session.persist_token(SessionToken::issue(issued, now), now)?;
    Ok(web::Json(TokenResponse::from(issued)))
}

/// Create an account and bind its token to the session.
#[utoipa::path(
    post,
    path = "/Signup/",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Account created", body = TokenResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 405, description = "Not a form post", body = ErrorSchema),
        (status = 409, description = "Email already exists", body = ErrorSchema),
        (status = 422, description = "Password is too weak", body = ErrorSchema),
        (status = 502, description = "Identity provider failure", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signUp",
    security([])
)]
pub async fn sign_up(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<CredentialsForm>,
) -> ApiResult<web::Json<TokenResponse>> {
    let credentials =
        Credentials::try_from(form.into_inner()).map_err(map_credentials_validation_error)?;
    let issued = state.authenticator.sign_up(&credentials).await?;
    bind_session(&state, &session, &issued)
}

/// Sign in and bind the issued token to the session.
#[utoipa::path(
    post,
    path = "/Login/",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Signed in", body = TokenResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid password", body = ErrorSchema),
        (status = 404, description = "Unknown email", body = ErrorSchema),
        (status = 405, description = "Not a form post", body = ErrorSchema),
        (status = 502, description = "Identity provider failure", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signIn",
    security([])
)]
pub async fn sign_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<CredentialsForm>,
) -> ApiResult<web::Json<TokenResponse>> {
    let credentials =
        Credentials::try_from(form.into_inner()).map_err(map_credentials_validation_error)?;
    let issued = state.authenticator.sign_in(&credentials).await?;
    bind_session(&state, &session, &issued)
}

/// Revoke the session and its token.
#[utoipa::path(
    post,
    path = "/Logout/",
    responses(
        (status = 204, description = "Session cleared"),
        (status = 405, description = "Not a post", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signOut"
)]
pub async fn sign_out(session: SessionContext) -> HttpResponse {
    session.sign_out();
    HttpResponse::NoContent().finish()
}

/// Fallback for credential endpoints hit with anything but `POST`.
pub async fn credentials_method_not_allowed() -> ApiResult<HttpResponse> {
    Err(Error::method_not_allowed(
        "resubmit as a POST form with EMAIL and PASSWORD fields",
    ))
}

/// Fallback for `/Logout/` hit with anything but `POST`.
pub async fn logout_method_not_allowed() -> ApiResult<HttpResponse> {
    Err(Error::method_not_allowed("sign out with a POST request"))
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
